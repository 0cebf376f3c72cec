//! Rules shared by both receipt layouts.

use super::cursor::{Guard, InlineRule, LineCursor, LineRule, Offset};
use super::rules::patterns::{
    COLUMN_HEADER, CORRECTION_REASON_LABEL, CUSTOMER_NAME_LABEL, RELATED_TRANSACTION_LABEL,
    REMARKS, REMARKS_BOILERPLATE, TRANSACTION_NUMBER_LABEL,
};
use super::rules::{extract_creation_date, DateExtractor, FieldExtractor};
use crate::models::transaction::Timestamp;

/// Carrier: below the transaction-number label, unless that line is the
/// table header or the glued customer-name line.
pub const CARRIER: LineRule =
    LineRule::new("carrier", TRANSACTION_NUMBER_LABEL, Offset::After(1)).guarded(CARRIER_GUARDS);

const CARRIER_GUARDS: &[Guard] = &[
    Guard::NotEqual(COLUMN_HEADER),
    Guard::NotPrefixed(CUSTOMER_NAME_LABEL),
];

/// Related transaction: usually blank, so only a number is accepted.
pub const RELATED_TRANSACTION: LineRule =
    LineRule::new("related_transaction_number", RELATED_TRANSACTION_LABEL, Offset::After(1))
        .guarded(DIGITS_ONLY);

/// Correction reason: usually blank, in which case the next line is a fust line.
pub const CORRECTION_REASON: LineRule =
    LineRule::new("correction_reason", CORRECTION_REASON_LABEL, Offset::After(1))
        .guarded(NOT_A_LINE_ITEM);

const DIGITS_ONLY: &[Guard] = &[Guard::AllDigits];

const NOT_A_LINE_ITEM: &[Guard] = &[Guard::NotLineItem];

const REMARKS_GUARDS: &[Guard] = &[
    Guard::NotContaining(REMARKS_BOILERPLATE[0]),
    Guard::NotContaining(REMARKS_BOILERPLATE[1]),
];

/// Remarks: printed in front of their label; the disclaimer also mentions
/// the label, so its wording is rejected.
pub fn remarks_rule() -> InlineRule {
    InlineRule::new("remarks", &REMARKS).guarded(REMARKS_GUARDS)
}

/// Fields both layouts carry in the same place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonFields {
    pub carrier: Option<String>,
    pub transaction_timestamp: Option<Timestamp>,
    pub creation_timestamp: Option<Timestamp>,
    pub related_transaction_number: Option<String>,
    pub remarks: Option<String>,
}

pub fn extract_common(cursor: &LineCursor<'_>) -> CommonFields {
    CommonFields {
        carrier: cursor.read(&CARRIER).map(str::to_string),
        transaction_timestamp: DateExtractor::new().extract(cursor.text()),
        creation_timestamp: extract_creation_date(cursor.text()),
        related_transaction_number: cursor.read(&RELATED_TRANSACTION).map(str::to_string),
        remarks: cursor.capture(&remarks_rule()).map(str::to_string),
    }
}
