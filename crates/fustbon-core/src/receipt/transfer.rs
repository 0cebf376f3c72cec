//! Field extraction for transfer receipts (FUSTBON Overboeking).
//!
//! Layout, as produced by text extraction:
//!
//! ```text
//! FUSTBON               <- type anchor
//! 80012345              <- transaction number
//! Kwekerij De Tuin      <- sending customer name
//! 1001                  <- sending customer number, above its label
//! Klantnummer van
//! Klantnummer naar
//! 2002                  <- receiving customer number, below its label
//! ...
//! FustcodeStuks
//! KlantnaamBloemen BV   <- receiving customer name
//! ```
//!
//! The name label also appears earlier as a bare column caption; only the one
//! directly under the table header carries the receiving customer.

use super::cursor::{Guard, InlineRule, LineCursor, LineRule, Offset};
use super::rules::patterns::{
    CORRECTION_REASON_LABEL, CUSTOMER_NAME_AFTER_HEADER, CUSTOMER_NUMBER_FROM_LABEL,
    CUSTOMER_NUMBER_TO_LABEL,
};
use super::{Result, ShapeFields};
use crate::error::ParseError;
use crate::models::transaction::{Counterparty, DocumentType, TransferFields};

const ANCHOR: &str = DocumentType::TransferReceipt.anchor();

const TRANSACTION_NUMBER: LineRule =
    LineRule::new("transaction_number", ANCHOR, Offset::After(1));

const FROM_NAME: LineRule = LineRule::new("counterparty_from_name", ANCHOR, Offset::After(2));

const FROM_NUMBER: LineRule =
    LineRule::new("counterparty_from_code", CUSTOMER_NUMBER_FROM_LABEL, Offset::Before);

const TO_NUMBER: LineRule =
    LineRule::new("counterparty_to_code", CUSTOMER_NUMBER_TO_LABEL, Offset::After(1));

/// On transfer receipts a blank correction reason is followed by the
/// receiving customer's label, which must not be taken for a reason.
const CORRECTION_REASON: LineRule =
    LineRule::new("correction_reason", CORRECTION_REASON_LABEL, Offset::After(1))
        .guarded(CORRECTION_GUARDS);

const CORRECTION_GUARDS: &[Guard] = &[
    Guard::NotEqual(CUSTOMER_NUMBER_TO_LABEL),
    Guard::NotLineItem,
];

fn to_name_rule() -> InlineRule {
    InlineRule::new("counterparty_to_name", &CUSTOMER_NAME_AFTER_HEADER)
}

/// Extract the fields of a transfer receipt.
pub(crate) fn extract(cursor: &LineCursor<'_>) -> Result<ShapeFields<TransferFields>> {
    let transaction_number = cursor
        .read(&TRANSACTION_NUMBER)
        .ok_or(ParseError::MissingField("transaction_number"))?;

    let fields = TransferFields {
        from: Counterparty {
            code: cursor.read(&FROM_NUMBER).map(str::to_string),
            name: cursor.read(&FROM_NAME).map(str::to_string),
        },
        to: Counterparty {
            code: cursor.read(&TO_NUMBER).map(str::to_string),
            name: cursor.capture(&to_name_rule()).map(str::to_string),
        },
    };

    Ok(ShapeFields {
        transaction_number: transaction_number.to_string(),
        fields,
        correction_reason: cursor.read(&CORRECTION_REASON).map(str::to_string),
    })
}
