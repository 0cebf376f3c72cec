//! Field extraction for issue (BON UITGIFTE) and intake (BON INNAME) receipts.
//!
//! Layout, as produced by text extraction:
//!
//! ```text
//! BON UITGIFTE          <- type anchor
//! 70012345              <- transaction number
//! Aalsmeer              <- location
//! ...
//! 104711                <- customer number, above its label
//! Klantnummer
//! KlantnaamBloemen BV   <- customer name glued onto its label
//! ```

use super::cursor::{InlineRule, LineCursor, LineRule, Offset};
use super::fields::CORRECTION_REASON;
use super::rules::patterns::{CARD_NUMBER, CUSTOMER_NAME, CUSTOMER_NUMBER_LABEL};
use super::{Result, ShapeFields};
use crate::error::ParseError;
use crate::models::transaction::{Counterparty, TwoPartyFields};

const CUSTOMER_NUMBER: LineRule =
    LineRule::new("customer_number", CUSTOMER_NUMBER_LABEL, Offset::Before);

fn customer_name_rule() -> InlineRule {
    InlineRule::new("customer_name", &CUSTOMER_NAME)
}

fn card_number_rule() -> InlineRule {
    InlineRule::new("card_number", &CARD_NUMBER)
}

/// Extract the fields of a two-party receipt whose type anchor is `anchor`.
pub(crate) fn extract(
    cursor: &LineCursor<'_>,
    anchor: &'static str,
) -> Result<ShapeFields<TwoPartyFields>> {
    let transaction_number = LineRule::new("transaction_number", anchor, Offset::After(1));
    let location = LineRule::new("location", anchor, Offset::After(2));

    let transaction_number = cursor
        .read(&transaction_number)
        .ok_or(ParseError::MissingField("transaction_number"))?;

    let fields = TwoPartyFields {
        location: cursor.read(&location).map(str::to_string),
        customer: Counterparty {
            code: cursor.read(&CUSTOMER_NUMBER).map(str::to_string),
            name: cursor.capture(&customer_name_rule()).map(str::to_string),
        },
        card_number: cursor.capture(&card_number_rule()).map(str::to_string),
    };

    Ok(ShapeFields {
        transaction_number: transaction_number.to_string(),
        fields,
        correction_reason: cursor.read(&CORRECTION_REASON).map(str::to_string),
    })
}
