//! Label literals and regex patterns of the fust receipt layouts.

use lazy_static::lazy_static;
use regex::Regex;

// Line labels, matched against a whole trimmed line
pub const CUSTOMER_NUMBER_LABEL: &str = "Klantnummer";
pub const CUSTOMER_NUMBER_FROM_LABEL: &str = "Klantnummer van";
pub const CUSTOMER_NUMBER_TO_LABEL: &str = "Klantnummer naar";
pub const TRANSACTION_NUMBER_LABEL: &str = "Transactienummer";
pub const RELATED_TRANSACTION_LABEL: &str = "Gerelateerd Tr.nr.";
pub const CORRECTION_REASON_LABEL: &str = "Correctie reden";

/// Column header of the fust table; extraction glues "Fustcode" and "Stuks".
pub const COLUMN_HEADER: &str = "FustcodeStuks";

/// Customer name label, printed with the name glued on.
pub const CUSTOMER_NAME_LABEL: &str = "Klantnaam";

/// Start of the disclaimer that closes the itemized part of a receipt.
pub const TRAILER: &str = "Deze bon is het bewijs";

/// Disclaimer fragments that must never be read as remarks.
pub const REMARKS_BOILERPLATE: [&str; 2] = ["Deze bon", "aangebracht"];

// Digits are ASCII only; inline captures stop at CR as well as LF
lazy_static! {
    // Fust line: code, description, quantity glued onto the description
    pub static ref LINE_ITEM: Regex = Regex::new(
        r"^([0-9]{3})\s+(.+?)(-?[0-9][0-9.,]*)$"
    ).unwrap();

    // A line that starts like a fust line
    pub static ref LINE_ITEM_PREFIX: Regex = Regex::new(
        r"^[0-9]{3}\s+"
    ).unwrap();

    // Date token, e.g. "5-mrt-24 14:30 uur"
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"([0-9]{1,2}-\w+-[0-9]{2}\s+[0-9]{2}:[0-9]{2}\s*uur)"
    ).unwrap();

    pub static ref DATE_PARTS: Regex = Regex::new(
        r"^([0-9]{1,2})-(\w+)-([0-9]{2})\s+([0-9]{2}):([0-9]{2})$"
    ).unwrap();

    pub static ref HOUR_SUFFIX: Regex = Regex::new(
        r"\s*uur$"
    ).unwrap();

    pub static ref CREATION_DATE: Regex = Regex::new(
        r"Creatiedatum([0-9]{1,2}-\w+-[0-9]{2}\s+[0-9]{2}:[0-9]{2}\s*uur)"
    ).unwrap();

    pub static ref CUSTOMER_NAME: Regex = Regex::new(
        r"Klantnaam([^\r\n]+)"
    ).unwrap();

    // The name label right after the column header holds the receiving
    // customer on a transfer receipt
    pub static ref CUSTOMER_NAME_AFTER_HEADER: Regex = Regex::new(
        r"FustcodeStuks\r?\nKlantnaam([^\r\n]+)"
    ).unwrap();

    // Card number (pasnummer): "F" + at least ten digits + suffix
    pub static ref CARD_NUMBER: Regex = Regex::new(
        r"(F[0-9]{10,}-\S+)"
    ).unwrap();

    // Remarks are printed before their label
    pub static ref REMARKS: Regex = Regex::new(
        r"([^\r\n]+?)Opmerkingen\s*:"
    ).unwrap();

    pub static ref ALL_DIGITS: Regex = Regex::new(
        r"^[0-9]+$"
    ).unwrap();
}
