//! Date tokens of fust receipts, e.g. `5-mrt-24 14:30 uur`.
//!
//! Receipts print dates with a Dutch month abbreviation, a two-digit year and
//! local time at UTC+02:00. A token that does not resolve is simply absent;
//! it is never an error.

use chrono::{Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

use super::FieldExtractor;
use super::patterns::{CREATION_DATE, DATE_PARTS, DATE_TOKEN, HOUR_SUFFIX};
use crate::models::transaction::Timestamp;

/// Offset of the receipts' local time, in seconds east of UTC.
pub const RECEIPT_UTC_OFFSET_SECS: i32 = 2 * 3600;

/// Two-digit years are counted from this one.
const CENTURY: i32 = 2000;

/// Dutch month abbreviations, January first.
const DUTCH_MONTHS: [&str; 12] = [
    "jan", "feb", "mrt", "apr", "mei", "jun", "jul", "aug", "sep", "okt", "nov", "dec",
];

/// English month abbreviations, January first.
const ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const RECEIPT_OFFSET: FixedOffset = match FixedOffset::east_opt(RECEIPT_UTC_OFFSET_SECS) {
    Some(offset) => offset,
    None => panic!("receipt offset out of range"),
};

/// Offset receipt timestamps are expressed in.
pub fn receipt_offset() -> FixedOffset {
    RECEIPT_OFFSET
}

/// Date field extractor: resolves the first date token in a text.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = Timestamp;

    /// Only the first token counts; if it does not resolve, there is no date.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE_TOKEN
            .captures(text)
            .and_then(|caps| parse_date_token(&caps[1]))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_TOKEN
            .captures_iter(text)
            .filter_map(|caps| parse_date_token(&caps[1]))
            .collect()
    }
}

/// Resolve the creation date, printed glued onto its label.
pub fn extract_creation_date(text: &str) -> Option<Timestamp> {
    CREATION_DATE
        .captures(text)
        .and_then(|caps| parse_date_token(&caps[1]))
}

/// Resolve a `D-MON-YY HH:MM[ uur]` token to a timestamp at UTC+02:00.
pub fn parse_date_token(token: &str) -> Option<Timestamp> {
    let cleaned = HOUR_SUFFIX.replace(token, "");
    let caps = DATE_PARTS.captures(cleaned.trim())?;

    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    let year: i32 = CENTURY + caps[3].parse::<i32>().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;

    let local = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, 0)?;
    RECEIPT_OFFSET.from_local_datetime(&local).single()
}

/// Render a timestamp back into the receipt token layout.
pub fn format_date_token(timestamp: &Timestamp) -> String {
    let local = timestamp.with_timezone(&RECEIPT_OFFSET);
    format!(
        "{}-{}-{:02} {:02}:{:02} uur",
        local.day(),
        DUTCH_MONTHS[local.month0() as usize],
        local.year().rem_euclid(100),
        local.hour(),
        local.minute()
    )
}

/// Month number for a Dutch abbreviation. English abbreviations are accepted
/// too, by their first three letters.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();

    if let Some(idx) = DUTCH_MONTHS.iter().position(|m| *m == lower) {
        return Some(idx as u32 + 1);
    }

    let prefix = lower.get(..3)?;
    ENGLISH_MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}
