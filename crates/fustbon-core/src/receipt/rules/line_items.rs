//! Fust line extraction.
//!
//! A fust line reads `520 Bloemendoos 19cm726`: a three-digit code, a space,
//! the description, and the piece count glued onto the description. The count
//! is the longest numeric run at the end of the line; everything before it is
//! the description.

use std::str::Lines;

use super::FieldExtractor;
use super::patterns::{LINE_ITEM, TRAILER};
use super::quantities::parse_quantity;
use crate::models::transaction::LineItem;

/// Part of the receipt that holds the fust lines: everything before the
/// disclaimer trailer, or the whole text when there is no such prefix.
pub fn data_section(text: &str) -> &str {
    match text.find(TRAILER) {
        Some(idx) if idx > 0 => &text[..idx],
        _ => text,
    }
}

/// Parse a single line as a fust line.
pub fn parse_line_item(line: &str) -> Option<LineItem> {
    let caps = LINE_ITEM.captures(line)?;
    let quantity = parse_quantity(&caps[3])?;

    Some(LineItem {
        code: caps[1].to_string(),
        description: caps[2].trim().to_string(),
        quantity,
    })
}

/// Lazy iterator over the fust lines of a text, in document order.
///
/// Cloning the iterator, or calling [`line_items`] again, restarts the scan.
#[derive(Debug, Clone)]
pub struct LineItems<'a> {
    lines: Lines<'a>,
}

impl Iterator for LineItems<'_> {
    type Item = LineItem;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.by_ref().find_map(parse_line_item)
    }
}

/// Scan `text` line by line for fust lines.
pub fn line_items(text: &str) -> LineItems<'_> {
    LineItems { lines: text.lines() }
}

/// Line item field extractor.
pub struct LineItemExtractor {
    strip_trailer: bool,
}

impl LineItemExtractor {
    pub fn new() -> Self {
        Self {
            strip_trailer: true,
        }
    }

    /// Set whether scanning stops at the disclaimer trailer.
    pub fn with_trailer_stripping(mut self, strip: bool) -> Self {
        self.strip_trailer = strip;
        self
    }

    /// The lines of `text` this extractor scans, as a restartable iterator.
    pub fn scan<'a>(&self, text: &'a str) -> LineItems<'a> {
        if self.strip_trailer {
            line_items(data_section(text))
        } else {
            line_items(text)
        }
    }
}

impl Default for LineItemExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for LineItemExtractor {
    type Output = LineItem;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.scan(text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.scan(text).collect()
    }
}
