//! Fust receipt parsing.

mod classifier;
pub mod cursor;
mod fields;
mod parser;
pub mod rules;
mod transfer;
mod two_party;

pub use classifier::classify;
pub use parser::FustbonParser;

use crate::error::ParseError;
use crate::models::transaction::ParsedTransaction;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Trait for receipt parsers working on extracted text.
pub trait ReceiptParser {
    /// Parse receipt text into a transaction.
    fn parse(&self, text: &str) -> Result<ParsedTransaction>;
}

/// What a layout-specific extractor reads besides the shared fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShapeFields<F> {
    pub transaction_number: String,
    pub fields: F,
    pub correction_reason: Option<String>,
}
