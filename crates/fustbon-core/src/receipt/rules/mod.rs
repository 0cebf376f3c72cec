//! Rule-based field extractors for fust receipts.

pub mod dates;
pub mod line_items;
pub mod patterns;
pub mod quantities;

pub use dates::{extract_creation_date, format_date_token, parse_date_token, DateExtractor};
pub use line_items::{data_section, line_items, parse_line_item, LineItemExtractor, LineItems};
pub use quantities::{format_quantity, parse_quantity};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
