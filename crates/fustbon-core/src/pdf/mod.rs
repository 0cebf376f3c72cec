//! Text extraction from receipt documents.
//!
//! The parser only ever sees the text these extractors return. Line breaks and
//! whitespace are passed through untouched, since every positional rule of the
//! receipt parser depends on them.

mod extractor;

pub use extractor::{PdfTextExtractor, PlainTextExtractor};

use crate::error::PdfError;

/// Result type for text extraction.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Turns raw document bytes into a single text blob.
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the document.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

impl<T: TextExtractor + ?Sized> TextExtractor for &T {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        (**self).extract_text(data)
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for Box<T> {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        (**self).extract_text(data)
    }
}
