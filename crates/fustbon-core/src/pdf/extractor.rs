//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::debug;

use super::{Result, TextExtractor};
use crate::error::PdfError;
use crate::models::config::PdfConfig;

/// Text extractor for PDF receipts.
///
/// lopdf is used to open the document, reject empty ones, and strip
/// empty-password encryption; pdf-extract then produces the text.
#[derive(Debug, Clone)]
pub struct PdfTextExtractor {
    decrypt_empty_password: bool,
    min_text_length: usize,
}

impl PdfTextExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            decrypt_empty_password: true,
            min_text_length: 0,
        }
    }

    /// Create an extractor from the `pdf` configuration section.
    pub fn from_config(config: &PdfConfig) -> Self {
        Self::new()
            .with_empty_password_decryption(config.decrypt_empty_password)
            .with_min_text_length(config.min_text_length)
    }

    /// Set whether encrypted PDFs are retried with the empty password.
    pub fn with_empty_password_decryption(mut self, decrypt: bool) -> Self {
        self.decrypt_empty_password = decrypt;
        self
    }

    /// Reject documents whose trimmed text is shorter than `min` characters.
    pub fn with_min_text_length(mut self, min: usize) -> Self {
        self.min_text_length = min;
        self
    }

    fn check_text_length(&self, text: &str) -> Result<()> {
        let found = text.trim().chars().count();
        if found < self.min_text_length {
            return Err(PdfError::InsufficientText {
                found,
                required: self.min_text_length,
            });
        }
        Ok(())
    }

    /// Load the document and return bytes pdf-extract can read.
    fn prepare<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let bytes = if doc.is_encrypted() {
            if !self.decrypt_empty_password || doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            Cow::Owned(decrypted)
        } else {
            Cow::Borrowed(data)
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        Ok(bytes)
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let bytes = self.prepare(data)?;
        let text = pdf_extract::extract_text_from_mem(&bytes)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        debug!("Extracted {} characters of text", text.len());
        self.check_text_length(&text)?;
        Ok(text)
    }
}

/// Extractor for documents that already are text, such as saved extractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(data)?;
        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}
