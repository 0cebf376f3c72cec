//! Receipt parser: text extraction, classification, and field extraction.

use tracing::debug;

use super::cursor::LineCursor;
use super::fields::extract_common;
use super::rules::LineItemExtractor;
use super::{classify, transfer, two_party, ReceiptParser, Result};
use crate::models::config::ExtractionConfig;
use crate::models::transaction::{DocumentShape, DocumentType, ParsedTransaction};
use crate::pdf::{PdfTextExtractor, TextExtractor};

/// Parser turning fust receipt documents into transactions.
///
/// Holds no state between documents, so one parser can serve any number of
/// threads.
pub struct FustbonParser<E = PdfTextExtractor> {
    extractor: E,
    line_items: LineItemExtractor,
}

impl FustbonParser {
    /// Create a parser reading PDF documents.
    pub fn new() -> Self {
        Self::with_extractor(PdfTextExtractor::new())
    }
}

impl Default for FustbonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TextExtractor> FustbonParser<E> {
    /// Create a parser using `extractor` to obtain document text.
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            line_items: LineItemExtractor::new(),
        }
    }

    /// Apply the `extraction` configuration section.
    pub fn with_config(mut self, config: &ExtractionConfig) -> Self {
        self.line_items = LineItemExtractor::new().with_trailer_stripping(config.strip_trailer);
        self
    }

    /// Extract the text of a document and parse it.
    ///
    /// Text-extraction failures are returned unchanged; no partial
    /// transaction is ever produced.
    pub fn parse_document(&self, data: &[u8]) -> crate::Result<ParsedTransaction> {
        let text = self.extractor.extract_text(data)?;
        Ok(self.parse_text(&text)?)
    }

    /// Extract the text of a document and detect its type.
    pub fn classify_document(&self, data: &[u8]) -> crate::Result<DocumentType> {
        let text = self.extractor.extract_text(data)?;
        Ok(classify(&text)?)
    }

    /// Parse already extracted receipt text.
    pub fn parse_text(&self, text: &str) -> Result<ParsedTransaction> {
        let doc_type = classify(text)?;
        let cursor = LineCursor::new(text);
        debug!("Parsing {} receipt with {} lines", doc_type, cursor.len());

        let (transaction_number, shape, correction_reason) = match doc_type {
            DocumentType::IssueReceipt => {
                let receipt = two_party::extract(&cursor, doc_type.anchor())?;
                (
                    receipt.transaction_number,
                    DocumentShape::Issue(receipt.fields),
                    receipt.correction_reason,
                )
            }
            DocumentType::IntakeReceipt => {
                let receipt = two_party::extract(&cursor, doc_type.anchor())?;
                (
                    receipt.transaction_number,
                    DocumentShape::Intake(receipt.fields),
                    receipt.correction_reason,
                )
            }
            DocumentType::TransferReceipt => {
                let receipt = transfer::extract(&cursor)?;
                (
                    receipt.transaction_number,
                    DocumentShape::Transfer(receipt.fields),
                    receipt.correction_reason,
                )
            }
        };

        let common = extract_common(&cursor);
        let line_items = self.line_items.scan(text).collect::<Vec<_>>();

        debug!(
            "Extracted transaction {} with {} fust lines",
            transaction_number,
            line_items.len()
        );

        Ok(ParsedTransaction {
            transaction_number,
            shape,
            carrier: common.carrier,
            transaction_timestamp: common.transaction_timestamp,
            creation_timestamp: common.creation_timestamp,
            related_transaction_number: common.related_transaction_number,
            correction_reason,
            remarks: common.remarks,
            raw_text: text.to_string(),
            line_items,
        })
    }
}

impl<E: TextExtractor> ReceiptParser for FustbonParser<E> {
    fn parse(&self, text: &str) -> Result<ParsedTransaction> {
        self.parse_text(text)
    }
}
