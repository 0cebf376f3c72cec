//! Document type detection.

use super::Result;
use crate::error::ParseError;
use crate::models::transaction::DocumentType;

/// Detect the receipt type from its anchor literal.
///
/// Anchors are checked in priority order; `FUSTBON` is the broadest marker
/// and goes last. Text without any anchor cannot be parsed at all.
pub fn classify(text: &str) -> Result<DocumentType> {
    DocumentType::ALL
        .into_iter()
        .find(|doc_type| text.contains(doc_type.anchor()))
        .ok_or(ParseError::UnclassifiableDocument)
}
