//! Error types for the fustbon-core library.

use thiserror::Error;

/// Main error type for the fustbon library.
#[derive(Error, Debug)]
pub enum FustbonError {
    /// The text-extraction collaborator failed.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Receipt text could not be turned into a transaction.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning document bytes into text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Too little text came out of the PDF, as with scanned receipts.
    #[error("PDF has too little embedded text ({found} characters, need {required})")]
    InsufficientText { found: usize, required: usize },

    /// The input was expected to be text but is not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
}

/// Errors raised by the receipt parser itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// None of the document-type anchors occur in the text.
    #[error("unknown document type: no BON UITGIFTE, BON INNAME or FUSTBON anchor found")]
    UnclassifiableDocument,

    /// A field every transaction must carry could not be located.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Result type for the fustbon library.
pub type Result<T> = std::result::Result<T, FustbonError>;
