//! Core library for fust receipt processing.
//!
//! This crate provides:
//! - Text extraction from PDF receipts
//! - Classification of issue, intake, and transfer receipts
//! - Field and fust-line extraction from the extracted text
//! - Transaction data models and pipeline configuration

pub mod error;
pub mod models;
pub mod pdf;
pub mod receipt;

pub use error::{FustbonError, ParseError, PdfError, Result};
pub use models::config::FustbonConfig;
pub use models::transaction::{
    Counterparty, DocumentShape, DocumentType, LineItem, ParsedTransaction, TransferFields,
    TwoPartyFields,
};
pub use pdf::{PdfTextExtractor, PlainTextExtractor, TextExtractor};
pub use receipt::{classify, FustbonParser, ReceiptParser};
