//! Transaction data models for parsed fust receipts.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::config::ExtractionConfig;

/// Timestamp at the receipts' fixed local offset.
pub type Timestamp = DateTime<FixedOffset>;

/// A fust receipt turned into structured data.
///
/// Built once per document by the parser and never mutated by it afterwards.
/// Shape-specific fields live in [`DocumentShape`], so a two-party receipt
/// cannot expose a "from" counterparty and a transfer receipt cannot expose a
/// location or card number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Business identifier printed below the document-type anchor.
    pub transaction_number: String,

    /// Document type together with the fields only that shape populates.
    #[serde(flatten)]
    pub shape: DocumentShape,

    /// Carrier (transporteur).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Moment the exchange took place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_timestamp: Option<Timestamp>,

    /// Moment the receipt was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<Timestamp>,

    /// Transaction this one corrects or refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_transaction_number: Option<String>,

    /// Reason given for a correction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction_reason: Option<String>,

    /// Free-text remarks (opmerkingen).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    /// Full extracted text, kept for auditing.
    pub raw_text: String,

    /// Fust lines in document order.
    pub line_items: Vec<LineItem>,
}

/// The three receipt layouts produced by the fust exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// Fust handed out to a customer (BON UITGIFTE).
    #[serde(rename = "BON UITGIFTE")]
    IssueReceipt,
    /// Fust taken in from a customer (BON INNAME).
    #[serde(rename = "BON INNAME")]
    IntakeReceipt,
    /// Fust moved between two customers (FUSTBON Overboeking).
    #[serde(rename = "FUSTBON Overboeking")]
    TransferReceipt,
}

impl DocumentType {
    /// All document types in classification priority order.
    pub const ALL: [DocumentType; 3] = [
        DocumentType::IssueReceipt,
        DocumentType::IntakeReceipt,
        DocumentType::TransferReceipt,
    ];

    /// Literal whose presence identifies this document type.
    pub const fn anchor(&self) -> &'static str {
        match self {
            Self::IssueReceipt => "BON UITGIFTE",
            Self::IntakeReceipt => "BON INNAME",
            Self::TransferReceipt => "FUSTBON",
        }
    }

    /// Label used when storing or displaying the type.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::IssueReceipt => "BON UITGIFTE",
            Self::IntakeReceipt => "BON INNAME",
            Self::TransferReceipt => "FUSTBON Overboeking",
        }
    }

    /// Whether this type uses the two-party layout.
    pub fn is_two_party(&self) -> bool {
        !matches!(self, Self::TransferReceipt)
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape-specific part of a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type")]
pub enum DocumentShape {
    #[serde(rename = "BON UITGIFTE")]
    Issue(TwoPartyFields),
    #[serde(rename = "BON INNAME")]
    Intake(TwoPartyFields),
    #[serde(rename = "FUSTBON Overboeking")]
    Transfer(TransferFields),
}

impl DocumentShape {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Self::Issue(_) => DocumentType::IssueReceipt,
            Self::Intake(_) => DocumentType::IntakeReceipt,
            Self::Transfer(_) => DocumentType::TransferReceipt,
        }
    }
}

/// Fields of an issue or intake receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TwoPartyFields {
    /// Exchange location printed under the transaction number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// The customer receiving or returning fust.
    pub customer: Counterparty,

    /// Customer card (pasnummer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
}

/// Fields of a transfer receipt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferFields {
    /// Customer the fust is booked away from.
    pub from: Counterparty,
    /// Customer the fust is booked to.
    pub to: Counterparty,
}

/// A customer taking part in an exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counterparty {
    /// Customer number (klantnummer).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Customer name (klantnaam).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Counterparty {
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.name.is_none()
    }
}

/// A single fust line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Three-digit fust code.
    pub code: String,
    /// Description, may contain digits of its own.
    pub description: String,
    /// Number of pieces (stuks); negative for returns and corrections.
    pub quantity: i64,
}

impl ParsedTransaction {
    pub fn document_type(&self) -> DocumentType {
        self.shape.document_type()
    }

    /// Sending side; only transfer receipts have one.
    pub fn counterparty_from(&self) -> Option<&Counterparty> {
        match &self.shape {
            DocumentShape::Transfer(fields) => Some(&fields.from),
            _ => None,
        }
    }

    /// Receiving side; the single customer of a two-party receipt.
    pub fn counterparty_to(&self) -> &Counterparty {
        match &self.shape {
            DocumentShape::Issue(fields) | DocumentShape::Intake(fields) => &fields.customer,
            DocumentShape::Transfer(fields) => &fields.to,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match &self.shape {
            DocumentShape::Issue(fields) | DocumentShape::Intake(fields) => {
                fields.location.as_deref()
            }
            DocumentShape::Transfer(_) => None,
        }
    }

    pub fn card_number(&self) -> Option<&str> {
        match &self.shape {
            DocumentShape::Issue(fields) | DocumentShape::Intake(fields) => {
                fields.card_number.as_deref()
            }
            DocumentShape::Transfer(_) => None,
        }
    }

    /// Net number of pieces over all lines.
    pub fn total_quantity(&self) -> i64 {
        self.line_items.iter().map(|item| item.quantity).sum()
    }

    /// Check the transaction for signs of a misread receipt.
    ///
    /// Returns a list of issues; an empty list means nothing looked off.
    pub fn validate(&self) -> Vec<String> {
        self.validate_with(&ExtractionConfig::default())
    }

    /// Like [`validate`](Self::validate), honouring `require_line_items`.
    pub fn validate_with(&self, config: &ExtractionConfig) -> Vec<String> {
        let mut issues = Vec::new();

        if self.transaction_number.trim().is_empty() {
            issues.push("Missing transaction number".to_string());
        }

        if config.require_line_items && self.line_items.is_empty() {
            issues.push("No fust items found".to_string());
        }

        for item in &self.line_items {
            if item.code.len() != 3 || !item.code.chars().all(|c| c.is_ascii_digit()) {
                issues.push(format!("Invalid fust code: {}", item.code));
            }
        }

        if let DocumentShape::Transfer(fields) = &self.shape {
            if fields.from.code.is_none() {
                issues.push("Transfer receipt without sending customer number".to_string());
            }
            if fields.to.code.is_none() {
                issues.push("Transfer receipt without receiving customer number".to_string());
            }
        }

        issues
    }
}

/// One transaction flattened into a single row, for tabular output.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    pub transaction_number: String,
    pub document_type: &'static str,
    pub counterparty_from_code: Option<String>,
    pub counterparty_from_name: Option<String>,
    pub counterparty_to_code: Option<String>,
    pub counterparty_to_name: Option<String>,
    pub location: Option<String>,
    pub carrier: Option<String>,
    pub card_number: Option<String>,
    pub transaction_timestamp: Option<String>,
    pub creation_timestamp: Option<String>,
    pub related_transaction_number: Option<String>,
    pub correction_reason: Option<String>,
    pub remarks: Option<String>,
    pub line_items: usize,
    pub total_quantity: i64,
}

impl From<&ParsedTransaction> for TransactionRow {
    fn from(tx: &ParsedTransaction) -> Self {
        let from = tx.counterparty_from();
        let to = tx.counterparty_to();

        Self {
            transaction_number: tx.transaction_number.clone(),
            document_type: tx.document_type().label(),
            counterparty_from_code: from.and_then(|c| c.code.clone()),
            counterparty_from_name: from.and_then(|c| c.name.clone()),
            counterparty_to_code: to.code.clone(),
            counterparty_to_name: to.name.clone(),
            location: tx.location().map(str::to_string),
            carrier: tx.carrier.clone(),
            card_number: tx.card_number().map(str::to_string),
            transaction_timestamp: tx.transaction_timestamp.map(|t| t.to_rfc3339()),
            creation_timestamp: tx.creation_timestamp.map(|t| t.to_rfc3339()),
            related_transaction_number: tx.related_transaction_number.clone(),
            correction_reason: tx.correction_reason.clone(),
            remarks: tx.remarks.clone(),
            line_items: tx.line_items.len(),
            total_quantity: tx.total_quantity(),
        }
    }
}

/// A fust line keyed by its transaction, for tabular output.
#[derive(Debug, Clone, Serialize)]
pub struct LineItemRow<'a> {
    pub transaction_number: &'a str,
    pub code: &'a str,
    pub description: &'a str,
    pub quantity: i64,
}

impl ParsedTransaction {
    /// Line items keyed by this transaction's number.
    pub fn line_item_rows(&self) -> impl Iterator<Item = LineItemRow<'_>> {
        self.line_items.iter().map(|item| LineItemRow {
            transaction_number: &self.transaction_number,
            code: &item.code,
            description: &item.description,
            quantity: item.quantity,
        })
    }
}
