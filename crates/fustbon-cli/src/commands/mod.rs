//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod classify;
pub mod config;
pub mod process;

use std::fs;
use std::path::Path;

use tracing::debug;

use fustbon_core::{
    FustbonConfig, FustbonParser, ParsedTransaction, PdfTextExtractor, PlainTextExtractor,
    TextExtractor,
};

/// Parser over whichever extractor fits the input file.
pub type FileParser = FustbonParser<Box<dyn TextExtractor>>;

/// Input files the CLI accepts, told apart by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// PDF receipt, text extracted with lopdf and pdf-extract.
    Pdf,
    /// Previously extracted receipt text.
    Text,
}

impl InputKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => Some(Self::Pdf),
            "txt" => Some(Self::Text),
            _ => None,
        }
    }
}

/// Load configuration from `config_path`, falling back to the default
/// location and then to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FustbonConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(FustbonConfig::from_file(path)?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(FustbonConfig::from_file(&default_path)?)
    } else {
        Ok(FustbonConfig::default())
    }
}

/// Build a parser for one kind of input.
pub fn parser_for(kind: InputKind, config: &FustbonConfig) -> FileParser {
    let extractor: Box<dyn TextExtractor> = match kind {
        InputKind::Pdf => Box::new(PdfTextExtractor::from_config(&config.pdf)),
        InputKind::Text => Box::new(PlainTextExtractor),
    };

    FustbonParser::with_extractor(extractor).with_config(&config.extraction)
}

/// Read and parse one receipt file.
pub fn parse_file(path: &Path, config: &FustbonConfig) -> anyhow::Result<ParsedTransaction> {
    let Some(kind) = InputKind::from_path(path) else {
        anyhow::bail!("Unsupported file format: {}", path.display());
    };

    let data = fs::read(path)?;
    let transaction = parser_for(kind, config).parse_document(&data)?;

    debug!(
        "Parsed {} as {} {}",
        path.display(),
        transaction.document_type(),
        transaction.transaction_number
    );

    Ok(transaction)
}
