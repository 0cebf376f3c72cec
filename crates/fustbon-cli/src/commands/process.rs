//! Process command - extract data from a single receipt file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use fustbon_core::models::config::OutputConfig;
use fustbon_core::models::transaction::{Timestamp, TransactionRow};
use fustbon_core::receipt::rules::{format_date_token, format_quantity};
use fustbon_core::ParsedTransaction;

use super::{load_config, parse_file};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or extracted text as .txt)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Emit one CSV row per fust line instead of one per receipt
    #[arg(long)]
    items: bool,

    /// Validate extracted data
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension for outputs in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    // Check input file exists
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    pb.set_message("Parsing receipt...");

    let transaction = parse_file(&args.input, &config)?;

    pb.finish_and_clear();

    // Validate if requested
    if args.validate {
        let issues = transaction.validate_with(&config.extraction);
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_transaction(&transaction, args.format, args.items, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a transaction in the requested format.
pub fn format_transaction(
    transaction: &ParsedTransaction,
    format: OutputFormat,
    items: bool,
    output: &OutputConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(transaction, output),
        OutputFormat::Csv if items => format_items_csv(transaction),
        OutputFormat::Csv => format_csv(transaction),
        OutputFormat::Text => Ok(format_text(transaction)),
    }
}

fn format_json(transaction: &ParsedTransaction, output: &OutputConfig) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(transaction)?;

    if !output.include_raw_text {
        if let Some(object) = value.as_object_mut() {
            object.remove("raw_text");
        }
    }

    if output.pretty_json {
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(&value)?)
    }
}

fn format_csv(transaction: &ParsedTransaction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.serialize(TransactionRow::from(transaction))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_items_csv(transaction: &ParsedTransaction) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    // Header is written by the first row; write it explicitly for empty receipts
    if transaction.line_items.is_empty() {
        wtr.write_record(["transaction_number", "code", "description", "quantity"])?;
    }
    for row in transaction.line_item_rows() {
        wtr.serialize(row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(transaction: &ParsedTransaction) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{}: {}\n",
        transaction.document_type(),
        transaction.transaction_number
    ));
    push_date(&mut output, "Date", transaction.transaction_timestamp.as_ref());
    push_date(&mut output, "Created", transaction.creation_timestamp.as_ref());
    push_field(&mut output, "Location", transaction.location());
    output.push('\n');

    if let Some(from) = transaction.counterparty_from() {
        push_party(&mut output, "From", from.code.as_deref(), from.name.as_deref());
    }
    let to = transaction.counterparty_to();
    let label = if transaction.counterparty_from().is_some() {
        "To"
    } else {
        "Customer"
    };
    push_party(&mut output, label, to.code.as_deref(), to.name.as_deref());

    push_field(&mut output, "Carrier", transaction.carrier.as_deref());
    push_field(&mut output, "Card", transaction.card_number());
    push_field(&mut output, "Related", transaction.related_transaction_number.as_deref());
    push_field(&mut output, "Correction", transaction.correction_reason.as_deref());
    push_field(&mut output, "Remarks", transaction.remarks.as_deref());
    output.push('\n');

    output.push_str("Fust:\n");
    for item in &transaction.line_items {
        output.push_str(&format!(
            "  {}  {:<32} {:>8}\n",
            item.code,
            item.description,
            format_quantity(item.quantity)
        ));
    }
    output.push_str(&format!(
        "  {:<37} {:>8}\n",
        "Total",
        format_quantity(transaction.total_quantity())
    ));

    output
}

fn push_field(output: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        output.push_str(&format!("{}: {}\n", label, value));
    }
}

fn push_date(output: &mut String, label: &str, value: Option<&Timestamp>) {
    push_field(output, label, value.map(format_date_token).as_deref());
}

fn push_party(output: &mut String, label: &str, code: Option<&str>, name: Option<&str>) {
    let party = match (code, name) {
        (Some(code), Some(name)) => format!("{} {}", code, name),
        (Some(value), None) | (None, Some(value)) => value.to_string(),
        (None, None) => return,
    };
    output.push_str(&format!("{}: {}\n", label, party));
}
