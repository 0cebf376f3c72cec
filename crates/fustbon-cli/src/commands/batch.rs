//! Batch processing command for multiple receipt files.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use fustbon_core::models::config::ExtractionConfig;
use fustbon_core::ParsedTransaction;

use super::process::{format_transaction, OutputFormat};
use super::{load_config, parse_file, InputKind};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching the input files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers (default: from configuration)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Stop at the first file that fails
    #[arg(long)]
    fail_fast: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    transaction: Option<ParsedTransaction>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// Checks that span the documents of one batch.
struct BatchChecks<'a> {
    extraction: &'a ExtractionConfig,
    seen: HashMap<String, PathBuf>,
}

impl<'a> BatchChecks<'a> {
    fn new(extraction: &'a ExtractionConfig) -> Self {
        Self {
            extraction,
            seen: HashMap::new(),
        }
    }

    /// Accept a parsed transaction, or reject it as a receipt without fust
    /// lines or as a transaction number already seen in this batch.
    fn check(
        &mut self,
        path: &Path,
        transaction: ParsedTransaction,
    ) -> anyhow::Result<ParsedTransaction> {
        if self.extraction.require_line_items && transaction.line_items.is_empty() {
            anyhow::bail!("No fust items found");
        }

        if let Some(first) = self.seen.get(&transaction.transaction_number) {
            anyhow::bail!(
                "Duplicate transaction number {} (already in {})",
                transaction.transaction_number,
                first.display()
            );
        }

        self.seen
            .insert(transaction.transaction_number.clone(), path.to_path_buf());
        Ok(transaction)
    }
}

/// Output file names, unique within one batch.
#[derive(Default)]
struct OutputNames {
    used: HashSet<String>,
}

impl OutputNames {
    /// Name the output of `path` after its file stem. When an earlier input
    /// already took that name the parent directory is prefixed, and a counter
    /// is appended if that is taken too.
    fn assign(&mut self, path: &Path, extension: &str) -> String {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("receipt");
        let mut name = format!("{}.{}", stem, extension);

        if self.used.contains(&name) {
            let parent = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");
            name = format!("{}_{}.{}", parent, stem, extension);

            let mut n = 2;
            while self.used.contains(&name) {
                name = format!("{}_{}-{}.{}", parent, stem, n, extension);
                n += 1;
            }
            warn!(
                "Output name of {} collides with an earlier input, writing {}",
                path.display(),
                name
            );
        }

        self.used.insert(name.clone());
        name
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = Arc::new(load_config(config_path)?);

    let jobs = args.jobs.unwrap_or(config.batch.jobs).max(1);
    let fail_fast = args.fail_fast || config.batch.fail_fast;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| InputKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    // Create output directory if specified
    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files",
            )?
            .progress_chars("=>-"),
    );

    // Parse on the blocking pool; `buffered` hands results back in input order
    let mut parsed = stream::iter(files.into_iter().map(|path| {
        let config = Arc::clone(&config);
        async move {
            let file_start = Instant::now();
            let task_path = path.clone();
            let outcome =
                match tokio::task::spawn_blocking(move || parse_file(&task_path, &config)).await {
                    Ok(outcome) => outcome,
                    Err(e) => Err(e.into()),
                };
            (path, outcome, file_start.elapsed().as_millis() as u64)
        }
    }))
    .buffered(jobs);

    let mut checks = BatchChecks::new(&config.extraction);
    let mut results = Vec::new();

    while let Some((path, outcome, processing_time_ms)) = parsed.next().await {
        match outcome.and_then(|tx| checks.check(&path, tx)) {
            Ok(transaction) => {
                results.push(ProcessResult {
                    path,
                    transaction: Some(transaction),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if fail_fast {
                    overall_pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(ProcessResult {
                    path,
                    transaction: None,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_and_clear();

    // Write outputs
    let successful: Vec<_> = results.iter().filter(|r| r.transaction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        let mut names = OutputNames::default();
        for result in &successful {
            if let Some(transaction) = &result.transaction {
                let output_path =
                    output_dir.join(names.assign(&result.path, args.format.extension()));

                let content = format_transaction(transaction, args.format, false, &config.output)?;
                fs::write(&output_path, content)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    // Generate summary if requested
    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "transaction_number",
        "document_type",
        "customer_code",
        "customer_name",
        "transaction_timestamp",
        "line_items",
        "total_quantity",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(transaction) = &result.transaction {
            let customer = transaction.counterparty_to();
            wtr.write_record([
                filename,
                "success",
                &transaction.transaction_number,
                transaction.document_type().label(),
                customer.code.as_deref().unwrap_or(""),
                customer.name.as_deref().unwrap_or(""),
                &transaction
                    .transaction_timestamp
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default(),
                &transaction.line_items.len().to_string(),
                &transaction.total_quantity().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
