//! Classify command - detect the document type of a receipt file.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{load_config, parser_for, InputKind};

/// Arguments for the classify command.
#[derive(Args)]
pub struct ClassifyArgs {
    /// Input file (PDF, or extracted text as .txt)
    #[arg(required = true)]
    input: PathBuf,
}

pub async fn run(args: ClassifyArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    let Some(kind) = InputKind::from_path(&args.input) else {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    };
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let data = fs::read(&args.input)?;
    let doc_type = parser_for(kind, &config).classify_document(&data)?;

    info!("{} classified as {:?}", args.input.display(), doc_type);
    println!("{}", doc_type);

    Ok(())
}
