//! Upload command - ingest receipt PDFs into the record store.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use faturas_core::pipeline::source_name_of;
use faturas_core::{open_store, DocumentOutcome, ExtractionResult, PdfTextExtractor, ReceiptPipeline};

use super::format_amount;

/// Arguments for the upload command.
#[derive(Args)]
pub struct UploadArgs {
    /// Input files or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Resolve fields without storing anything
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: UploadArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::config::load(config_path)?;
    let symbol = &config.report.currency_symbol;

    let files = expand_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No PDF files found for: {}", args.inputs.join(" "));
    }

    println!(
        "{} Found {} receipts to process",
        style("ℹ").blue(),
        files.len()
    );

    let pipeline = ReceiptPipeline::new(PdfTextExtractor::new());

    if args.dry_run {
        for path in &files {
            let name = source_name_of(path);
            match fs::read(path)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| Ok(pipeline.inspect(&bytes)?))
            {
                Ok((_, result)) => println!("  {}: {}", name, describe(&result, symbol)),
                Err(e) => println!("  {}: {}", name, style(e).red()),
            }
        }
        return Ok(());
    }

    let mut store = open_store(&config.storage)?;
    info!("Storing receipts with {} backend", store.backend_name());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let report = pipeline.process_paths(&files, &mut *store, |outcome| {
        pb.set_message(outcome.source_name().to_string());
        pb.inc(1);
    });

    pb.finish_and_clear();

    println!(
        "{} Processed {} receipts in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} stored, {} failed",
        style(report.stored_count()).green(),
        style(report.failure_count()).red()
    );

    for record in report.stored() {
        println!(
            "  {} {}  {}",
            record.date,
            format_amount(&record.total, symbol),
            record.source_name
        );
    }

    if report.failure_count() > 0 {
        println!();
        println!("{}", style("Failed files:").red());
        for outcome in report.failures() {
            println!("  - {}: {}", outcome.source_name(), describe_failure(outcome, symbol));
        }
    }

    Ok(())
}

/// Expand globs and keep PDF files. Inputs that are not patterns are taken
/// as plain paths.
fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let mut matched = false;
        for entry in glob(input)? {
            let path = entry?;
            matched = true;
            if is_pdf(&path) && path.is_file() {
                files.push(path);
            }
        }

        if !matched {
            let path = PathBuf::from(input);
            if !path.exists() {
                anyhow::bail!("Input not found: {}", input);
            }
            if is_pdf(&path) {
                files.push(path);
            }
        }
    }

    debug!("Expanded {} inputs into {} files", inputs.len(), files.len());
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

fn describe(result: &ExtractionResult, symbol: &str) -> String {
    let date = result
        .date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "?".to_string());
    let total = result
        .total
        .map(|t| format_amount(&t, symbol))
        .unwrap_or_else(|| "?".to_string());

    format!("date {}, total {}", date, total)
}

fn describe_failure(outcome: &DocumentOutcome, symbol: &str) -> String {
    match outcome {
        DocumentOutcome::Stored(_) => "stored".to_string(),
        DocumentOutcome::Unresolved { result, .. } => format!(
            "could not resolve {} ({})",
            result.missing_fields().join(" and "),
            describe(result, symbol)
        ),
        DocumentOutcome::ReadFailed { error, .. } => error.to_string(),
        DocumentOutcome::StorageFailed { error, .. } => error.to_string(),
    }
}
