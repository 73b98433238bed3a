//! Resolve command - show what would be read from a single receipt.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use faturas_core::{ExtractionResult, PdfTextExtractor, ReceiptPipeline, TotalSource};

/// Arguments for the resolve command.
#[derive(Args)]
pub struct ResolveArgs {
    /// Receipt PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ResolveFormat,

    /// Also print the extracted text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ResolveFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct ResolveOutput<'a> {
    #[serde(flatten)]
    result: &'a ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

pub fn run(args: ResolveArgs) -> anyhow::Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Resolving fields of {}", args.input.display());

    let bytes = fs::read(&args.input)?;
    let pipeline = ReceiptPipeline::new(PdfTextExtractor::new());
    let (text, result) = pipeline.inspect(&bytes)?;

    match args.format {
        ResolveFormat::Json => {
            let output = ResolveOutput {
                result: &result,
                text: args.show_text.then_some(text.as_str()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        ResolveFormat::Text => {
            print!("{}", format_result_text(&result));
            if args.show_text {
                println!();
                println!("{}", style("Extracted text:").bold());
                println!("{}", text);
            }
        }
    }

    Ok(())
}

fn format_result_text(result: &ExtractionResult) -> String {
    let mut output = String::new();

    match result.date {
        Some(date) => output.push_str(&format!("Date:  {}\n", date)),
        None => output.push_str("Date:  not found\n"),
    }

    match (&result.total, &result.total_source) {
        (Some(total), Some(TotalSource::Labeled { label })) => {
            output.push_str(&format!("Total: {} (after \"{}\")\n", total, label));
        }
        (Some(total), Some(TotalSource::TrailingAmount)) => {
            output.push_str(&format!("Total: {} (last amount in text)\n", total));
        }
        (Some(total), None) => output.push_str(&format!("Total: {}\n", total)),
        (None, _) => output.push_str("Total: not found\n"),
    }

    if !result.is_complete() {
        output.push_str(&format!(
            "\nIncomplete: missing {}\n",
            result.missing_fields().join(", ")
        ));
    }

    output
}
