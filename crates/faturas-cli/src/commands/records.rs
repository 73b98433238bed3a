//! List, delete and export stored receipts.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use faturas_core::export::write_csv;
use faturas_core::{open_store, ReceiptRecord};

use super::{format_amount, OutputFormat};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    /// File name the receipt was uploaded as
    #[arg(required = true)]
    source_name: String,
}

/// Arguments for the export command.
#[derive(Args)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn list(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let store = open_store(&config.storage)?;

    // Newest first for display
    let mut records = store.list_all()?;
    records.reverse();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Csv => write_csv(&records, io::stdout().lock())?,
        OutputFormat::Text => {
            print!(
                "{}",
                format_records_text(&records, &config.report.currency_symbol)
            )
        }
    }

    Ok(())
}

pub fn delete(args: DeleteArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let mut store = open_store(&config.storage)?;

    let removed = store.delete_by_source_name(&args.source_name)?;

    if removed == 0 {
        println!(
            "{} No receipts named {}",
            style("ℹ").blue(),
            args.source_name
        );
    } else {
        println!(
            "{} Deleted {} receipt(s) named {}",
            style("✓").green(),
            removed,
            args.source_name
        );
    }

    Ok(())
}

pub fn export(args: ExportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let store = open_store(&config.storage)?;
    let records = store.list_all()?;

    match &args.output {
        Some(output_path) => {
            if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            write_csv(&records, File::create(output_path)?)?;
            info!("Exported {} receipts", records.len());
            println!(
                "{} Exported {} receipts to {}",
                style("✓").green(),
                records.len(),
                output_path.display()
            );
        }
        None => write_csv(&records, io::stdout().lock())?,
    }

    Ok(())
}

fn format_records_text(records: &[ReceiptRecord], symbol: &str) -> String {
    if records.is_empty() {
        return "No receipts stored.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<10}  {:>12}  {}\n", "Date", "Total", "File"));
    for record in records {
        output.push_str(&format!(
            "{:<10}  {:>12}  {}\n",
            record.date.to_string(),
            format_amount(&record.total, symbol),
            record.source_name
        ));
    }

    output
}
