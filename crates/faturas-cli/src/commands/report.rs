//! Report command - monthly and yearly spending.

use clap::Args;
use console::style;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use faturas_core::{open_store, SpendingSummary};

use super::{format_amount, OutputFormat};

const BAR_WIDTH: u32 = 40;

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Only include receipts from this year
    #[arg(short, long)]
    year: Option<i32>,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let store = open_store(&config.storage)?;

    let mut records = store.list_all()?;
    if let Some(year) = args.year {
        records.retain(|r| r.period().0 == year);
    }
    let summary = SpendingSummary::from_records(&records);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => print!("{}", format_summary_csv(&summary)?),
        OutputFormat::Text => {
            print!(
                "{}",
                format_summary_text(&summary, &config.report.currency_symbol)
            )
        }
    }

    Ok(())
}

/// One row per month (`YYYY-MM`) followed by one row per year (`YYYY`).
fn format_summary_csv(summary: &SpendingSummary) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["period", "total", "receipts"])?;
    for month in &summary.monthly {
        wtr.write_record([
            month.label(),
            month.total.to_string(),
            month.receipts.to_string(),
        ])?;
    }
    for year in &summary.yearly {
        wtr.write_record([
            year.year.to_string(),
            year.total.to_string(),
            year.receipts.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_summary_text(summary: &SpendingSummary, symbol: &str) -> String {
    if summary.is_empty() {
        return "No receipts stored.\n".to_string();
    }

    let mut output = String::new();
    let max = summary
        .monthly
        .iter()
        .map(|m| m.total.value())
        .max()
        .unwrap_or_default();

    output.push_str(&format!("{}\n", style("Monthly spending").bold()));
    for month in &summary.monthly {
        output.push_str(&format!(
            "  {}  {:>12}  {}\n",
            month.label(),
            format_amount(&month.total, symbol),
            bar(month.total.value(), max)
        ));
    }

    output.push('\n');
    output.push_str(&format!("{}\n", style("Yearly spending").bold()));
    for year in &summary.yearly {
        output.push_str(&format!(
            "  {}     {:>12}  ({} receipts)\n",
            year.year,
            format_amount(&year.total, symbol),
            year.receipts
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "Total: {} over {} receipts\n",
        format_amount(&summary.grand_total, symbol),
        summary.receipt_count
    ));

    output
}

/// Bar proportional to `value / max`, at most `BAR_WIDTH` cells.
fn bar(value: Decimal, max: Decimal) -> String {
    if max.is_zero() {
        return String::new();
    }

    let cells = (value * Decimal::from(BAR_WIDTH) / max)
        .round()
        .to_usize()
        .unwrap_or(0);
    "█".repeat(cells)
}
