//! Subcommands of the `faturas` binary.

pub mod config;
pub mod records;
pub mod report;
pub mod resolve;
pub mod upload;

use faturas_core::models::amount::MonetaryAmount;

/// Output format shared by the listing commands.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// `12.34 €`
pub(crate) fn format_amount(amount: &MonetaryAmount, symbol: &str) -> String {
    if symbol.is_empty() {
        amount.to_string()
    } else {
        format!("{} {}", amount, symbol)
    }
}
