//! CLI application for Continente receipt ingestion and spending reports.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{config, records, report, resolve, upload};

/// Continente receipts - Track spending from PDF receipts
#[derive(Parser)]
#[command(name = "faturas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest receipt PDFs into the record store
    Upload(upload::UploadArgs),

    /// Show the date and total resolved from one receipt
    Resolve(resolve::ResolveArgs),

    /// List stored receipts
    List(records::ListArgs),

    /// Delete stored receipts by file name
    Delete(records::DeleteArgs),

    /// Monthly and yearly spending totals
    Report(report::ReportArgs),

    /// Export stored receipts as CSV
    Export(records::ExportArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Upload(args) => upload::run(args, config_path),
        Commands::Resolve(args) => resolve::run(args),
        Commands::List(args) => records::list(args, config_path),
        Commands::Delete(args) => records::delete(args, config_path),
        Commands::Report(args) => report::run(args, config_path),
        Commands::Export(args) => records::export(args, config_path),
        Commands::Config(args) => config::run(args, config_path),
    }
}
