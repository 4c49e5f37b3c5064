//! CLI for Hungarian invoice parsing and order reconciliation.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{compare, extract_kod, parse};

/// Parse vendor invoice PDFs and reconcile them against order files
#[derive(Parser)]
#[command(name = "szamla")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an invoice PDF into CSV rows on stdout
    Parse(parse::ParseArgs),

    /// Compare an order file against the generated invoice CSV
    Compare(compare::CompareArgs),

    /// Extract raw and derived SKU codes from an order file
    ExtractKod(extract_kod::ExtractKodArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Parse(args) => parse::run(args),
        Commands::Compare(args) => compare::run(args),
        Commands::ExtractKod(args) => extract_kod::run(args),
    }
}
