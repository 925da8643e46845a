//! CLI application for extracting contract fields from OCR transcripts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, parse};

/// Contract field extraction - pull contract number, dates, amount and
/// counterparty out of OCR transcripts
#[derive(Parser)]
#[command(name = "kontrakt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Command to run (default: batch)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from every document folder
    Batch(batch::BatchArgs),

    /// Extract fields from a single transcript file
    Parse(parse::ParseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Commands::Batch(args)) => batch::run(args, cli.config.as_deref()).await,
        Some(Commands::Parse(args)) => parse::run(args, cli.config.as_deref()).await,
        Some(Commands::Config(args)) => config::run(args, cli.config.as_deref()).await,
        None => batch::run(batch::BatchArgs::default(), cli.config.as_deref()).await,
    }
}
