//! Maestro CLI - Command-line interface for the maestro mastering engine.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maestro")]
#[command(author, version, about = "Batch audio mastering engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Master a WAV file
    Master(commands::master::MasterArgs),

    /// Analyze a WAV file and print its mastering profile
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Master(args) => commands::master::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
    }
}
