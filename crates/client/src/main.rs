//! `encounter` command-line entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use encounter_client::commands::{Inspect, Run, Verify};
use encounter_client::logging;

/// Deterministic turn-based encounter resolver
#[derive(Parser)]
#[command(name = "encounter")]
#[command(about = "Resolve OSRIC-style encounters deterministically", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to a daily rolling file in this directory
    /// (defaults to ENCOUNTER_LOG_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Resolve a scenario and print the log
    Run(Run),

    /// Show a scenario's roster with derived stats
    Inspect(Inspect),

    /// Resolve twice and replay to check determinism
    Verify(Verify),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_dir = cli
        .log_dir
        .or_else(|| std::env::var_os("ENCOUNTER_LOG_DIR").map(PathBuf::from));
    let _guard = logging::setup_logging(log_dir.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::Inspect(cmd) => cmd.execute(),
        Command::Verify(cmd) => cmd.execute().await,
    }
}
