//! Development tasks for the tactics puzzle workspace
//!
//! This binary provides puzzle tooling using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{List, Simulate, Solve, Validate};

/// Development tasks for the tactics puzzle workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Puzzle tools: solve, simulate, validate", long_about = None)]
#[command(version)]
struct Cli {
    /// Content directory holding assets.ron, solver.toml and puzzles/
    /// (defaults to $TACTICS_DATA_DIR, then the bundled content)
    #[arg(short, long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Search for a winning character placement
    Solve(Solve),

    /// Run one placement to the end and report the outcome
    Simulate(Simulate),

    /// Report every problem with a puzzle's parameters
    Validate(Validate),

    /// List the puzzles in the content directory
    List(List),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for TACTICS_* overrides and RUST_LOG)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let data_dir = dirs::data_dir(cli.data_dir);

    match cli.command {
        Command::Solve(cmd) => cmd.execute(&data_dir).await,
        Command::Simulate(cmd) => cmd.execute(&data_dir),
        Command::Validate(cmd) => cmd.execute(&data_dir),
        Command::List(cmd) => cmd.execute(&data_dir),
    }
}

/// Logs go to stderr so JSON on stdout stays clean.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
