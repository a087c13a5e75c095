//! Command-line driver for combat rollouts.
//!
//! Run with: `combat-sim <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{ListCatalog, Replay, Simulate};

/// Simulate autobattler combats between two boards
#[derive(Parser)]
#[command(name = "combat-sim")]
#[command(about = "Run and replay autobattler combat rollouts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a batch of matches and print the aggregate score
    Simulate(Simulate),

    /// Replay one match from its seed and print its transcript
    Replay(Replay),

    /// List the minions available to board files
    Catalog(ListCatalog),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for ROLLOUT_* and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute().await,
        Command::Replay(cmd) => cmd.execute(),
        Command::Catalog(cmd) => cmd.execute(),
    }
}
