//! # autorepair - Automatic gear repair agent
//!
//! Usage:
//!   autorepair run                - Poll durability and repair until Ctrl-C
//!   autorepair check              - Report the first worn item, if any
//!   autorepair repair             - Run a single check-and-repair cycle
//!   autorepair init [path]        - Write the default configuration
//!
//! ## Wiring
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - CLI & logging                            │
//! │    │                                                            │
//! │    ├── wiring: AgentConfig (shared) ──► RepairSettings          │
//! │    ├── wiring: BridgeHost | SimulatedHost (adapter)             │
//! │    └── commands: LoopSupervisor / DurabilityCheck (usecase)     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod wiring;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckCommand, InitCommand, RepairCommand, RunCommand};
use wiring::Context;

#[derive(Parser)]
#[command(name = "autorepair")]
#[command(about = "Keeps gear above a durability threshold")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Play against the in-memory simulated world instead of the bridge
    #[arg(long, global = true)]
    simulate: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll durability and repair until interrupted
    Run(RunCommand),
    /// Report the first worn item
    Check(CheckCommand),
    /// Run one check-and-repair cycle
    Repair(RepairCommand),
    /// Write the default configuration file
    Init(InitCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Commands::Init(cmd) = &cli.command {
        return cmd.run();
    }

    let context = Context::load(cli.config.as_deref(), cli.simulate)?;

    match cli.command {
        Commands::Run(cmd) => cmd.run(&context).await,
        Commands::Check(cmd) => cmd.run(&context).await,
        Commands::Repair(cmd) => cmd.run(&context).await,
        Commands::Init(_) => Ok(()),
    }
}
