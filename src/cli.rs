//! Command-line interface for candy_cascade.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Candy Cascade - headless match-3 engine host
#[derive(Parser, Debug)]
#[command(name = "candy_cascade")]
#[command(about = "Deal, play and inspect match-3 boards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for a reproducible game (overrides settings and CANDY_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log engine internals at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a freshly dealt board
    Board,

    /// Auto-play a game to the end and print every event
    Play {
        /// Emit events as JSON lines instead of text
        #[arg(long)]
        json: bool,

        /// Minimum pause between cascade steps (overrides settings)
        #[arg(long)]
        settle_ms: Option<u64>,
    },

    /// Print the effective settings as TOML
    Config,
}
