//! Candy Cascade - command-line host
//!
//! Deals boards, auto-plays games and prints settings.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use candy_cascade::{GreedyPlayer, Orchestrator, Settings, describe};
use clap::Parser;
use cli::{Cli, Command};
use tracing::{info, instrument};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings = settings.with_seed(seed);
    }

    match cli.command {
        Command::Board => print_board(&settings),
        Command::Play { json, settle_ms } => {
            if let Some(settle_ms) = settle_ms {
                settings = settings.with_settle_ms(settle_ms);
            }
            play(&settings, json).await
        }
        Command::Config => {
            print!("{}", settings.to_toml()?);
            Ok(())
        }
    }
}

/// Logs go to stderr so `play --json` output stays clean.
fn initialize_tracing(verbose: bool) {
    let default = if verbose {
        "info,candy_engine=debug,candy_cascade=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Deal a board and print it with its legal swap count
#[instrument(skip(settings))]
fn print_board(settings: &Settings) -> Result<()> {
    let engine = settings.build_engine()?;
    println!("{}", engine.grid());
    println!();
    println!("{} legal swaps", engine.legal_swaps().len());
    Ok(())
}

/// Auto-play one game with the greedy player
#[instrument(skip(settings), fields(seed = ?settings.seed(), settle_ms = settings.settle_ms()))]
async fn play(settings: &Settings, json: bool) -> Result<()> {
    let engine = settings.build_engine()?;
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let line = if json {
                serde_json::to_string(&event)?
            } else {
                describe(&event)
            };
            println!("{line}");
        }
        anyhow::Ok(())
    });

    let mut orchestrator = Orchestrator::new(
        engine,
        Box::new(GreedyPlayer::new("greedy")),
        settings.settle(),
        event_tx,
    );
    let result = orchestrator.run().await;
    // Closing the channel lets the printer drain and finish.
    drop(orchestrator);
    printer.await??;

    let state = result?;
    info!(score = state.score(), "Finished");
    Ok(())
}
