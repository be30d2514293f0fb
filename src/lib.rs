//! Candy Cascade - headless host for the candy match-3 engine
//!
//! The rules live in [`candy_engine`]. This crate adds what a host needs to
//! run them: settings from TOML and the environment, an auto-player and an
//! orchestrator that paces cascade steps and streams them as events.
//!
//! # Example
//!
//! ```no_run
//! use candy_cascade::{GameEvent, GreedyPlayer, Orchestrator, Settings};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::default().with_seed(7).with_settle_ms(0);
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<GameEvent>();
//! let mut orchestrator = Orchestrator::new(
//!     settings.build_engine()?,
//!     Box::new(GreedyPlayer::new("greedy")),
//!     settings.settle(),
//!     tx,
//! );
//! let final_state = orchestrator.run().await?;
//! while let Ok(event) = rx.try_recv() {
//!     println!("{event:?}");
//! }
//! println!("final score {}", final_state.score());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod orchestrator;
mod players;
mod render;
mod settings;

// Crate-level exports - Settings
pub use settings::{SETTLE_MS_VAR, SEED_VAR, Settings, SettingsError};

// Crate-level exports - Players
pub use players::{GreedyPlayer, Player};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, MAX_REJECTIONS, Orchestrator};

// Crate-level exports - Rendering
pub use render::describe;

// Crate-level exports - Engine
pub use candy_engine;
pub use candy_engine::{
    CascadeStep, Coord, Engine, EngineConfig, GameState, GameStatus, Grid, Swap, SwapOutcome,
};
