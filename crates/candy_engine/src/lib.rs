//! Candy engine - a pure match-3 rule engine
//!
//! The engine owns a square board of candies and everything that happens
//! to it: dealing a board with no runs, validating swaps, resolving
//! cascades with striped specials and combos, scoring and the move budget.
//! It renders nothing and never waits; hosts drive it step by step and
//! animate the events it returns.
//!
//! # Architecture
//!
//! - **Grid**: square matrix of optional tiles, minted by a seedable [`TileSource`]
//! - **Rules**: generation, run detection and swap validation
//! - **Cascade**: the scan, clear, trigger, compact and refill loop
//! - **Engine**: score, moves, status and the processing guard
//!
//! # Example
//!
//! ```
//! use candy_engine::{Engine, EngineConfig};
//!
//! let mut engine = Engine::seeded(EngineConfig::default(), 7).unwrap();
//! if let Some(swap) = engine.legal_swaps().first().copied() {
//!     assert!(engine.attempt_swap(swap.a, swap.b).is_accepted());
//!     for step in engine.resolve_all() {
//!         println!("+{} (combo {})", step.score_delta(), step.combo());
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod cascade;
mod config;
mod events;
mod game;
mod grid;
mod source;
mod types;

// Public module declarations
pub mod invariants;
pub mod rules;

// Crate-level exports - Board model
pub use grid::{Grid, LayoutError};
pub use source::TileSource;
pub use types::{Axis, Coord, SpecialKind, Tile, TileId, Variety};

// Crate-level exports - Swaps
pub use action::{Swap, SwapOutcome, SwapRejection};

// Crate-level exports - Cascade resolution
pub use cascade::{Cascade, CascadePhase, Resolution};
pub use events::{CascadeStep, ClearedCell, ComboMessage, EffectKind, LaserEffect, SpawnedSpecial};

// Crate-level exports - Controller
pub use config::{ConfigError, EngineConfig};
pub use game::{Engine, GameState, GameStatus};

// Crate-level exports - Rules
pub use rules::{
    MIN_RUN, MatchGroup, MatchSet, SPECIAL_RUN, find_matches, generate_board, has_legal_move,
    legal_swaps, validate_swap,
};

// Crate-level exports - Invariants
pub use invariants::{Invariant, InvariantSet, InvariantViolation};
