//! Game state controller.
//!
//! [`Engine`] owns the board, the score and the move budget. It admits
//! swaps, drives the cascade one iteration at a time and decides when the
//! game is over. Nothing outside the engine mutates the board.

use super::action::{Swap, SwapOutcome};
use super::cascade::{Cascade, Resolution};
use super::config::{ConfigError, EngineConfig};
use super::events::CascadeStep;
use super::grid::Grid;
use super::invariants::{FreshBoardInvariants, SettledBoardInvariants, assert_invariants};
use super::rules::{generate_board, legal_swaps, validate_swap};
use super::source::TileSource;
use super::types::Coord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Whether the game still accepts swaps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    /// Swaps are accepted.
    #[display("playing")]
    Playing,
    /// Moves ran out. Terminal until the next [`Engine::new_game`].
    #[display("game over")]
    GameOver,
}

/// Score, move budget and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    score: u64,
    moves_remaining: u32,
    status: GameStatus,
}

impl GameState {
    fn fresh(initial_moves: u32) -> Self {
        Self {
            score: 0,
            moves_remaining: initial_moves,
            status: GameStatus::Playing,
        }
    }

    /// Points scored so far.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Swaps left.
    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// True once the game has ended.
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}

/// The match-3 rule engine.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    source: TileSource,
    grid: Grid,
    state: GameState,
    cascade: Option<Cascade>,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl Engine {
    /// Creates an engine and deals the first board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range or the
    /// source draws from a different number of varieties.
    #[instrument(skip(source))]
    pub fn new(config: EngineConfig, mut source: TileSource) -> Result<Self, ConfigError> {
        Self::check_source(&config, &source)?;
        let grid = generate_board(*config.grid_size(), &mut source);
        assert_invariants::<FreshBoardInvariants>(&grid);
        info!(
            grid_size = config.grid_size(),
            moves = config.initial_moves(),
            "Engine ready"
        );
        Ok(Self {
            config,
            source,
            grid,
            state: GameState::fresh(*config.initial_moves()),
            cascade: None,
        })
    }

    /// Creates a deterministic engine.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range.
    pub fn seeded(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config, TileSource::seeded(seed, *config.variety_count()))
    }

    /// Creates an engine seeded from the operating system.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range.
    pub fn from_entropy(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Self::new(config, TileSource::from_entropy(*config.variety_count()))
    }

    /// Creates an engine around a prepared board.
    ///
    /// `source` must be the one that minted the board's tiles, so refills
    /// keep ids unique. The board is taken as is: it may contain runs,
    /// which the engine resolves only after the next accepted swap.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is out of range, the
    /// board size differs from the configured size or the board has holes.
    #[instrument(skip(grid, source), fields(size = grid.size()))]
    pub fn with_grid(
        config: EngineConfig,
        grid: Grid,
        source: TileSource,
    ) -> Result<Self, ConfigError> {
        Self::check_source(&config, &source)?;
        if grid.size() != *config.grid_size() {
            return Err(ConfigError::new(format!(
                "board is {}x{} but grid_size is {}",
                grid.size(),
                grid.size(),
                config.grid_size()
            )));
        }
        if !grid.is_full() {
            return Err(ConfigError::new(format!(
                "board has {} empty cells",
                grid.empty_cells().len()
            )));
        }
        Ok(Self {
            config,
            source,
            grid,
            state: GameState::fresh(*config.initial_moves()),
            cascade: None,
        })
    }

    fn check_source(config: &EngineConfig, source: &TileSource) -> Result<(), ConfigError> {
        config.validate()?;
        if source.variety_count() != *config.variety_count() {
            return Err(ConfigError::new(format!(
                "tile source draws {} varieties but variety_count is {}",
                source.variety_count(),
                config.variety_count()
            )));
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Play
// ─────────────────────────────────────────────────────────────

impl Engine {
    /// Starts over: fresh board, zero score, full move budget.
    ///
    /// Any cascade in flight is dropped.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) -> (GameState, Grid) {
        self.grid = generate_board(*self.config.grid_size(), &mut self.source);
        assert_invariants::<FreshBoardInvariants>(&self.grid);
        self.state = GameState::fresh(*self.config.initial_moves());
        self.cascade = None;
        info!(moves = self.state.moves_remaining, "New game");
        (self.state, self.grid.clone())
    }

    /// Tries to exchange the tiles at `a` and `b`.
    ///
    /// An accepted swap commits the exchanged board, spends one move and
    /// starts a cascade that the caller drives with
    /// [`Engine::advance_cascade`] or [`Engine::resolve_all`]. Every other
    /// outcome leaves the engine untouched.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate lies outside the board.
    #[instrument(skip(self), fields(a = %a, b = %b, moves_remaining = self.state.moves_remaining))]
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> SwapOutcome {
        let n = self.grid.size();
        assert!(self.grid.contains(a), "coordinate {a} outside {n}x{n} grid");
        assert!(self.grid.contains(b), "coordinate {b} outside {n}x{n} grid");

        if self.state.is_over() {
            debug!("Swap refused: game over");
            return SwapOutcome::RejectedGameOver;
        }
        if self.cascade.is_some() {
            debug!("Swap refused: cascade in progress");
            return SwapOutcome::RejectedBusy;
        }

        match validate_swap(&self.grid, Swap::new(a, b)) {
            Ok((candidate, matches)) => {
                self.grid = candidate;
                self.state.moves_remaining = self.state.moves_remaining.saturating_sub(1);
                self.cascade = Some(Cascade::new(*self.config.points_per_tile()));
                info!(
                    runs = matches.runs().len(),
                    moves_remaining = self.state.moves_remaining,
                    "Swap accepted"
                );
                SwapOutcome::Accepted
            }
            Err(rejection) => {
                debug!(%rejection, "Swap rejected");
                SwapOutcome::from(rejection)
            }
        }
    }

    /// Runs one cascade iteration and commits its board.
    ///
    /// Returns `None` when no cascade is in flight, and also on the call
    /// that finds the board stable; that call ends the cascade and may end
    /// the game.
    #[instrument(skip(self))]
    pub fn advance_cascade(&mut self) -> Option<CascadeStep> {
        let cascade = self.cascade.as_mut()?;
        match cascade.advance(&self.grid, self.state.score, &mut self.source) {
            Resolution::Step(step) => {
                self.grid = step.grid().clone();
                self.state.score = *step.score();
                if let Some(message) = step.combo_message() {
                    debug!(combo = step.combo(), %message, "Combo");
                }
                Some(*step)
            }
            Resolution::Settled => {
                let gained = cascade.gained();
                self.cascade = None;
                assert_invariants::<SettledBoardInvariants>(&self.grid);
                if self.state.moves_remaining == 0 {
                    self.state.status = GameStatus::GameOver;
                    info!(score = self.state.score, "Game over");
                } else if !self.has_legal_move() {
                    warn!("Board settled with no legal swap");
                }
                debug!(gained, score = self.state.score, "Cascade complete");
                None
            }
        }
    }

    /// Resolves the pending cascade to completion and returns every step.
    #[instrument(skip(self))]
    pub fn resolve_all(&mut self) -> Vec<CascadeStep> {
        let mut steps = Vec::new();
        while let Some(step) = self.advance_cascade() {
            steps.push(step);
        }
        steps
    }
}

// ─────────────────────────────────────────────────────────────
//  Queries
// ─────────────────────────────────────────────────────────────

impl Engine {
    /// True while a cascade is in flight.
    pub fn is_processing(&self) -> bool {
        self.cascade.is_some()
    }

    /// Snapshot of score, moves and status.
    pub fn current_state(&self) -> GameState {
        self.state
    }

    /// The committed board.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Rule parameters.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Combo depth of the cascade in flight, zero when idle.
    pub fn combo(&self) -> u32 {
        self.cascade.as_ref().map_or(0, Cascade::combo)
    }

    /// Every swap that would be accepted on the committed board.
    ///
    /// Empty while a cascade is in flight or the game is over.
    pub fn legal_swaps(&self) -> Vec<Swap> {
        if self.is_processing() || self.state.is_over() {
            return Vec::new();
        }
        legal_swaps(&self.grid)
    }

    /// True when at least one swap would be accepted.
    pub fn has_legal_move(&self) -> bool {
        !self.legal_swaps().is_empty()
    }
}
