//! Game orchestration: a player, an engine and a paced cascade.

use super::players::Player;
use anyhow::Result;
use candy_engine::{CascadeStep, Engine, GameState, Grid, Swap, SwapOutcome};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Rejected swaps in a row before the orchestrator gives up on a player.
pub const MAX_REJECTIONS: u32 = 8;

/// Messages sent from the orchestrator to whoever presents the game.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    /// A game began on this board.
    Started {
        /// Initial score and moves.
        state: GameState,
        /// Initial board.
        grid: Grid,
    },
    /// The player proposed a swap and the engine answered.
    Swapped {
        /// Player name.
        player: String,
        /// Proposed swap.
        swap: Swap,
        /// Engine verdict.
        outcome: SwapOutcome,
    },
    /// One cascade iteration resolved.
    Step(Box<CascadeStep>),
    /// The cascade finished and the board is stable.
    Settled {
        /// State after the cascade.
        state: GameState,
    },
    /// The board has no legal swap left.
    Stuck {
        /// Final state.
        state: GameState,
    },
    /// Moves ran out.
    GameOver {
        /// Final state.
        state: GameState,
    },
}

/// Runs one game to completion for a single player.
pub struct Orchestrator {
    engine: Engine,
    player: Box<dyn Player>,
    settle: Duration,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator.
    ///
    /// `settle` is the minimum pause after each cascade step, so a
    /// presentation layer has time to animate it. Zero disables pacing.
    pub fn new(
        engine: Engine,
        player: Box<dyn Player>,
        settle: Duration,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            engine,
            player,
            settle,
            event_tx,
        }
    }

    /// The engine being played.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Runs the game loop until moves run out or the board is stuck.
    ///
    /// # Errors
    ///
    /// Fails if the player errors, the player keeps proposing rejected
    /// swaps, or the event receiver is gone.
    #[instrument(skip(self), fields(player = %self.player.name()))]
    pub async fn run(&mut self) -> Result<GameState> {
        info!("Starting game orchestration");
        self.event_tx.send(GameEvent::Started {
            state: self.engine.current_state(),
            grid: self.engine.grid().clone(),
        })?;

        let mut rejections = 0u32;
        loop {
            let state = self.engine.current_state();
            if state.is_over() {
                info!(score = state.score(), "Game over");
                self.event_tx.send(GameEvent::GameOver { state })?;
                return Ok(state);
            }

            debug!(moves_remaining = state.moves_remaining(), "Waiting for swap");
            let Some(swap) = self.player.choose_swap(&self.engine).await? else {
                warn!(score = state.score(), "No legal swap left");
                self.event_tx.send(GameEvent::Stuck { state })?;
                return Ok(state);
            };

            let outcome = self.engine.attempt_swap(swap.a, swap.b);
            self.event_tx.send(GameEvent::Swapped {
                player: self.player.name().to_string(),
                swap,
                outcome,
            })?;

            if !outcome.is_accepted() {
                rejections += 1;
                warn!(%swap, %outcome, rejections, "Swap rejected");
                if rejections >= MAX_REJECTIONS {
                    anyhow::bail!(
                        "{} proposed {} rejected swaps in a row",
                        self.player.name(),
                        rejections
                    );
                }
                continue;
            }
            rejections = 0;

            self.pace_cascade().await?;
            self.event_tx.send(GameEvent::Settled {
                state: self.engine.current_state(),
            })?;
        }
    }

    /// Drives the cascade one step at a time, pausing after each step.
    async fn pace_cascade(&mut self) -> Result<()> {
        while let Some(step) = self.engine.advance_cascade() {
            debug!(
                iteration = step.iteration(),
                score = step.score(),
                combo = step.combo(),
                "Step resolved"
            );
            self.event_tx.send(GameEvent::Step(Box::new(step)))?;
            if !self.settle.is_zero() {
                tokio::time::sleep(self.settle).await;
            }
        }
        Ok(())
    }

    /// Restarts the game with a fresh board and returns its state.
    ///
    /// Call [`Orchestrator::run`] again to play the new game.
    #[instrument(skip(self))]
    pub fn restart(&mut self) -> GameState {
        let (state, _) = self.engine.new_game();
        debug!(moves_remaining = state.moves_remaining(), "Game restarted");
        state
    }
}
