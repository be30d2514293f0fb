//! Greedy auto-player.

use super::Player;
use anyhow::Result;
use candy_engine::{Engine, Swap, validate_swap};
use tracing::debug;

/// Picks the legal swap whose first clear is largest.
///
/// Only the immediate clear set is counted; follow-up cascades are random
/// and ignored. Ties go to the earliest swap in scan order.
pub struct GreedyPlayer {
    name: String,
}

impl GreedyPlayer {
    /// Creates a new greedy player.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Scores every legal swap and returns the best one.
    pub fn best_swap(engine: &Engine) -> Option<Swap> {
        let mut best: Option<(Swap, usize)> = None;
        for swap in engine.legal_swaps() {
            let Ok((_, matches)) = validate_swap(engine.grid(), swap) else {
                continue;
            };
            let cleared = matches.clear_set().len();
            if best.is_none_or(|(_, top)| cleared > top) {
                best = Some((swap, cleared));
            }
        }
        best.map(|(swap, _)| swap)
    }
}

#[async_trait::async_trait]
impl Player for GreedyPlayer {
    async fn choose_swap(&mut self, engine: &Engine) -> Result<Option<Swap>> {
        let choice = Self::best_swap(engine);
        match choice {
            Some(swap) => debug!(player = %self.name, %swap, "Greedy player chose swap"),
            None => debug!(player = %self.name, "Greedy player sees no legal swap"),
        }
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
