//! Player trait and implementations.

mod greedy;

pub use greedy::GreedyPlayer;

use anyhow::Result;
use candy_engine::{Engine, Swap};

/// Trait for players that can pick swaps.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Chooses the next swap on an idle engine.
    ///
    /// Returns `None` when the player sees no swap worth making.
    async fn choose_swap(&mut self, engine: &Engine) -> Result<Option<Swap>>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
