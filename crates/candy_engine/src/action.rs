//! First-class swap actions and their outcomes.
//!
//! A swap is the player's intent. It is validated against the board before
//! anything is committed, and every rejection is a value, not an error path.

use super::types::Coord;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A request to exchange the tiles at two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    /// First cell.
    pub a: Coord,
    /// Second cell.
    pub b: Coord,
}

impl Swap {
    /// Creates a new swap.
    #[instrument]
    pub fn new(a: Coord, b: Coord) -> Self {
        Self { a, b }
    }

    /// True when the two cells share an edge.
    pub fn is_adjacent(&self) -> bool {
        self.a.is_adjacent(self.b)
    }
}

impl std::fmt::Display for Swap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Why a swap was not legal on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum SwapRejection {
    /// The cells are identical or do not share an edge.
    #[display("{} is not an adjacent pair", _0)]
    NotAdjacent(Swap),

    /// Exchanging the tiles forms no run.
    #[display("{} makes no match", _0)]
    NoMatch(Swap),
}

impl std::error::Error for SwapRejection {}

/// Result of [`crate::Engine::attempt_swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum SwapOutcome {
    /// The swap was committed, a move was spent and a cascade is pending.
    #[display("accepted")]
    Accepted,

    /// The cells were identical or not adjacent. Nothing changed.
    #[display("rejected: not adjacent")]
    RejectedNotAdjacent,

    /// The swap forms no run. Nothing changed; both cells are reported so a
    /// presentation layer can play a shake.
    #[display("rejected: no match between {} and {}", a, b)]
    RejectedNoMatch {
        /// First cell.
        a: Coord,
        /// Second cell.
        b: Coord,
    },

    /// A cascade is still resolving.
    #[display("rejected: cascade in progress")]
    RejectedBusy,

    /// The game has ended.
    #[display("rejected: game over")]
    RejectedGameOver,
}

impl SwapOutcome {
    /// True for [`SwapOutcome::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, SwapOutcome::Accepted)
    }
}

impl From<SwapRejection> for SwapOutcome {
    fn from(rejection: SwapRejection) -> Self {
        match rejection {
            SwapRejection::NotAdjacent(_) => SwapOutcome::RejectedNotAdjacent,
            SwapRejection::NoMatch(swap) => SwapOutcome::RejectedNoMatch {
                a: swap.a,
                b: swap.b,
            },
        }
    }
}
