//! Board rules for the match-3 engine.

pub mod generate;
pub mod matches;
pub mod swap;

pub use generate::generate_board;
pub use matches::{MIN_RUN, MatchGroup, MatchSet, SPECIAL_RUN, find_matches};
pub use swap::{has_legal_move, legal_swaps, validate_swap};
