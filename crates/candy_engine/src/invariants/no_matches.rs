//! Stable board invariant: no run of three remains.

use super::super::grid::Grid;
use super::super::rules::find_matches;
use super::Invariant;

/// Invariant: the board contains no run of three or more.
pub struct NoMatchesInvariant;

impl Invariant<Grid> for NoMatchesInvariant {
    fn holds(grid: &Grid) -> bool {
        find_matches(grid).is_empty()
    }

    fn description() -> &'static str {
        "No run of three or more remains on the board"
    }
}
