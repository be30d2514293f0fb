//! Full board invariant: no cell is left empty.

use super::super::grid::Grid;
use super::Invariant;

/// Invariant: every cell holds a tile.
///
/// Cells are empty only between the clear and refill phases of a cascade
/// iteration, never on a board handed back to the caller.
pub struct FullBoardInvariant;

impl Invariant<Grid> for FullBoardInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.is_full()
    }

    fn description() -> &'static str {
        "Every cell holds a tile"
    }
}
