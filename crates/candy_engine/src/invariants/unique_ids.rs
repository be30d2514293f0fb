//! Unique identity invariant: no tile is aliased across cells.

use super::super::grid::Grid;
use super::Invariant;
use std::collections::HashSet;

/// Invariant: each tile id appears in at most one cell.
///
/// Tiles move between cells by value; an id seen twice means a tile was
/// copied instead of moved.
pub struct UniqueIdsInvariant;

impl Invariant<Grid> for UniqueIdsInvariant {
    fn holds(grid: &Grid) -> bool {
        let mut seen = HashSet::new();
        grid.tiles().all(|(_, tile)| seen.insert(tile.id()))
    }

    fn description() -> &'static str {
        "Each tile id occupies at most one cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TileSource;
    use crate::types::Coord;

    #[test]
    fn test_minted_tiles_are_unique() {
        let grid = Grid::from_rows(&["c l", "h d"], &mut TileSource::seeded(0, 6)).unwrap();
        assert!(UniqueIdsInvariant::holds(&grid));
    }

    #[test]
    fn test_duplicated_tile_violates() {
        let mut grid = Grid::from_rows(&["c l", "h d"], &mut TileSource::seeded(0, 6)).unwrap();
        let duplicate = grid.get(Coord::new(0, 0)).cloned();
        grid.set(Coord::new(1, 1), duplicate);
        assert!(!UniqueIdsInvariant::holds(&grid));
    }
}
