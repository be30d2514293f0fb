//! Initial board generation.

use super::super::grid::Grid;
use super::super::source::TileSource;
use super::super::types::{Coord, Variety};
use tracing::{debug, instrument};

/// Fills a fresh `size`×`size` board with no run of three anywhere.
///
/// Cells are filled in row-major order. A drawn variety is rejected if it
/// would complete a run with the two cells to its left or the two cells
/// above it, and the draw is retried. At most two varieties are ever
/// excluded for one cell, so generation terminates whenever the source
/// draws from three or more varieties.
#[instrument(skip(source))]
pub fn generate_board(size: usize, source: &mut TileSource) -> Grid {
    assert!(
        source.variety_count() >= 3,
        "generation needs at least three varieties"
    );
    let mut grid = Grid::empty(size);
    let mut redraws = 0u32;
    for row in 0..size {
        for col in 0..size {
            let at = Coord::new(row, col);
            let mut variety = source.draw_variety();
            while completes_run(&grid, at, variety) {
                redraws += 1;
                variety = source.draw_variety();
            }
            let tile = source.fresh(variety);
            grid.set(at, Some(tile));
        }
    }
    debug!(size, redraws, "Board generated");
    grid
}

fn completes_run(grid: &Grid, at: Coord, variety: Variety) -> bool {
    let Coord { row, col } = at;
    let left = col >= 2
        && grid.variety_at(Coord::new(row, col - 1)) == Some(variety)
        && grid.variety_at(Coord::new(row, col - 2)) == Some(variety);
    let above = row >= 2
        && grid.variety_at(Coord::new(row - 1, col)) == Some(variety)
        && grid.variety_at(Coord::new(row - 2, col)) == Some(variety);
    left || above
}
