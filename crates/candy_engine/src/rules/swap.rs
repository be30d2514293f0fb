//! Swap validation and legal-move detection.

use super::super::action::{Swap, SwapRejection};
use super::super::grid::Grid;
use super::super::types::Coord;
use super::matches::{MatchSet, find_matches};
use tracing::{debug, instrument};

/// Checks a swap against the board without touching it.
///
/// On success returns the hypothetical board with the two tiles exchanged
/// together with the runs it contains; the caller decides whether to commit.
#[instrument(skip(grid), fields(swap = %swap))]
pub fn validate_swap(grid: &Grid, swap: Swap) -> Result<(Grid, MatchSet), SwapRejection> {
    if !swap.is_adjacent() {
        debug!("Rejected: cells not adjacent");
        return Err(SwapRejection::NotAdjacent(swap));
    }
    let candidate = grid.swapped(swap.a, swap.b);
    let matches = find_matches(&candidate);
    if matches.is_empty() {
        debug!("Rejected: no run formed");
        return Err(SwapRejection::NoMatch(swap));
    }
    debug!(runs = matches.runs().len(), "Swap is legal");
    Ok((candidate, matches))
}

/// Every adjacent pair whose exchange forms at least one run.
///
/// Pairs are listed in row-major order of their first cell, right neighbour
/// before down neighbour.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn legal_swaps(grid: &Grid) -> Vec<Swap> {
    let n = grid.size();
    grid.coords()
        .flat_map(|a| {
            let right = (a.col + 1 < n).then(|| Coord::new(a.row, a.col + 1));
            let down = (a.row + 1 < n).then(|| Coord::new(a.row + 1, a.col));
            [right, down].into_iter().flatten().map(move |b| Swap::new(a, b))
        })
        .filter(|swap| validate_swap(grid, *swap).is_ok())
        .collect()
}

/// True when at least one legal swap exists.
pub fn has_legal_move(grid: &Grid) -> bool {
    !legal_swaps(grid).is_empty()
}
