//! Run detection along rows and columns.

use super::super::grid::Grid;
use super::super::types::{Axis, Coord, SpecialKind, Variety};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{instrument, trace};

/// Shortest run that clears.
pub const MIN_RUN: usize = 3;

/// The only run length that spawns a special tile.
pub const SPECIAL_RUN: usize = 4;

/// A maximal run of same-variety tiles along one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    axis: Axis,
    variety: Variety,
    cells: Vec<Coord>,
}

impl MatchGroup {
    /// Axis the run lies on.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Shared variety of the run.
    pub fn variety(&self) -> Variety {
        self.variety
    }

    /// Member cells, in scan order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Run length.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; runs hold at least [`MIN_RUN`] cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The special this run spawns. Only runs of exactly four spawn.
    pub fn spawned_special(&self) -> Option<SpecialKind> {
        (self.len() == SPECIAL_RUN).then(|| SpecialKind::for_axis(self.axis))
    }
}

/// All runs found in one scan. Horizontal runs come first, then vertical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    runs: Vec<MatchGroup>,
}

impl MatchSet {
    /// The runs, horizontal first.
    pub fn runs(&self) -> &[MatchGroup] {
        &self.runs
    }

    /// True when nothing matched.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Union of every run's cells. A cell in both a row and a column run
    /// appears once.
    pub fn clear_set(&self) -> BTreeSet<Coord> {
        self.runs
            .iter()
            .flat_map(|run| run.cells.iter().copied())
            .collect()
    }
}

/// Scans the board for runs of three or more.
///
/// Each row is scanned left to right; a run is extended greedily and the
/// scan resumes just past it, so runs on one axis never overlap. Columns are
/// scanned top to bottom the same way. Empty cells never match.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn find_matches(grid: &Grid) -> MatchSet {
    let n = grid.size();
    let mut runs = Vec::new();
    for row in 0..n {
        scan_line(grid, Axis::Horizontal, |i| Coord::new(row, i), &mut runs);
    }
    for col in 0..n {
        scan_line(grid, Axis::Vertical, |i| Coord::new(i, col), &mut runs);
    }
    trace!(runs = runs.len(), "Scan complete");
    MatchSet { runs }
}

fn scan_line(
    grid: &Grid,
    axis: Axis,
    at: impl Fn(usize) -> Coord,
    runs: &mut Vec<MatchGroup>,
) {
    let n = grid.size();
    let mut start = 0;
    while start + MIN_RUN <= n {
        let Some(variety) = grid.variety_at(at(start)) else {
            start += 1;
            continue;
        };
        let mut end = start + 1;
        while end < n && grid.variety_at(at(end)) == Some(variety) {
            end += 1;
        }
        if end - start >= MIN_RUN {
            runs.push(MatchGroup {
                axis,
                variety,
                cells: (start..end).map(&at).collect(),
            });
            start = end;
        } else {
            start += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::TileSource;

    fn grid(rows: &[&str]) -> Grid {
        Grid::from_rows(rows, &mut TileSource::seeded(0, 6)).unwrap()
    }

    #[test]
    fn test_no_matches() {
        let g = grid(&["c l h", "l h c", "h c l"]);
        assert!(find_matches(&g).is_empty());
    }

    #[test]
    fn test_horizontal_three() {
        let g = grid(&["c c c d", "l h d k", "h d k l", "d k l h"]);
        let set = find_matches(&g);
        assert_eq!(set.runs().len(), 1);
        let run = &set.runs()[0];
        assert_eq!(run.axis(), Axis::Horizontal);
        assert_eq!(run.variety(), Variety::Candy);
        assert_eq!(
            run.cells(),
            &[Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)]
        );
        assert_eq!(run.spawned_special(), None);
    }

    #[test]
    fn test_vertical_four_spawns() {
        let g = grid(&["g l h d", "g h d k", "g d k l", "g k l h"]);
        let set = find_matches(&g);
        assert_eq!(set.runs().len(), 1);
        assert_eq!(set.runs()[0].axis(), Axis::Vertical);
        assert_eq!(set.runs()[0].len(), 4);
        assert_eq!(
            set.runs()[0].spawned_special(),
            Some(SpecialKind::StripedVertical)
        );
    }

    #[test]
    fn test_five_run_does_not_spawn() {
        let g = grid(&[
            "k k k k k",
            "c l h d g",
            "l h d g c",
            "h d g c l",
            "d g c l h",
        ]);
        let set = find_matches(&g);
        assert_eq!(set.runs().len(), 1);
        assert_eq!(set.runs()[0].len(), 5);
        assert_eq!(set.runs()[0].spawned_special(), None);
    }

    #[test]
    fn test_crossing_runs_kept_separate() {
        let g = grid(&["d c l", "c c c", "l c d"]);
        let set = find_matches(&g);
        assert_eq!(set.runs().len(), 2);
        assert_eq!(set.runs()[0].axis(), Axis::Horizontal);
        assert_eq!(set.runs()[1].axis(), Axis::Vertical);
        // Shared centre cell counted once.
        assert_eq!(set.clear_set().len(), 5);
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let g = grid(&[
            "c c c l l l",
            "h d k g h d",
            "d k g h d k",
            "k g h d k g",
            "g h d k g h",
            "h d k g h d",
        ]);
        let set = find_matches(&g);
        assert_eq!(set.runs().len(), 2);
        assert_eq!(set.runs()[1].variety(), Variety::Lollipop);
    }

    #[test]
    fn test_empty_cells_never_match() {
        let g = grid(&[". . .", "c l h", "l h c"]);
        assert!(find_matches(&g).is_empty());
    }

    #[test]
    fn test_rescan_is_stable() {
        let g = grid(&["c l h", "l h c", "h c l"]);
        assert_eq!(find_matches(&g), find_matches(&g));
    }
}
