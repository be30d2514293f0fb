//! Square board of nullable tile cells.

use super::source::TileSource;
use super::types::{Coord, SpecialKind, Tile, Variety};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// N×N board. Cells are stored in row-major order.
///
/// A cell is `None` only while a cascade is between its clear and refill
/// phases; a settled board is always full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Grid {
    /// Creates a board with every cell empty.
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a board from a text layout, one string per row.
    ///
    /// Cells are whitespace-separated tokens: a variety letter (see
    /// [`Variety::letter`]) optionally followed by a special marker
    /// (`-` horizontal, `|` vertical), or `.` for an empty cell. Tiles are
    /// minted from `source` in row-major order.
    #[instrument(skip(rows, source), fields(rows = rows.len()))]
    pub fn from_rows(rows: &[&str], source: &mut TileSource) -> Result<Self, LayoutError> {
        let size = rows.len();
        let mut grid = Self::empty(size);
        for (row, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != size {
                return Err(LayoutError::RowWidth {
                    row,
                    expected: size,
                    found: tokens.len(),
                });
            }
            for (col, token) in tokens.into_iter().enumerate() {
                let tile = parse_token(token, source).ok_or_else(|| LayoutError::BadToken {
                    row,
                    col,
                    token: token.to_string(),
                })?;
                grid.set(Coord::new(row, col), tile);
            }
        }
        Ok(grid)
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// True if `at` lies on the board.
    pub fn contains(&self, at: Coord) -> bool {
        at.row < self.size && at.col < self.size
    }

    fn index(&self, at: Coord) -> usize {
        assert!(
            self.contains(at),
            "coordinate {} outside {}x{} grid",
            at,
            self.size,
            self.size
        );
        at.row * self.size + at.col
    }

    /// Returns the tile at `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` is off the board.
    pub fn get(&self, at: Coord) -> Option<&Tile> {
        self.cells[self.index(at)].as_ref()
    }

    /// Returns the variety at `at`, if the cell is occupied.
    pub fn variety_at(&self, at: Coord) -> Option<Variety> {
        self.get(at).map(Tile::variety)
    }

    /// Replaces the contents of a cell.
    pub fn set(&mut self, at: Coord, tile: Option<Tile>) {
        let index = self.index(at);
        self.cells[index] = tile;
    }

    /// Empties a cell, returning what it held.
    pub fn take(&mut self, at: Coord) -> Option<Tile> {
        let index = self.index(at);
        self.cells[index].take()
    }

    /// Exchanges two cells in place.
    pub fn swap(&mut self, a: Coord, b: Coord) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.cells.swap(ia, ib);
    }

    /// Returns a copy of this board with two cells exchanged.
    pub fn swapped(&self, a: Coord, b: Coord) -> Self {
        let mut next = self.clone();
        next.swap(a, b);
        next
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        self.coords()
            .zip(self.cells.iter())
            .filter_map(|(at, cell)| cell.as_ref().map(|tile| (at, tile)))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.coords()
            .zip(self.cells.iter())
            .filter(|(_, cell)| cell.is_none())
            .map(|(at, _)| at)
            .collect()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Formats the board in the layout accepted by [`Grid::from_rows`].
    pub fn display(&self) -> String {
        let mut out = String::new();
        for row in 0..self.size {
            let line: Vec<String> = (0..self.size)
                .map(|col| format!("{:<2}", token(self.get(Coord::new(row, col)))))
                .collect();
            out.push_str(line.join(" ").trim_end());
            if row + 1 < self.size {
                out.push('\n');
            }
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn token(cell: Option<&Tile>) -> String {
    match cell {
        None => ".".to_string(),
        Some(tile) => {
            let mut s = tile.variety().letter().to_string();
            if let Some(kind) = tile.special() {
                s.push(kind.marker());
            }
            s
        }
    }
}

fn parse_token(token: &str, source: &mut TileSource) -> Option<Option<Tile>> {
    if token == "." {
        return Some(None);
    }
    let mut chars = token.chars();
    let variety = Variety::from_letter(chars.next()?)?;
    match (chars.next(), chars.next()) {
        (None, _) => Some(Some(source.fresh(variety))),
        (Some(marker), None) => {
            let kind = SpecialKind::from_marker(marker)?;
            Some(Some(source.fresh_special(variety, kind)))
        }
        _ => None,
    }
}

/// A text layout could not be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LayoutError {
    /// A row does not have as many cells as there are rows.
    #[display("row {} has {} cells, expected {}", row, found, expected)]
    RowWidth {
        /// Offending row.
        row: usize,
        /// Required width.
        expected: usize,
        /// Actual width.
        found: usize,
    },
    /// A cell token is not a known variety/marker.
    #[display("unrecognised cell {:?} at ({}, {})", token, row, col)]
    BadToken {
        /// Row of the token.
        row: usize,
        /// Column of the token.
        col: usize,
        /// The token text.
        token: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> TileSource {
        TileSource::seeded(0, 6)
    }

    #[test]
    fn test_layout_round_trip() {
        let rows = ["c l- h", "d . k|", "g c l"];
        let grid = Grid::from_rows(&rows, &mut source()).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.variety_at(Coord::new(0, 1)), Some(Variety::Lollipop));
        assert_eq!(
            grid.get(Coord::new(0, 1)).and_then(Tile::special),
            Some(SpecialKind::StripedHorizontal)
        );
        assert!(grid.get(Coord::new(1, 1)).is_none());
        assert_eq!(grid.display(), "c  l- h\nd  .  k|\ng  c  l");

        let text = grid.display();
        let lines: Vec<&str> = text.lines().collect();
        let reparsed = Grid::from_rows(&lines, &mut source()).unwrap();
        assert_eq!(reparsed.display(), grid.display());
    }

    #[test]
    fn test_layout_errors() {
        let err = Grid::from_rows(&["c l", "c"], &mut source()).unwrap_err();
        assert_eq!(
            err,
            LayoutError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        let err = Grid::from_rows(&["c x", "c l"], &mut source()).unwrap_err();
        assert!(matches!(err, LayoutError::BadToken { col: 1, .. }));
        let err = Grid::from_rows(&["c l*", "c l"], &mut source()).unwrap_err();
        assert!(matches!(err, LayoutError::BadToken { .. }));
    }

    #[test]
    fn test_swapped_leaves_original_untouched() {
        let grid = Grid::from_rows(&["c l", "h d"], &mut source()).unwrap();
        let next = grid.swapped(Coord::new(0, 0), Coord::new(0, 1));
        assert_eq!(grid.variety_at(Coord::new(0, 0)), Some(Variety::Candy));
        assert_eq!(next.variety_at(Coord::new(0, 0)), Some(Variety::Lollipop));
        assert_eq!(next.get(Coord::new(0, 1)).map(Tile::id), grid.get(Coord::new(0, 0)).map(Tile::id));
    }

    #[test]
    fn test_empty_cells_and_fullness() {
        let mut grid = Grid::from_rows(&["c l", "h d"], &mut source()).unwrap();
        assert!(grid.is_full());
        let taken = grid.take(Coord::new(1, 0));
        assert_eq!(taken.map(|t| t.variety()), Some(Variety::Chocolate));
        assert_eq!(grid.empty_cells(), vec![Coord::new(1, 0)]);
        assert!(!grid.is_full());
        assert_eq!(grid.tiles().count(), 3);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_out_of_bounds_panics() {
        let grid = Grid::from_rows(&["c l", "h d"], &mut source()).unwrap();
        grid.get(Coord::new(2, 0));
    }
}
