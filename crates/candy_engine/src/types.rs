//! Core domain types for the match-3 board.

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter, IntoEnumIterator};

/// The matching "colour" of a tile.
///
/// A board configured with `variety_count = k` only ever draws the first
/// `k` varieties in declaration order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumCount,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variety {
    /// Wrapped candy.
    Candy,
    /// Lollipop.
    Lollipop,
    /// Chocolate bar.
    Chocolate,
    /// Donut.
    Donut,
    /// Cookie.
    Cookie,
    /// Grape.
    Grape,
}

impl Variety {
    /// Returns the variety at `index` in declaration order.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Position of this variety in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Single-letter code used by the text layout.
    pub fn letter(self) -> char {
        match self {
            Variety::Candy => 'c',
            Variety::Lollipop => 'l',
            Variety::Chocolate => 'h',
            Variety::Donut => 'd',
            Variety::Cookie => 'k',
            Variety::Grape => 'g',
        }
    }

    /// Parses a layout letter back into a variety.
    pub fn from_letter(letter: char) -> Option<Self> {
        Self::iter().find(|v| v.letter() == letter)
    }

    /// Glyph a presentation layer can draw for this variety.
    pub fn glyph(self) -> &'static str {
        match self {
            Variety::Candy => "🍬",
            Variety::Lollipop => "🍭",
            Variety::Chocolate => "🍫",
            Variety::Donut => "🍩",
            Variety::Cookie => "🍪",
            Variety::Grape => "🍇",
        }
    }

    /// Particle colour for clear effects, as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Variety::Candy => "#8de2f2",
            Variety::Lollipop => "#f76a8c",
            Variety::Chocolate => "#7b4f2c",
            Variety::Donut => "#ff9bde",
            Variety::Cookie => "#d4a15f",
            Variety::Grape => "#a176f2",
        }
    }
}

/// Axis of a run on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Along a row.
    Horizontal,
    /// Along a column.
    Vertical,
}

/// Extra clear behaviour carried by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpecialKind {
    /// Clears its whole row when cleared.
    StripedHorizontal,
    /// Clears its whole column when cleared.
    StripedVertical,
}

impl SpecialKind {
    /// The special created by a four-run along `axis`.
    pub fn for_axis(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => SpecialKind::StripedHorizontal,
            Axis::Vertical => SpecialKind::StripedVertical,
        }
    }

    /// The line this special clears.
    pub fn axis(self) -> Axis {
        match self {
            SpecialKind::StripedHorizontal => Axis::Horizontal,
            SpecialKind::StripedVertical => Axis::Vertical,
        }
    }

    /// Marker appended to the variety letter in the text layout.
    pub fn marker(self) -> char {
        match self {
            SpecialKind::StripedHorizontal => '-',
            SpecialKind::StripedVertical => '|',
        }
    }

    /// Parses a layout marker.
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '-' => Some(SpecialKind::StripedHorizontal),
            '|' => Some(SpecialKind::StripedVertical),
            _ => None,
        }
    }
}

/// Identity of a tile, unique within one engine for its whole lifetime.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("tile-{}", _0)]
pub struct TileId(pub u64);

/// A single playable unit on the grid.
///
/// Not `Copy`: a tile moves from cell to cell and is never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    variety: Variety,
    special: Option<SpecialKind>,
    id: TileId,
}

impl Tile {
    /// Creates a tile. Ids are handed out by [`crate::TileSource`].
    pub(crate) fn new(variety: Variety, special: Option<SpecialKind>, id: TileId) -> Self {
        Self {
            variety,
            special,
            id,
        }
    }

    /// Returns the variety.
    pub fn variety(&self) -> Variety {
        self.variety
    }

    /// Returns the special kind, if any.
    pub fn special(&self) -> Option<SpecialKind> {
        self.special
    }

    /// Returns the tile id.
    pub fn id(&self) -> TileId {
        self.id
    }
}

/// A grid position. Row 0 is the top edge; gravity pulls toward larger rows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({}, {})", row, col)]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two coordinates.
    pub fn distance(self, other: Coord) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when the two coordinates share an edge.
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.distance(other) == 1
    }
}
