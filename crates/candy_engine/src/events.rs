//! Events emitted while a cascade resolves.
//!
//! One [`CascadeStep`] is produced per resolution iteration. Steps carry
//! everything a presentation layer needs to animate the iteration; the
//! engine itself never waits on them.

use super::grid::Grid;
use super::types::{Coord, SpecialKind, TileId, Variety};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Directional clear effect fired by a special tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    /// A whole row was cleared.
    RowLaser,
    /// A whole column was cleared.
    ColumnLaser,
}

impl From<SpecialKind> for EffectKind {
    fn from(kind: SpecialKind) -> Self {
        match kind {
            SpecialKind::StripedHorizontal => EffectKind::RowLaser,
            SpecialKind::StripedVertical => EffectKind::ColumnLaser,
        }
    }
}

/// A special tile detonating at a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LaserEffect {
    /// Row or column laser.
    pub kind: EffectKind,
    /// Where the special tile sat.
    pub at: Coord,
}

/// One cleared cell, for particles and score popups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedCell {
    /// Cell position.
    pub at: Coord,
    /// Variety of the cleared tile.
    pub variety: Variety,
    /// Special kind of the cleared tile, if any.
    pub special: Option<SpecialKind>,
    /// Id of the cleared tile.
    pub tile: TileId,
    /// Points awarded for this cell.
    pub points: u32,
}

/// A special tile born from a four-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedSpecial {
    /// The cell it was placed in before gravity.
    pub at: Coord,
    /// Orientation.
    pub kind: SpecialKind,
    /// Variety of the run it came from.
    pub variety: Variety,
    /// Id of the new tile.
    pub tile: TileId,
}

/// Escalating praise shown from the second consecutive clear onward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ComboMessage {
    /// Combo 2.
    #[display("Sweet!")]
    Sweet,
    /// Combo 3.
    #[display("Tasty!")]
    Tasty,
    /// Combo 4.
    #[display("Delicious!")]
    Delicious,
    /// Combo 5 and beyond.
    #[display("Divine!")]
    Divine,
}

impl ComboMessage {
    /// Messages in escalating order.
    pub const ALL: [ComboMessage; 4] = [
        ComboMessage::Sweet,
        ComboMessage::Tasty,
        ComboMessage::Delicious,
        ComboMessage::Divine,
    ];

    /// Message for a combo depth. None at depth 0 or 1.
    pub fn for_combo(combo: u32) -> Option<Self> {
        if combo <= 1 {
            return None;
        }
        let index = (combo as usize - 2).min(Self::ALL.len() - 1);
        Some(Self::ALL[index])
    }
}

/// Everything that happened in one cascade iteration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct CascadeStep {
    /// 1-based iteration within the cascade.
    iteration: u32,
    /// Cleared cells in row-major order.
    cleared: Vec<ClearedCell>,
    /// Specials that detonated, in trigger order.
    effects: Vec<LaserEffect>,
    /// Specials created by four-runs.
    spawned: Vec<SpawnedSpecial>,
    /// Points gained this iteration.
    score_delta: u64,
    /// Score after this iteration.
    score: u64,
    /// Combo depth after this iteration.
    combo: u32,
    /// Praise for the combo depth, if escalated.
    combo_message: Option<ComboMessage>,
    /// Board after compaction and refill.
    grid: Grid,
    /// Ids of tiles that fell in from above the board.
    introduced: Vec<TileId>,
}

impl CascadeStep {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        iteration: u32,
        cleared: Vec<ClearedCell>,
        effects: Vec<LaserEffect>,
        spawned: Vec<SpawnedSpecial>,
        score_delta: u64,
        score: u64,
        combo: u32,
        grid: Grid,
        introduced: Vec<TileId>,
    ) -> Self {
        Self {
            iteration,
            cleared,
            effects,
            spawned,
            score_delta,
            score,
            combo,
            combo_message: ComboMessage::for_combo(combo),
            grid,
            introduced,
        }
    }

    /// Cleared coordinates as a set.
    pub fn clear_set(&self) -> BTreeSet<Coord> {
        self.cleared.iter().map(|cell| cell.at).collect()
    }

    /// True if the tile was introduced by this step's refill.
    pub fn is_introduced(&self, id: TileId) -> bool {
        self.introduced.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_messages_escalate_and_cap() {
        assert_eq!(ComboMessage::for_combo(0), None);
        assert_eq!(ComboMessage::for_combo(1), None);
        assert_eq!(ComboMessage::for_combo(2), Some(ComboMessage::Sweet));
        assert_eq!(ComboMessage::for_combo(3), Some(ComboMessage::Tasty));
        assert_eq!(ComboMessage::for_combo(4), Some(ComboMessage::Delicious));
        assert_eq!(ComboMessage::for_combo(5), Some(ComboMessage::Divine));
        assert_eq!(ComboMessage::for_combo(40), Some(ComboMessage::Divine));
        assert_eq!(ComboMessage::Delicious.to_string(), "Delicious!");
    }

    #[test]
    fn test_effect_kind_from_special() {
        assert_eq!(
            EffectKind::from(SpecialKind::StripedHorizontal),
            EffectKind::RowLaser
        );
        assert_eq!(
            EffectKind::from(SpecialKind::StripedVertical),
            EffectKind::ColumnLaser
        );
    }
}
