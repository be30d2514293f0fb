//! Cascade resolution for one committed swap.
//!
//! Each [`Cascade::advance`] call runs one iteration: scan for runs, build
//! the clear set, trigger specials, compact, then refill. The resolver stops
//! in `Idle` when a scan finds a stable, full board. Each iteration reads the
//! current board and produces an owned pending board; the caller commits it
//! from the returned [`CascadeStep`].

use super::events::{CascadeStep, ClearedCell, EffectKind, LaserEffect, SpawnedSpecial};
use super::grid::Grid;
use super::rules::{MatchSet, find_matches};
use super::source::TileSource;
use super::types::{Axis, Coord, SpecialKind, TileId, Variety};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, instrument, trace};

/// Phase the resolver is in between [`Cascade::advance`] calls.
///
/// Clearing, triggering, compacting and refilling all happen inside one
/// call, so only the two resting phases are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadePhase {
    /// The next call scans for runs and resolves them.
    Scanning,
    /// The board is stable; nothing left to resolve.
    Idle,
}

/// Result of one [`Cascade::advance`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An iteration ran. Commit `step.grid()` as the new board.
    Step(Box<CascadeStep>),
    /// The board was already stable; the cascade is over.
    Settled,
}

/// A special tile to be placed once the clear has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlannedSpawn {
    pub(crate) at: Coord,
    pub(crate) kind: SpecialKind,
    pub(crate) variety: Variety,
}

/// Resolver state for a single swap.
#[derive(Debug, Clone)]
pub struct Cascade {
    points_per_tile: u32,
    phase: CascadePhase,
    combo: u32,
    iteration: u32,
    gained: u64,
}

/// Working state of one iteration.
struct Pending {
    grid: Grid,
    clear: BTreeSet<Coord>,
    spawns: Vec<PlannedSpawn>,
    effects: Vec<LaserEffect>,
}

impl Cascade {
    /// Starts resolving a freshly committed swap. Combo starts at zero.
    #[instrument]
    pub fn new(points_per_tile: u32) -> Self {
        Self {
            points_per_tile,
            phase: CascadePhase::Scanning,
            combo: 0,
            iteration: 0,
            gained: 0,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CascadePhase {
        self.phase
    }

    /// Consecutive iterations that cleared something.
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Iterations run so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Points gained over the whole cascade so far.
    pub fn gained(&self) -> u64 {
        self.gained
    }

    /// True once the cascade has reached `Idle`.
    pub fn is_settled(&self) -> bool {
        self.phase == CascadePhase::Idle
    }

    /// Runs one resolution iteration against `current`.
    ///
    /// `score` is the running game score before this iteration; the step
    /// reports the score after it. Returns [`Resolution::Settled`] once a
    /// scan finds no runs on a full board.
    #[instrument(skip(self, current, source), fields(iteration = self.iteration + 1))]
    pub fn advance(&mut self, current: &Grid, score: u64, source: &mut TileSource) -> Resolution {
        if self.phase == CascadePhase::Idle {
            return Resolution::Settled;
        }

        let matches = find_matches(current);
        if matches.is_empty() && current.is_full() {
            self.phase = CascadePhase::Idle;
            self.combo = 0;
            debug!(gained = self.gained, iterations = self.iteration, "Cascade settled");
            return Resolution::Settled;
        }

        let mut pending = self.clear(current, &matches, source);

        trigger_specials(&mut pending);

        let cleared = self.record_clear(&pending);
        let score_delta = pending.clear.len() as u64 * u64::from(self.points_per_tile);
        if pending.clear.is_empty() {
            self.combo = 0;
        } else {
            self.combo += 1;
        }
        self.gained += score_delta;

        let spawned = place_spawns(&mut pending.grid, &pending.clear, &pending.spawns, source);
        apply_gravity(&mut pending.grid);

        let introduced = refill(&mut pending.grid, source);

        self.iteration += 1;
        debug!(
            cleared = cleared.len(),
            effects = pending.effects.len(),
            spawned = spawned.len(),
            score_delta,
            combo = self.combo,
            "Cascade iteration resolved"
        );

        Resolution::Step(Box::new(CascadeStep::new(
            self.iteration,
            cleared,
            pending.effects,
            spawned,
            score_delta,
            score + score_delta,
            self.combo,
            pending.grid,
            introduced,
        )))
    }

    /// Unions all runs into the clear set and picks spawn sites.
    ///
    /// Runs are visited horizontal first, then vertical. Each four-run picks
    /// one of its cells uniformly at random.
    fn clear(&self, current: &Grid, matches: &MatchSet, source: &mut TileSource) -> Pending {
        let mut spawns = Vec::new();
        for run in matches.runs() {
            if let Some(kind) = run.spawned_special() {
                let at = source.pick(run.cells());
                trace!(%at, ?kind, "Spawn site chosen");
                spawns.push(PlannedSpawn {
                    at,
                    kind,
                    variety: run.variety(),
                });
            }
        }
        Pending {
            grid: current.clone(),
            clear: matches.clear_set(),
            spawns,
            effects: Vec::new(),
        }
    }

    fn record_clear(&self, pending: &Pending) -> Vec<ClearedCell> {
        pending
            .clear
            .iter()
            .filter_map(|&at| {
                pending.grid.get(at).map(|tile| ClearedCell {
                    at,
                    variety: tile.variety(),
                    special: tile.special(),
                    tile: tile.id(),
                    points: self.points_per_tile,
                })
            })
            .collect()
    }
}

/// Grows the clear set until no unprocessed special tile is left in it.
///
/// A horizontal special adds its whole row, a vertical one its whole
/// column. Newly added cells may hold specials of their own, which fire on
/// the next pass.
fn trigger_specials(pending: &mut Pending) {
    let n = pending.grid.size();
    let mut processed: BTreeSet<Coord> = BTreeSet::new();
    loop {
        let fired: Vec<(Coord, SpecialKind)> = pending
            .clear
            .iter()
            .filter(|at| !processed.contains(*at))
            .filter_map(|&at| {
                pending
                    .grid
                    .get(at)
                    .and_then(|tile| tile.special())
                    .map(|kind| (at, kind))
            })
            .collect();
        if fired.is_empty() {
            break;
        }
        for (at, kind) in fired {
            processed.insert(at);
            pending.effects.push(LaserEffect {
                kind: EffectKind::from(kind),
                at,
            });
            trace!(%at, ?kind, "Special triggered");
            match kind.axis() {
                Axis::Horizontal => pending
                    .clear
                    .extend((0..n).map(|col| Coord::new(at.row, col))),
                Axis::Vertical => pending
                    .clear
                    .extend((0..n).map(|row| Coord::new(row, at.col))),
            }
        }
    }
}

/// Empties every cleared cell, then places planned specials.
///
/// When two spawns pick the same cell the later one wins. Vertical runs are
/// planned after horizontal ones, so a shared cell holds the vertical
/// special.
pub(crate) fn place_spawns(
    grid: &mut Grid,
    clear: &BTreeSet<Coord>,
    spawns: &[PlannedSpawn],
    source: &mut TileSource,
) -> Vec<SpawnedSpecial> {
    for &at in clear {
        grid.take(at);
    }
    let mut sites: BTreeMap<Coord, PlannedSpawn> = BTreeMap::new();
    for spawn in spawns.iter().filter(|spawn| clear.contains(&spawn.at)) {
        sites.insert(spawn.at, *spawn);
    }
    sites
        .into_values()
        .map(|spawn| {
            let tile = source.fresh_special(spawn.variety, spawn.kind);
            let id = tile.id();
            grid.set(spawn.at, Some(tile));
            SpawnedSpecial {
                at: spawn.at,
                kind: spawn.kind,
                variety: spawn.variety,
                tile: id,
            }
        })
        .collect()
}

/// Slides every column's tiles toward the bottom edge, keeping their order.
pub(crate) fn apply_gravity(grid: &mut Grid) {
    let n = grid.size();
    for col in 0..n {
        let column: Vec<_> = (0..n)
            .rev()
            .filter_map(|row| grid.take(Coord::new(row, col)))
            .collect();
        for (offset, tile) in column.into_iter().enumerate() {
            grid.set(Coord::new(n - 1 - offset, col), Some(tile));
        }
    }
}

/// Fills every empty cell with a fresh plain tile, returning the new ids.
///
/// No run check is made; any run this creates is caught by the next scan.
pub(crate) fn refill(grid: &mut Grid, source: &mut TileSource) -> Vec<TileId> {
    grid.empty_cells()
        .into_iter()
        .map(|at| {
            let tile = source.random_tile();
            let id = tile.id();
            grid.set(at, Some(tile));
            id
        })
        .collect()
}
