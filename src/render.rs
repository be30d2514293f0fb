//! Text rendering of game events for terminals and logs.

use super::orchestrator::GameEvent;
use candy_engine::CascadeStep;
use tracing::trace;

/// One human-readable line (or block, for boards) per event.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Started { state, grid } => format!(
            "new game: {} moves\n{}",
            state.moves_remaining(),
            grid
        ),
        GameEvent::Swapped {
            player,
            swap,
            outcome,
        } => format!("{player} swaps {swap}: {outcome}"),
        GameEvent::Step(step) => describe_step(step),
        GameEvent::Settled { state } => format!(
            "settled: score {} moves left {}",
            state.score(),
            state.moves_remaining()
        ),
        GameEvent::Stuck { state } => format!("no legal swaps left; final score {}", state.score()),
        GameEvent::GameOver { state } => format!("game over; final score {}", state.score()),
    }
}

/// Counts and score first, then the cleared candies as glyphs, lasers,
/// new specials and the combo praise.
fn describe_step(step: &CascadeStep) -> String {
    trace!(introduced = step.introduced().len(), "Describing step");
    let glyphs: String = step
        .cleared()
        .iter()
        .map(|cell| cell.variety.glyph())
        .collect();
    let mut line = format!(
        "  step {}: cleared {} {} (+{}) score {} combo {}",
        step.iteration(),
        step.cleared().len(),
        glyphs,
        step.score_delta(),
        step.score(),
        step.combo()
    );
    for effect in step.effects() {
        line.push_str(&format!(" {:?}@{}", effect.kind, effect.at));
    }
    for spawn in step.spawned() {
        line.push_str(&format!(
            " +{} {:?}@{}",
            spawn.variety.glyph(),
            spawn.kind,
            spawn.at
        ));
    }
    if let Some(message) = step.combo_message() {
        line.push_str(&format!(" {message}"));
    }
    line
}
