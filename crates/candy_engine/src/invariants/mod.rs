//! First-class board invariants.
//!
//! Invariants are logical properties a board must satisfy at well-defined
//! points: straight after generation and after every settled cascade. They
//! are testable on their own and checked by debug assertions in the engine.

use super::grid::Grid;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod full_board;
pub mod no_matches;
pub mod unique_ids;

pub use full_board::FullBoardInvariant;
pub use no_matches::NoMatchesInvariant;
pub use unique_ids::UniqueIdsInvariant;

/// Invariants of a board after a cascade settles.
pub type SettledBoardInvariants = (FullBoardInvariant, UniqueIdsInvariant, NoMatchesInvariant);

/// Invariants of a freshly generated board. Same properties as a settled
/// board; kept as its own name for the call sites.
pub type FreshBoardInvariants = SettledBoardInvariants;

/// Asserts an invariant set in debug builds, logging every violation.
pub fn assert_invariants<I: InvariantSet<Grid>>(grid: &Grid) {
    if let Err(violations) = I::check_all(grid) {
        for violation in &violations {
            warn!(invariant = %violation.description, "Board invariant violated");
        }
        debug_assert!(violations.is_empty(), "board invariants violated:\n{grid}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::generate_board;
    use crate::source::TileSource;

    #[test]
    fn test_fresh_board_satisfies_set() {
        let grid = generate_board(8, &mut TileSource::seeded(4, 6));
        assert!(FreshBoardInvariants::check_all(&grid).is_ok());
    }

    #[test]
    fn test_set_collects_every_violation() {
        let grid = Grid::from_rows(&["c c c", ". l h", "l h d"], &mut TileSource::seeded(0, 6))
            .unwrap();
        let violations = SettledBoardInvariants::check_all(&grid).unwrap_err();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let grid = Grid::from_rows(&["c l", "l c"], &mut TileSource::seeded(0, 6)).unwrap();
        type TwoInvariants = (FullBoardInvariant, UniqueIdsInvariant);
        assert!(TwoInvariants::check_all(&grid).is_ok());
    }
}
