//! Structural checks on the puzzle grid.
//!
//! A grid is only meaningful while it has one hole, every tile id appears
//! once, and every target cell is on the board. Each of those rules is its
//! own type so it can be tested against a hand-corrupted grid; the board
//! runs all of them after every slide in debug builds.

use super::Grid;
use derive_more::Display;
use tracing::{instrument, warn};

/// One structural rule a puzzle state `S` must satisfy.
pub trait Invariant<S> {
    /// Whether `state` satisfies the rule.
    fn holds(state: &S) -> bool;

    /// Short statement of the rule, used in violation reports.
    fn description() -> &'static str;
}

/// A rule that failed, named by its description.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Statement of the broken rule.
    pub description: String,
}

impl InvariantViolation {
    /// Records a failure of the rule described by `description`.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several rules checked in one pass.
///
/// Tuples of [`Invariant`] types implement this, reporting every failing
/// rule rather than stopping at the first.
pub trait InvariantSet<S> {
    /// Runs each rule against `state`; `Err` lists the ones that failed.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check_one<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn into_result(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        check_one::<S, I3>(state, &mut violations);
        into_result(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check_one::<S, I1>(state, &mut violations);
        check_one::<S, I2>(state, &mut violations);
        into_result(violations)
    }
}

pub mod distinct_tiles;
pub mod single_hole;
pub mod targets_in_bounds;

pub use distinct_tiles::DistinctTilesInvariant;
pub use single_hole::SingleHoleInvariant;
pub use targets_in_bounds::TargetsInBoundsInvariant;

/// Every rule a [`Grid`] must satisfy.
pub type PuzzleInvariants = (
    SingleHoleInvariant,
    DistinctTilesInvariant,
    TargetsInBoundsInvariant,
);

/// Panics if `grid` breaks any rule. Compiled to nothing in release builds.
#[instrument(skip(grid), fields(size = grid.size()))]
pub fn assert_invariants(grid: &Grid) {
    if cfg!(debug_assertions)
        && let Err(violations) = PuzzleInvariants::check_all(grid)
    {
        for violation in &violations {
            warn!(%violation, "Grid invariant violated");
        }
        panic!("Grid invariants violated: {:?}", violations);
    }
}
