//! Targets in bounds invariant: every tile's home is a cell of the grid.

use super::super::Grid;
use super::Invariant;

/// Invariant: every tile target lies within `[0, size) × [0, size)`.
pub struct TargetsInBoundsInvariant;

impl Invariant<Grid> for TargetsInBoundsInvariant {
    fn holds(grid: &Grid) -> bool {
        grid.tiles()
            .all(|(_, tile)| grid.valid_position(tile.target()))
    }

    fn description() -> &'static str {
        "Every tile target lies on the board"
    }
}
