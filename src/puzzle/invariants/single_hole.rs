//! Single hole invariant: exactly one empty cell, and it is the tracked hole.

use super::super::Grid;
use super::Invariant;

/// Invariant: the grid has exactly one empty cell and `hole` points at it.
pub struct SingleHoleInvariant;

impl Invariant<Grid> for SingleHoleInvariant {
    fn holds(grid: &Grid) -> bool {
        let empty = grid.cells.iter().filter(|cell| cell.is_none()).count();
        empty == 1 && grid.valid_position(grid.hole()) && grid.tile_at(grid.hole()).is_none()
    }

    fn description() -> &'static str {
        "Exactly one cell is empty and it is the hole"
    }
}
