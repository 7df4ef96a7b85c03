//! Distinct tiles invariant: every id from 1 to `size² - 1` appears once.

use super::super::Grid;
use super::Invariant;

/// Invariant: tile ids are exactly `1..size²`, each on one cell.
pub struct DistinctTilesInvariant;

impl Invariant<Grid> for DistinctTilesInvariant {
    fn holds(grid: &Grid) -> bool {
        let count = grid.size() * grid.size() - 1;
        let mut seen = vec![false; count];
        for (_, tile) in grid.tiles() {
            let Some(slot) = (tile.id() as usize).checked_sub(1) else {
                return false;
            };
            match seen.get_mut(slot) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        seen.iter().all(|flag| *flag)
    }

    fn description() -> &'static str {
        "Tile ids 1..size² appear exactly once"
    }
}
