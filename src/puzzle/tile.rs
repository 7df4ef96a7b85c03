//! Movable puzzle pieces.

use super::Position;
use serde::{Deserialize, Serialize};

/// Identifier of a tile; ids run from 1 to `size² - 1`.
pub type TileId = u32;

/// A single piece of the puzzle.
///
/// Identity and target never change after creation. Where the tile
/// currently sits is tracked by the board, not by the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    target: Position,
}

impl Tile {
    /// Creates a tile whose home is `target`.
    pub const fn new(id: TileId, target: Position) -> Self {
        Self { id, target }
    }

    /// Stable identity of the tile.
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// The cell this tile must occupy for the puzzle to be solved.
    pub const fn target(&self) -> Position {
        self.target
    }

    /// Whether the tile sits at its target when placed at `at`.
    pub fn is_home(&self, at: Position) -> bool {
        self.target == at
    }
}
