//! Events exchanged over the bus.
//!
//! State-change events are facts the board announces after they happen.
//! Intent events are requests that the board may refuse silently.

use crate::puzzle::{Direction, Position, TileId};
use serde::{Deserialize, Serialize};

/// Every notification that can travel over the [`EventBus`](crate::EventBus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
#[serde(tag = "type")]
pub enum Event {
    /// The board was (re)initialized with the given side length.
    BoardCreated {
        /// Side length of the grid.
        size: usize,
    },
    /// A tile was placed during initialization, in row-major order.
    NewPieceCreated {
        /// Tile identity.
        id: TileId,
        /// Where the tile was placed (also its target).
        position: Position,
    },
    /// A tile slid into the hole.
    PieceMoved {
        /// Tile identity.
        id: TileId,
        /// The tile's new cell, i.e. where the hole was.
        position: Position,
    },
    /// The most recent move completed the puzzle.
    PuzzleSolved,
    /// Request to slide the tile at `hole + (dx, dy)` into the hole.
    MovePressed {
        /// Horizontal displacement of the hole.
        dx: i32,
        /// Vertical displacement of the hole.
        dy: i32,
    },
}

impl Event {
    /// Builds a move intent from a direction of the hole.
    pub fn move_pressed(direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Event::MovePressed { dx, dy }
    }

    /// Variant name, for log fields.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Whether this event is a request rather than an announced fact.
    pub fn is_intent(&self) -> bool {
        matches!(self, Event::MovePressed { .. })
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::BoardCreated { size } => write!(f, "BoardCreated {{ size: {} }}", size),
            Event::NewPieceCreated { id, position } => {
                write!(f, "NewPieceCreated {{ id: {}, position: {} }}", id, position)
            }
            Event::PieceMoved { id, position } => {
                write!(f, "PieceMoved {{ id: {}, position: {} }}", id, position)
            }
            Event::PuzzleSolved => write!(f, "PuzzleSolved"),
            Event::MovePressed { dx, dy } => write!(f, "MovePressed {{ dx: {}, dy: {} }}", dx, dy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_variant() {
        assert_eq!(Event::PuzzleSolved.kind(), "PuzzleSolved");
        assert_eq!(Event::BoardCreated { size: 3 }.kind(), "BoardCreated");
    }

    #[test]
    fn test_only_move_pressed_is_intent() {
        assert!(Event::move_pressed(Direction::Up).is_intent());
        assert!(!Event::PuzzleSolved.is_intent());
        assert!(
            !Event::PieceMoved {
                id: 1,
                position: Position::new(0, 0)
            }
            .is_intent()
        );
    }

    #[test]
    fn test_move_pressed_uses_direction_delta() {
        assert_eq!(
            Event::move_pressed(Direction::Left),
            Event::MovePressed { dx: -1, dy: 0 }
        );
    }

    #[test]
    fn test_wire_shape_is_internally_tagged() {
        let json = serde_json::to_value(Event::PieceMoved {
            id: 4,
            position: Position::new(1, 2),
        })
        .unwrap();
        assert_eq!(json["type"], "PieceMoved");
        assert_eq!(json["id"], 4);
        assert_eq!(json["position"]["x"], 1);

        let back: Event = serde_json::from_value(json).unwrap();
        assert_eq!(
            back,
            Event::PieceMoved {
                id: 4,
                position: Position::new(1, 2)
            }
        );
    }
}
