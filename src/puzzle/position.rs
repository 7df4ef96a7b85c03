//! Grid coordinates and unit directions for the sliding puzzle.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A cell on the board, also usable as a displacement vector.
///
/// `x` grows to the right and `y` grows downward, so `(0, 0)` is the
/// top-left cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a position from its coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column coordinate.
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row coordinate.
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns this position shifted by `(dx, dy)`.
    ///
    /// `None` when either coordinate leaves the `i32` range; such a cell is
    /// off every board.
    pub const fn translate(&self, dx: i32, dy: i32) -> Option<Self> {
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y })
    }

    /// Returns this position shifted one step in `direction`.
    pub fn step(&self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.delta();
        self.translate(dx, dy)
    }
}

/// One of the four unit moves of the hole.
///
/// A direction names where the *hole* travels; the tile sitting there
/// slides the opposite way.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Direction {
    /// Hole moves to `x - 1`.
    Left,
    /// Hole moves to `x + 1`.
    Right,
    /// Hole moves to `y - 1`.
    Up,
    /// Hole moves to `y + 1`.
    Down,
}

impl Direction {
    /// All four directions, in the order the shuffle draws from.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The `(dx, dy)` displacement of this direction.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// The direction that undoes this one.
    pub const fn inverse(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Maps a unit displacement back to its direction.
    #[instrument]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_translate_is_componentwise() {
        let p = Position::new(2, 3);
        assert_eq!(p.translate(-1, 1), Some(Position::new(1, 4)));
        assert_eq!(p.translate(0, 0), Some(p));
    }

    #[test]
    fn test_translate_out_of_range_is_none() {
        let p = Position::new(2, -3);
        assert_eq!(p.translate(i32::MAX, 0), None);
        assert_eq!(p.translate(0, i32::MIN), None);
        assert_eq!(Position::new(i32::MIN, 0).step(Direction::Left), None);
    }

    #[test]
    fn test_inverse_cancels_delta() {
        for direction in Direction::iter() {
            let p = Position::new(5, 5);
            let there = p.step(direction).unwrap();
            assert_eq!(there.step(direction.inverse()), Some(p));
        }
    }

    #[test]
    fn test_from_delta_rejects_non_unit() {
        assert_eq!(Direction::from_delta(1, 0), Some(Direction::Right));
        assert_eq!(Direction::from_delta(1, 1), None);
        assert_eq!(Direction::from_delta(0, 2), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(1, 2).to_string(), "(1, 2)");
        assert_eq!(Direction::Up.to_string(), "Up");
    }
}
