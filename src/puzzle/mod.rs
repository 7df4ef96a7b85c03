//! Sliding puzzle domain: coordinates, tiles, the grid and its rules.

mod board;
mod error;
mod grid;
pub mod invariants;
mod position;
mod shuffle;
mod tile;

pub use board::Board;
pub use error::BoardError;
pub use grid::Grid;
pub use position::{Direction, Position};
pub use shuffle::{DEFAULT_SHUFFLE_FACTOR, DirectionSource, RandomDirections, ScriptedDirections};
pub use tile::{Tile, TileId};
