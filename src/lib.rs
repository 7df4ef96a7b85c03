//! Tilitoli - a sliding-tile puzzle driven by an in-process event bus.
//!
//! The [`Board`] owns the puzzle state and every rule. Everything else talks
//! to it through an [`EventBus`]: input adapters publish
//! [`Event::MovePressed`] intents, the board validates and applies them, and
//! renderers listen for the state-change events the board announces.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use tilitoli::{Board, Direction, Event, EventBus, ListenerError};
//!
//! let bus = EventBus::new();
//! let board = Board::attach(&bus, 2)?;
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! bus.subscribe(Rc::new(move |event: &Event| -> Result<(), ListenerError> {
//!     sink.borrow_mut().push(*event);
//!     Ok(())
//! }));
//!
//! board.init();
//! board.step(Direction::Left);
//! bus.publish(Event::move_pressed(Direction::Right));
//!
//! assert!(board.solved());
//! assert_eq!(seen.borrow().len(), 8);
//! assert_eq!(seen.borrow().last(), Some(&Event::PuzzleSolved));
//! # Ok::<(), tilitoli::BoardError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bus;
mod config;
mod event;
mod puzzle;

// Crate-level exports - Event bus
pub use bus::{EventBus, Listener, ListenerError};

// Crate-level exports - Events
pub use event::Event;

// Crate-level exports - Configuration
pub use config::{ConfigError, PuzzleConfig};

// Crate-level exports - Puzzle domain
pub use puzzle::{
    Board, BoardError, DEFAULT_SHUFFLE_FACTOR, Direction, DirectionSource, Grid, Position,
    RandomDirections, ScriptedDirections, Tile, TileId,
};

// Crate-level exports - Invariants
pub use puzzle::invariants::{
    DistinctTilesInvariant, Invariant, InvariantSet, InvariantViolation, PuzzleInvariants,
    SingleHoleInvariant, TargetsInBoundsInvariant,
};
