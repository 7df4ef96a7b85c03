//! Board construction errors.

use derive_more::{Display, Error};

/// Error raised when a board cannot be built.
///
/// Moves never fail; an out-of-range move is simply not applied.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// The requested grid dimension cannot form a playable puzzle.
    #[display("Invalid configuration: board size {size} ({reason})")]
    InvalidConfiguration {
        /// The rejected size.
        size: usize,
        /// Why it was rejected.
        reason: &'static str,
    },
}
