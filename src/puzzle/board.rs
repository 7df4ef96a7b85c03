//! The puzzle board: grid ownership, rules, and event announcements.
//!
//! The board is the only writer of puzzle state. It listens on the bus for
//! [`Event::MovePressed`] intents and announces every state change it makes
//! as an event on the same bus.

use super::invariants::assert_invariants;
use super::shuffle::{DEFAULT_SHUFFLE_FACTOR, DirectionSource};
use super::{BoardError, Direction, Grid, Position, Tile, TileId};
use crate::bus::{EventBus, Listener, ListenerError};
use crate::config::PuzzleConfig;
use crate::event::Event;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, instrument, trace};

/// Sliding puzzle board bound to an event bus.
///
/// A board starts uninitialized; [`Board::init`] lays out the solved grid
/// and may be called again to reset. Grid state is only borrowed inside
/// board methods, never across a publish, so listeners may query the board
/// while handling its events.
pub struct Board {
    bus: EventBus,
    size: usize,
    shuffle_factor: usize,
    layout: Grid,
    grid: RefCell<Option<Grid>>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("size", &self.size)
            .field("shuffle_factor", &self.shuffle_factor)
            .field("grid", &self.grid.borrow())
            .finish()
    }
}

impl Board {
    /// Creates an uninitialized board of `size × size` cells.
    ///
    /// Fails with [`BoardError::InvalidConfiguration`] when `size < 2`.
    #[instrument(skip(bus))]
    pub fn new(bus: EventBus, size: usize) -> Result<Self, BoardError> {
        let layout = Grid::solved_layout(size)?;
        Ok(Self {
            bus,
            size,
            shuffle_factor: DEFAULT_SHUFFLE_FACTOR,
            layout,
            grid: RefCell::new(None),
        })
    }

    /// Creates a board from a loaded configuration.
    #[instrument(skip(bus, config), fields(size = *config.size()))]
    pub fn from_config(bus: EventBus, config: &PuzzleConfig) -> Result<Self, BoardError> {
        Ok(Self::new(bus, *config.size())?.with_shuffle_factor(*config.shuffle_factor()))
    }

    /// Overrides how many shuffle attempts are made per cell.
    pub fn with_shuffle_factor(mut self, shuffle_factor: usize) -> Self {
        self.shuffle_factor = shuffle_factor;
        self
    }

    /// Creates a board and subscribes it to its bus.
    #[instrument(skip(bus))]
    pub fn attach(bus: &EventBus, size: usize) -> Result<Rc<Self>, BoardError> {
        Ok(Self::subscribe(Self::new(bus.clone(), size)?))
    }

    /// Subscribes an already built board to its bus.
    ///
    /// The bus only gets a weak link; the board lives as long as the
    /// returned handle, after which its subscription goes quiet.
    pub fn subscribe(board: Self) -> Rc<Self> {
        let board = Rc::new(board);
        board.bus.subscribe(Rc::new(BoardLink(Rc::downgrade(&board))));
        board
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether [`Board::init`] has run.
    pub fn is_ready(&self) -> bool {
        self.grid.borrow().is_some()
    }

    /// Current hole position, once initialized.
    pub fn hole(&self) -> Option<Position> {
        self.grid.borrow().as_ref().map(Grid::hole)
    }

    /// The tile at `position`, if any.
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.grid
            .borrow()
            .as_ref()
            .and_then(|grid| grid.tile_at(position))
    }

    /// Tile ids in row-major order with `0` for the hole; empty before init.
    pub fn snapshot(&self) -> Vec<TileId> {
        self.grid
            .borrow()
            .as_ref()
            .map(Grid::snapshot)
            .unwrap_or_default()
    }

    /// Lays out the solved grid and announces it.
    ///
    /// Publishes [`Event::BoardCreated`] followed by one
    /// [`Event::NewPieceCreated`] per tile in row-major order.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn init(&self) {
        let grid = self.layout.clone();
        let pieces: Vec<(Position, Tile)> = grid.tiles().collect();
        assert_invariants(&grid);
        *self.grid.borrow_mut() = Some(grid);

        info!(tiles = pieces.len(), "Board initialized");
        self.bus.publish(Event::BoardCreated { size: self.size });
        for (position, tile) in pieces {
            self.bus.publish(Event::NewPieceCreated {
                id: tile.id(),
                position,
            });
        }
    }

    /// Every tile sits on its target. An uninitialized board is not solved.
    pub fn solved(&self) -> bool {
        self.grid.borrow().as_ref().is_some_and(Grid::solved)
    }

    /// Whether `position` lies inside the board.
    pub fn valid_position(&self, position: Position) -> bool {
        let Ok(size) = i32::try_from(self.size) else {
            return false;
        };
        (0..size).contains(&position.x()) && (0..size).contains(&position.y())
    }

    /// Slides the tile at `hole + (dx, dy)` into the hole.
    ///
    /// Moves that would pull a tile from outside the board are silently
    /// ignored. On success publishes [`Event::PieceMoved`] with the tile's
    /// new position (the old hole) and returns the tile id.
    #[instrument(skip(self))]
    pub fn apply_move(&self, dx: i32, dy: i32) -> Option<TileId> {
        let (tile, position) = {
            let mut slot = self.grid.borrow_mut();
            let grid = slot.as_mut()?;
            let moved = grid.slide(dx, dy);
            assert_invariants(grid);
            moved
        }?;

        trace!(id = tile.id(), %position, "Tile moved");
        self.bus.publish(Event::PieceMoved {
            id: tile.id(),
            position,
        });
        Some(tile.id())
    }

    /// Moves the hole one step in `direction`.
    pub fn step(&self, direction: Direction) -> Option<TileId> {
        let (dx, dy) = direction.delta();
        self.apply_move(dx, dy)
    }

    /// Scrambles the board with `size² × shuffle_factor` random steps.
    ///
    /// Steps that would leave the board are absorbed, so every state reached
    /// is solvable. Returns the directions actually applied, in order.
    #[instrument(skip(self, source), fields(size = self.size))]
    pub fn shuffle(&self, source: &mut impl DirectionSource) -> Vec<Direction> {
        let attempts = self
            .size
            .saturating_mul(self.size)
            .saturating_mul(self.shuffle_factor);
        let mut applied = Vec::new();
        for _ in 0..attempts {
            let direction = source.next_direction();
            if self.step(direction).is_some() {
                applied.push(direction);
            }
        }
        debug!(attempts, applied = applied.len(), "Board shuffled");
        applied
    }
}

/// Bus-side reference to a board that does not keep it alive.
struct BoardLink(Weak<Board>);

impl Listener for BoardLink {
    fn name(&self) -> &'static str {
        "Board"
    }

    fn process_event(&self, event: &Event) -> Result<(), ListenerError> {
        match self.0.upgrade() {
            Some(board) => board.process_event(event),
            None => Ok(()),
        }
    }
}

impl Listener for Board {
    fn name(&self) -> &'static str {
        "Board"
    }

    fn process_event(&self, event: &Event) -> Result<(), ListenerError> {
        let Event::MovePressed { dx, dy } = *event else {
            return Ok(());
        };
        if !self.is_ready() || self.solved() {
            trace!(dx, dy, "Ignoring move on idle board");
            return Ok(());
        }
        if self.apply_move(dx, dy).is_some() && self.solved() {
            info!("Puzzle solved");
            self.bus.publish(Event::PuzzleSolved);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::ScriptedDirections;

    fn board(size: usize) -> Board {
        Board::new(EventBus::new(), size).unwrap()
    }

    #[test]
    fn test_bus_does_not_keep_board_alive() {
        let bus = EventBus::new();
        let board = Board::attach(&bus, 3).unwrap();
        board.init();
        board.step(Direction::Up);
        let weak = Rc::downgrade(&board);
        assert_eq!(Rc::strong_count(&board), 1);

        drop(board);

        assert!(weak.upgrade().is_none());
        assert_eq!(bus.listener_count(), 1);
        assert_eq!(bus.publish(Event::MovePressed { dx: 0, dy: 1 }), 0);
    }

    #[test]
    fn test_new_rejects_degenerate_size() {
        assert!(matches!(
            Board::new(EventBus::new(), 1),
            Err(BoardError::InvalidConfiguration { size: 1, .. })
        ));
    }

    #[test]
    fn test_uninitialized_board_is_idle() {
        let board = board(3);
        assert!(!board.is_ready());
        assert!(!board.solved());
        assert_eq!(board.apply_move(-1, 0), None);
        assert!(board.snapshot().is_empty());
    }

    #[test]
    fn test_init_is_solved() {
        let board = board(4);
        board.init();
        assert!(board.solved());
        assert_eq!(board.hole(), Some(Position::new(3, 3)));
    }

    #[test]
    fn test_valid_position_bounds() {
        let board = board(3);
        assert!(board.valid_position(Position::new(0, 0)));
        assert!(board.valid_position(Position::new(2, 2)));
        assert!(!board.valid_position(Position::new(3, 0)));
        assert!(!board.valid_position(Position::new(0, -1)));
    }

    #[test]
    fn test_init_resets_scrambled_board() {
        let board = board(3);
        board.init();
        board.step(Direction::Left);
        board.step(Direction::Up);
        assert!(!board.solved());

        board.init();
        assert!(board.solved());
        assert_eq!(board.snapshot(), vec![1, 2, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_shuffle_attempt_count_uses_factor() {
        let board = board(2).with_shuffle_factor(1);
        board.init();
        // Left then Right alternately: every attempt is applied.
        let mut source = ScriptedDirections::new(vec![Direction::Left, Direction::Right]);
        let applied = board.shuffle(&mut source);
        assert_eq!(applied.len(), 4);
        assert!(board.solved());
    }

    #[test]
    fn test_shuffle_absorbs_off_board_steps() {
        let board = board(2).with_shuffle_factor(1);
        board.init();
        // Hole starts bottom-right, so Right and Down are off the board.
        let mut source = ScriptedDirections::new(vec![Direction::Right, Direction::Down]);
        assert!(board.shuffle(&mut source).is_empty());
        assert!(board.solved());
    }
}
