//! Visual model of the board, kept in sync from bus events.
//!
//! The renderer never touches the board. It rebuilds its own picture of
//! where every tile is from the events the board announces.

use ratatui::layout::Rect;
use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use tilitoli::{Event, Listener, ListenerError, Position, TileId};
use tracing::{debug, instrument};

/// On-screen element for one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceView {
    /// The cell the tile occupies now.
    pub position: Position,
    /// The cell the tile was created on; used for colouring.
    pub home: Position,
    /// Where to draw the tile, relative to the board origin.
    pub area: Rect,
}

/// Everything the UI needs to draw the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Grid side length, 0 before the first `BoardCreated`.
    pub size: usize,
    /// Width of one cell in columns.
    pub cell_width: u16,
    /// Height of one cell in rows.
    pub cell_height: u16,
    /// Tiles by id.
    pub pieces: BTreeMap<TileId, PieceView>,
    /// The last move completed the puzzle.
    pub solved: bool,
}

impl ViewState {
    /// Total footprint of the board in columns and rows.
    pub fn board_extent(&self) -> (u16, u16) {
        let cells = u16::try_from(self.size).unwrap_or(u16::MAX);
        (
            self.cell_width.saturating_mul(cells),
            self.cell_height.saturating_mul(cells),
        )
    }

    fn area_for(&self, position: Position) -> Rect {
        let x = u16::try_from(position.x()).unwrap_or(0);
        let y = u16::try_from(position.y()).unwrap_or(0);
        Rect::new(
            x.saturating_mul(self.cell_width),
            y.saturating_mul(self.cell_height),
            self.cell_width,
            self.cell_height,
        )
    }
}

/// Bus listener that maintains a [`ViewState`].
#[derive(Debug)]
pub struct Renderer {
    display_size: u16,
    view: RefCell<ViewState>,
}

impl Renderer {
    /// Creates a renderer drawing into a board `display_size` columns wide.
    pub fn new(display_size: u16) -> Self {
        Self {
            display_size,
            view: RefCell::new(ViewState::default()),
        }
    }

    /// Current visual state.
    pub fn view(&self) -> Ref<'_, ViewState> {
        self.view.borrow()
    }

    #[instrument(skip(self))]
    fn board_created(&self, size: usize) {
        let cells = u16::try_from(size).unwrap_or(u16::MAX).max(1);
        let cell_width = (self.display_size / cells).max(1);
        // Terminal cells are roughly twice as tall as they are wide.
        let cell_height = (cell_width / 2).max(1);
        *self.view.borrow_mut() = ViewState {
            size,
            cell_width,
            cell_height,
            pieces: BTreeMap::new(),
            solved: false,
        };
        debug!(cell_width, cell_height, "Visual state reset");
    }

    fn piece_created(&self, id: TileId, position: Position) {
        let mut view = self.view.borrow_mut();
        let area = view.area_for(position);
        view.pieces.insert(
            id,
            PieceView {
                position,
                home: position,
                area,
            },
        );
    }

    fn piece_moved(&self, id: TileId, position: Position) -> Result<(), ListenerError> {
        let mut view = self.view.borrow_mut();
        let area = view.area_for(position);
        let piece = view
            .pieces
            .get_mut(&id)
            .ok_or_else(|| ListenerError::new(format!("No visual element for tile {}", id)))?;
        piece.position = position;
        piece.area = area;
        view.solved = false;
        Ok(())
    }
}

impl Listener for Renderer {
    fn name(&self) -> &'static str {
        "Renderer"
    }

    fn process_event(&self, event: &Event) -> Result<(), ListenerError> {
        match *event {
            Event::BoardCreated { size } => self.board_created(size),
            Event::NewPieceCreated { id, position } => self.piece_created(id, position),
            Event::PieceMoved { id, position } => self.piece_moved(id, position)?,
            Event::PuzzleSolved => self.view.borrow_mut().solved = true,
            Event::MovePressed { .. } => {}
        }
        Ok(())
    }
}
