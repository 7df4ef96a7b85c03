//! The puzzle grid: tile placement and the hole.
//!
//! The grid is pure data plus rules. It knows nothing about the event
//! bus; [`Board`](super::Board) wraps it and announces what changes.

use super::{BoardError, Position, Tile, TileId};
use tracing::{instrument, trace};

/// An N×N grid with exactly one empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) size: usize,
    /// Cells in row-major order, `None` marks the hole.
    pub(crate) cells: Vec<Option<Tile>>,
    pub(crate) hole: Position,
}

impl Grid {
    /// Rejects sizes that cannot form a puzzle or that overflow tile ids
    /// and coordinates.
    #[instrument]
    pub fn validate_size(size: usize) -> Result<(), BoardError> {
        if size < 2 {
            return Err(BoardError::InvalidConfiguration {
                size,
                reason: "a board needs at least 2 cells per side",
            });
        }
        let fits_coordinates = i32::try_from(size).is_ok();
        let fits_ids = size
            .checked_mul(size)
            .is_some_and(|cells| TileId::try_from(cells).is_ok());
        if !fits_coordinates || !fits_ids {
            return Err(BoardError::InvalidConfiguration {
                size,
                reason: "too many cells to number",
            });
        }
        Ok(())
    }

    /// Builds the solved layout: tiles in row-major order, hole bottom-right.
    #[instrument]
    pub fn solved_layout(size: usize) -> Result<Self, BoardError> {
        Self::validate_size(size)?;
        let last = size as i32 - 1;
        let hole = Position::new(last, last);
        let mut cells = Vec::with_capacity(size * size);
        let mut next_id: TileId = 1;
        for y in 0..size as i32 {
            for x in 0..size as i32 {
                let position = Position::new(x, y);
                if position == hole {
                    cells.push(None);
                } else {
                    cells.push(Some(Tile::new(next_id, position)));
                    next_id += 1;
                }
            }
        }
        Ok(Self { size, cells, hole })
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Current location of the empty cell.
    pub fn hole(&self) -> Position {
        self.hole
    }

    /// Whether `position` lies inside the grid.
    pub fn valid_position(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    fn index(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x()).ok()?;
        let y = usize::try_from(position.y()).ok()?;
        (x < self.size && y < self.size).then_some(y * self.size + x)
    }

    fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.size) as i32, (index / self.size) as i32)
    }

    /// The tile at `position`, if any.
    pub fn tile_at(&self, position: Position) -> Option<Tile> {
        self.index(position).and_then(|i| self.cells[i])
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|tile| (self.position_of(i), tile)))
    }

    /// Every tile sits on its target.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn solved(&self) -> bool {
        for (position, tile) in self.tiles() {
            if !tile.is_home(position) {
                trace!(id = tile.id(), %position, "Tile out of place");
                return false;
            }
        }
        true
    }

    /// Slides the tile at `hole + (dx, dy)` into the hole.
    ///
    /// Returns the moved tile and its new position (the old hole), or
    /// `None` when the source cell is off the board, however far.
    #[instrument(skip(self), fields(hole = %self.hole))]
    pub fn slide(&mut self, dx: i32, dy: i32) -> Option<(Tile, Position)> {
        let from = self.hole.translate(dx, dy)?;
        let from_index = self.index(from)?;
        let to_index = self.index(self.hole)?;

        let tile = self.cells[from_index].take()?;
        self.cells[to_index] = Some(tile);

        let to = self.hole;
        self.hole = from;
        Some((tile, to))
    }

    /// Tile ids in row-major order, `0` for the hole.
    pub fn snapshot(&self) -> Vec<TileId> {
        self.cells
            .iter()
            .map(|cell| cell.map_or(0, |tile| tile.id()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_layout_2x2() {
        let grid = Grid::solved_layout(2).unwrap();
        assert_eq!(grid.snapshot(), vec![1, 2, 3, 0]);
        assert_eq!(grid.hole(), Position::new(1, 1));
        assert!(grid.solved());
    }

    #[test]
    fn test_rejects_small_sizes() {
        assert!(Grid::solved_layout(0).is_err());
        assert!(Grid::solved_layout(1).is_err());
        assert!(Grid::solved_layout(2).is_ok());
    }

    #[test]
    fn test_rejects_unnumberable_sizes() {
        let result = Grid::validate_size(usize::MAX);
        assert!(matches!(
            result,
            Err(BoardError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_slide_moves_tile_into_hole() {
        let mut grid = Grid::solved_layout(3).unwrap();
        let (tile, to) = grid.slide(-1, 0).unwrap();
        assert_eq!(tile.id(), 8);
        assert_eq!(to, Position::new(2, 2));
        assert_eq!(grid.hole(), Position::new(1, 2));
        assert_eq!(grid.snapshot(), vec![1, 2, 3, 4, 5, 6, 7, 0, 8]);
        assert!(!grid.solved());
    }

    #[test]
    fn test_slide_off_board_is_rejected() {
        let mut grid = Grid::solved_layout(3).unwrap();
        let before = grid.clone();
        assert!(grid.slide(1, 0).is_none());
        assert!(grid.slide(0, 1).is_none());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_slide_accepts_long_displacement_in_bounds() {
        let mut grid = Grid::solved_layout(3).unwrap();
        let (tile, to) = grid.slide(-2, -2).unwrap();
        assert_eq!(tile.id(), 1);
        assert_eq!(to, Position::new(2, 2));
        assert_eq!(grid.hole(), Position::new(0, 0));
    }
}
