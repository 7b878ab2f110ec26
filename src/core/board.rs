//! Board module - manages the game grid
//!
//! The board is a rows x cols grid where each cell is empty or holds a tile.
//! Uses flat row-major storage plus an immutable playability mask of the same
//! shape; blocked cells never hold a tile and are skipped by every scan.
//! Coordinates: (row, col) with row 0 at the gravity-Down end.
//! Out-of-range coordinates are a caller bug and panic, never a soft miss.

use crate::config::BoardPattern;
use crate::types::{Cell, Tile, TileKind};

/// The game board - dynamic dimensions, flat row-major storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Playability mask, fixed at construction (true = playable)
    mask: Vec<bool>,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty, fully-playable board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_pattern(&BoardPattern::filled(rows, cols))
    }

    /// Create an empty board shaped by a parsed playability pattern
    pub fn from_pattern(pattern: &BoardPattern) -> Self {
        let rows = pattern.rows();
        let cols = pattern.cols();
        assert!(rows > 0 && cols > 0, "degenerate {}x{} board", rows, cols);

        let mut mask = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                mask.push(pattern.is_playable(r, c));
            }
        }

        Self {
            rows,
            cols,
            mask,
            cells: vec![None; rows * cols],
        }
    }

    /// Calculate flat index from (row, col), panicking out of range
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "coordinate ({}, {}) outside {}x{} board",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Get cell at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    /// Set cell at (row, col). Placing a tile on a blocked cell is a caller
    /// bug; clearing any in-range cell is always allowed.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let idx = self.index(row, col);
        if cell.is_some() {
            assert!(self.mask[idx], "tile placed on blocked cell ({}, {})", row, col);
        }
        self.cells[idx] = cell;
    }

    /// Check whether the cell may ever hold a tile
    pub fn is_playable(&self, row: usize, col: usize) -> bool {
        self.mask[self.index(row, col)]
    }

    /// Check whether the cell currently holds a tile
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)].is_some()
    }

    /// Kind of the tile at (row, col), if any
    pub fn kind_at(&self, row: usize, col: usize) -> Option<TileKind> {
        self.cells[self.index(row, col)].map(|tile| tile.kind)
    }

    /// Exchange the contents of two slots in one operation
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        let ia = self.index(a.0, a.1);
        let ib = self.index(b.0, b.1);
        self.cells.swap(ia, ib);
    }

    /// Remove every tile, leaving the mask untouched
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Number of tiles currently placed
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Number of playable cells in the mask
    pub fn playable_count(&self) -> usize {
        self.mask.iter().filter(|&&p| p).count()
    }

    /// Collect the tiles currently placed, row-major with their coordinates
    pub fn placed_tiles(&self) -> Vec<(Tile, (usize, usize))> {
        let mut tiles = Vec::with_capacity(self.tile_count());
        for r in 0..self.rows {
            for c in 0..self.cols {
                if let Some(tile) = self.cells[r * self.cols + c] {
                    tiles.push((tile, (r, c)));
                }
            }
        }
        tiles
    }

    /// Write the kind grid for observers: kind index per cell,
    /// -1 for an empty playable cell, -2 for a blocked cell
    pub fn write_kind_grid(&self, out: &mut Vec<i8>) {
        out.clear();
        out.reserve(self.rows * self.cols);
        for (idx, cell) in self.cells.iter().enumerate() {
            let code = match cell {
                Some(tile) => tile.kind.0 as i8,
                None if self.mask[idx] => -1,
                None => -2,
            };
            out.push(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TileId;

    fn tile(id: TileId, kind: u8) -> Tile {
        Tile {
            id,
            kind: TileKind(kind),
        }
    }

    #[test]
    fn test_new_board_empty() {
        let board = Board::new(4, 6);
        assert_eq!(board.dimensions(), (4, 6));
        for r in 0..4 {
            for c in 0..6 {
                assert!(board.is_playable(r, c));
                assert!(board.get(r, c).is_none());
            }
        }
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(5, 5);
        board.set(2, 3, Some(tile(7, 1)));
        assert_eq!(board.get(2, 3), Some(tile(7, 1)));
        assert_eq!(board.kind_at(2, 3), Some(TileKind(1)));

        board.set(2, 3, None);
        assert!(board.get(2, 3).is_none());
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let board = Board::new(3, 3);
        let _ = board.get(3, 0);
    }

    #[test]
    #[should_panic]
    fn test_set_on_blocked_cell_panics() {
        let pattern = BoardPattern::parse("1 0\n1 1");
        let mut board = Board::from_pattern(&pattern);
        board.set(0, 1, Some(tile(1, 0)));
    }

    #[test]
    fn test_clearing_blocked_cell_is_allowed() {
        let pattern = BoardPattern::parse("1 0\n1 1");
        let mut board = Board::from_pattern(&pattern);
        board.set(0, 1, None);
        assert!(!board.is_playable(0, 1));
    }

    #[test]
    #[should_panic]
    fn test_degenerate_board_panics() {
        let _ = Board::from_pattern(&BoardPattern::parse(""));
    }

    #[test]
    fn test_swap_exchanges_slots() {
        let mut board = Board::new(3, 3);
        board.set(0, 0, Some(tile(1, 0)));
        board.set(0, 1, Some(tile(2, 3)));

        board.swap((0, 0), (0, 1));
        assert_eq!(board.get(0, 0), Some(tile(2, 3)));
        assert_eq!(board.get(0, 1), Some(tile(1, 0)));

        // Swapping with an empty slot moves the tile
        board.swap((0, 0), (2, 2));
        assert!(board.get(0, 0).is_none());
        assert_eq!(board.get(2, 2), Some(tile(2, 3)));
    }

    #[test]
    fn test_counts() {
        let pattern = BoardPattern::parse("1 1 0\n1 1 1");
        let mut board = Board::from_pattern(&pattern);
        assert_eq!(board.playable_count(), 5);
        assert_eq!(board.tile_count(), 0);

        board.set(0, 0, Some(tile(1, 0)));
        board.set(1, 2, Some(tile(2, 1)));
        assert_eq!(board.tile_count(), 2);

        board.clear();
        assert_eq!(board.tile_count(), 0);
        assert_eq!(board.playable_count(), 5);
    }

    #[test]
    fn test_placed_tiles_row_major() {
        let mut board = Board::new(2, 2);
        board.set(1, 0, Some(tile(9, 2)));
        board.set(0, 1, Some(tile(4, 0)));

        let placed = board.placed_tiles();
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0], (tile(4, 0), (0, 1)));
        assert_eq!(placed[1], (tile(9, 2), (1, 0)));
    }

    #[test]
    fn test_kind_grid_codes() {
        let pattern = BoardPattern::parse("1 0\n1 1");
        let mut board = Board::from_pattern(&pattern);
        board.set(0, 0, Some(tile(1, 4)));

        let mut grid = Vec::new();
        board.write_kind_grid(&mut grid);
        assert_eq!(grid, vec![4, -2, -1, -1]);
    }
}
