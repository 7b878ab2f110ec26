//! Read-only state export for observers (UI polling, simulation output)

use serde::{Deserialize, Serialize};

/// Flat view of everything an observer may read.
///
/// `grid` is row-major, one code per cell: the tile's kind index, -1 for an
/// empty playable cell, -2 for a blocked cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub rows: usize,
    pub cols: usize,
    pub grid: Vec<i8>,
    pub score: u32,
    pub rotations_left: u32,
    pub angle: u16,
    pub busy: bool,
    pub selection: Option<(usize, usize)>,
    pub rng_state: u32,
}

impl EngineSnapshot {
    /// Reset to the empty state so the buffer can be refilled in place
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.grid.clear();
        self.score = 0;
        self.rotations_left = 0;
        self.angle = 0;
        self.busy = false;
        self.selection = None;
        self.rng_state = 0;
    }

    /// Kind code at (row, col); see the type docs for the encoding
    pub fn code_at(&self, row: usize, col: usize) -> i8 {
        self.grid[row * self.cols + col]
    }
}
