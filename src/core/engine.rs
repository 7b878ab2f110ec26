//! Engine module - turn flow over the board
//!
//! Ties together the board, match detection and gravity: selection and swap
//! handling, the cascade loop, rotation-driven gravity changes, stuck-board
//! reshuffling, and initial generation. This is the only component with
//! mutable cross-cutting state (selection, score, busy flag, angle, rotation
//! budget).
//!
//! The engine is synchronous: every board mutation happens immediately and
//! movement notifications are fire-and-forget. The busy flag is a reentrancy
//! guard over gesture-driven turns, not a thread lock; gestures arriving
//! while a turn is resolving are silently dropped.

use anyhow::Result;

use crate::config::EngineConfig;
use crate::core::snapshot::EngineSnapshot;
use crate::core::{gravity, matching, Board, SimpleRng};
use crate::types::{
    GravityDirection, RotateDir, Tile, TileId, TileKind, BOARD_RETRY_LIMIT, FILL_RETRY_LIMIT,
    MATCH_POINTS, SHUFFLE_RETRY_LIMIT,
};

/// Outbound seam to the presentation layer.
///
/// The engine reports each tile relocation once per gravity pass; the
/// presentation animates at its own pace and the engine treats every
/// notification as already settled.
pub trait MoveListener {
    fn tile_moved(&mut self, tile: TileId, row: usize, col: usize);
}

/// Listener that drops every notification (fully headless sessions)
#[derive(Debug, Default)]
pub struct NullListener;

impl MoveListener for NullListener {
    fn tile_moved(&mut self, _tile: TileId, _row: usize, _col: usize) {}
}

/// Complete session state and turn controller
pub struct BoardEngine {
    board: Board,
    config: EngineConfig,
    rng: SimpleRng,
    listener: Box<dyn MoveListener>,
    selection: Option<(usize, usize)>,
    busy: bool,
    score: u32,
    angle: u16,
    rotations_left: u32,
    next_tile_id: TileId,
}

impl BoardEngine {
    /// Create a new session: validate the configuration, build the board
    /// from its pattern, and run guarded initial generation.
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self> {
        config.validate()?;
        let board = Board::from_pattern(&config.board_pattern());
        let rotations_left = config.max_rotations;

        let mut engine = Self {
            board,
            config,
            rng: SimpleRng::new(seed),
            listener: Box::new(NullListener),
            selection: None,
            busy: false,
            score: 0,
            angle: 0,
            rotations_left,
            next_tile_id: 0,
        };
        engine.initialize_grid();
        Ok(engine)
    }

    /// Install the presentation callback. Defaults to [`NullListener`].
    pub fn set_listener(&mut self, listener: Box<dyn MoveListener>) {
        self.listener = listener;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rotations_left(&self) -> u32 {
        self.rotations_left
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn gravity_direction(&self) -> GravityDirection {
        GravityDirection::from_angle(self.angle)
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for adapters and tests that stage deterministic
    /// layouts. Staged tiles must respect the board invariants.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current RNG state (replaying a session from here reproduces the
    /// remaining draw sequence)
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }

    /// Rebuild the session in place with a fresh seed
    pub fn restart(&mut self, seed: u32) {
        self.rng = SimpleRng::new(seed);
        self.board.clear();
        self.selection = None;
        self.busy = false;
        self.score = 0;
        self.angle = 0;
        self.rotations_left = self.config.max_rotations;
        self.initialize_grid();
    }

    /// Inbound gesture: a click on cell (row, col).
    ///
    /// First click selects; re-click deselects; a click adjacent to the
    /// selection attempts the swap; any other click moves the selection.
    /// Ignored while a turn is resolving and on blocked cells.
    pub fn select_cell(&mut self, row: usize, col: usize) {
        if self.busy {
            return;
        }
        if !self.board.is_playable(row, col) {
            return;
        }

        match self.selection {
            None => self.selection = Some((row, col)),
            Some(sel) if sel == (row, col) => self.selection = None,
            Some(sel) if is_adjacent(sel, (row, col)) => {
                self.selection = None;
                self.swap_turn(sel, (row, col));
            }
            Some(_) => self.selection = Some((row, col)),
        }
    }

    /// Inbound gesture: rotate the board a quarter turn.
    ///
    /// Ignored while a turn is resolving and once the rotation budget is
    /// exhausted. Otherwise consumes one budget unit, re-derives the gravity
    /// direction from the new angle, and resolves the board under it.
    pub fn request_rotate(&mut self, dir: RotateDir) {
        if self.busy {
            return;
        }
        if self.rotations_left == 0 {
            return;
        }

        self.busy = true;
        self.selection = None;
        self.rotations_left -= 1;
        self.angle = match dir {
            RotateDir::Right => (self.angle + 90) % 360,
            RotateDir::Left => (self.angle + 270) % 360,
        };

        self.compact_and_notify();
        self.fill_empties();
        self.run_cascades();
        self.ensure_moves_remain();
        self.busy = false;
    }

    /// One swap attempt: keep it if it matches, undo it if not
    fn swap_turn(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.busy = true;
        self.board.swap(a, b);

        if matching::find_all_matches(&self.board).is_empty() {
            // Undo, not re-detect
            self.board.swap(a, b);
        } else {
            self.run_cascades();
        }

        self.ensure_moves_remain();
        self.busy = false;
    }

    /// The cascade loop: score, remove, compact, refill, rescan until a scan
    /// comes back empty.
    ///
    /// Refill draws are unguarded; a refill may hand the next scan a fresh
    /// match, which simply becomes another cascade step.
    fn run_cascades(&mut self) {
        loop {
            let matches = matching::find_all_matches(&self.board);
            if matches.is_empty() {
                break;
            }

            self.score = self
                .score
                .saturating_add(MATCH_POINTS * matches.len() as u32);
            for &(r, c) in &matches {
                self.board.set(r, c, None);
            }

            self.compact_and_notify();
            self.fill_empties();
        }
    }

    /// One gravity pass for the current direction, reporting each moved tile
    fn compact_and_notify(&mut self) {
        let direction = self.gravity_direction();
        let moves = gravity::compact(&mut self.board, direction);
        for m in &moves {
            self.listener.tile_moved(m.tile, m.to.0, m.to.1);
        }
    }

    /// Fill every empty playable cell with a fresh uniformly-random tile
    fn fill_empties(&mut self) {
        let (rows, cols) = self.board.dimensions();
        for r in 0..rows {
            for c in 0..cols {
                if self.board.is_playable(r, c) && !self.board.is_occupied(r, c) {
                    let kind = self.random_kind();
                    let tile = self.new_tile(kind);
                    self.board.set(r, c, Some(tile));
                }
            }
        }
    }

    /// Reshuffle when the settled board has no valid move left
    fn ensure_moves_remain(&mut self) {
        if self.config.auto_shuffle && !matching::has_valid_move(&self.board) {
            self.shuffle_board();
        }
    }

    /// Redistribute the placed tiles' kinds: Fisher-Yates the kind list and
    /// re-place it row-major under the generation guard. Retries up to
    /// [`SHUFFLE_RETRY_LIMIT`] times; when the ceiling is hit the last
    /// arrangement is placed unguarded and kept, stuck or not.
    fn shuffle_board(&mut self) {
        let mut kinds: Vec<TileKind> = self
            .board
            .placed_tiles()
            .iter()
            .map(|(tile, _)| tile.kind)
            .collect();
        if kinds.is_empty() {
            return;
        }

        for _ in 0..SHUFFLE_RETRY_LIMIT {
            self.rng.shuffle(&mut kinds);
            if self.place_shuffled(&kinds, true) {
                return;
            }
        }
        self.place_shuffled(&kinds, false);
    }

    /// Clear the board and place kinds row-major into playable cells.
    /// With the guard on, abort (returning false) on the first placement
    /// that would complete a match.
    fn place_shuffled(&mut self, kinds: &[TileKind], guarded: bool) -> bool {
        self.board.clear();
        let (rows, cols) = self.board.dimensions();
        let mut next = 0;

        for r in 0..rows {
            for c in 0..cols {
                if !self.board.is_playable(r, c) || next >= kinds.len() {
                    continue;
                }
                let kind = kinds[next];
                if guarded && matching::would_create_match(&self.board, r, c, kind) {
                    return false;
                }
                let tile = self.new_tile(kind);
                self.board.set(r, c, Some(tile));
                next += 1;
            }
        }
        true
    }

    /// Guarded initial generation: fill, then regenerate whole boards until
    /// one has a valid move, up to [`BOARD_RETRY_LIMIT`] attempts. On
    /// exhaustion the last candidate stands.
    fn initialize_grid(&mut self) {
        for _ in 0..BOARD_RETRY_LIMIT {
            self.fill_board_guarded();
            if matching::has_valid_move(&self.board) {
                return;
            }
            self.board.clear();
        }
        self.fill_board_guarded();
    }

    /// Fill the whole board row-major, rejecting kinds that would complete a
    /// match. After [`FILL_RETRY_LIMIT`] draws the kind is forced to the
    /// cycle successor so the fill always terminates.
    fn fill_board_guarded(&mut self) {
        let (rows, cols) = self.board.dimensions();
        for r in 0..rows {
            for c in 0..cols {
                if !self.board.is_playable(r, c) {
                    continue;
                }
                let mut kind = self.random_kind();
                let mut draws = 1;
                while matching::would_create_match(&self.board, r, c, kind) {
                    if draws >= FILL_RETRY_LIMIT {
                        kind = kind.successor(self.config.kinds);
                        break;
                    }
                    kind = self.random_kind();
                    draws += 1;
                }
                let tile = self.new_tile(kind);
                self.board.set(r, c, Some(tile));
            }
        }
    }

    fn random_kind(&mut self) -> TileKind {
        TileKind(self.rng.next_range(self.config.kinds as u32) as u8)
    }

    fn new_tile(&mut self, kind: TileKind) -> Tile {
        let id = self.next_tile_id;
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        Tile { id, kind }
    }

    /// Export the observable state into a reusable snapshot buffer
    pub fn snapshot_into(&self, out: &mut EngineSnapshot) {
        let (rows, cols) = self.board.dimensions();
        out.rows = rows;
        out.cols = cols;
        self.board.write_kind_grid(&mut out.grid);
        out.score = self.score;
        out.rotations_left = self.rotations_left;
        out.angle = self.angle;
        out.busy = self.busy;
        out.selection = self.selection;
        out.rng_state = self.rng.state();
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let mut out = EngineSnapshot::default();
        self.snapshot_into(&mut out);
        out
    }
}

/// Exactly one of row/col differs by 1, the other is identical
fn is_adjacent(a: (usize, usize), b: (usize, usize)) -> bool {
    let dr = a.0.abs_diff(b.0);
    let dc = a.1.abs_diff(b.1);
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}
