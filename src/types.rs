//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Points awarded per matched tile
pub const MATCH_POINTS: u32 = 10;

/// Retry ceilings for guarded placement
pub const FILL_RETRY_LIMIT: u32 = 50;
pub const SHUFFLE_RETRY_LIMIT: u32 = 50;
pub const BOARD_RETRY_LIMIT: u32 = 100;

/// Tile identity, allocated by the engine and stable for the tile's lifetime.
/// Wraps on overflow; uniqueness within a board is all that matters.
pub type TileId = u32;

/// Tile color/symbol index in `0..kinds`.
///
/// The kind count is session configuration, so this is a newtype over the
/// raw index rather than an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKind(pub u8);

impl TileKind {
    /// The next kind in the cycle of `kinds` total kinds
    pub fn successor(self, kinds: u8) -> Self {
        TileKind((self.0 + 1) % kinds)
    }
}

/// A typed game piece occupying one board slot.
/// Position is defined solely by the slot holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
}

/// Cell on the board (None = empty, Some = occupied)
pub type Cell = Option<Tile>;

/// Compaction direction currently in effect, derived from the board angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GravityDirection {
    Down,
    Left,
    Up,
    Right,
}

impl GravityDirection {
    /// Fixed angle table: 0 -> Down, 90 -> Left, 180 -> Up, 270 -> Right.
    ///
    /// The engine only ever holds angles that are multiples of 90; anything
    /// else is a programming error.
    pub fn from_angle(degrees: u16) -> Self {
        match degrees % 360 {
            0 => GravityDirection::Down,
            90 => GravityDirection::Left,
            180 => GravityDirection::Up,
            270 => GravityDirection::Right,
            other => panic!("angle {} is not a multiple of 90", other),
        }
    }

    /// Whether this direction packs lines toward index 0
    /// (Down -> row 0, Left -> column 0)
    pub fn packs_toward_start(self) -> bool {
        matches!(self, GravityDirection::Down | GravityDirection::Left)
    }

    /// Whether this direction compacts columns (Down/Up) or rows (Left/Right)
    pub fn is_vertical(self) -> bool {
        matches!(self, GravityDirection::Down | GravityDirection::Up)
    }
}

/// Inbound rotation gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDir {
    Left,
    Right,
}

impl RotateDir {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(RotateDir::Left),
            "right" | "r" => Some(RotateDir::Right),
            _ => None,
        }
    }
}

/// A single tile relocation reported by a gravity pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub tile: TileId,
    pub from: (usize, usize),
    pub to: (usize, usize),
}
