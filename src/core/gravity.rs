//! Gravity module - directional compaction of tiles
//!
//! One pass packs every line's tiles against the current gravity end:
//! collect the line's tiles in order, clear the line, re-place them against
//! the target end of its playable cells. Blocked cells are gaps that never
//! receive a tile and never disturb the packing order. Fill always targets
//! the remaining empties directly, so a single pass per resolution step is
//! enough; a second pass over a settled board moves nothing.

use crate::core::Board;
use crate::types::{GravityDirection, Tile, TileMove};

/// Run one compaction pass in the given direction.
///
/// Returns the relocations performed, one entry per tile whose slot changed;
/// an empty result means the board was already settled. Down packs toward
/// row 0, Up toward the highest row, Left toward column 0, Right toward the
/// highest column.
pub fn compact(board: &mut Board, direction: GravityDirection) -> Vec<TileMove> {
    let (rows, cols) = board.dimensions();
    let mut moves = Vec::new();
    let mut slots: Vec<(usize, usize)> = Vec::new();

    if direction.is_vertical() {
        for col in 0..cols {
            slots.clear();
            slots.extend((0..rows).map(|r| (r, col)).filter(|&(r, c)| board.is_playable(r, c)));
            compact_line(board, &slots, direction.packs_toward_start(), &mut moves);
        }
    } else {
        for row in 0..rows {
            slots.clear();
            slots.extend((0..cols).map(|c| (row, c)).filter(|&(r, c)| board.is_playable(r, c)));
            compact_line(board, &slots, direction.packs_toward_start(), &mut moves);
        }
    }

    moves
}

/// Collect-then-place over one line's playable slots, given in line order
fn compact_line(
    board: &mut Board,
    slots: &[(usize, usize)],
    toward_start: bool,
    moves: &mut Vec<TileMove>,
) {
    let mut tiles: Vec<(Tile, (usize, usize))> = Vec::with_capacity(slots.len());
    for &(r, c) in slots {
        if let Some(tile) = board.get(r, c) {
            tiles.push((tile, (r, c)));
            board.set(r, c, None);
        }
    }

    let offset = if toward_start {
        0
    } else {
        slots.len() - tiles.len()
    };
    for (i, (tile, from)) in tiles.into_iter().enumerate() {
        let to = slots[offset + i];
        board.set(to.0, to.1, Some(tile));
        if to != from {
            moves.push(TileMove {
                tile: tile.id,
                from,
                to,
            });
        }
    }
}
