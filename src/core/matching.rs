//! Match detection - stateless scans over a board
//!
//! A match is a run of at least [`MIN_RUN`] consecutive same-kind tiles along
//! a row or column. Blocked and empty cells terminate runs; runs never merge
//! across them. All functions here read the caller's board without mutating
//! it.

use crate::core::Board;
use crate::types::{TileKind, MIN_RUN};

/// Find every matched coordinate on the board.
///
/// Scans all rows left-to-right and all columns top-to-bottom; a tile sitting
/// at the intersection of a horizontal and a vertical run appears once.
/// Result is in row-major order.
pub fn find_all_matches(board: &Board) -> Vec<(usize, usize)> {
    let (rows, cols) = board.dimensions();
    let mut matched = vec![false; rows * cols];

    for r in 0..rows {
        let mut c = 0;
        while c < cols {
            let Some(kind) = board.kind_at(r, c) else {
                c += 1;
                continue;
            };
            let mut end = c + 1;
            while end < cols && board.kind_at(r, end) == Some(kind) {
                end += 1;
            }
            if end - c >= MIN_RUN {
                for cc in c..end {
                    matched[r * cols + cc] = true;
                }
            }
            c = end;
        }
    }

    for c in 0..cols {
        let mut r = 0;
        while r < rows {
            let Some(kind) = board.kind_at(r, c) else {
                r += 1;
                continue;
            };
            let mut end = r + 1;
            while end < rows && board.kind_at(end, c) == Some(kind) {
                end += 1;
            }
            if end - r >= MIN_RUN {
                for rr in r..end {
                    matched[rr * cols + c] = true;
                }
            }
            r = end;
        }
    }

    let mut coords = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if matched[r * cols + c] {
                coords.push((r, c));
            }
        }
    }
    coords
}

/// Check whether placing `kind` at (row, col) would complete a run with the
/// two cells to the left or the two cells above.
///
/// A cheap local probe used during generation and shuffle, where cells are
/// placed row-major onto a board that holds no match yet. It is not a full
/// scan and gives no answer about runs extending right or down.
pub fn would_create_match(board: &Board, row: usize, col: usize, kind: TileKind) -> bool {
    if col >= 2
        && board.kind_at(row, col - 1) == Some(kind)
        && board.kind_at(row, col - 2) == Some(kind)
    {
        return true;
    }
    if row >= 2
        && board.kind_at(row - 1, col) == Some(kind)
        && board.kind_at(row - 2, col) == Some(kind)
    {
        return true;
    }
    false
}

/// Check whether any single swap of adjacent tiles produces a match.
///
/// Tentatively swaps every horizontally- and vertically-adjacent occupied
/// pair on a scratch copy, runs a localized run check at both swapped
/// coordinates, and swaps back. The caller's board is never mutated.
pub fn has_valid_move(board: &Board) -> bool {
    let mut scratch = board.clone();
    let (rows, cols) = scratch.dimensions();

    for r in 0..rows {
        for c in 0..cols {
            for (r2, c2) in [(r, c + 1), (r + 1, c)] {
                if r2 >= rows || c2 >= cols {
                    continue;
                }
                // Occupied implies playable; blocked cells never pair up
                if !scratch.is_occupied(r, c) || !scratch.is_occupied(r2, c2) {
                    continue;
                }
                scratch.swap((r, c), (r2, c2));
                let found = makes_run(&scratch, r, c) || makes_run(&scratch, r2, c2);
                scratch.swap((r, c), (r2, c2));
                if found {
                    return true;
                }
            }
        }
    }
    false
}

/// Localized run check: expand from (row, col) through consecutive same-kind
/// tiles horizontally, then vertically
fn makes_run(board: &Board, row: usize, col: usize) -> bool {
    let Some(kind) = board.kind_at(row, col) else {
        return false;
    };
    let (rows, cols) = board.dimensions();

    let mut run = 1;
    let mut c = col;
    while c > 0 && board.kind_at(row, c - 1) == Some(kind) {
        run += 1;
        c -= 1;
    }
    let mut c = col + 1;
    while c < cols && board.kind_at(row, c) == Some(kind) {
        run += 1;
        c += 1;
    }
    if run >= MIN_RUN {
        return true;
    }

    let mut run = 1;
    let mut r = row;
    while r > 0 && board.kind_at(r - 1, col) == Some(kind) {
        run += 1;
        r -= 1;
    }
    let mut r = row + 1;
    while r < rows && board.kind_at(r, col) == Some(kind) {
        run += 1;
        r += 1;
    }
    run >= MIN_RUN
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Tile, TileKind};

    /// Lay kinds onto a fresh fully-playable board; 255 leaves a cell empty
    fn board_from_kinds(rows: usize, cols: usize, kinds: &[u8]) -> Board {
        assert_eq!(kinds.len(), rows * cols);
        let mut board = Board::new(rows, cols);
        for r in 0..rows {
            for c in 0..cols {
                let k = kinds[r * cols + c];
                if k != 255 {
                    let id = (r * cols + c) as u32;
                    board.set(r, c, Some(Tile { id, kind: TileKind(k) }));
                }
            }
        }
        board
    }

    #[test]
    fn test_no_match_on_short_runs() {
        let board = board_from_kinds(1, 4, &[0, 0, 1, 1]);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_horizontal_run_of_three() {
        let board = board_from_kinds(2, 4, &[2, 2, 2, 1, 0, 1, 0, 1]);
        assert_eq!(find_all_matches(&board), vec![(0, 0), (0, 1), (0, 2)]);
    }

    #[test]
    fn test_vertical_run_of_three() {
        let board = board_from_kinds(3, 2, &[3, 0, 3, 1, 3, 0]);
        assert_eq!(find_all_matches(&board), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_empty_cell_breaks_run() {
        let board = board_from_kinds(1, 5, &[4, 4, 255, 4, 4]);
        assert!(find_all_matches(&board).is_empty());
    }

    #[test]
    fn test_would_create_match_left_and_above() {
        let board = board_from_kinds(3, 3, &[1, 1, 255, 2, 0, 255, 2, 255, 255]);
        // Two same kinds to the left
        assert!(would_create_match(&board, 0, 2, TileKind(1)));
        assert!(!would_create_match(&board, 0, 2, TileKind(2)));
        // (0,0) and (1,0) differ, so a third in the column stays safe
        assert!(!would_create_match(&board, 2, 0, TileKind(2)));
        assert!(!would_create_match(&board, 2, 1, TileKind(0)));
    }

    #[test]
    fn test_would_create_match_vertical() {
        let board = board_from_kinds(3, 1, &[5, 5, 255]);
        assert!(would_create_match(&board, 2, 0, TileKind(5)));
        assert!(!would_create_match(&board, 2, 0, TileKind(4)));
    }

    #[test]
    fn test_has_valid_move_simple() {
        // Swapping (0,2) and (1,2) completes a horizontal run at row 0
        let board = board_from_kinds(2, 3, &[7, 7, 1, 2, 1, 7]);
        assert!(has_valid_move(&board));
    }

    #[test]
    fn test_no_valid_move_on_tiny_board() {
        // A 2x2 board can never form a run of three
        let board = board_from_kinds(2, 2, &[0, 1, 2, 3]);
        assert!(!has_valid_move(&board));
    }
}
