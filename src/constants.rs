//! Constants for board geometry, bit masks, and search scores.
//!
//! The board is a fixed 3x3 grid. Squares are numbered 0..9 in row-major
//! order starting at the top-left corner, and each square maps to one bit
//! of an occupancy mask (square `i` is bit `1 << i`).

// =============================================================================
// Board Geometry
// =============================================================================

/// Board width and height.
pub const N: usize = 3;

/// Number of squares on the board.
pub const SQUARES: usize = N * N;

/// Mask with every square occupied.
pub const ALL_SQUARES_OCCUPIED: u16 = 0b0000_0001_1111_1111;

// =============================================================================
// Winning Lines
// =============================================================================

pub const ROW_1: u16 = 0b0000_0000_0000_0111;
pub const ROW_2: u16 = 0b0000_0000_0011_1000;
pub const ROW_3: u16 = 0b0000_0001_1100_0000;

pub const COL_1: u16 = 0b0000_0000_0100_1001;
pub const COL_2: u16 = 0b0000_0000_1001_0010;
pub const COL_3: u16 = 0b0000_0001_0010_0100;

/// Top-left to bottom-right.
pub const LEFT_DIAG: u16 = 0b0000_0001_0001_0001;

/// Top-right to bottom-left.
pub const RIGHT_DIAG: u16 = 0b0000_0000_0101_0100;

/// The 8 lines that win the game: rows, then columns, then diagonals.
pub const WINNING_LINES: [u16; 8] = [
    ROW_1, ROW_2, ROW_3, COL_1, COL_2, COL_3, LEFT_DIAG, RIGHT_DIAG,
];

// =============================================================================
// Search Parameters
// =============================================================================

/// Score of a win found at the root. A win `d` plies deep scores `WIN_SCORE - d`.
pub const WIN_SCORE: i32 = 10;

/// Score of a drawn position.
pub const DRAW_SCORE: i32 = 0;

/// Initial alpha-beta window bound; larger than any reachable score.
pub const SEARCH_INF: i32 = 1000;

/// Returned by the root search when no square is free.
pub const NO_MOVE: i32 = -1;

// =============================================================================
// Display
// =============================================================================

/// Player signs by sign index. Index 1 (`'x'`) always moves first.
pub const SIGNS: [char; 2] = ['o', 'x'];

/// Sign index of the side that opens the game.
pub const FIRST_SIGN_INDEX: usize = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_three_squares() {
        for line in WINNING_LINES {
            assert_eq!(line.count_ones(), 3);
            assert_eq!(line & !ALL_SQUARES_OCCUPIED, 0);
        }
    }

    #[test]
    fn test_lines_are_distinct() {
        for (i, a) in WINNING_LINES.iter().enumerate() {
            for b in &WINNING_LINES[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_full_mask_has_every_square() {
        assert_eq!(ALL_SQUARES_OCCUPIED.count_ones() as usize, SQUARES);
    }
}
