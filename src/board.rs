//! Board encoding and the display board.
//!
//! Each player's squares are held in an [`Occupancy`], a 9-bit set packed
//! into a `u16`. The [`Board`] is the human-facing grid of signs derived
//! from both players' occupancy sets.

use std::fmt;
use std::ops::BitOr;

use crate::constants::{ALL_SQUARES_OCCUPIED, N, SIGNS, SQUARES};

/// The set of squares claimed by one player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Occupancy(u16);

impl Occupancy {
    /// The empty set.
    pub const EMPTY: Occupancy = Occupancy(0);

    /// Build a set from a raw mask. Bits above square 8 are discarded.
    pub const fn from_bits(bits: u16) -> Self {
        Occupancy(bits & ALL_SQUARES_OCCUPIED)
    }

    /// Build a set from a list of square indices.
    pub fn from_squares(squares: &[usize]) -> Self {
        squares
            .iter()
            .fold(Occupancy::EMPTY, |acc, &sq| acc.occupy(sq))
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check whether square `index` is in the set.
    #[inline]
    pub fn is_occupied(self, index: usize) -> bool {
        debug_assert!(index < SQUARES, "square {index} out of range");
        self.0 & (1 << index) != 0
    }

    /// Add square `index` to the set.
    ///
    /// The caller must ensure that neither player holds `index`; claiming
    /// a square twice breaks the disjointness of the two sets.
    #[inline]
    pub fn occupy(self, index: usize) -> Self {
        debug_assert!(index < SQUARES, "square {index} out of range");
        debug_assert!(!self.is_occupied(index), "square {index} already occupied");
        Occupancy(self.0 | (1 << index))
    }

    /// Remove square `index` from the set. Only used to take back a
    /// speculative move.
    #[inline]
    pub fn vacate(self, index: usize) -> Self {
        debug_assert!(index < SQUARES, "square {index} out of range");
        Occupancy(self.0 & !(1 << index))
    }

    /// Squares held by either set.
    #[inline]
    pub const fn union(self, other: Occupancy) -> Self {
        Occupancy(self.0 | other.0)
    }

    /// Number of squares in the set.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the squares in the set in ascending order.
    pub fn squares(self) -> impl Iterator<Item = usize> {
        (0..SQUARES).filter(move |&i| self.is_occupied(i))
    }
}

impl BitOr for Occupancy {
    type Output = Occupancy;

    fn bitor(self, rhs: Occupancy) -> Occupancy {
        self.union(rhs)
    }
}

/// The 3x3 grid of cell symbols shown to the player.
///
/// Empty cells show their 1-based square number, occupied cells show the
/// owner's sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [char; SQUARES],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        let mut cells = [' '; SQUARES];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = placeholder(i);
        }
        Self { cells }
    }

    /// Derive the grid from the two players' occupancy sets, indexed by sign.
    pub fn from_occupancy(by_sign: [Occupancy; 2]) -> Self {
        let mut board = Board::new();
        for (sign, occupancy) in by_sign.iter().enumerate() {
            for sq in occupancy.squares() {
                board.cells[sq] = SIGNS[sign];
            }
        }
        board
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied()
    }

    /// True if `index` still shows its placeholder.
    pub fn is_free(&self, index: usize) -> bool {
        self.get(index).is_some_and(|c| c == placeholder(index))
    }

    pub fn cells(&self) -> &[char; SQUARES] {
        &self.cells
    }
}

fn placeholder(index: usize) -> char {
    char::from_digit(index as u32 + 1, 10).unwrap_or('?')
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            if row > 0 {
                writeln!(f, "---|---|---")?;
            }
            let c = &self.cells[row * N..row * N + N];
            writeln!(f, " {} | {} | {} ", c[0], c[1], c[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupy_and_vacate() {
        let m = Occupancy::EMPTY.occupy(4);
        assert!(m.is_occupied(4));
        assert!(!m.is_occupied(3));
        assert_eq!(m.bits(), 0b1_0000);

        let m = m.occupy(0);
        assert_eq!(m.len(), 2);
        assert_eq!(m.vacate(4), Occupancy::from_squares(&[0]));
        assert!(m.vacate(4).vacate(0).is_empty());
    }

    #[test]
    fn test_union() {
        let a = Occupancy::from_squares(&[0, 1]);
        let b = Occupancy::from_squares(&[7, 8]);
        assert_eq!((a | b).squares().collect::<Vec<_>>(), vec![0, 1, 7, 8]);
        assert_eq!(a.union(b), b | a);
    }

    #[test]
    fn test_from_bits_masks_high_bits() {
        assert_eq!(Occupancy::from_bits(0xffff).bits(), 0x1ff);
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    #[cfg(debug_assertions)]
    fn test_occupy_twice_panics_in_debug() {
        let _ = Occupancy::EMPTY.occupy(2).occupy(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn test_is_occupied_off_board_panics_in_debug() {
        let _ = Occupancy::EMPTY.is_occupied(16);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    #[cfg(debug_assertions)]
    fn test_vacate_off_board_panics_in_debug() {
        let _ = Occupancy::EMPTY.vacate(12);
    }

    #[test]
    fn test_board_display_empty() {
        let expected = " 1 | 2 | 3 \n---|---|---\n 4 | 5 | 6 \n---|---|---\n 7 | 8 | 9 \n";
        assert_eq!(Board::new().to_string(), expected);
    }

    #[test]
    fn test_board_from_occupancy() {
        let o = Occupancy::from_squares(&[0, 8]);
        let x = Occupancy::from_squares(&[4]);
        let board = Board::from_occupancy([o, x]);
        assert_eq!(board.get(0), Some('o'));
        assert_eq!(board.get(4), Some('x'));
        assert_eq!(board.get(8), Some('o'));
        assert_eq!(board.get(1), Some('2'));
        assert!(board.is_free(1));
        assert!(!board.is_free(4));
        assert!(!board.is_free(9));
    }
}
