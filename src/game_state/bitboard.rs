//! Fixed 64-square set backed by two 32-bit words.
//!
//! Square `i` lives in word `i >> 5` at bit `i & 31`. All operations are
//! value-level and copying a board never aliases the original, so a board can
//! be iterated destructively through `pop_lsb` on a copy.

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::game_state::chess_types::Square;

/// Returned by `pop_lsb` and the zero counters when the board is empty.
pub const NO_SQUARE: Square = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    words: [u32; 2],
}

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard { words: [0, 0] };
    pub const FULL: Bitboard = Bitboard {
        words: [u32::MAX, u32::MAX],
    };

    #[inline]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[inline]
    pub const fn from_u64(bits: u64) -> Self {
        Self {
            words: [bits as u32, (bits >> 32) as u32],
        }
    }

    #[inline]
    pub const fn to_u64(self) -> u64 {
        (self.words[0] as u64) | ((self.words[1] as u64) << 32)
    }

    #[inline]
    pub const fn from_square(square: Square) -> Self {
        Self::EMPTY.with(square)
    }

    /// Copy with `square` set; usable when building const tables.
    #[inline]
    pub const fn with(self, square: Square) -> Self {
        let mut words = self.words;
        words[(square >> 5) as usize] |= 1u32 << (square & 31);
        Self { words }
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.words[(square >> 5) as usize] |= 1u32 << (square & 31);
    }

    #[inline]
    pub fn clear(&mut self, square: Square) {
        self.words[(square >> 5) as usize] &= !(1u32 << (square & 31));
    }

    /// `1` if `square` is in the set, else `0`.
    #[inline]
    pub const fn read(&self, square: Square) -> u8 {
        ((self.words[(square >> 5) as usize] >> (square & 31)) & 1) as u8
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        self.read(square) == 1
    }

    /// Set (`bit != 0`) or clear (`bit == 0`) a square.
    #[inline]
    pub fn write(&mut self, bit: u8, square: Square) {
        if bit == 0 {
            self.clear(square);
        } else {
            self.set(square);
        }
    }

    #[inline]
    pub fn or(&mut self, other: &Bitboard) {
        self.words[0] |= other.words[0];
        self.words[1] |= other.words[1];
    }

    #[inline]
    pub fn and(&mut self, other: &Bitboard) {
        self.words[0] &= other.words[0];
        self.words[1] &= other.words[1];
    }

    #[inline]
    pub fn invert(&mut self) {
        self.words[0] = !self.words[0];
        self.words[1] = !self.words[1];
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.words[0] == 0 && self.words[1] == 0
    }

    #[inline]
    pub const fn intersects(&self, other: &Bitboard) -> bool {
        (self.words[0] & other.words[0]) != 0 || (self.words[1] & other.words[1]) != 0
    }

    /// Index of the lowest set square, 64 when empty.
    #[inline]
    pub const fn count_trailing_zeroes(&self) -> u32 {
        if self.words[0] != 0 {
            self.words[0].trailing_zeros()
        } else if self.words[1] != 0 {
            32 + self.words[1].trailing_zeros()
        } else {
            64
        }
    }

    /// `63 - index` of the highest set square, 64 when empty.
    #[inline]
    pub const fn count_leading_zeroes(&self) -> u32 {
        if self.words[1] != 0 {
            self.words[1].leading_zeros()
        } else if self.words[0] != 0 {
            32 + self.words[0].leading_zeros()
        } else {
            64
        }
    }

    /// Remove and return the lowest set square, or `NO_SQUARE` when empty.
    #[inline]
    pub fn pop_lsb(&mut self) -> Square {
        let index = self.count_trailing_zeroes();
        if index < 64 {
            self.clear(index as Square);
        }
        index as Square
    }

    #[inline]
    pub const fn count(&self) -> u32 {
        self.words[0].count_ones() + self.words[1].count_ones()
    }

    /// Ascending iteration over a copy of the set.
    #[inline]
    pub fn iter(&self) -> BitboardIter {
        BitboardIter { remaining: *self }
    }
}

pub struct BitboardIter {
    remaining: Bitboard,
}

impl Iterator for BitboardIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.remaining.is_empty() {
            None
        } else {
            Some(self.remaining.pop_lsb())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count() as usize;
        (n, Some(n))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = BitboardIter;

    fn into_iter(self) -> BitboardIter {
        BitboardIter { remaining: self }
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut board = Bitboard::EMPTY;
        for square in iter {
            board.set(square);
        }
        board
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitor(mut self, rhs: Bitboard) -> Bitboard {
        self.or(&rhs);
        self
    }
}

impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.or(&rhs);
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn bitand(mut self, rhs: Bitboard) -> Bitboard {
        self.and(&rhs);
        self
    }
}

impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.and(&rhs);
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    #[inline]
    fn not(mut self) -> Bitboard {
        self.invert();
        self
    }
}

/// Eight lines, rank 8 first, `1` for members.
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                write!(f, "{}", self.read(rank * 8 + file))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
