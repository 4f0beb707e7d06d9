//! CatalogChess - Type definitions and constants
//!
//! This module provides the core type definitions for representing
//! colors, piece kinds and board coordinates, plus algebraic notation.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// File and rank names for algebraic notation
pub const FILE_NAMES: &[u8; 8] = b"abcdefgh";
pub const RANK_NAMES: &[u8; 8] = b"12345678";

/// Board dimension (rows and columns)
pub const BOARD_SIZE: i8 = 8;

/// The two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Index for array lookups: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<Color> {
        match index {
            0 => Some(Color::White),
            1 => Some(Color::Black),
            _ => None,
        }
    }

    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step for this color.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Row on which this color's pawns start.
    #[inline]
    pub fn pawn_rank(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Row on which this color's king and rooks start.
    #[inline]
    pub fn back_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Row on which this color's pawns promote.
    #[inline]
    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece kinds, in stable index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: u8) -> Option<PieceKind> {
        PieceKind::ALL.get(index as usize).copied()
    }

    /// Upper-case letter used in text rendering.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Rook => 'R',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Pawn => 'P',
        }
    }

    /// Material value. The king outweighs all other material combined.
    pub fn points(self) -> i32 {
        match self {
            PieceKind::King => 1000,
            PieceKind::Queen => 9,
            PieceKind::Rook => 5,
            PieceKind::Bishop => 3,
            PieceKind::Knight => 3,
            PieceKind::Pawn => 1,
        }
    }

    /// Kinds a pawn may promote to.
    pub fn is_promotion_target(self) -> bool {
        !matches!(self, PieceKind::King | PieceKind::Pawn)
    }
}

/// A board coordinate. May lie off the board after arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Square { row, col }
    }

    #[inline]
    pub fn in_range(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Offset into a 64-entry table (a1=0, b1=1, ..., h8=63).
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.in_range());
        self.row as usize * 8 + self.col as usize
    }

    /// Iterate all 64 squares, a1 first, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }
}

impl Add<(i8, i8)> for Square {
    type Output = Square;

    fn add(self, (d_row, d_col): (i8, i8)) -> Square {
        Square::new(self.row + d_row, self.col + d_col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_range() {
            write!(
                f,
                "{}{}",
                FILE_NAMES[self.col as usize] as char, RANK_NAMES[self.row as usize] as char
            )
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return Err(Error::InvalidSquare(name.to_string()));
        }

        let col = FILE_NAMES.iter().position(|&b| b == bytes[0]);
        let row = RANK_NAMES.iter().position(|&b| b == bytes[1]);

        match (row, col) {
            (Some(row), Some(col)) => Ok(Square::new(row as i8, col as i8)),
            _ => Err(Error::InvalidSquare(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_round_trip_for_every_square() {
        for sq in Square::all() {
            let name = sq.to_string();
            assert_eq!(name.parse::<Square>().unwrap(), sq);
        }
        assert_eq!("a1".parse::<Square>().unwrap(), Square::new(0, 0));
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(3, 4));
        assert_eq!(Square::new(3, 2).to_string(), "c4");
    }

    #[test]
    fn rejects_bad_notation() {
        for bad in ["", "a", "i1", "a9", "a0", "e44", "E4"] {
            assert!(bad.parse::<Square>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn arithmetic_may_leave_the_board() {
        let a1: Square = "a1".parse().unwrap();
        assert_eq!((a1 + (1, 1)).to_string(), "b2");
        assert_eq!(("c4".parse::<Square>().unwrap() + (1, -1)).to_string(), "b5");
        assert!(!(a1 + (-1, 0)).in_range());
        assert_eq!((a1 + (-1, 0)).to_string(), "(-1, 0)");
    }

    #[test]
    fn kind_indices_are_stable() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(6), None);
        assert_eq!(!Color::White, Color::Black);
    }
}
