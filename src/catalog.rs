//! CatalogChess - Piece Catalog
//!
//! Every piece that can ever stand on a board is one of 6 x 2 x 64
//! immutable records, built once per process. Boards store `'static`
//! references into this table, so moving a piece means pointing the
//! destination cell at a different record. Two references to the same
//! (kind, color, square) are always the same record, which lets the
//! board recognise the en-passant pawn by identity.

use std::fmt;
use std::sync::OnceLock;

use crate::types::{Color, PieceKind, Square};

/// An immutable (kind, color, home square) piece.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PieceRecord {
    kind: PieceKind,
    color: Color,
    square: Square,
}

impl PieceRecord {
    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The square this record stands on whenever it occupies a board.
    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub fn points(&self) -> i32 {
        self.kind.points()
    }

    /// Letter used in ASCII rendering: upper case for white, lower for black.
    pub fn letter(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol(),
            Color::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    /// Unicode chess glyph (U+2654 onwards, white set first).
    pub fn glyph(&self) -> char {
        let base = 0x2654 + 6 * self.color.index() as u32 + self.kind.index() as u32;
        char::from_u32(base).unwrap_or('?')
    }
}

impl fmt::Display for PieceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.color {
            Color::White => 'w',
            Color::Black => 'b',
        };
        write!(f, "{}{}{}", side, self.kind.symbol(), self.square)
    }
}

/// The full table of piece records.
pub struct Catalog {
    records: Vec<PieceRecord>,
}

impl Catalog {
    #[inline]
    fn slot(kind: PieceKind, color: Color, square: Square) -> usize {
        (kind.index() * 2 + color.index()) * 64 + square.index()
    }

    pub fn get(&self, kind: PieceKind, color: Color, square: Square) -> &PieceRecord {
        &self.records[Self::slot(kind, color, square)]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceRecord> {
        self.records.iter()
    }
}

/// Build every (kind, color, square) record, in slot order.
pub fn build_catalog() -> Catalog {
    let mut records = Vec::with_capacity(6 * 2 * 64);
    for kind in PieceKind::ALL {
        for color in Color::ALL {
            for square in Square::all() {
                records.push(PieceRecord { kind, color, square });
            }
        }
    }
    Catalog { records }
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

/// The process-wide catalog, built on first use.
pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(build_catalog)
}

/// The unique record for (kind, color, square). `square` must be on the board.
#[inline]
pub fn lookup(kind: PieceKind, color: Color, square: Square) -> &'static PieceRecord {
    catalog().get(kind, color, square)
}
