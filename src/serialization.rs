//! CatalogChess - Serialization adapter
//!
//! Converts boards, pieces and moves to and from a JSON-friendly record
//! shape. Pieces are `{index, color, square: {row, col}}`; a board carries
//! its 8x8 grid, king cache, en-passant pawn and per-color castling flags.
//! Decoding validates the record against the board invariants and maps
//! every piece back onto its catalog entry.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move};
use crate::catalog::{lookup, PieceRecord};
use crate::error::{Error, Result};
use crate::types::{Color, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceState {
    pub index: u8,
    pub color: u8,
    pub square: Square,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub board: Vec<Vec<Option<PieceState>>>,
    pub kings: [Option<PieceState>; 2],
    pub en_passant: Option<PieceState>,
    pub queen_side_castle: [bool; 2],
    pub king_side_castle: [bool; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveState {
    pub piece: PieceState,
    pub destination: Square,
    pub ep: bool,
    pub castle: bool,
    pub promote: Option<u8>,
}

impl From<&PieceRecord> for PieceState {
    fn from(piece: &PieceRecord) -> Self {
        PieceState {
            index: piece.kind().index() as u8,
            color: piece.color().index() as u8,
            square: piece.square(),
        }
    }
}

impl TryFrom<PieceState> for &'static PieceRecord {
    type Error = Error;

    fn try_from(state: PieceState) -> Result<Self> {
        let kind = PieceKind::from_index(state.index)
            .ok_or_else(|| Error::InvalidRecord(format!("unknown piece index {}", state.index)))?;
        let color = Color::from_index(state.color)
            .ok_or_else(|| Error::InvalidRecord(format!("unknown color {}", state.color)))?;
        if !state.square.in_range() {
            return Err(Error::OutOfRange(state.square));
        }
        Ok(lookup(kind, color, state.square))
    }
}

impl From<&Board> for BoardState {
    fn from(board: &Board) -> Self {
        BoardState {
            board: board
                .cells
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(PieceState::from)).collect())
                .collect(),
            kings: board.kings.map(|king| king.map(PieceState::from)),
            en_passant: board.en_passant.map(PieceState::from),
            queen_side_castle: board.queen_side_castle,
            king_side_castle: board.king_side_castle,
        }
    }
}

impl TryFrom<BoardState> for Board {
    type Error = Error;

    fn try_from(state: BoardState) -> Result<Self> {
        if state.board.len() != 8 || state.board.iter().any(|row| row.len() != 8) {
            return Err(Error::InvalidRecord("board must be an 8x8 grid".into()));
        }

        let mut board = Board::empty();
        for (row, cells) in state.board.into_iter().enumerate() {
            for (col, cell) in cells.into_iter().enumerate() {
                let Some(cell) = cell else { continue };
                let piece: &'static PieceRecord = cell.try_into()?;
                let square = Square::new(row as i8, col as i8);
                if piece.square() != square {
                    return Err(Error::InvalidRecord(format!("{} stored on {}", piece, square)));
                }
                board.cells[row][col] = Some(piece);
            }
        }

        for color in Color::ALL {
            let Some(entry) = state.kings[color.index()] else { continue };
            let king: &'static PieceRecord = entry.try_into()?;
            if king.kind() != PieceKind::King || king.color() != color {
                return Err(Error::InvalidRecord(format!("{} is not the {} king", king, color)));
            }
            if !occupies(&board, king) {
                return Err(Error::InvalidRecord(format!("{} is not on the board", king)));
            }
            board.kings[color.index()] = Some(king);
        }

        // Every king on the grid must be the cached one.
        for color in Color::ALL {
            let cached = board.kings[color.index()];
            let uncached = board.pieces().find(|piece| {
                piece.kind() == PieceKind::King
                    && piece.color() == color
                    && !cached.is_some_and(|king| std::ptr::eq(king, *piece))
            });
            if let Some(king) = uncached {
                return Err(Error::InvalidRecord(format!("{} is missing from the king cache", king)));
            }
        }

        if let Some(entry) = state.en_passant {
            let pawn: &'static PieceRecord = entry.try_into()?;
            let color = pawn.color();
            let landing_row = color.pawn_rank() + 2 * color.forward();
            if pawn.kind() != PieceKind::Pawn
                || pawn.square().row != landing_row
                || !occupies(&board, pawn)
            {
                return Err(Error::InvalidRecord(format!("{} cannot be the en passant pawn", pawn)));
            }
            board.en_passant = Some(pawn);
        }

        board.queen_side_castle = state.queen_side_castle;
        board.king_side_castle = state.king_side_castle;
        Ok(board)
    }
}

fn occupies(board: &Board, piece: &'static PieceRecord) -> bool {
    board
        .occupant(piece.square())
        .is_some_and(|occupant| std::ptr::eq(occupant, piece))
}

impl From<&Move> for MoveState {
    fn from(mv: &Move) -> Self {
        MoveState {
            piece: mv.piece.into(),
            destination: mv.destination,
            ep: mv.en_passant,
            castle: mv.castle,
            promote: mv.promote.map(|kind| kind.index() as u8),
        }
    }
}

impl TryFrom<MoveState> for Move {
    type Error = Error;

    fn try_from(state: MoveState) -> Result<Self> {
        let promote = match state.promote {
            None => None,
            Some(index) => Some(PieceKind::from_index(index).ok_or_else(|| {
                Error::InvalidRecord(format!("unknown promotion index {}", index))
            })?),
        };
        Ok(Move {
            piece: state.piece.try_into()?,
            destination: state.destination,
            en_passant: state.ep,
            castle: state.castle,
            promote,
        })
    }
}

impl Board {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&BoardState::from(self))?)
    }

    /// Decode a board. The configuration is not persisted and starts at its default.
    pub fn from_json(json: &str) -> Result<Board> {
        let state: BoardState = serde_json::from_str(json)?;
        Board::try_from(state)
    }
}

impl Move {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&MoveState::from(self))?)
    }

    pub fn from_json(json: &str) -> Result<Move> {
        let state: MoveState = serde_json::from_str(json)?;
        Move::try_from(state)
    }
}
