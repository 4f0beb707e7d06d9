//! CatalogChess - Board Representation Module
//!
//! This module provides the mutable position: an 8x8 grid of references
//! into the piece catalog, the king location cache, castling rights and
//! the en-passant target. It applies moves (including en passant,
//! castling and promotion), detects check and enumerates moves with
//! one-ply lookahead boards for an external search.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::{debug, error, trace, warn};

use crate::catalog::{lookup, PieceRecord};
use crate::config::BoardConfig;
use crate::error::{Error, Result};
use crate::evaluation;
use crate::move_generator;
use crate::types::*;

/// Back rank layout, a-file to h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Castling geometry (columns)
const KING_START_COL: i8 = 4;
const QUEEN_SIDE_ROOK_COL: i8 = 0;
const KING_SIDE_ROOK_COL: i8 = 7;
pub const QUEEN_SIDE_CASTLE_COL: i8 = 2;
pub const KING_SIDE_CASTLE_COL: i8 = 6;

/// Represents an intended move
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub piece: &'static PieceRecord,
    pub destination: Square,
    pub en_passant: bool,
    pub castle: bool,
    pub promote: Option<PieceKind>,
}

impl Move {
    /// Create a plain move
    pub fn new(piece: &'static PieceRecord, destination: Square) -> Self {
        Move {
            piece,
            destination,
            en_passant: false,
            castle: false,
            promote: None,
        }
    }

    /// Create a promotion move
    pub fn with_promotion(piece: &'static PieceRecord, destination: Square, kind: PieceKind) -> Self {
        Move {
            promote: Some(kind),
            ..Move::new(piece, destination)
        }
    }

    /// Create a castling move
    pub fn castling(king: &'static PieceRecord, destination: Square) -> Self {
        Move {
            castle: true,
            ..Move::new(king, destination)
        }
    }

    /// Create an en passant move
    pub fn en_passant(pawn: &'static PieceRecord, destination: Square) -> Self {
        Move {
            en_passant: true,
            ..Move::new(pawn, destination)
        }
    }
}

/// Moves compare by piece and destination; flags are ignored.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.piece, other.piece) && self.destination == other.destination
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.piece, self.destination)
    }
}

type Cell = Option<&'static PieceRecord>;

/// Chess board representation
#[derive(Clone, Debug)]
pub struct Board {
    /// Cells indexed `[row][col]`, row 0 is rank 1
    pub(crate) cells: [[Cell; 8]; 8],
    /// Cached king record per color
    pub(crate) kings: [Cell; 2],
    pub(crate) queen_side_castle: [bool; 2],
    pub(crate) king_side_castle: [bool; 2],
    /// The pawn that just advanced two squares, if any
    pub(crate) en_passant: Cell,
    pub(crate) config: BoardConfig,
}

impl Board {
    /// Create a new board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as i8;
            for color in Color::ALL {
                board.add_piece(lookup(kind, color, Square::new(color.back_rank(), col)));
                board.add_piece(lookup(PieceKind::Pawn, color, Square::new(color.pawn_rank(), col)));
            }
        }
        board
    }

    /// Create a board with no pieces. All castling rights start set.
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
            kings: [None; 2],
            queen_side_castle: [true; 2],
            king_side_castle: [true; 2],
            en_passant: None,
            config: BoardConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// Piece on `square`, or an error if the square is off the board.
    pub fn get_piece(&self, square: Square) -> Result<Option<&'static PieceRecord>> {
        if !square.in_range() {
            return Err(Error::OutOfRange(square));
        }
        Ok(self.cells[square.row as usize][square.col as usize])
    }

    /// Piece on `square`; off-board squares are simply empty.
    #[inline]
    pub fn occupant(&self, square: Square) -> Option<&'static PieceRecord> {
        if square.in_range() {
            self.cells[square.row as usize][square.col as usize]
        } else {
            None
        }
    }

    /// Place `piece` on its home square, replacing any occupant. No legality checks.
    pub fn add_piece(&mut self, piece: &'static PieceRecord) {
        self.set_cell(piece.square(), Some(piece));
        if piece.kind() == PieceKind::King {
            self.kings[piece.color().index()] = Some(piece);
        }
    }

    /// Clear `square` unconditionally.
    pub fn remove_piece(&mut self, square: Square) -> Result<()> {
        if !square.in_range() {
            return Err(Error::OutOfRange(square));
        }
        self.set_cell(square, None);
        Ok(())
    }

    fn set_cell(&mut self, square: Square, cell: Cell) {
        let slot = &mut self.cells[square.row as usize][square.col as usize];
        if let Some(previous) = slot.take() {
            let cached = &mut self.kings[previous.color().index()];
            if cached.is_some_and(|king| std::ptr::eq(king, previous)) {
                *cached = None;
            }
        }
        *slot = cell;
    }

    /// King record of `color`, if one is on the board.
    pub fn king(&self, color: Color) -> Option<&'static PieceRecord> {
        self.kings[color.index()]
    }

    /// The pawn currently capturable en passant.
    pub fn en_passant(&self) -> Option<&'static PieceRecord> {
        self.en_passant
    }

    pub fn queen_side_castle(&self, color: Color) -> bool {
        self.queen_side_castle[color.index()]
    }

    pub fn king_side_castle(&self, color: Color) -> bool {
        self.king_side_castle[color.index()]
    }

    /// All occupants, a1 first, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = &'static PieceRecord> + '_ {
        self.cells.iter().flat_map(|row| row.iter().filter_map(|cell| *cell))
    }

    /// Execute a move on the board. Returns the record now on `destination`.
    ///
    /// The normal branch is a raw transition: it does not check the piece's
    /// movement pattern, so callers wanting legal play test
    /// [`move_generator::is_legal`] first and [`Board::in_check`] after.
    /// En passant and castling validate their own preconditions. A failed
    /// call leaves the board untouched.
    pub fn apply_move(
        &mut self,
        piece: &PieceRecord,
        destination: Square,
        en_passant: bool,
        castle: bool,
        promote: Option<PieceKind>,
    ) -> Result<&'static PieceRecord> {
        if !destination.in_range() {
            return Err(Error::OutOfRange(destination));
        }
        let piece = self.on_board(piece)?;

        let (next, placed) = if castle {
            if en_passant || promote.is_some() {
                return Err(Error::invalid("castling cannot be combined with other flags"));
            }
            self.castled(piece, destination)?
        } else {
            self.moved(piece, destination, en_passant, promote)?
        };

        if next.config.check_consistency {
            next.verify()?;
        }
        *self = next;
        Ok(placed)
    }

    /// Apply a [`Move`] value.
    pub fn make_move(&mut self, mv: &Move) -> Result<&'static PieceRecord> {
        self.apply_move(mv.piece, mv.destination, mv.en_passant, mv.castle, mv.promote)
    }

    fn on_board(&self, piece: &PieceRecord) -> Result<&'static PieceRecord> {
        match self.occupant(piece.square()) {
            Some(occupant) if std::ptr::eq(occupant, piece) => Ok(occupant),
            _ => Err(Error::invalid(format!("{} is not on the board", piece))),
        }
    }

    fn moved(
        &self,
        piece: &'static PieceRecord,
        destination: Square,
        en_passant: bool,
        promote: Option<PieceKind>,
    ) -> Result<(Board, &'static PieceRecord)> {
        let mut next = self.clone();

        if en_passant {
            if piece.kind() != PieceKind::Pawn {
                return Err(Error::invalid("only pawns may move en passant"));
            }
            let from = piece.square();
            let unit = piece.color().forward();
            let diagonal = destination == from + (unit, 1) || destination == from + (unit, -1);
            if !diagonal
                || self.occupant(destination).is_some()
                || !move_generator::is_en_passant_square(piece, destination, self)
            {
                return Err(Error::invalid(format!("{} to {} is not en passant", piece, destination)));
            }
            let captured = destination + (-unit, 0);
            next.remove_piece(captured)?;
            debug!(%piece, %destination, %captured, "en passant capture");
        }

        next.update_bookkeeping(piece, destination);
        let placed = next.place(piece, destination, promote)?;
        Ok((next, placed))
    }

    /// Castling as a pre / through / after check on a working copy.
    fn castled(
        &self,
        king: &'static PieceRecord,
        destination: Square,
    ) -> Result<(Board, &'static PieceRecord)> {
        let result = self.try_castle(king, destination);
        if let Err(err) = &result {
            debug!(%king, %destination, %err, "castling rejected");
        }
        result
    }

    fn try_castle(
        &self,
        king: &'static PieceRecord,
        destination: Square,
    ) -> Result<(Board, &'static PieceRecord)> {
        if king.kind() != PieceKind::King {
            return Err(Error::invalid("only the king may castle"));
        }
        let color = king.color();
        let rank = color.back_rank();
        if king.square() != Square::new(rank, KING_START_COL) {
            return Err(Error::invalid("king is not on its starting square"));
        }
        if destination.row != rank {
            return Err(Error::invalid("cannot castle king to this row"));
        }

        let (right, rook_col) = match destination.col {
            QUEEN_SIDE_CASTLE_COL => (self.queen_side_castle[color.index()], QUEEN_SIDE_ROOK_COL),
            KING_SIDE_CASTLE_COL => (self.king_side_castle[color.index()], KING_SIDE_ROOK_COL),
            _ => return Err(Error::invalid("cannot castle king to this column")),
        };
        if !right {
            return Err(Error::invalid(
                "cannot castle since either rook or king has previously moved",
            ));
        }

        let rook = self
            .occupant(Square::new(rank, rook_col))
            .filter(|rook| rook.kind() == PieceKind::Rook && rook.color() == color)
            .ok_or_else(|| Error::invalid("no rook to castle with"))?;

        let (low, high) = (rook_col.min(KING_START_COL), rook_col.max(KING_START_COL));
        if (low + 1..high).any(|col| self.occupant(Square::new(rank, col)).is_some()) {
            return Err(Error::invalid("castling path is blocked"));
        }

        if self.in_check(color) {
            return Err(Error::invalid("cannot castle out of check"));
        }

        let mut next = self.clone();
        next.en_passant = None;
        next.queen_side_castle[color.index()] = false;
        next.king_side_castle[color.index()] = false;

        let unit = (destination.col - KING_START_COL).signum();
        let mut current = king;
        while current.square() != destination {
            let step = current.square() + (0, unit);
            current = next.place(current, step, None)?;
            if next.in_check(color) {
                return Err(Error::invalid(if step == destination {
                    "cannot castle into check"
                } else {
                    "cannot castle through check"
                }));
            }
        }

        next.place(rook, destination + (0, -unit), None)?;
        debug!(king = %current, %rook, "castled");
        Ok((next, current))
    }

    /// En-passant and castling-rights bookkeeping for a non-castling move.
    fn update_bookkeeping(&mut self, piece: &'static PieceRecord, destination: Square) {
        let color = piece.color();
        let from = piece.square();

        self.en_passant = None;
        if piece.kind() == PieceKind::Pawn
            && from.row == color.pawn_rank()
            && destination == from + (2 * color.forward(), 0)
        {
            self.en_passant = Some(lookup(PieceKind::Pawn, color, destination));
        }

        match piece.kind() {
            PieceKind::King => {
                self.queen_side_castle[color.index()] = false;
                self.king_side_castle[color.index()] = false;
            }
            PieceKind::Rook => self.clear_rook_right(piece),
            _ => {}
        }

        // A rook captured on its corner takes its right with it
        if let Some(captured) = self.occupant(destination) {
            if captured.kind() == PieceKind::Rook && captured.color() != color {
                self.clear_rook_right(captured);
            }
        }
    }

    fn clear_rook_right(&mut self, rook: &PieceRecord) {
        let color = rook.color();
        let square = rook.square();
        if square == Square::new(color.back_rank(), QUEEN_SIDE_ROOK_COL) {
            self.queen_side_castle[color.index()] = false;
        } else if square == Square::new(color.back_rank(), KING_SIDE_ROOK_COL) {
            self.king_side_castle[color.index()] = false;
        }
    }

    /// Normal branch: capture, put the catalog record for the destination in
    /// place and clear the origin.
    fn place(
        &mut self,
        piece: &'static PieceRecord,
        destination: Square,
        promote: Option<PieceKind>,
    ) -> Result<&'static PieceRecord> {
        let from = piece.square();
        if from == destination {
            return Err(Error::invalid(format!("{} is already on {}", piece, destination)));
        }
        let kind = promotion_kind(piece, destination, promote)?;
        let placed = lookup(kind, piece.color(), destination);

        self.set_cell(destination, Some(placed));
        self.set_cell(from, None);
        if kind == PieceKind::King {
            self.kings[piece.color().index()] = Some(placed);
        }
        if kind != piece.kind() {
            debug!(%piece, %destination, promoted = ?kind, "promotion");
        }
        Ok(placed)
    }

    /// True if `color`'s king is attacked by any opposing piece.
    pub fn in_check(&self, color: Color) -> bool {
        let king = match self.kings[color.index()] {
            Some(king) if self.holds(king) => king,
            _ => return false,
        };
        self.pieces()
            .filter(|piece| piece.color() != color)
            .any(|piece| move_generator::is_legal(piece, king.square(), self))
    }

    fn holds(&self, piece: &PieceRecord) -> bool {
        self.occupant(piece.square())
            .is_some_and(|occupant| std::ptr::eq(occupant, piece))
    }

    /// Pseudo-legal destinations for the piece on `square`.
    pub fn destinations(&self, square: Square) -> Result<Vec<Square>> {
        Ok(self
            .get_piece(square)?
            .map(|piece| move_generator::destinations(piece, self))
            .unwrap_or_default())
    }

    /// The move a caller means by sending `piece` to `destination`, with
    /// en-passant and promotion flags filled in.
    pub fn infer_move(&self, piece: &'static PieceRecord, destination: Square) -> Move {
        if piece.kind() != PieceKind::Pawn {
            return Move::new(piece, destination);
        }
        if destination.row == piece.color().promotion_rank() {
            return Move::with_promotion(piece, destination, PieceKind::Queen);
        }
        if destination.col != piece.square().col
            && self.occupant(destination).is_none()
            && move_generator::is_en_passant_square(piece, destination, self)
        {
            return Move::en_passant(piece, destination);
        }
        Move::new(piece, destination)
    }

    /// Every pseudo-legal move for `color`, paired with the board it
    /// produces, best `heuristic` score first.
    ///
    /// Moves that leave `color`'s own king in check are included; callers
    /// that need legal moves test `in_check` on each resulting board (or
    /// use [`Board::legal_moves`]).
    pub fn enumerate_moves<H>(&self, color: Color, heuristic: H) -> ScoredMoves
    where
        H: Fn(&Board) -> i32,
    {
        let mut heap = BinaryHeap::new();
        let mut seq = 0;

        for piece in self.pieces().filter(|piece| piece.color() == color) {
            for destination in move_generator::destinations(piece, self) {
                let mv = self.infer_move(piece, destination);
                let mut board = self.copy();
                match board.make_move(&mv) {
                    Ok(_) => {
                        let score = heuristic(&board);
                        heap.push(Ranked { score, seq, mv, board });
                        seq += 1;
                    }
                    Err(err) => warn!(%mv, %err, "skipping enumerated move"),
                }
            }
        }

        trace!(%color, moves = seq, "enumerated moves");
        ScoredMoves { heap }
    }

    /// Castling moves `color` may currently make.
    pub fn castling_moves(&self, color: Color) -> Vec<(Move, Board)> {
        let Some(king) = self.king(color) else {
            return Vec::new();
        };
        [QUEEN_SIDE_CASTLE_COL, KING_SIDE_CASTLE_COL]
            .into_iter()
            .filter_map(|col| {
                let destination = Square::new(king.square().row, col);
                let mv = Move::castling(king, destination);
                let mut board = self.copy();
                board.make_move(&mv).ok().map(|_| (mv, board))
            })
            .collect()
    }

    /// Moves that do not leave `color`'s king in check, castles included.
    pub fn legal_moves(&self, color: Color) -> Vec<(Move, Board)> {
        let mut moves: Vec<_> = self
            .enumerate_moves(color, evaluation::constant)
            .filter(|(_, board)| !board.in_check(color))
            .collect();
        moves.extend(self.castling_moves(color));
        moves
    }

    /// Material of `color` minus material of its opponent.
    pub fn compute_score(&self, color: Color) -> i32 {
        self.pieces()
            .map(|piece| {
                if piece.color() == color {
                    piece.points()
                } else {
                    -piece.points()
                }
            })
            .sum()
    }

    /// True if every cell holds the record for that cell and the king cache
    /// points at kings on the board.
    pub fn is_consistent(&self) -> bool {
        self.verify().is_ok()
    }

    fn verify(&self) -> Result<()> {
        for square in Square::all() {
            if let Some(piece) = self.occupant(square) {
                if piece.square() != square {
                    let msg = format!("{} found on {}", piece, square);
                    error!(%msg, "consistency check failed");
                    return Err(Error::Inconsistent(msg));
                }
            }
        }
        for color in Color::ALL {
            if let Some(king) = self.kings[color.index()] {
                if king.kind() != PieceKind::King || king.color() != color || !self.holds(king) {
                    let msg = format!("{} king cache points at {}", color, king);
                    error!(%msg, "consistency check failed");
                    return Err(Error::Inconsistent(msg));
                }
            }
        }
        Ok(())
    }

    /// Create a copy of the board
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let files = FILE_NAMES
            .iter()
            .fold(String::from(" "), |line, &f| format!("{}   {}", line, f as char));
        let border = format!("  {}", " ---".repeat(8));

        let mut lines = vec![files.clone(), border.clone()];
        for row in (0..8).rev() {
            let mut line = format!("{} |", RANK_NAMES[row] as char);
            for cell in &self.cells[row] {
                match cell {
                    None => line.push_str("   |"),
                    Some(piece) => {
                        let symbol = if self.config.unicode_glyphs {
                            piece.glyph()
                        } else {
                            piece.letter()
                        };
                        line.push_str(&format!(" {} |", symbol));
                    }
                }
            }
            lines.push(line);
            lines.push(border.clone());
        }
        lines.push(files);

        lines.join("\n")
    }
}

fn promotion_kind(
    piece: &PieceRecord,
    destination: Square,
    promote: Option<PieceKind>,
) -> Result<PieceKind> {
    let promoting =
        piece.kind() == PieceKind::Pawn && destination.row == piece.color().promotion_rank();
    match (promoting, promote) {
        (true, None) => Ok(PieceKind::Queen),
        (true, Some(kind)) if kind.is_promotion_target() => Ok(kind),
        (true, Some(kind)) => Err(Error::invalid(format!("cannot promote to {:?}", kind))),
        (false, None) => Ok(piece.kind()),
        (false, Some(_)) => Err(Error::invalid(format!(
            "{} to {} is not a promotion",
            piece, destination
        ))),
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

struct Ranked {
    score: i32,
    seq: usize,
    mv: Move,
    board: Board,
}

impl Ord for Ranked {
    // Highest score first, then earliest generated.
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Iterator over `(Move, Board)` pairs in descending heuristic order.
pub struct ScoredMoves {
    heap: BinaryHeap<Ranked>,
}

impl Iterator for ScoredMoves {
    type Item = (Move, Board);

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop().map(|ranked| (ranked.mv, ranked.board))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl ExactSizeIterator for ScoredMoves {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn piece_at(board: &Board, name: &str) -> &'static PieceRecord {
        board.get_piece(sq(name)).unwrap().unwrap()
    }

    #[test]
    fn starting_position() {
        let board = Board::new();
        assert_eq!(piece_at(&board, "a1").kind(), PieceKind::Rook);
        assert_eq!(piece_at(&board, "a1").color(), Color::White);
        assert_eq!(piece_at(&board, "b1").kind(), PieceKind::Knight);
        assert_eq!(piece_at(&board, "c1").kind(), PieceKind::Bishop);
        assert_eq!(piece_at(&board, "d1").kind(), PieceKind::Queen);
        assert_eq!(piece_at(&board, "e1").kind(), PieceKind::King);
        assert_eq!(piece_at(&board, "a8").color(), Color::Black);
        assert_eq!(piece_at(&board, "e8").kind(), PieceKind::King);
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.king(Color::White).unwrap().square(), sq("e1"));
        assert_eq!(board.king(Color::Black).unwrap().square(), sq("e8"));
        assert!(board.is_consistent());
    }

    #[test]
    fn get_piece_rejects_off_board_squares() {
        let board = Board::new();
        assert!(matches!(board.get_piece(Square::new(8, 0)), Err(Error::OutOfRange(_))));
        assert!(matches!(board.get_piece(Square::new(0, -1)), Err(Error::OutOfRange(_))));
        assert!(board.get_piece(sq("e4")).unwrap().is_none());
    }

    #[test]
    fn add_and_remove() {
        let mut board = Board::empty();
        board.add_piece(lookup(PieceKind::Pawn, Color::White, sq("d4")));
        let pawn = piece_at(&board, "d4");
        assert_eq!(pawn.kind(), PieceKind::Pawn);
        assert_eq!(pawn.square(), sq("d4"));

        board.remove_piece(sq("d4")).unwrap();
        assert!(board.get_piece(sq("d4")).unwrap().is_none());
        assert!(board.remove_piece(Square::new(-1, 3)).is_err());
    }

    #[test]
    fn removing_the_king_clears_the_cache() {
        let mut board = Board::new();
        board.remove_piece(sq("e1")).unwrap();
        assert!(board.king(Color::White).is_none());
        assert!(!board.in_check(Color::White));
        assert!(board.is_consistent());
    }

    #[test]
    fn normal_move_relocates_via_the_catalog() {
        let mut board = Board::new();
        let bishop = piece_at(&board, "c1");
        let moved = board.apply_move(bishop, sq("f6"), false, false, None).unwrap();
        assert_eq!(moved.square(), sq("f6"));
        assert_eq!(moved.kind(), PieceKind::Bishop);
        assert!(std::ptr::eq(piece_at(&board, "f6"), moved));
        assert!(board.get_piece(sq("c1")).unwrap().is_none());
        assert!(std::ptr::eq(moved, lookup(PieceKind::Bishop, Color::White, sq("f6"))));
    }

    #[test]
    fn capture_replaces_the_occupant() {
        let mut board = Board::new();
        let queen = piece_at(&board, "d1");
        board.apply_move(queen, sq("d7"), false, false, None).unwrap();
        assert_eq!(board.pieces().count(), 31);
        assert_eq!(board.compute_score(Color::White), 1);
    }

    #[test]
    fn move_of_absent_piece_is_rejected() {
        let mut board = Board::new();
        let ghost = lookup(PieceKind::Queen, Color::White, sq("e4"));
        assert!(matches!(
            board.apply_move(ghost, sq("e5"), false, false, None),
            Err(Error::InvalidOperation(_))
        ));
        let rook = piece_at(&board, "a1");
        assert!(matches!(
            board.apply_move(rook, Square::new(0, 8), false, false, None),
            Err(Error::OutOfRange(_))
        ));
        assert!(board.apply_move(rook, sq("a1"), false, false, None).is_err());
    }

    #[test]
    fn queen_on_e2_checks_white() {
        let mut board = Board::new();
        assert!(!board.in_check(Color::White));
        assert!(!board.in_check(Color::Black));
        let queen = piece_at(&board, "d8");
        board.apply_move(queen, sq("e2"), false, false, None).unwrap();
        assert!(board.in_check(Color::White));
        assert!(!board.in_check(Color::Black));
    }

    #[test]
    fn compute_score_is_antisymmetric() {
        let mut board = Board::new();
        assert_eq!(board.compute_score(Color::White), 0);
        assert_eq!(board.compute_score(Color::Black), 0);
        board.remove_piece(sq("a2")).unwrap();
        assert_eq!(board.compute_score(Color::White), -1);
        assert_eq!(board.compute_score(Color::Black), 1);
    }

    #[test]
    fn copy_is_independent() {
        let board = Board::new();
        let mut copy = board.copy();
        let pawn = piece_at(&copy, "e2");
        copy.apply_move(pawn, sq("e4"), false, false, None).unwrap();
        let king = piece_at(&copy, "e1");
        copy.apply_move(king, sq("e2"), false, false, None).unwrap();

        assert!(board.get_piece(sq("e4")).unwrap().is_none());
        assert!(board.get_piece(sq("e2")).unwrap().is_some());
        assert!(board.king_side_castle(Color::White));
        assert!(!copy.king_side_castle(Color::White));
        assert_eq!(board.king(Color::White).unwrap().square(), sq("e1"));
        assert_eq!(copy.king(Color::White).unwrap().square(), sq("e2"));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = Board::empty();
        let pawn = lookup(PieceKind::Pawn, Color::White, sq("b7"));
        board.add_piece(pawn);
        let promoted = board.apply_move(pawn, sq("b8"), false, false, None).unwrap();
        assert_eq!(promoted.kind(), PieceKind::Queen);

        let mut board = Board::empty();
        let pawn = lookup(PieceKind::Pawn, Color::Black, sq("h2"));
        board.add_piece(pawn);
        let promoted = board
            .apply_move(pawn, sq("h1"), false, false, Some(PieceKind::Knight))
            .unwrap();
        assert_eq!(promoted.kind(), PieceKind::Knight);
        assert_eq!(promoted.color(), Color::Black);
    }

    #[test]
    fn bad_promotions_are_rejected() {
        let mut board = Board::empty();
        let pawn = lookup(PieceKind::Pawn, Color::White, sq("b7"));
        board.add_piece(pawn);
        assert!(board.apply_move(pawn, sq("b8"), false, false, Some(PieceKind::King)).is_err());
        assert!(board.apply_move(pawn, sq("b8"), false, false, Some(PieceKind::Pawn)).is_err());

        let mut board = Board::new();
        let pawn = piece_at(&board, "e2");
        assert!(board.apply_move(pawn, sq("e4"), false, false, Some(PieceKind::Queen)).is_err());
        assert!(std::ptr::eq(piece_at(&board, "e2"), pawn));
    }

    #[test]
    fn display_renders_a_bordered_grid() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines[0], "    a   b   c   d   e   f   g   h");
        assert_eq!(lines[1], "   --- --- --- --- --- --- --- ---");
        assert_eq!(lines[2], "8 | r | n | b | q | k | b | n | r |");
        assert_eq!(lines[8], "5 |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[16], "1 | R | N | B | Q | K | B | N | R |");

        let config = BoardConfig {
            unicode_glyphs: true,
            ..BoardConfig::default()
        };
        let text = Board::new().with_config(config).to_string();
        assert!(text.contains("1 | \u{2656} | \u{2658} |"));
    }

    #[test]
    fn enumeration_orders_by_heuristic_then_generation() {
        let board = Board::new();
        let moves: Vec<_> = board.enumerate_moves(Color::White, evaluation::constant).collect();
        assert_eq!(moves.len(), 20);
        assert_eq!(moves[0].0.to_string(), "wNb1 to c3");
        assert_eq!(moves[1].0.to_string(), "wNb1 to a3");
        assert_eq!(moves[2].0.to_string(), "wNg1 to h3");
        assert_eq!(moves[3].0.to_string(), "wNg1 to f3");
        assert_eq!(moves[4].0.to_string(), "wPa2 to a3");
        assert_eq!(moves[5].0.to_string(), "wPa2 to a4");

        let e4 = sq("e4");
        let king_pawn = move |b: &Board| i32::from(b.occupant(e4).is_some());
        let moves: Vec<_> = board.enumerate_moves(Color::White, king_pawn).collect();
        assert_eq!(moves[0].0.to_string(), "wPe2 to e4");
        assert_eq!(moves[1].0.to_string(), "wNb1 to c3");
        assert_eq!(moves[19].0.to_string(), "wPh2 to h4");
    }
}
