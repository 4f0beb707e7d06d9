//! CatalogChess - Piece Behavior Module
//!
//! Per-kind movement rules. Each kind answers two questions against a
//! board: may this piece move to a given square, and which squares can it
//! move to. Both are pseudo-legal: neither looks at whether the mover's
//! own king is left in check. Castling is not a king move here; the board
//! handles it.

use crate::board::Board;
use crate::catalog::PieceRecord;
use crate::types::{PieceKind, Square};

/// Direction offsets (row, col) for sliding pieces
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0), (0, 1), (-1, 0), (0, -1),
    (1, 1), (1, -1), (-1, 1), (-1, -1),
];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (-1, 2), (2, -1),
    (1, -2), (-2, 1), (-1, -2), (-2, -1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0), (1, 1), (0, 1), (-1, 1),
    (-1, 0), (-1, -1), (0, -1), (1, -1),
];

/// True if `piece` may move to `destination` given the current occupancy.
pub fn is_legal(piece: &PieceRecord, destination: Square, board: &Board) -> bool {
    if !destination.in_range() {
        return false;
    }
    match piece.kind() {
        PieceKind::King => king_is_legal(piece, destination, board),
        PieceKind::Queen => {
            !(blocked_straight(piece, destination, board)
                && blocked_diagonal(piece, destination, board))
                && !own_piece_at(piece, destination, board)
        }
        PieceKind::Rook => {
            !blocked_straight(piece, destination, board) && !own_piece_at(piece, destination, board)
        }
        PieceKind::Bishop => {
            !blocked_diagonal(piece, destination, board) && !own_piece_at(piece, destination, board)
        }
        PieceKind::Knight => knight_is_legal(piece, destination, board),
        PieceKind::Pawn => pawn_is_legal(piece, destination, board),
    }
}

/// All pseudo-legal destinations for `piece`, in generation order.
pub fn destinations(piece: &PieceRecord, board: &Board) -> Vec<Square> {
    let mut targets = Vec::with_capacity(28);
    match piece.kind() {
        PieceKind::King => generate_step_moves(piece, board, &KING_OFFSETS, &mut targets),
        PieceKind::Queen => generate_sliding_moves(piece, board, &QUEEN_DIRECTIONS, &mut targets),
        PieceKind::Rook => generate_sliding_moves(piece, board, &ROOK_DIRECTIONS, &mut targets),
        PieceKind::Bishop => generate_sliding_moves(piece, board, &BISHOP_DIRECTIONS, &mut targets),
        PieceKind::Knight => generate_step_moves(piece, board, &KNIGHT_OFFSETS, &mut targets),
        PieceKind::Pawn => generate_pawn_moves(piece, board, &mut targets),
    }
    targets
}

/// True if the rank/file path from `piece` to `target` is obstructed.
///
/// The target square itself is not inspected, since it may be a capture.
/// A target that is not on the same rank or file (or is the origin) counts
/// as blocked.
pub fn blocked_straight(piece: &PieceRecord, target: Square, board: &Board) -> bool {
    let from = piece.square();
    let d_row = target.row - from.row;
    let d_col = target.col - from.col;

    if (d_row == 0) == (d_col == 0) {
        return true;
    }
    path_is_blocked(from, d_row.signum(), d_col.signum(), d_row.abs().max(d_col.abs()), board)
}

/// Diagonal counterpart of [`blocked_straight`].
pub fn blocked_diagonal(piece: &PieceRecord, target: Square, board: &Board) -> bool {
    let from = piece.square();
    let d_row = target.row - from.row;
    let d_col = target.col - from.col;

    if d_row.abs() != d_col.abs() || d_row == 0 {
        return true;
    }
    path_is_blocked(from, d_row.signum(), d_col.signum(), d_row.abs(), board)
}

fn path_is_blocked(from: Square, row_unit: i8, col_unit: i8, length: i8, board: &Board) -> bool {
    (1..length).any(|i| board.occupant(from + (row_unit * i, col_unit * i)).is_some())
}

fn own_piece_at(piece: &PieceRecord, square: Square, board: &Board) -> bool {
    board
        .occupant(square)
        .is_some_and(|target| target.color() == piece.color())
}

fn king_is_legal(piece: &PieceRecord, destination: Square, board: &Board) -> bool {
    let from = piece.square();
    let d_row = (destination.row - from.row).abs();
    let d_col = (destination.col - from.col).abs();

    if d_row == 0 && d_col == 0 {
        return false;
    }
    if d_row > 1 || d_col > 1 {
        return false;
    }
    !own_piece_at(piece, destination, board)
}

fn knight_is_legal(piece: &PieceRecord, destination: Square, board: &Board) -> bool {
    let from = piece.square();
    let d_row = (destination.row - from.row).abs();
    let d_col = (destination.col - from.col).abs();

    if !((d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)) {
        return false;
    }
    !own_piece_at(piece, destination, board)
}

fn pawn_is_legal(piece: &PieceRecord, destination: Square, board: &Board) -> bool {
    let from = piece.square();
    let unit = piece.color().forward();
    let target = board.occupant(destination);

    // Single push
    if destination == from + (unit, 0) && target.is_none() {
        return true;
    }

    // Double push from starting rank
    if destination == from + (2 * unit, 0)
        && from.row == piece.color().pawn_rank()
        && board.occupant(from + (unit, 0)).is_none()
        && target.is_none()
    {
        return true;
    }

    // Captures
    if destination == from + (unit, 1) || destination == from + (unit, -1) {
        match target {
            Some(occupant) => return occupant.color() != piece.color(),
            None => return is_en_passant_square(piece, destination, board),
        }
    }

    false
}

/// True if a pawn moving diagonally to `destination` would capture the
/// board's current en-passant target.
pub fn is_en_passant_square(piece: &PieceRecord, destination: Square, board: &Board) -> bool {
    let behind = destination + (-piece.color().forward(), 0);
    match (board.occupant(behind), board.en_passant()) {
        (Some(captured), Some(target)) => {
            std::ptr::eq(captured, target) && captured.color() != piece.color()
        }
        _ => false,
    }
}

fn generate_pawn_moves(piece: &PieceRecord, board: &Board, targets: &mut Vec<Square>) {
    let from = piece.square();
    let unit = piece.color().forward();
    let forward_one = from + (unit, 0);
    let forward_two = from + (2 * unit, 0);

    if forward_one.in_range() && board.occupant(forward_one).is_none() {
        targets.push(forward_one);
        if from.row == piece.color().pawn_rank() && board.occupant(forward_two).is_none() {
            targets.push(forward_two);
        }
    }

    for side in [-1, 1] {
        let to = from + (unit, side);
        if !to.in_range() {
            continue;
        }
        match board.occupant(to) {
            Some(occupant) if occupant.color() != piece.color() => targets.push(to),
            Some(_) => {}
            None => {
                if is_en_passant_square(piece, to, board) {
                    targets.push(to);
                }
            }
        }
    }
}

fn generate_step_moves(
    piece: &PieceRecord,
    board: &Board,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &offset in offsets {
        let to = piece.square() + offset;
        if !to.in_range() {
            continue;
        }
        match board.occupant(to) {
            Some(occupant) if occupant.color() == piece.color() => {}
            _ => targets.push(to),
        }
    }
}

fn generate_sliding_moves(
    piece: &PieceRecord,
    board: &Board,
    directions: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &direction in directions {
        let mut current = piece.square();
        loop {
            current = current + direction;
            if !current.in_range() {
                break;
            }
            match board.occupant(current) {
                None => targets.push(current),
                Some(occupant) => {
                    if occupant.color() != piece.color() {
                        targets.push(current);
                    }
                    break;
                }
            }
        }
    }
}
