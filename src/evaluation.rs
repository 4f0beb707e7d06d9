//! CatalogChess - Position Evaluation Module
//!
//! Heuristics an external search plugs into `Board::enumerate_moves`.
//! Each is a plain `Fn(&Board) -> i32`; larger is better for the color the
//! heuristic was built for.

use crate::board::Board;
use crate::move_generator;
use crate::types::Color;

/// Weight of one material point relative to one unit of mobility.
pub const MATERIAL_WEIGHT: i32 = 10;

/// Scores every board the same, leaving moves in generation order.
pub fn constant(_board: &Board) -> i32 {
    0
}

/// Material balance from `color`'s point of view.
pub fn material(color: Color) -> impl Fn(&Board) -> i32 {
    move |board| board.compute_score(color)
}

/// Pseudo-legal destination count of `color` minus that of its opponent.
pub fn mobility(color: Color) -> impl Fn(&Board) -> i32 {
    move |board| mobility_of(board, color) - mobility_of(board, color.opponent())
}

/// Material first, mobility as a tie-breaker.
pub fn material_and_mobility(color: Color) -> impl Fn(&Board) -> i32 {
    let material = material(color);
    let mobility = mobility(color);
    move |board| MATERIAL_WEIGHT * material(board) + mobility(board)
}

fn mobility_of(board: &Board, color: Color) -> i32 {
    board
        .pieces()
        .filter(|piece| piece.color() == color)
        .map(|piece| move_generator::destinations(piece, board).len() as i32)
        .sum()
}
