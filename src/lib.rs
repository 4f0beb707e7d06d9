//! CatalogChess - Chess position and move-legality engine
//!
//! A library for:
//! - A process-wide catalog of immutable piece records
//! - Pseudo-legal move generation per piece kind
//! - Check detection
//! - Move application with en passant, castling and promotion
//! - Heuristic-ordered move enumeration for an external search
//! - JSON persistence of boards and moves
//!
//! The engine never filters moves that leave the mover in check; callers
//! test `Board::in_check` on the resulting board, or use
//! `Board::legal_moves`.

pub mod types;
pub mod error;
pub mod config;
pub mod catalog;
pub mod move_generator;
pub mod board;
pub mod evaluation;
pub mod serialization;

pub use board::{Board, Move, ScoredMoves};
pub use catalog::{catalog, lookup, PieceRecord};
pub use config::BoardConfig;
pub use error::{Error, Result};
pub use types::{Color, PieceKind, Square};
