//! Error types for CatalogChess

use thiserror::Error;

use crate::types::Square;

#[derive(Error, Debug)]
pub enum Error {
    #[error("square {0} is outside the board")]
    OutOfRange(Square),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("invalid square notation: {0:?}")]
    InvalidSquare(String),

    #[error("invalid piece record: {0}")]
    InvalidRecord(String),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board is inconsistent: {0}")]
    Inconsistent(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidOperation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
