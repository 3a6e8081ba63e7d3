//! Error types for the rules engine.
//!
//! Illegal move submissions are deliberately absent: they are rejected as
//! "no move" by `GameState::submit_move` rather than surfaced as errors.

use thiserror::Error;

use crate::piece::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid FEN: {reason}")]
    InvalidFen { reason: String },

    #[error("position has {count} {color} kings, expected exactly one")]
    KingCount { color: Color, count: usize },
}

pub type ChessResult<T> = Result<T, ChessError>;
