//! Errors used throughout the rules engine.
//!
//! `FenError` covers every way a position string can be rejected during
//! construction; `ChessError` covers misuse of the make/unmake API and the
//! notation helpers that resolve text into moves. Both carry enough context to
//! print a precise diagnostic.

use thiserror::Error;

use crate::game_state::chess_types::Square;

/// Rejection reasons for a Forsyth-Edwards Notation string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must contain 6 space-separated fields, found {found}")]
    FieldCount { found: usize },

    #[error("board layout must contain 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("rank {rank} does not describe exactly 8 files")]
    FileCount { rank: usize },

    #[error("invalid piece character '{character}' in board layout")]
    InvalidPieceChar { character: char },

    #[error("invalid side to move '{field}'")]
    InvalidSideToMove { field: String },

    #[error("invalid castling character '{character}'")]
    InvalidCastlingChar { character: char },

    #[error("castling character '{character}' appears more than once")]
    DuplicateCastlingRight { character: char },

    #[error("invalid en passant field '{field}'")]
    InvalidEnPassant { field: String },

    /// This engine keeps the half-move clock as a 0/1 ply parity.
    #[error("half-move clock must be 0 or 1, found '{field}'")]
    InvalidHalfMoveClock { field: String },

    #[error("full-move number must be a positive integer, found '{field}'")]
    InvalidFullMoveNumber { field: String },

    #[error("{team} must have exactly one king, found {found}")]
    KingCount { team: &'static str, found: usize },
}

/// Errors raised by game manipulation and move resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("no piece stands on square {square}")]
    NoPieceOnSquare { square: Square },

    #[error("the piece on square {square} does not belong to the side to move")]
    NotMovingTeamsPiece { square: Square },

    #[error("move from {before} to {after} would capture a piece of the same team")]
    SelfCapture { before: Square, after: Square },

    #[error("there is no move to undo")]
    NothingToUndo,

    #[error("illegal move '{notation}'")]
    IllegalMove { notation: String },

    #[error("invalid algebraic square '{text}'")]
    InvalidAlgebraic { text: String },

    #[error("a search worker thread panicked")]
    WorkerPanicked,
}

/// Result alias for game operations.
pub type ChessResult<T> = Result<T, ChessError>;
