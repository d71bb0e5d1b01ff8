//! Canonical chess-rule constants.
//!
//! Starting position plus the movement tables every piece kind is built from.
//! Offsets are `(rank delta, file delta)` pairs; their order is the order in
//! which moves are generated.

use crate::game_state::chess_types::PieceKind;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// How a piece kind reaches squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// Fixed offsets, independent of occupancy.
    Pattern(&'static [(i8, i8)]),
    /// Rays that stop at (and include) the first occupied square.
    Sliding(&'static [(i8, i8)]),
    Pawn,
}

#[inline]
pub fn movement(kind: PieceKind) -> Movement {
    match kind {
        PieceKind::King => Movement::Pattern(&KING_OFFSETS),
        PieceKind::Knight => Movement::Pattern(&KNIGHT_OFFSETS),
        PieceKind::Queen => Movement::Sliding(&QUEEN_DIRECTIONS),
        PieceKind::Rook => Movement::Sliding(&ROOK_DIRECTIONS),
        PieceKind::Bishop => Movement::Sliding(&BISHOP_DIRECTIONS),
        PieceKind::Pawn => Movement::Pawn,
    }
}
