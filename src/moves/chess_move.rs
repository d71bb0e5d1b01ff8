//! Immutable move descriptions.
//!
//! A `Move` carries every square needed to apply and retract it, so undo never
//! has to re-derive context from the board.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Quiet move or ordinary capture.
    Plain { before: Square, after: Square },
    Castle {
        king_before: Square,
        king_after: Square,
        rook_before: Square,
        rook_after: Square,
    },
    /// `captured` is the square of the pawn taken in passing.
    EnPassant {
        before: Square,
        after: Square,
        captured: Square,
    },
    Promotion {
        before: Square,
        after: Square,
        kind: PieceKind,
    },
}

impl Move {
    /// Origin of the moving piece (the king for castles).
    #[inline]
    pub const fn before(&self) -> Square {
        match *self {
            Move::Plain { before, .. }
            | Move::EnPassant { before, .. }
            | Move::Promotion { before, .. } => before,
            Move::Castle { king_before, .. } => king_before,
        }
    }

    /// Destination of the moving piece (the king for castles).
    #[inline]
    pub const fn after(&self) -> Square {
        match *self {
            Move::Plain { after, .. }
            | Move::EnPassant { after, .. }
            | Move::Promotion { after, .. } => after,
            Move::Castle { king_after, .. } => king_after,
        }
    }

    /// Square a captured piece would be removed from, if this move can
    /// capture at all.
    #[inline]
    pub const fn capture_square(&self) -> Option<Square> {
        match *self {
            Move::Plain { after, .. } | Move::Promotion { after, .. } => Some(after),
            Move::EnPassant { captured, .. } => Some(captured),
            Move::Castle { .. } => None,
        }
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        match *self {
            Move::Promotion { kind, .. } => Some(kind),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castle(&self) -> bool {
        matches!(self, Move::Castle { .. })
    }

    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self, Move::EnPassant { .. })
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`, castles as the king's move.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            square_to_algebraic(self.before()),
            square_to_algebraic(self.after())
        )?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.symbol().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
