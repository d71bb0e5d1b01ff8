//! A single piece and its cached knowledge of the board.
//!
//! Each piece keeps three bitboards, refreshed only when something it depends
//! on changes:
//! - `attacks`: squares it could capture on (pawn diagonals, pattern offsets,
//!   or rays up to and including the first blocker);
//! - `advances`: pawn-only forward squares that are currently empty;
//! - `watched`: squares whose occupancy change invalidates the two above.
//!
//! Knowledge and the moved flag sit in snapshots so unmake can pop them back.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_rules::{movement, Movement};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::snapshot::Snapshot;
use crate::moves::pattern_moves::{KING_DOMAINS, KNIGHT_DOMAINS};
use crate::moves::pawn_moves::{advance_domain, pawn_attacks, watched_squares};
use crate::moves::sliding_moves::ray_domain;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceKnowledge {
    pub attacks: Bitboard,
    pub advances: Bitboard,
    pub watched: Bitboard,
}

impl PieceKnowledge {
    pub fn compute(kind: PieceKind, color: Color, square: Square, occupancy: &Bitboard) -> Self {
        match movement(kind) {
            Movement::Pattern(_) => {
                let attacks = match kind {
                    PieceKind::Knight => KNIGHT_DOMAINS[square as usize],
                    _ => KING_DOMAINS[square as usize],
                };
                Self {
                    attacks,
                    ..Self::default()
                }
            }
            Movement::Sliding(directions) => {
                let attacks = ray_domain(square, directions, occupancy);
                Self {
                    attacks,
                    advances: Bitboard::EMPTY,
                    watched: attacks,
                }
            }
            Movement::Pawn => Self {
                attacks: pawn_attacks(color, square),
                advances: advance_domain(color, square, occupancy),
                watched: watched_squares(color, square),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct Piece {
    /// Stable index in the owning team's arena.
    pub id: usize,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub active: bool,
    moved: Snapshot<bool>,
    knowledge: Snapshot<PieceKnowledge>,
    sees_enemy_king: bool,
}

impl Piece {
    pub fn new(id: usize, kind: PieceKind, color: Color, square: Square, moved: bool) -> Self {
        Self {
            id,
            kind,
            color,
            square,
            active: true,
            moved: Snapshot::new(moved),
            knowledge: Snapshot::new(PieceKnowledge::default()),
            sees_enemy_king: false,
        }
    }

    #[inline]
    pub fn knowledge(&self) -> &PieceKnowledge {
        self.knowledge.get()
    }

    #[inline]
    pub fn attacks(&self) -> Bitboard {
        self.knowledge.get().attacks
    }

    #[inline]
    pub fn advances(&self) -> Bitboard {
        self.knowledge.get().advances
    }

    #[inline]
    pub fn watched(&self) -> Bitboard {
        self.knowledge.get().watched
    }

    /// Recompute against `occupancy`, keeping the old knowledge for unmake.
    pub fn recompute(&mut self, occupancy: &Bitboard) {
        let fresh = PieceKnowledge::compute(self.kind, self.color, self.square, occupancy);
        self.knowledge.update(fresh);
    }

    /// Recompute without history, for setup and freshly promoted pieces.
    pub fn reset_knowledge(&mut self, occupancy: &Bitboard) {
        let fresh = PieceKnowledge::compute(self.kind, self.color, self.square, occupancy);
        self.knowledge.reset(fresh);
    }

    pub fn revert_knowledge(&mut self) {
        self.knowledge.revert();
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.moved.value()
    }

    pub fn mark_moved(&mut self) {
        self.moved.update(true);
    }

    pub fn revert_moved(&mut self) {
        self.moved.revert();
    }

    #[inline]
    pub fn sees_enemy_king(&self) -> bool {
        self.sees_enemy_king
    }

    pub(crate) fn set_sees_enemy_king(&mut self, sees: bool) {
        self.sees_enemy_king = sees;
    }
}
