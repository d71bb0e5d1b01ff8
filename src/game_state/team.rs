//! One side's pieces.
//!
//! Pieces live in an arena indexed by a stable id; captures only clear the
//! active flag so unmake can bring the same piece back. The team also keeps
//! its running material total and how many of its pieces currently attack the
//! enemy king.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{Color, PieceKind, Square, Wing};
use crate::game_state::piece::Piece;

#[derive(Debug, Clone)]
pub struct Team {
    pub color: Color,
    pieces: Vec<Piece>,
    king: Option<usize>,
    home_rooks: [Option<usize>; 2],
    points: i32,
    king_seers: u32,
}

impl Team {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            pieces: Vec::with_capacity(16),
            king: None,
            home_rooks: [None; 2],
            points: 0,
            king_seers: 0,
        }
    }

    /// Append an active piece and return its id.
    pub fn add_active_piece(&mut self, kind: PieceKind, square: Square, moved: bool) -> usize {
        let id = self.pieces.len();
        self.pieces.push(Piece::new(id, kind, self.color, square, moved));
        self.points += kind.points();
        if kind == PieceKind::King {
            self.king = Some(id);
        }
        id
    }

    /// Drop the newest piece, used to retract a promotion.
    pub fn remove_last_piece(&mut self) -> Option<Piece> {
        let piece = self.pieces.pop()?;
        if piece.active {
            self.points -= piece.kind.points();
        }
        if piece.sees_enemy_king() {
            self.king_seers -= 1;
        }
        Some(piece)
    }

    pub fn activate_piece(&mut self, id: usize) {
        if let Some(piece) = self.pieces.get_mut(id) {
            if !piece.active {
                piece.active = true;
                self.points += piece.kind.points();
            }
        }
    }

    pub fn deactivate_piece(&mut self, id: usize) {
        if let Some(piece) = self.pieces.get_mut(id) {
            if piece.active {
                piece.active = false;
                self.points -= piece.kind.points();
            }
        }
    }

    #[inline]
    pub fn piece(&self, id: usize) -> Option<&Piece> {
        self.pieces.get(id)
    }

    #[inline]
    pub fn piece_mut(&mut self, id: usize) -> Option<&mut Piece> {
        self.pieces.get_mut(id)
    }

    /// All arena slots, captured pieces included, in id order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub(crate) fn pieces_mut(&mut self) -> &mut [Piece] {
        &mut self.pieces
    }

    pub fn active_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|piece| piece.active)
    }

    pub fn king_square(&self) -> Option<Square> {
        self.king.and_then(|id| self.pieces.get(id)).map(|king| king.square)
    }

    #[inline]
    pub fn home_rook(&self, wing: Wing) -> Option<usize> {
        self.home_rooks[wing.index()]
    }

    pub(crate) fn set_home_rook(&mut self, wing: Wing, id: usize) {
        self.home_rooks[wing.index()] = Some(id);
    }

    /// Material of active pieces (king counts 0).
    #[inline]
    pub fn points(&self) -> i32 {
        self.points
    }

    #[inline]
    pub fn king_seers(&self) -> u32 {
        self.king_seers
    }

    /// Full recompute of every active piece, without history.
    pub fn update_all_reachable_squares(&mut self, occupancy: &Bitboard) {
        for piece in self.pieces.iter_mut().filter(|piece| piece.active) {
            piece.reset_knowledge(occupancy);
        }
    }

    pub fn attacks_square(&self, square: Square) -> bool {
        self.active_pieces().any(|piece| piece.attacks().contains(square))
    }

    /// Set a piece's king-seer flag, keeping the counter in step. Returns
    /// whether the flag changed.
    pub(crate) fn set_sees_enemy_king(&mut self, id: usize, sees: bool) -> bool {
        let Some(piece) = self.pieces.get_mut(id) else {
            return false;
        };
        if piece.sees_enemy_king() == sees {
            return false;
        }
        piece.set_sees_enemy_king(sees);
        if sees {
            self.king_seers += 1;
        } else {
            self.king_seers -= 1;
        }
        true
    }

    /// Invert a previously changed king-seer flag.
    pub(crate) fn flip_sees_enemy_king(&mut self, id: usize) {
        if let Some(piece) = self.pieces.get(id) {
            let sees = !piece.sees_enemy_king();
            self.set_sees_enemy_king(id, sees);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Team;
    use crate::game_state::bitboard::Bitboard;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn points_follow_activation() {
        let mut team = Team::new(Color::White);
        team.add_active_piece(PieceKind::King, 4, false);
        let queen = team.add_active_piece(PieceKind::Queen, 3, false);
        team.add_active_piece(PieceKind::Pawn, 12, false);
        assert_eq!(team.points(), 10);

        team.deactivate_piece(queen);
        team.deactivate_piece(queen);
        assert_eq!(team.points(), 1);
        team.activate_piece(queen);
        assert_eq!(team.points(), 10);
        assert_eq!(team.king_square(), Some(4));
    }

    #[test]
    fn removing_a_promoted_piece_restores_points() {
        let mut team = Team::new(Color::Black);
        team.add_active_piece(PieceKind::King, 60, false);
        let pawn = team.add_active_piece(PieceKind::Pawn, 9, true);
        team.deactivate_piece(pawn);
        team.add_active_piece(PieceKind::Knight, 1, true);
        assert_eq!(team.points(), 3);

        let removed = team.remove_last_piece().expect("a piece should be removed");
        assert_eq!(removed.kind, PieceKind::Knight);
        team.activate_piece(pawn);
        assert_eq!(team.points(), 1);
    }

    #[test]
    fn attacks_square_ignores_inactive_pieces() {
        let mut team = Team::new(Color::White);
        let rook = team.add_active_piece(PieceKind::Rook, 0, false);
        team.update_all_reachable_squares(&Bitboard::EMPTY);
        assert!(team.attacks_square(56));

        team.deactivate_piece(rook);
        assert!(!team.attacks_square(56));
    }

    #[test]
    fn king_seer_counter_tracks_flag_changes() {
        let mut team = Team::new(Color::White);
        let rook = team.add_active_piece(PieceKind::Rook, 0, false);
        assert!(team.set_sees_enemy_king(rook, true));
        assert!(!team.set_sees_enemy_king(rook, true));
        assert_eq!(team.king_seers(), 1);

        team.flip_sees_enemy_king(rook);
        assert_eq!(team.king_seers(), 0);
    }
}
