//! Core incremental board state.
//!
//! `GameState` owns the square-indexed board, the shared occupancy bitboard,
//! both teams, the side to move, move history, castling rights, en passant file
//! and clocks. `make_move` touches only the pieces a move can affect and
//! records enough in snapshots and an `UndoState` for `undo_move` to restore
//! the exact prior state, cached piece knowledge included.

use std::fmt;

use log::trace;

use crate::chess_errors::{ChessError, ChessResult, FenError};
use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::game_state::piece::Piece;
use crate::game_state::snapshot::Snapshot;
use crate::game_state::square::{file_of, rank_of};
use crate::game_state::team::Team;
use crate::move_generation::legal_move_generator::{generate_legal_moves, generate_pseudo_legal_moves};
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Outcome of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone)]
pub struct GameState {
    // --- Board ---
    pub(crate) board: [Option<PieceRef>; 64],
    pub(crate) occupancy: Bitboard,
    pub(crate) teams: [Team; 2],

    // --- Side and state flags ---
    pub(crate) moving_team: Color,
    pub(crate) castling_rights: Snapshot<CastlingRights>,
    pub(crate) en_passant_file: Snapshot<Option<u8>>,

    // --- Clocks ---
    /// Ply parity, toggles 0/1 every move.
    pub(crate) half_move: u8,
    pub(crate) full_move: u32,

    // --- History ---
    played_moves: Vec<Move>,
    last_moved: Snapshot<Option<PieceRef>>,
    last_captured: Snapshot<Option<PieceRef>>,
    undo_stack: Vec<UndoState>,
}

impl GameState {
    pub(crate) fn new_empty() -> Self {
        Self {
            board: [None; 64],
            occupancy: Bitboard::EMPTY,
            teams: [Team::new(Color::White), Team::new(Color::Black)],
            moving_team: Color::White,
            castling_rights: Snapshot::new(CASTLE_NONE),
            en_passant_file: Snapshot::new(None),
            half_move: 0,
            full_move: 1,
            played_moves: Vec::new(),
            last_moved: Snapshot::new(None),
            last_captured: Snapshot::new(None),
            undo_stack: Vec::new(),
        }
    }

    pub fn new_game() -> Result<Self, FenError> {
        parse_fen(STARTING_POSITION_FEN)
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        parse_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    /// Put a new active piece on an empty square during setup.
    pub(crate) fn place_piece(
        &mut self,
        color: Color,
        kind: PieceKind,
        square: Square,
        moved: bool,
    ) -> usize {
        let id = self.teams[color.index()].add_active_piece(kind, square, moved);
        self.board[square as usize] = Some(PieceRef::new(color, id));
        self.occupancy.set(square);
        id
    }

    /// Compute every piece's knowledge and king-seer flag from scratch.
    pub(crate) fn initialize_knowledge(&mut self) {
        let occupancy = self.occupancy;
        for team in &mut self.teams {
            team.update_all_reachable_squares(&occupancy);
        }
        self.refresh_king_seers();
    }

    // --- Read-only queries ---

    #[inline]
    pub fn moving_team(&self) -> Color {
        self.moving_team
    }

    #[inline]
    pub fn played_moves(&self) -> &[Move] {
        &self.played_moves
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights.value()
    }

    #[inline]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file.value()
    }

    #[inline]
    pub fn half_move_clock(&self) -> u8 {
        self.half_move
    }

    #[inline]
    pub fn full_move_number(&self) -> u32 {
        self.full_move
    }

    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.occupancy
    }

    #[inline]
    pub fn team(&self, color: Color) -> &Team {
        &self.teams[color.index()]
    }

    #[inline]
    pub fn occupant(&self, square: Square) -> Option<PieceRef> {
        self.board[square as usize]
    }

    #[inline]
    pub fn piece(&self, piece_ref: PieceRef) -> Option<&Piece> {
        self.teams[piece_ref.color.index()].piece(piece_ref.id)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupant(square).and_then(|piece_ref| self.piece(piece_ref))
    }

    /// Piece that made the latest move (the pawn, for promotions).
    pub fn last_moved_piece(&self) -> Option<PieceRef> {
        self.last_moved.value()
    }

    pub fn last_captured_piece(&self) -> Option<PieceRef> {
        self.last_captured.value()
    }

    /// White material minus black material.
    pub fn material_score(&self) -> i32 {
        self.team(Color::White).points() - self.team(Color::Black).points()
    }

    /// The side to move could take the opposing king, so the position was
    /// reached by an illegal move.
    #[inline]
    pub fn king_capturable(&self) -> bool {
        self.team(self.moving_team).king_seers() > 0
    }

    /// The side to move is in check.
    #[inline]
    pub fn king_checked(&self) -> bool {
        self.team(self.moving_team.opposite()).king_seers() > 0
    }

    /// Pseudo-legal moves of the side to move, in piece-id order.
    pub fn calculate_moves(&self) -> Vec<Move> {
        generate_pseudo_legal_moves(self)
    }

    /// Moves that do not leave the mover's own king capturable.
    pub fn calculate_legals(&mut self) -> Vec<Move> {
        generate_legal_moves(self)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.king_checked() && self.calculate_legals().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.king_checked() && self.calculate_legals().is_empty()
    }

    pub fn status(&mut self) -> GameStatus {
        if !self.calculate_legals().is_empty() {
            GameStatus::Ongoing
        } else if self.king_checked() {
            GameStatus::Checkmate {
                winner: self.moving_team.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    // --- Make / unmake ---

    /// Apply `mv` for the side to move.
    ///
    /// Rejects moves whose origin is empty or holds an opposing piece, moves
    /// that would land on or capture an own piece, and anything the position
    /// does not generate. King safety is not checked here; use
    /// `calculate_legals` for that.
    pub fn make_move(&mut self, mv: Move) -> ChessResult<()> {
        let before = mv.before();
        let mover = self
            .occupant(before)
            .ok_or(ChessError::NoPieceOnSquare { square: before })?;
        if mover.color != self.moving_team {
            return Err(ChessError::NotMovingTeamsPiece { square: before });
        }

        let landing = [Some(mv.after()), mv.capture_square()];
        if landing
            .into_iter()
            .flatten()
            .any(|square| self.occupant(square).is_some_and(|other| other.color == mover.color))
        {
            return Err(ChessError::SelfCapture {
                before,
                after: mv.after(),
            });
        }
        if !generate_pseudo_legal_moves(self).contains(&mv) {
            return Err(ChessError::IllegalMove {
                notation: mv.to_string(),
            });
        }

        self.apply_move(mover, mv);
        Ok(())
    }

    /// Retract the latest move.
    pub fn undo_move(&mut self) -> ChessResult<Move> {
        self.retract().ok_or(ChessError::NothingToUndo)
    }

    /// Apply a generated move. `false` (and no change) if its origin is empty.
    pub(crate) fn try_apply(&mut self, mv: Move) -> bool {
        match self.occupant(mv.before()) {
            Some(mover) => {
                self.apply_move(mover, mv);
                true
            }
            None => false,
        }
    }

    fn apply_move(&mut self, mover: PieceRef, mv: Move) {
        let color = mover.color;
        let before = mv.before();
        let after = mv.after();
        let mover_kind = self.piece(mover).map(|piece| piece.kind);

        let mut undo = UndoState::new(mv, self.half_move, self.full_move);
        let mut changed = Bitboard::from_square(before);
        changed.set(after);

        // 1. Capture.
        let captured = mv
            .capture_square()
            .and_then(|square| self.occupant(square).map(|victim| (square, victim)));
        if let Some((square, victim)) = captured {
            self.teams[victim.color.index()].deactivate_piece(victim.id);
            self.board[square as usize] = None;
            self.occupancy.clear(square);
            changed.set(square);
        }

        // 2. Relocate the mover (or swap a promoting pawn for its new piece).
        self.board[before as usize] = None;
        self.occupancy.clear(before);
        let team = &mut self.teams[color.index()];
        match mv {
            Move::Promotion { kind, .. } => {
                team.deactivate_piece(mover.id);
                let id = team.add_active_piece(kind, after, true);
                let promoted = PieceRef::new(color, id);
                self.board[after as usize] = Some(promoted);
                undo.promoted = Some(promoted);
            }
            _ => {
                if let Some(piece) = team.piece_mut(mover.id) {
                    piece.square = after;
                    piece.mark_moved();
                }
                self.board[after as usize] = Some(mover);
            }
        }
        self.occupancy.set(after);

        if let Move::Castle {
            rook_before,
            rook_after,
            ..
        } = mv
        {
            if let Some(rook) = self.board[rook_before as usize].take() {
                self.occupancy.clear(rook_before);
                if let Some(piece) = self.teams[color.index()].piece_mut(rook.id) {
                    piece.square = rook_after;
                    piece.mark_moved();
                }
                self.board[rook_after as usize] = Some(rook);
                self.occupancy.set(rook_after);
                changed.set(rook_before);
                changed.set(rook_after);
                undo.rook = Some(rook);
            }
        }

        // 3. Snapshot updates.
        let rights = self.rights_after(mover, mover_kind, captured.map(|(_, victim)| victim));
        self.castling_rights.update(rights);

        let double_step = mover_kind == Some(PieceKind::Pawn)
            && matches!(mv, Move::Plain { .. })
            && rank_of(before).abs_diff(rank_of(after)) == 2;
        self.en_passant_file
            .update(if double_step { Some(file_of(before)) } else { None });
        self.last_moved.update(Some(mover));
        self.last_captured.update(captured.map(|(_, victim)| victim));

        // 4. Selective recomputation.
        self.recompute_affected(mover, &changed, &mut undo);
        if let Some(promoted) = undo.promoted {
            let occupancy = self.occupancy;
            if let Some(piece) = self.teams[color.index()].piece_mut(promoted.id) {
                piece.reset_knowledge(&occupancy);
            }
        }
        undo.seer_flips = self.refresh_king_seers();

        // 5. History, clocks, side to move.
        self.half_move = if undo.prev_half_move == 0 { 1 } else { 0 };
        if undo.prev_half_move == 1 {
            self.full_move += 1;
        }
        self.played_moves.push(mv);
        self.moving_team = color.opposite();

        trace!(
            "make {mv}: recomputed {} piece(s), {} king-seer flip(s)",
            undo.recomputed.len(),
            undo.seer_flips.len()
        );
        self.undo_stack.push(undo);
    }

    pub(crate) fn retract(&mut self) -> Option<Move> {
        let undo = self.undo_stack.pop()?;
        let mv = undo.mv;
        let color = self.moving_team.opposite();

        self.moving_team = color;
        self.half_move = undo.prev_half_move;
        self.full_move = undo.prev_full_move;
        self.played_moves.pop();

        for flipped in undo.seer_flips.iter().rev() {
            self.teams[flipped.color.index()].flip_sees_enemy_king(flipped.id);
        }
        for recomputed in undo.recomputed.iter().rev() {
            if let Some(piece) = self.teams[recomputed.color.index()].piece_mut(recomputed.id) {
                piece.revert_knowledge();
            }
        }

        self.castling_rights.revert();
        self.en_passant_file.revert();
        let mover = self.last_moved.revert().flatten();
        let captured = self.last_captured.revert().flatten();

        let before = mv.before();
        let after = mv.after();
        self.board[after as usize] = None;
        self.occupancy.clear(after);
        if let Some(mover) = mover {
            let team = &mut self.teams[color.index()];
            if undo.promoted.is_some() {
                team.remove_last_piece();
                team.activate_piece(mover.id);
            } else if let Some(piece) = team.piece_mut(mover.id) {
                piece.square = before;
                piece.revert_moved();
            }
            self.board[before as usize] = Some(mover);
            self.occupancy.set(before);
        }

        if let (
            Move::Castle {
                rook_before,
                rook_after,
                ..
            },
            Some(rook),
        ) = (mv, undo.rook)
        {
            self.board[rook_after as usize] = None;
            self.occupancy.clear(rook_after);
            if let Some(piece) = self.teams[color.index()].piece_mut(rook.id) {
                piece.square = rook_before;
                piece.revert_moved();
            }
            self.board[rook_before as usize] = Some(rook);
            self.occupancy.set(rook_before);
        }

        // Captured piece comes back last.
        if let (Some(victim), Some(square)) = (captured, mv.capture_square()) {
            self.teams[victim.color.index()].activate_piece(victim.id);
            self.board[square as usize] = Some(victim);
            self.occupancy.set(square);
        }

        trace!("undo {mv}");
        Some(mv)
    }

    fn rights_after(
        &self,
        mover: PieceRef,
        mover_kind: Option<PieceKind>,
        victim: Option<PieceRef>,
    ) -> CastlingRights {
        let mut rights = self.castling_rights.value();
        if mover_kind == Some(PieceKind::King) {
            rights &= !castling_flags_for(mover.color);
        }
        for wing in Wing::ALL {
            if self.team(mover.color).home_rook(wing) == Some(mover.id) {
                rights &= !castling_flag(mover.color, wing);
            }
            if let Some(victim) = victim {
                if self.team(victim.color).home_rook(wing) == Some(victim.id) {
                    rights &= !castling_flag(victim.color, wing);
                }
            }
        }
        rights
    }

    /// Recompute pieces that moved or that watch a changed square.
    fn recompute_affected(&mut self, mover: PieceRef, changed: &Bitboard, undo: &mut UndoState) {
        let occupancy = self.occupancy;
        for color in Color::ALL {
            for piece in self.teams[color.index()].pieces_mut() {
                if !piece.active {
                    continue;
                }
                let piece_ref = PieceRef::new(color, piece.id);
                if Some(piece_ref) == undo.promoted {
                    continue;
                }
                let moved = piece_ref == mover || Some(piece_ref) == undo.rook;
                if moved || piece.watched().intersects(changed) {
                    piece.recompute(&occupancy);
                    undo.recomputed.push(piece_ref);
                }
            }
        }
    }

    /// Bring every king-seer flag in line with current knowledge, returning
    /// the pieces whose flag changed.
    fn refresh_king_seers(&mut self) -> Vec<PieceRef> {
        let mut flips = Vec::new();
        for color in Color::ALL {
            let enemy_king = self.team(color.opposite()).king_square();
            let team = &mut self.teams[color.index()];
            for id in 0..team.pieces().len() {
                let sees = match (team.piece(id), enemy_king) {
                    (Some(piece), Some(king)) => piece.active && piece.attacks().contains(king),
                    _ => false,
                };
                if team.set_sees_enemy_king(id, sees) {
                    flips.push(PieceRef::new(color, id));
                }
            }
        }
        flips
    }
}

/// Board diagram, rank 8 first, `.` for empty squares.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = self
                    .piece_at(rank * 8 + file)
                    .map(|piece| piece.kind.fen_char(piece.color))
                    .unwrap_or('.');
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  abcdefgh")
    }
}
