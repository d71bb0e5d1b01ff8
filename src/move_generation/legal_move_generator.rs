//! Pseudo-legal and legal move generation.
//!
//! Moves are derived on demand from each piece's cached knowledge and the
//! current board, so captures, en passant and castles always reflect the
//! present position. Legality is decided by playing the move and asking
//! whether the opponent could then take the king.

use crate::game_state::chess_rules::{movement, Movement};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::moves::castle_moves::push_castle_moves;
use crate::moves::chess_move::Move;
use crate::moves::pattern_moves::pattern_targets;
use crate::moves::pawn_moves::push_pawn_moves;
use crate::moves::sliding_moves::ordered_ray_targets;

/// Pseudo-legal moves for the side to move, grouped by piece id.
pub fn generate_pseudo_legal_moves(game: &GameState) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    for piece in game.team(game.moving_team()).active_pieces() {
        push_piece_moves(game, piece, &mut moves);
    }
    moves
}

/// Pseudo-legal moves that survive the king-safety check.
pub fn generate_legal_moves(game: &mut GameState) -> Vec<Move> {
    generate_pseudo_legal_moves(game)
        .into_iter()
        .filter(|&mv| is_legal(game, mv))
        .collect()
}

/// Play `mv`, test whether the mover's king is left capturable, take it back.
pub fn is_legal(game: &mut GameState, mv: Move) -> bool {
    if !game.try_apply(mv) {
        return false;
    }
    let legal = !game.king_capturable();
    game.retract();
    legal
}

pub fn push_piece_moves(game: &GameState, piece: &Piece, moves: &mut Vec<Move>) {
    let before = piece.square;
    let attacks = piece.attacks();

    match movement(piece.kind) {
        Movement::Pattern(offsets) => {
            for after in pattern_targets(before, offsets) {
                if attacks.contains(after) && !lands_on_own(game, piece.color, after) {
                    moves.push(Move::Plain { before, after });
                }
            }
            if piece.kind == PieceKind::King {
                push_castle_moves(game, piece, moves);
            }
        }
        Movement::Sliding(directions) => {
            for after in ordered_ray_targets(before, directions, &attacks) {
                if !lands_on_own(game, piece.color, after) {
                    moves.push(Move::Plain { before, after });
                }
            }
        }
        Movement::Pawn => push_pawn_moves(game, piece, moves),
    }
}

#[inline]
fn lands_on_own(game: &GameState, color: Color, square: Square) -> bool {
    game.occupant(square).is_some_and(|other| other.color == color)
}
