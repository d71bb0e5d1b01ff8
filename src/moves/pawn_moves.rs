//! Pawn domains and move generation.
//!
//! A pawn's attack domain is its two forward diagonals whatever stands there;
//! its advance domain depends on the one or two squares straight ahead, which
//! are therefore the only squares it watches.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::{Color, PieceKind, Square, PROMOTION_KINDS};
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::game_state::square::{file_of, offset_square, rank_of};
use crate::moves::chess_move::Move;

pub const PAWN_ATTACK_DOMAINS: [[Bitboard; 64]; 2] = [
    generate_pawn_attacks(Color::White),
    generate_pawn_attacks(Color::Black),
];

const fn generate_pawn_attacks(color: Color) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut domain = Bitboard::EMPTY;
        if let Some(target) = offset_square(sq as Square, color.pawn_direction(), -1) {
            domain = domain.with(target);
        }
        if let Some(target) = offset_square(sq as Square, color.pawn_direction(), 1) {
            domain = domain.with(target);
        }
        table[sq] = domain;
        sq += 1;
    }

    table
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    PAWN_ATTACK_DOMAINS[color.index()][square as usize]
}

/// Empty squares straight ahead the pawn may advance to.
pub fn advance_domain(color: Color, square: Square, occupancy: &Bitboard) -> Bitboard {
    let mut domain = Bitboard::EMPTY;
    let Some(one_step) = offset_square(square, color.pawn_direction(), 0) else {
        return domain;
    };
    if occupancy.contains(one_step) {
        return domain;
    }
    domain.set(one_step);

    if rank_of(square) == color.pawn_start_rank() {
        if let Some(two_step) = offset_square(one_step, color.pawn_direction(), 0) {
            if !occupancy.contains(two_step) {
                domain.set(two_step);
            }
        }
    }
    domain
}

/// Squares whose occupancy changes the advance domain.
pub fn watched_squares(color: Color, square: Square) -> Bitboard {
    let mut watched = Bitboard::EMPTY;
    if let Some(one_step) = offset_square(square, color.pawn_direction(), 0) {
        watched.set(one_step);
        if rank_of(square) == color.pawn_start_rank() {
            if let Some(two_step) = offset_square(one_step, color.pawn_direction(), 0) {
                watched.set(two_step);
            }
        }
    }
    watched
}

/// Pseudo-legal pawn moves: diagonals (lower file first), then the single and
/// double advance. Moves landing on the last rank expand into four promotions.
pub fn push_pawn_moves(game: &GameState, pawn: &Piece, moves: &mut Vec<Move>) {
    let color = pawn.color;
    let before = pawn.square;
    let attacks = pawn.attacks();

    for file_delta in [-1i8, 1] {
        let Some(target) = offset_square(before, color.pawn_direction(), file_delta) else {
            continue;
        };
        if !attacks.contains(target) {
            continue;
        }

        match game.occupant(target) {
            Some(victim) if victim.color != color => push_advance(color, before, target, moves),
            Some(_) => {}
            None => {
                if let Some(mv) = en_passant_move(game, color, before, target) {
                    moves.push(mv);
                }
            }
        }
    }

    let advances = pawn.advances();
    let mut cursor = before;
    while let Some(target) = offset_square(cursor, color.pawn_direction(), 0) {
        if !advances.contains(target) {
            break;
        }
        push_advance(color, before, target, moves);
        cursor = target;
    }
}

fn push_advance(color: Color, before: Square, after: Square, moves: &mut Vec<Move>) {
    if rank_of(after) == color.promotion_rank() {
        for kind in PROMOTION_KINDS {
            moves.push(Move::Promotion { before, after, kind });
        }
    } else {
        moves.push(Move::Plain { before, after });
    }
}

fn en_passant_move(game: &GameState, color: Color, before: Square, target: Square) -> Option<Move> {
    let file = game.en_passant_file()?;
    if file_of(target) != file || rank_of(before) != color.en_passant_rank() {
        return None;
    }

    let captured = offset_square(target, -color.pawn_direction(), 0)?;
    let victim = game.piece_at(captured)?;
    if victim.color == color || victim.kind != PieceKind::Pawn {
        return None;
    }

    Some(Move::EnPassant {
        before,
        after: target,
        captured,
    })
}
