//! Castle generation for an unmoved king on its home square.
//!
//! Landing on an attacked square is left to the legality filter; here only the
//! king's current square and the square it passes through are checked.

use crate::game_state::chess_types::{castling_flag, Color, Wing, KING_HOME_FILE};
use crate::game_state::game_state::GameState;
use crate::game_state::piece::Piece;
use crate::game_state::square::make_square;
use crate::moves::chess_move::Move;

pub fn push_castle_moves(game: &GameState, king: &Piece, moves: &mut Vec<Move>) {
    let color = king.color;
    let home = make_square(color.home_rank(), KING_HOME_FILE);
    if king.square != home || king.has_moved() {
        return;
    }
    if game.team(color.opposite()).attacks_square(home) {
        return;
    }

    for wing in Wing::ALL {
        if let Some(mv) = castle_move(game, color, wing) {
            moves.push(mv);
        }
    }
}

fn castle_move(game: &GameState, color: Color, wing: Wing) -> Option<Move> {
    if game.castling_rights() & castling_flag(color, wing) == 0 {
        return None;
    }

    let rank = color.home_rank();
    let team = game.team(color);
    let rook = team.piece(team.home_rook(wing)?)?;
    let rook_home = make_square(rank, wing.rook_home_file());
    if !rook.active || rook.has_moved() || rook.square != rook_home {
        return None;
    }

    let low = KING_HOME_FILE.min(wing.rook_home_file());
    let high = KING_HOME_FILE.max(wing.rook_home_file());
    if (low + 1..high).any(|file| game.occupant(make_square(rank, file)).is_some()) {
        return None;
    }

    let passing = make_square(rank, wing.rook_target_file());
    if game.team(color.opposite()).attacks_square(passing) {
        return None;
    }

    Some(Move::Castle {
        king_before: make_square(rank, KING_HOME_FILE),
        king_after: make_square(rank, wing.king_target_file()),
        rook_before: rook_home,
        rook_after: passing,
    })
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::moves::chess_move::Move;

    fn castles(fen: &str) -> Vec<Move> {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        game.calculate_legals()
            .into_iter()
            .filter(|mv| mv.is_castle())
            .collect()
    }

    #[test]
    fn both_wings_available_on_open_back_rank() {
        let found = castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert_eq!(
            found,
            vec![
                Move::Castle {
                    king_before: 4,
                    king_after: 6,
                    rook_before: 7,
                    rook_after: 5,
                },
                Move::Castle {
                    king_before: 4,
                    king_after: 2,
                    rook_before: 0,
                    rook_after: 3,
                },
            ]
        );
    }

    #[test]
    fn no_castle_out_of_or_through_check() {
        // Rook on e8 gives check.
        assert!(castles("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1").is_empty());
        // Rook on f8 covers f1; queen side is still open.
        let found = castles("5rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].after(), 2);
    }

    #[test]
    fn landing_on_attacked_square_is_filtered_as_illegal() {
        // Rook on g8 covers g1 only.
        let found = castles("6rk/7p/8/8/8/8/8/4K2R w K - 0 1");
        assert!(found.is_empty());
    }

    #[test]
    fn blocked_queen_side_and_missing_rights() {
        assert!(castles("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1").is_empty());
        assert!(castles("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").is_empty());
    }
}
