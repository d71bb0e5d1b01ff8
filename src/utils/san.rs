//! Standard algebraic notation for display.
//!
//! Disambiguation looks at the other legal moves of the same kind landing on
//! the same square: none needed, then the origin file if unique, then the rank
//! if unique, then the full square. Check and mate suffixes come from playing
//! the move and inspecting the reply position.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::PieceKind;
use crate::game_state::game_state::GameState;
use crate::game_state::square::{file_of, rank_of};
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

pub fn move_to_san(game: &mut GameState, mv: &Move) -> ChessResult<String> {
    let before = mv.before();
    let piece = game
        .piece_at(before)
        .ok_or(ChessError::NoPieceOnSquare { square: before })?;
    let kind = piece.kind;
    let color = piece.color;

    let mut san = match *mv {
        Move::Castle { king_after, .. } if file_of(king_after) == 6 => "O-O".to_owned(),
        Move::Castle { .. } => "O-O-O".to_owned(),
        _ => {
            let capture = mv.is_en_passant()
                || game
                    .occupant(mv.after())
                    .is_some_and(|target| target.color != color);
            let mut text = String::with_capacity(8);

            if kind == PieceKind::Pawn {
                if capture {
                    text.push(file_char(file_of(before)));
                }
            } else {
                text.push(kind.symbol());
                text.push_str(&disambiguation(game, mv, kind));
            }
            if capture {
                text.push('x');
            }
            text.push_str(&square_to_algebraic(mv.after()));
            if let Some(promoted) = mv.promotion() {
                text.push('=');
                text.push(promoted.symbol());
            }
            text
        }
    };

    game.make_move(*mv)?;
    let suffix = if game.is_checkmate() {
        Some('#')
    } else if game.king_checked() {
        Some('+')
    } else {
        None
    };
    game.undo_move()?;

    san.extend(suffix);
    Ok(san)
}

fn disambiguation(game: &mut GameState, mv: &Move, kind: PieceKind) -> String {
    let before = mv.before();
    let rivals: Vec<u8> = game
        .calculate_legals()
        .into_iter()
        .filter(|other| other.after() == mv.after() && other.before() != before)
        .map(|other| other.before())
        .filter(|&square| game.piece_at(square).is_some_and(|piece| piece.kind == kind))
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|&square| file_of(square) != file_of(before)) {
        file_char(file_of(before)).to_string()
    } else if rivals.iter().all(|&square| rank_of(square) != rank_of(before)) {
        rank_char(rank_of(before)).to_string()
    } else {
        square_to_algebraic(before)
    }
}

/// Space-separated SAN for a line of moves played from the current position.
/// The position is restored before returning.
pub fn line_to_san<'a, I>(game: &mut GameState, line: I) -> ChessResult<String>
where
    I: IntoIterator<Item = &'a Move>,
{
    let mut parts = Vec::new();
    let mut played = 0usize;
    let mut outcome = Ok(());

    for mv in line {
        match move_to_san(game, mv).and_then(|san| game.make_move(*mv).map(|()| san)) {
            Ok(san) => {
                parts.push(san);
                played += 1;
            }
            Err(err) => {
                outcome = Err(err);
                break;
            }
        }
    }

    for _ in 0..played {
        game.undo_move()?;
    }
    outcome.map(|()| parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::{line_to_san, move_to_san};
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn san_of(fen: &str, text: &str) -> String {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let mv = parse_long_algebraic(&mut game, text).expect("move should be legal");
        let san = move_to_san(&mut game, &mv).expect("SAN should render");
        assert_eq!(game.to_fen(), fen);
        san
    }

    #[test]
    fn pawn_moves_captures_and_promotions() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
        assert_eq!(san_of("4k3/8/4p3/3pP3/8/8/8/4K3 w - d 0 3", "e5d6"), "exd6");
        assert_eq!(san_of("4k3/6P1/8/8/8/8/1p6/B3K3 b KQkq - 0 1", "b2a1q"), "bxa1=Q+");
    }

    #[test]
    fn castles_and_mate_suffix() {
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"), "O-O");
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
        assert_eq!(san_of("k7/8/K7/Q7/8/8/8/8 w KQkq - 0 1", "a5d8"), "Qd8#");
    }

    #[test]
    fn disambiguates_by_file_then_rank_then_square() {
        // Knights on b1 and f1 can both reach d2.
        assert_eq!(san_of("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks on a1 and a5 share a file.
        assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
        // Queens on a1, c1 and a3 all reach b2.
        assert_eq!(san_of("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1", "a1b2"), "Qa1b2");
    }

    #[test]
    fn line_is_rendered_and_position_restored() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let line: Vec<_> = ["f2f3", "e7e5", "g2g4", "d8h4"]
            .iter()
            .map(|text| {
                let mv = parse_long_algebraic(&mut game, text).expect("move should be legal");
                game.make_move(mv).expect("move should apply");
                mv
            })
            .collect();
        for _ in &line {
            game.undo_move().expect("undo should succeed");
        }

        let text = line_to_san(&mut game, &line).expect("line should render");
        assert_eq!(text, "f3 e5 g4 Qh4#");
        assert_eq!(game.to_fen(), fen);
    }
}
