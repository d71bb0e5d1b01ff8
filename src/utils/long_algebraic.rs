//! Coordinate move notation (`e2e4`, `e7e8q`).
//!
//! `Move` itself renders this format through `Display`; this module resolves
//! text back into one of the position's legal moves.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

/// Find the legal move written as `text`. A missing promotion letter means
/// a queen.
pub fn parse_long_algebraic(game: &mut GameState, text: &str) -> ChessResult<Move> {
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return Err(ChessError::IllegalMove {
            notation: text.to_owned(),
        });
    }

    // Validate coordinates first so a typo reports the bad square.
    algebraic_to_square(&text[0..2])?;
    algebraic_to_square(&text[2..4])?;

    let wanted = if text.len() == 4 {
        [text.to_owned(), format!("{text}q")]
    } else {
        [text.to_ascii_lowercase(), String::new()]
    };

    let legals = game.calculate_legals();
    legals
        .iter()
        .find(|mv| mv.to_string() == wanted[0])
        .or_else(|| legals.iter().find(|mv| mv.to_string() == wanted[1]))
        .copied()
        .ok_or_else(|| ChessError::IllegalMove {
            notation: text.to_owned(),
        })
}
