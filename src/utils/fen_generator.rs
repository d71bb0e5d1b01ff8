//! GameState-to-FEN serializer.
//!
//! Castling letters come out in `KQkq` order and the en passant field as a
//! bare file letter, matching what the parser accepts.

use crate::game_state::chess_types::castling_flag;
use crate::game_state::game_state::GameState;
use crate::game_state::square::make_square;
use crate::utils::algebraic::file_char;
use crate::utils::fen_parser::CASTLING_LETTERS;

pub fn generate_fen(game_state: &GameState) -> String {
    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        game_state.moving_team().fen_char(),
        generate_castling_field(game_state),
        generate_en_passant_field(game_state),
        game_state.half_move_clock(),
        game_state.full_move_number()
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_run = 0u8;
        for file in 0..8u8 {
            match game_state.piece_at(make_square(rank, file)) {
                Some(piece) => {
                    if empty_run > 0 {
                        out.push(char::from(b'0' + empty_run));
                        empty_run = 0;
                    }
                    out.push(piece.kind.fen_char(piece.color));
                }
                None => empty_run += 1,
            }
        }
        if empty_run > 0 {
            out.push(char::from(b'0' + empty_run));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(game_state: &GameState) -> String {
    let rights = game_state.castling_rights();
    let field: String = CASTLING_LETTERS
        .iter()
        .filter(|&&(_, color, wing)| rights & castling_flag(color, wing) != 0)
        .map(|&(letter, _, _)| letter)
        .collect();

    if field.is_empty() {
        "-".to_owned()
    } else {
        field
    }
}

fn generate_en_passant_field(game_state: &GameState) -> String {
    match game_state.en_passant_file() {
        Some(file) => file_char(file).to_string(),
        None => "-".to_owned(),
    }
}
