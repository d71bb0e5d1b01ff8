//! PGN export of a game's move history.
//!
//! The initial position is recovered by unwinding a copy of the game, so any
//! `GameState` that was advanced through `make_move` can be written out.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::{GameState, GameStatus};
use crate::utils::san::move_to_san;

/// Numbered SAN movetext, e.g. `1. e4 e5 2. Nf3`.
pub fn move_history_string(game: &GameState) -> ChessResult<String> {
    let mut replay = rewind(game)?;
    let mut parts = Vec::with_capacity(game.played_moves().len());

    for (index, mv) in game.played_moves().iter().enumerate() {
        let san = move_to_san(&mut replay, mv)?;
        match replay.moving_team() {
            Color::White => parts.push(format!("{}. {san}", replay.full_move_number())),
            Color::Black if index == 0 => parts.push(format!("{}... {san}", replay.full_move_number())),
            Color::Black => parts.push(san),
        }
        replay.make_move(*mv)?;
    }

    Ok(parts.join(" "))
}

/// Result token for the current position: decisive only on checkmate.
pub fn result_token(game: &GameState) -> &'static str {
    let mut probe = game.clone();
    match probe.status() {
        GameStatus::Checkmate { winner: Color::White } => "1-0",
        GameStatus::Checkmate { winner: Color::Black } => "0-1",
        GameStatus::Stalemate => "1/2-1/2",
        GameStatus::Ongoing => "*",
    }
}

pub fn write_pgn(game: &GameState, white: &str, black: &str) -> ChessResult<String> {
    let initial = rewind(game)?;
    let result = result_token(game);

    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Snapshot Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), white.to_owned());
    headers.insert("Black".to_owned(), black.to_owned());
    headers.insert("Result".to_owned(), result.to_owned());

    let initial_fen = initial.to_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let movetext = move_history_string(game)?;
    if movetext.is_empty() {
        out.push_str(result);
    } else {
        out.push_str(&format!("{movetext} {result}"));
    }
    out.push('\n');
    Ok(out)
}

/// Copy of `game` with every played move undone.
fn rewind(game: &GameState) -> ChessResult<GameState> {
    let mut replay = game.clone();
    for _ in 0..game.played_moves().len() {
        replay.undo_move()?;
    }
    Ok(replay)
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::{move_history_string, result_token, write_pgn};
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn play_all(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            let mv = parse_long_algebraic(game, text).expect("move should be legal");
            game.make_move(mv).expect("move should apply");
        }
    }

    #[test]
    fn numbers_moves_from_the_start() {
        let mut game = GameState::new_game().expect("starting FEN should parse");
        play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(
            move_history_string(&game).expect("history should render"),
            "1. e4 e5 2. Nf3"
        );
    }

    #[test]
    fn black_first_move_gets_ellipsis_and_setup_tags() {
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4p3/K7 b - - 0 7").expect("FEN should parse");
        play_all(&mut game, &["e2e1q"]);
        assert_eq!(
            move_history_string(&game).expect("history should render"),
            "7... e1=Q+"
        );

        let pgn = write_pgn(&game, "Alice", "Bob").expect("PGN should render");
        assert!(pgn.contains("[SetUp \"1\"]\n"));
        assert!(pgn.contains("[FEN \"4k3/8/8/8/8/8/4p3/K7 b - - 0 7\"]\n"));
        assert!(pgn.contains("[White \"Alice\"]\n"));
        assert!(pgn.trim_end().ends_with("7... e1=Q+ *"));
    }

    #[test]
    fn fools_mate_is_scored_for_black() {
        let mut game = GameState::new_game().expect("starting FEN should parse");
        play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(result_token(&game), "0-1");

        let pgn = write_pgn(&game, "White", "Black").expect("PGN should render");
        assert!(!pgn.contains("SetUp"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(pgn.trim_end().ends_with("1. f3 e5 2. g4 Qh4# 0-1"));
    }
}
