//! Square conversions for algebraic coordinates (`e4` and friends).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;
use crate::game_state::square::{file_of, make_square, rank_of};

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    let invalid = || ChessError::InvalidAlgebraic {
        text: text.to_owned(),
    };

    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(invalid());
    }
    let file = file_from_char(char::from(bytes[0])).ok_or_else(invalid)?;
    let rank = bytes[1];
    if !(b'1'..=b'8').contains(&rank) {
        return Err(invalid());
    }

    Ok(make_square(rank - b'1', file))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    format!("{}{}", file_char(file_of(square)), rank_char(rank_of(square)))
}

#[inline]
pub fn file_char(file: u8) -> char {
    char::from(b'a' + (file & 7))
}

#[inline]
pub fn rank_char(rank: u8) -> char {
    char::from(b'1' + (rank & 7))
}

pub fn file_from_char(ch: char) -> Option<u8> {
    match ch {
        'a'..='h' => Some(ch as u8 - b'a'),
        _ => None,
    }
}
