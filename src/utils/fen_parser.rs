//! FEN-to-GameState parser.
//!
//! Validates all six fields before building anything, then places pieces in
//! ascending square order, registers home rooks, derives moved flags from the
//! castling rights and computes every piece's knowledge from scratch.

use log::debug;

use crate::chess_errors::FenError;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::square::make_square;
use crate::utils::algebraic::file_from_char;

/// Castling letters in canonical order with the right each one grants.
pub(crate) const CASTLING_LETTERS: [(char, Color, Wing); 4] = [
    ('K', Color::White, Wing::King),
    ('Q', Color::White, Wing::Queen),
    ('k', Color::Black, Wing::King),
    ('q', Color::Black, Wing::Queen),
];

type Placement = (Square, Color, PieceKind);

pub fn parse_fen(fen: &str) -> Result<GameState, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::FieldCount {
            found: fields.len(),
        });
    }

    let placements = parse_board(fields[0])?;
    let moving_team = parse_side_to_move(fields[1])?;
    let requested_rights = parse_castling_rights(fields[2])?;
    let en_passant_file = parse_en_passant(fields[3])?;
    let half_move = parse_half_move_clock(fields[4])?;
    let full_move = parse_full_move_number(fields[5])?;

    let occupied = |square: Square, color: Color, kind: PieceKind| {
        placements.contains(&(square, color, kind))
    };
    let mut rights = CASTLE_NONE;
    for (letter, color, wing) in CASTLING_LETTERS {
        let flag = castling_flag(color, wing);
        if requested_rights & flag == 0 {
            continue;
        }
        let rank = color.home_rank();
        if occupied(make_square(rank, KING_HOME_FILE), color, PieceKind::King)
            && occupied(make_square(rank, wing.rook_home_file()), color, PieceKind::Rook)
        {
            rights |= flag;
        } else {
            debug!("dropping castling right '{letter}': king or rook is not on its home square");
        }
    }

    let mut game = GameState::new_empty();
    for &(square, color, kind) in &placements {
        let moved = match kind {
            PieceKind::King => rights & castling_flags_for(color) == 0,
            PieceKind::Rook => !Wing::ALL.iter().any(|&wing| {
                rights & castling_flag(color, wing) != 0
                    && square == make_square(color.home_rank(), wing.rook_home_file())
            }),
            _ => false,
        };
        let id = game.place_piece(color, kind, square, moved);

        if kind == PieceKind::Rook {
            for wing in Wing::ALL {
                if square == make_square(color.home_rank(), wing.rook_home_file()) {
                    game.teams[color.index()].set_home_rook(wing, id);
                }
            }
        }
    }

    game.moving_team = moving_team;
    game.castling_rights.reset(rights);
    game.en_passant_file.reset(en_passant_file);
    game.half_move = half_move;
    game.full_move = full_move;
    game.initialize_knowledge();

    Ok(game)
}

fn parse_board(board_part: &str) -> Result<Vec<Placement>, FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount { found: ranks.len() });
    }

    let mut placements = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::InvalidPieceChar { character: ch });
                }
                file += empty_count as usize;
                if file > 8 {
                    return Err(FenError::FileCount { rank: board_rank + 1 });
                }
                continue;
            }

            let (color, kind) =
                piece_from_fen_char(ch).ok_or(FenError::InvalidPieceChar { character: ch })?;
            if file >= 8 {
                return Err(FenError::FileCount { rank: board_rank + 1 });
            }
            placements.push((make_square(board_rank as u8, file as u8), color, kind));
            file += 1;
        }

        if file != 8 {
            return Err(FenError::FileCount { rank: board_rank + 1 });
        }
    }

    for color in Color::ALL {
        let kings = placements
            .iter()
            .filter(|&&(_, c, kind)| c == color && kind == PieceKind::King)
            .count();
        if kings != 1 {
            return Err(FenError::KingCount {
                team: color.name(),
                found: kings,
            });
        }
    }

    placements.sort_by_key(|&(square, _, _)| square);
    Ok(placements)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let kind = PieceKind::from_symbol(ch)?;
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some((color, kind))
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(FenError::InvalidSideToMove {
            field: side_part.to_owned(),
        }),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, FenError> {
    if castling_part == "-" {
        return Ok(CASTLE_NONE);
    }

    let mut rights = CASTLE_NONE;
    for ch in castling_part.chars() {
        let (_, color, wing) = CASTLING_LETTERS
            .iter()
            .copied()
            .find(|&(letter, _, _)| letter == ch)
            .ok_or(FenError::InvalidCastlingChar { character: ch })?;
        let flag = castling_flag(color, wing);
        if rights & flag != 0 {
            return Err(FenError::DuplicateCastlingRight { character: ch });
        }
        rights |= flag;
    }
    Ok(rights)
}

/// Accepts `-`, a file letter, or a full target square on rank 3 or 6.
fn parse_en_passant(en_passant_part: &str) -> Result<Option<u8>, FenError> {
    let invalid = || FenError::InvalidEnPassant {
        field: en_passant_part.to_owned(),
    };

    let mut chars = en_passant_part.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('-'), None, None) => Ok(None),
        (Some(file), None, None) => file_from_char(file).map(Some).ok_or_else(invalid),
        (Some(file), Some('3' | '6'), None) => file_from_char(file).map(Some).ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_half_move_clock(halfmove_part: &str) -> Result<u8, FenError> {
    match halfmove_part {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => Err(FenError::InvalidHalfMoveClock {
            field: halfmove_part.to_owned(),
        }),
    }
}

fn parse_full_move_number(fullmove_part: &str) -> Result<u32, FenError> {
    match fullmove_part.parse::<u32>() {
        Ok(number) if number >= 1 => Ok(number),
        _ => Err(FenError::InvalidFullMoveNumber {
            field: fullmove_part.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::FenError;
    use crate::game_state::chess_types::{Color, PieceKind, CASTLE_NONE, CASTLE_WHITE_KINGSIDE};

    #[test]
    fn parses_standard_start_position() {
        let game = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("start position should parse");

        assert_eq!(game.moving_team(), Color::White);
        assert_eq!(game.castling_rights(), 0b1111);
        assert_eq!(game.occupancy().count(), 32);
        assert_eq!(game.piece_at(4).map(|piece| piece.kind), Some(PieceKind::King));
        assert_eq!(game.piece_at(60).map(|piece| piece.color), Some(Color::Black));
        assert_eq!(game.team(Color::White).points(), 39);
    }

    #[test]
    fn team_arena_is_in_ascending_square_order() {
        let game = parse_fen("k7/8/8/8/8/8/8/QR5K w - - 0 1").expect("FEN should parse");
        let squares: Vec<u8> = game
            .team(Color::White)
            .pieces()
            .iter()
            .map(|piece| piece.square)
            .collect();
        assert_eq!(squares, vec![0, 1, 7]);
    }

    #[test]
    fn impossible_castling_letters_are_dropped() {
        let game = parse_fen("k7/8/K7/Q7/8/8/8/8 w KQkq - 0 1").expect("FEN should parse");
        assert_eq!(game.castling_rights(), CASTLE_NONE);

        let game = parse_fen("4k3/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("FEN should parse");
        assert_eq!(game.castling_rights(), CASTLE_WHITE_KINGSIDE);
    }

    #[test]
    fn en_passant_accepts_file_or_square() {
        let by_file = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d 0 3").expect("FEN should parse");
        let by_square = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 3").expect("FEN should parse");
        assert_eq!(by_file.en_passant_file(), Some(3));
        assert_eq!(by_square.en_passant_file(), Some(3));
    }

    #[test]
    fn rejects_malformed_fields() {
        let cases: [(&str, FenError); 11] = [
            (
                "8/8/8/8/8/8/8/8 w - - 0",
                FenError::FieldCount { found: 5 },
            ),
            (
                "4k3/8/8/8/8/8/4K3 w - - 0 1",
                FenError::RankCount { found: 7 },
            ),
            (
                "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
                FenError::FileCount { rank: 1 },
            ),
            (
                "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
                FenError::FileCount { rank: 1 },
            ),
            (
                "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
                FenError::InvalidPieceChar { character: 'X' },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
                FenError::InvalidSideToMove { field: "x".to_owned() },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w KX - 0 1",
                FenError::InvalidCastlingChar { character: 'X' },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w KK - 0 1",
                FenError::DuplicateCastlingRight { character: 'K' },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w - e4 0 1",
                FenError::InvalidEnPassant { field: "e4".to_owned() },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w - - 2 1",
                FenError::InvalidHalfMoveClock { field: "2".to_owned() },
            ),
            (
                "4k3/8/8/8/8/8/8/4K3 w - - 0 0",
                FenError::InvalidFullMoveNumber { field: "0".to_owned() },
            ),
        ];

        for (fen, expected) in &cases {
            assert_eq!(parse_fen(fen).err().as_ref(), Some(expected), "FEN: {fen}");
        }

        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/3Q4 w - - 0 1").err(),
            Some(FenError::KingCount { team: "white", found: 0 })
        );
        assert_eq!(
            parse_fen("4k3/8/8/8/8/8/8/3KK3 w - - 0 1").err(),
            Some(FenError::KingCount { team: "white", found: 2 })
        );
    }
}
