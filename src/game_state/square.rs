//! Square codec: `square = rank * 8 + file`, rank and file in `0..8`.

use crate::game_state::chess_types::Square;

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn make_square(rank: u8, file: u8) -> Square {
    (rank << 3) | file
}

#[inline]
pub const fn is_on_board(rank: i8, file: i8) -> bool {
    rank >= 0 && rank < 8 && file >= 0 && file < 8
}

/// Square reached by stepping `(rank_delta, file_delta)`, or `None` off the
/// board.
#[inline]
pub const fn offset_square(square: Square, rank_delta: i8, file_delta: i8) -> Option<Square> {
    let rank = rank_of(square) as i8 + rank_delta;
    let file = file_of(square) as i8 + file_delta;
    if is_on_board(rank, file) {
        Some(make_square(rank as u8, file as u8))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_file_round_trip() {
        for sq in 0..64u8 {
            assert_eq!(make_square(rank_of(sq), file_of(sq)), sq);
        }
        assert_eq!(rank_of(28), 3);
        assert_eq!(file_of(28), 4);
    }

    #[test]
    fn offsets_stop_at_edges() {
        assert_eq!(offset_square(0, -1, 0), None);
        assert_eq!(offset_square(7, 0, 1), None);
        assert_eq!(offset_square(63, 1, 1), None);
        assert_eq!(offset_square(27, 2, 1), Some(44));
    }
}
