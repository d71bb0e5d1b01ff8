//! King and knight domains.
//!
//! Pattern pieces reach a fixed set of offsets regardless of occupancy, so
//! their domains are precomputed per square.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_rules::{KING_OFFSETS, KNIGHT_OFFSETS};
use crate::game_state::chess_types::Square;
use crate::game_state::square::offset_square;

pub const KING_DOMAINS: [Bitboard; 64] = generate_pattern_domains(&KING_OFFSETS);
pub const KNIGHT_DOMAINS: [Bitboard; 64] = generate_pattern_domains(&KNIGHT_OFFSETS);

const fn generate_pattern_domains(offsets: &[(i8, i8); 8]) -> [Bitboard; 64] {
    let mut table = [Bitboard::EMPTY; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut domain = Bitboard::EMPTY;
        let mut i = 0usize;
        while i < offsets.len() {
            if let Some(target) = offset_square(sq as Square, offsets[i].0, offsets[i].1) {
                domain = domain.with(target);
            }
            i += 1;
        }
        table[sq] = domain;
        sq += 1;
    }

    table
}

/// Reachable squares from `square` in offset-table order.
pub fn pattern_targets(
    square: Square,
    offsets: &'static [(i8, i8)],
) -> impl Iterator<Item = Square> {
    offsets
        .iter()
        .filter_map(move |&(rank_delta, file_delta)| offset_square(square, rank_delta, file_delta))
}

#[cfg(test)]
mod tests {
    use super::{pattern_targets, KING_DOMAINS, KNIGHT_DOMAINS};
    use crate::game_state::chess_rules::KNIGHT_OFFSETS;

    #[test]
    fn knight_domain_from_d4_has_eight_targets() {
        let d4 = 27usize;
        assert_eq!(KNIGHT_DOMAINS[d4].count(), 8);
        assert_eq!(KNIGHT_DOMAINS[0].count(), 2);
    }

    #[test]
    fn king_domain_in_corner_has_three_targets() {
        assert_eq!(KING_DOMAINS[63].count(), 3);
        assert_eq!(KING_DOMAINS[28].count(), 8);
    }

    #[test]
    fn targets_follow_offset_order() {
        // Knight on b1: (1,-2) is off board, (1,2) is d2, (2,-1) is a3, (2,1) is c3.
        let targets: Vec<u8> = pattern_targets(1, &KNIGHT_OFFSETS).collect();
        assert_eq!(targets, vec![11, 16, 18]);
    }
}
