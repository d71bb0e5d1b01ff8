//! Ray walking for bishops, rooks and queens.

use crate::game_state::bitboard::Bitboard;
use crate::game_state::chess_types::Square;
use crate::game_state::square::offset_square;

/// Union of all rays from `square`, each including its first occupied square
/// and stopping there.
pub fn ray_domain(square: Square, directions: &[(i8, i8)], occupancy: &Bitboard) -> Bitboard {
    let mut domain = Bitboard::EMPTY;
    for &(rank_delta, file_delta) in directions {
        let mut cursor = square;
        while let Some(next) = offset_square(cursor, rank_delta, file_delta) {
            domain.set(next);
            if occupancy.contains(next) {
                break;
            }
            cursor = next;
        }
    }
    domain
}

/// Squares of a cached domain in generation order: direction by direction,
/// outward along each ray.
pub fn ordered_ray_targets(square: Square, directions: &[(i8, i8)], domain: &Bitboard) -> Vec<Square> {
    let mut targets = Vec::with_capacity(domain.count() as usize);
    for &(rank_delta, file_delta) in directions {
        let mut cursor = square;
        while let Some(next) = offset_square(cursor, rank_delta, file_delta) {
            if !domain.contains(next) {
                break;
            }
            targets.push(next);
            cursor = next;
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::{ordered_ray_targets, ray_domain};
    use crate::game_state::bitboard::Bitboard;
    use crate::game_state::chess_rules::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = 27u8;
        assert_eq!(ray_domain(d4, &ROOK_DIRECTIONS, &Bitboard::EMPTY).count(), 14);
        assert_eq!(ray_domain(d4, &QUEEN_DIRECTIONS, &Bitboard::EMPTY).count(), 27);
    }

    #[test]
    fn blocker_is_included_and_stops_the_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = Bitboard::from_square(24);
        let domain = ray_domain(a1, &ROOK_DIRECTIONS, &blocker_on_a4);

        assert!(domain.contains(24));
        assert!(!domain.contains(32));
        assert!(domain.contains(7));
        assert_eq!(domain.count(), 10);
    }

    #[test]
    fn ordered_targets_walk_outward_per_direction() {
        // Bishop on c1 with a blocker on e3.
        let occupancy = Bitboard::from_square(20);
        let domain = ray_domain(2, &BISHOP_DIRECTIONS, &occupancy);
        let targets = ordered_ray_targets(2, &BISHOP_DIRECTIONS, &domain);

        // (1,-1) then (1,1): b2, a3, then d2, e3.
        assert_eq!(targets, vec![9, 16, 11, 20]);
    }
}
