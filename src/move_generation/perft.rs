use std::thread;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn single_node() -> Self {
        PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        }
    }
}

/// Count leaf positions `depth` plies below `game`, tallying how they arose.
/// The position is left as it was found.
pub fn perft(game: &mut GameState, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts::single_node();
    }
    let mut total = PerftCounts::default();
    perft_recurse(game, depth, &mut total);
    total
}

/// Leaf counts per legal root move, in generation order.
pub fn perft_divide(game: &mut GameState, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut divided = Vec::new();
    for mv in game.calculate_moves() {
        if !enter(game, mv) {
            continue;
        }
        divided.push((mv, perft(game, depth - 1).nodes));
        game.retract();
    }
    divided
}

/// `perft` with the root moves split across `threads` workers, each on its
/// own clone of the position.
pub fn perft_multi_threaded(game: &GameState, depth: u8, threads: usize) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts::single_node());
    }

    let root_moves = game.calculate_moves();
    let chunk_size = root_moves.len().div_ceil(threads.max(1)).max(1);

    let outcomes: Vec<ChessResult<PerftCounts>> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_size)
            .map(|chunk| {
                let mut local_game = game.clone();
                scope.spawn(move || {
                    let mut local = PerftCounts::default();
                    for &mv in chunk {
                        visit(&mut local_game, mv, depth, &mut local);
                    }
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| ChessError::WorkerPanicked))
            .collect()
    });

    let mut total = PerftCounts::default();
    for outcome in outcomes {
        total.merge(outcome?);
    }
    Ok(total)
}

fn perft_recurse(game: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    for mv in game.calculate_moves() {
        visit(game, mv, depth, counts);
    }
}

/// Play `mv` if legal, then tally it as a leaf or descend.
fn visit(game: &mut GameState, mv: Move, depth: u8, counts: &mut PerftCounts) {
    let captures = mv
        .capture_square()
        .is_some_and(|square| game.occupant(square).is_some());
    if !enter(game, mv) {
        return;
    }

    if depth == 1 {
        counts.nodes += 1;
        if captures {
            counts.captures += 1;
        }
        if mv.is_en_passant() {
            counts.en_passant += 1;
        }
        if mv.is_castle() {
            counts.castles += 1;
        }
        if mv.promotion().is_some() {
            counts.promotions += 1;
        }
        if game.king_checked() {
            counts.checks += 1;
            if game.calculate_legals().is_empty() {
                counts.checkmates += 1;
            }
        }
    } else {
        perft_recurse(game, depth - 1, counts);
    }

    game.retract();
}

/// Apply `mv`; on a king-exposing move undo it again and report `false`.
fn enter(game: &mut GameState, mv: Move) -> bool {
    if !game.try_apply(mv) {
        return false;
    }
    if game.king_capturable() {
        game.retract();
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn nodes(fen: &str, depth: u8) -> u64 {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let counts = perft(&mut game, depth);
        assert_eq!(game.to_fen(), fen, "perft must leave the position untouched");
        counts.nodes
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game().expect("starting FEN should parse");
        assert_eq!(
            perft(&mut game, 0),
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn starting_position_reference_counts() {
        assert_eq!(nodes(STARTING_POSITION_FEN, 1), 20);
        assert_eq!(nodes(STARTING_POSITION_FEN, 2), 400);

        let mut game = GameState::new_game().expect("starting FEN should parse");
        assert_eq!(
            perft(&mut game, 3),
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_reference_counts() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        assert_eq!(
            perft(&mut game, 1),
            PerftCounts {
                nodes: 48,
                captures: 8,
                en_passant: 0,
                castles: 2,
                promotions: 0,
                checks: 0,
                checkmates: 0,
            }
        );
        assert_eq!(
            perft(&mut game, 2),
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn tricky_positions_reference_counts() {
        assert_eq!(nodes(POSITION_3, 1), 14);
        assert_eq!(nodes(POSITION_3, 2), 191);
        assert_eq!(nodes(POSITION_3, 3), 2812);

        assert_eq!(nodes(POSITION_4, 1), 6);
        assert_eq!(nodes(POSITION_4, 2), 264);
        assert_eq!(nodes(POSITION_4, 3), 9467);

        assert_eq!(nodes(POSITION_5, 1), 44);
        assert_eq!(nodes(POSITION_5, 2), 1486);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divided = perft_divide(&mut game, 2);
        assert_eq!(divided.len(), 48);
        assert_eq!(divided.iter().map(|(_, count)| count).sum::<u64>(), 2039);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let mut game = GameState::from_fen(POSITION_4).expect("FEN should parse");
        let single = perft(&mut game, 3);
        for threads in [1, 2, 5] {
            let multi = perft_multi_threaded(&game, 3, threads).expect("perft should run");
            assert_eq!(multi, single, "{threads} threads");
        }
    }
}
