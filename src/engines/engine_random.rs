//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used for self-play diagnostics and as
//! a sparring partner for the minimax engine.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::with_seed(rand::random::<u64>())
    }

    /// Reproducible move choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Snapshot Random"
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let mut game = game_state.clone();
        let legal_moves = game.calculate_legals();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine legal_moves {}", legal_moves.len()));
        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        out.best_move = legal_moves.as_slice().choose(&mut self.rng).copied();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, GoParams};
    use crate::game_state::game_state::GameState;

    #[test]
    fn picks_a_legal_move() {
        let mut engine = RandomEngine::with_seed(7);
        let mut game = GameState::new_game().expect("starting FEN should parse");
        let out = engine
            .choose_move(&game, &GoParams::default())
            .expect("engine should answer");
        let best = out.best_move.expect("a move should be chosen");
        assert!(game.calculate_legals().contains(&best));
    }

    #[test]
    fn same_seed_same_choices() {
        let game = GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let mut first = RandomEngine::with_seed(42);
        let mut second = RandomEngine::with_seed(42);
        for _ in 0..5 {
            let a = first.choose_move(&game, &GoParams::default()).expect("engine should answer");
            let b = second.choose_move(&game, &GoParams::default()).expect("engine should answer");
            assert_eq!(a.best_move, b.best_move);
        }
    }

    #[test]
    fn no_move_when_mated() {
        let mut engine = RandomEngine::with_seed(1);
        let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        let out = engine
            .choose_move(&game, &GoParams { depth: Some(3) })
            .expect("engine should answer");
        assert_eq!(out.best_move, None);
        assert_eq!(out.info_lines.len(), 2);
    }
}
