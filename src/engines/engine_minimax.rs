//! Fixed-depth minimax engine.
//!
//! Thin wrapper over the parallel root search: the configured depth can be
//! overridden per call through `GoParams`, and the principal variation is
//! reported as an info line in coordinate notation.

use crate::chess_errors::ChessResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::search::minimax::SearchConfig;
use crate::search::threading::evaluate_parallel;

pub struct MinimaxEngine {
    config: SearchConfig,
}

impl MinimaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Snapshot Minimax"
    }

    fn choose_move(&mut self, game_state: &GameState, params: &GoParams) -> ChessResult<EngineOutput> {
        let config = SearchConfig {
            depth: params.depth.unwrap_or(self.config.depth),
            ..self.config
        };

        let mut out = EngineOutput::default();
        let Some(result) = evaluate_parallel(game_state, &config)? else {
            out.info_lines
                .push("info string minimax position is an illegal antecedent".to_owned());
            return Ok(out);
        };

        let pv = result
            .line()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} pv {}",
            config.depth, result.evaluation, result.nodes, pv
        ));
        out.best_move = result.best_move;
        out.evaluation = Some(result.evaluation);
        Ok(out)
    }
}
