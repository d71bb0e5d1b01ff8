//! Fixed-depth brute-force minimax.
//!
//! Every pseudo-legal continuation is played, searched and taken back; a
//! child that leaves the mover's king capturable answers `None` and is
//! skipped, which doubles as the legality filter. No pruning, no tables.

use std::time::Instant;

use log::info;

use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::evaluation::Evaluation;

/// Search settings. There is no config file; the CLI fills this in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub threads: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: 2, threads: 1 }
    }
}

impl SearchConfig {
    #[inline]
    pub fn normalized_threads(self) -> usize {
        self.threads.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub evaluation: Evaluation,
    pub best_move: Option<Move>,
    /// Principal variation, deepest move first.
    pub reverse_line: Vec<Move>,
    /// Positions visited, this one included.
    pub nodes: u64,
}

impl SearchResult {
    pub(crate) fn leaf(evaluation: Evaluation) -> Self {
        Self {
            evaluation,
            best_move: None,
            reverse_line: Vec::new(),
            nodes: 1,
        }
    }

    /// Principal variation from the searched position onwards.
    pub fn line(&self) -> Vec<Move> {
        self.reverse_line.iter().rev().copied().collect()
    }

    /// Result reached by playing `mv` and continuing with `child`.
    pub(crate) fn through(mv: Move, child: SearchResult) -> Self {
        let mut reverse_line = child.reverse_line;
        reverse_line.push(mv);
        Self {
            evaluation: child.evaluation.one_ply_earlier(),
            best_move: Some(mv),
            reverse_line,
            nodes: child.nodes,
        }
    }
}

/// Evaluation of a position with no continuation.
pub(crate) fn terminal_evaluation(game: &GameState) -> Evaluation {
    if game.king_checked() {
        Evaluation::Checkmate {
            mating_team: game.moving_team().opposite(),
            in_halfmoves: 0,
        }
    } else {
        Evaluation::Score(0)
    }
}

/// Whether `candidate` should replace the incumbent for `team`.
pub(crate) fn improves(team: Color, candidate: &SearchResult, incumbent: Option<&SearchResult>) -> bool {
    incumbent.map_or(true, |best| {
        candidate.evaluation.is_preferred_by(team, best.evaluation)
    })
}

/// Search `depth` plies. `None` when the side to move could capture the enemy
/// king, i.e. the position is an illegal antecedent.
pub fn evaluate(game: &mut GameState, depth: u8) -> Option<SearchResult> {
    if game.king_capturable() {
        return None;
    }
    if depth == 0 {
        return Some(SearchResult::leaf(Evaluation::Score(game.material_score())));
    }

    let team = game.moving_team();
    let mut best: Option<SearchResult> = None;
    let mut nodes = 1u64;

    for mv in game.calculate_moves() {
        if !game.try_apply(mv) {
            continue;
        }
        let child = evaluate(game, depth - 1);
        game.retract();

        let Some(child) = child else {
            continue;
        };
        nodes += child.nodes;
        let candidate = SearchResult::through(mv, child);
        if improves(team, &candidate, best.as_ref()) {
            best = Some(candidate);
        }
    }

    let mut result = best.unwrap_or_else(|| SearchResult::leaf(terminal_evaluation(game)));
    result.nodes = nodes;
    Some(result)
}

/// `evaluate` with a summary log line.
pub fn search(game: &mut GameState, config: &SearchConfig) -> Option<SearchResult> {
    let started = Instant::now();
    let result = evaluate(game, config.depth);
    if let Some(found) = &result {
        info!(
            "depth {} eval {} nodes {} in {:?}",
            config.depth,
            found.evaluation,
            found.nodes,
            started.elapsed()
        );
    }
    result
}
