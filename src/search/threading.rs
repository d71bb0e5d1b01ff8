//! Root-split parallel search.
//!
//! The root's continuations are cut into contiguous index ranges, one per
//! worker. Each worker searches its own clone of the position, so nothing
//! mutable is shared and every worker generates moves in the serial order;
//! results are merged in index order with the same strict preference the
//! serial search uses, which makes the outcome identical to `evaluate`
//! regardless of thread count.

use std::thread;
use std::time::Instant;

use log::{debug, info};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::minimax::{evaluate, improves, terminal_evaluation, SearchConfig, SearchResult};

/// Search `config.depth` plies using up to `config.threads` workers.
///
/// `Ok(None)` mirrors `evaluate` for an illegal antecedent position.
pub fn evaluate_parallel(game: &GameState, config: &SearchConfig) -> ChessResult<Option<SearchResult>> {
    let threads = config.normalized_threads();
    if threads == 1 || config.depth == 0 || game.king_capturable() {
        let mut local = game.clone();
        return Ok(evaluate(&mut local, config.depth));
    }

    let started = Instant::now();
    let root_moves = game.calculate_moves();
    let chunk_size = root_moves.len().div_ceil(threads).max(1);

    let outcomes: Vec<ChessResult<Vec<(Move, Option<SearchResult>)>>> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_size)
            .enumerate()
            .map(|(worker_id, chunk)| {
                let local = game.clone();
                scope.spawn(move || search_chunk(worker_id, local, chunk, config.depth - 1))
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| ChessError::WorkerPanicked))
            .collect()
    });

    let team = game.moving_team();
    let mut best: Option<SearchResult> = None;
    let mut nodes = 1u64;
    for outcome in outcomes {
        for (mv, child) in outcome? {
            let Some(child) = child else {
                continue;
            };
            nodes += child.nodes;
            let candidate = SearchResult::through(mv, child);
            if improves(team, &candidate, best.as_ref()) {
                best = Some(candidate);
            }
        }
    }

    let mut result = best.unwrap_or_else(|| SearchResult::leaf(terminal_evaluation(game)));
    result.nodes = nodes;
    info!(
        "depth {} threads {} eval {} nodes {} in {:?}",
        config.depth,
        threads,
        result.evaluation,
        result.nodes,
        started.elapsed()
    );
    Ok(Some(result))
}

fn search_chunk(
    worker_id: usize,
    mut local: GameState,
    chunk: &[Move],
    depth: u8,
) -> Vec<(Move, Option<SearchResult>)> {
    let mut results = Vec::with_capacity(chunk.len());

    for &mv in chunk {
        if !local.try_apply(mv) {
            results.push((mv, None));
            continue;
        }
        let child = evaluate(&mut local, depth);
        local.retract();
        if let Some(found) = &child {
            debug!("worker {worker_id}: {mv} -> {}", found.evaluation.one_ply_earlier());
        }
        results.push((mv, child));
    }

    results
}
