//! Best-move search: negamax alpha-beta with iterative deepening.

mod alphabeta;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Move, MAX_PLY};

use alphabeta::SearchContext;

/// Score for a checkmate at the root; mates found deeper in the tree
/// score `MATE_SCORE - ply` so shorter mates are preferred.
pub const MATE_SCORE: i32 = 30_000;

/// Scores at or beyond this magnitude are mate scores.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Score of a drawn line, from either side.
pub const DRAW_SCORE: i32 = 0;

/// How the search explores depths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStrategy {
    /// One exploration at exactly the configured depth
    FixedDepth,
    /// Deepen one ply at a time, keeping the deepest completed result
    IterativeDeepening,
}

/// Configuration for a single search call.
#[derive(Clone, Debug)]
pub struct SearchSettings {
    /// Maximum depth in plies
    pub depth: u32,
    /// Time budget in milliseconds (0 = no time limit)
    pub movetime_ms: u64,
    pub strategy: SearchStrategy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            depth: 6,
            movetime_ms: 0,
            strategy: SearchStrategy::IterativeDeepening,
        }
    }
}

impl SearchSettings {
    #[must_use]
    pub fn fixed_depth(depth: u32) -> Self {
        SearchSettings {
            depth,
            movetime_ms: 0,
            strategy: SearchStrategy::FixedDepth,
        }
    }
}

/// Outcome of a search call.
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best move found, `None` when the position has no legal moves
    pub best_move: Option<Move>,
    /// Score of the best move in centipawns, side-to-move relative
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: u32,
    /// Nodes visited
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Search `board` for the best move under `settings`.
///
/// The stop flag and the time budget are polled only at depth
/// boundaries: an iteration that starts always runs to completion, and
/// the first iteration always runs. The board is left exactly as it was
/// passed in.
pub fn search(board: &mut Board, settings: &SearchSettings, stop: &AtomicBool) -> SearchResult {
    let start = Instant::now();
    let mut ctx = SearchContext {
        board,
        nodes: 0,
    };

    let mut best_move: Option<Move> = None;
    let mut best_score = 0;
    let mut completed_depth = 0;

    let max_depth = settings.depth.max(1);

    match settings.strategy {
        SearchStrategy::FixedDepth => {
            let (mv, score) = ctx.root_search(max_depth, None);
            best_move = mv;
            best_score = score;
            completed_depth = max_depth;
        }
        SearchStrategy::IterativeDeepening => {
            for depth in 1..=max_depth {
                if depth > 1 {
                    if stop.load(Ordering::Relaxed) {
                        debug!("search stopped before depth {depth}");
                        break;
                    }
                    if settings.movetime_ms > 0
                        && start.elapsed().as_millis() as u64 >= settings.movetime_ms
                    {
                        debug!("time budget exhausted before depth {depth}");
                        break;
                    }
                }

                let (mv, score) = ctx.root_search(depth, best_move);
                if mv.is_some() || depth == 1 {
                    best_move = mv;
                    best_score = score;
                    completed_depth = depth;
                }

                debug!(
                    "depth {depth} score {score} nodes {nodes} best {best}",
                    nodes = ctx.nodes,
                    best = best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
                );

                // Nothing deeper to find once a forced mate is proven
                if score.abs() >= MATE_THRESHOLD {
                    break;
                }
            }
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        depth: completed_depth,
        nodes: ctx.nodes,
        elapsed: start.elapsed(),
    }
}
