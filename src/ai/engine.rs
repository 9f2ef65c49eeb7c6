use log::{debug, trace};
use serde::Serialize;
use web_time::Instant;

use crate::ai::search::Searcher;
use crate::board::Board;
use crate::config::EngineConfig;
use crate::types::Position;

/// A move picked by a selector, with the score that won it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineMove {
    pub position: Position,
    pub score: i32,
    /// Plies searched below each root candidate.
    pub depth: u8,
}

/// Scores every root move with [`Searcher`] and keeps the first best one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBetaEngine {
    config: EngineConfig,
}

impl AlphaBetaEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Picks a move for the current mover without playing it.
    /// Returns `None` only when the mover has no legal moves.
    pub fn best_move(&self, board: &Board) -> Option<EngineMove> {
        let candidates = board.legal_move_count();
        if candidates == 0 {
            return None;
        }

        let depth = (candidates - 1).min(self.config.max_depth as usize) as u8;
        let bound = self.config.bound();
        let perspective = board.mover();
        let started = Instant::now();
        let mut searcher = Searcher::new(perspective);

        if self.config.log_search {
            debug!("searching {candidates} candidates for {perspective:?} at depth {depth}");
        }

        let mut best: Option<EngineMove> = None;
        let mut best_score = -bound;
        for position in board.legal_positions() {
            let mut child = *board;
            if child.apply_move(position.x, position.y).is_err() {
                continue;
            }

            let score = searcher.alpha_beta(&child, perspective, depth as i32, -bound, bound);
            if self.config.log_search {
                trace!("({}, {}) scored {score}", position.x, position.y);
            }
            if score > best_score {
                best_score = score;
                best = Some(EngineMove {
                    position,
                    score,
                    depth,
                });
            }
        }

        // Nothing beat the lower sentinel; play the first candidate.
        let best = best.or_else(|| {
            board.legal_positions().next().map(|position| EngineMove {
                position,
                score: best_score,
                depth,
            })
        });

        if self.config.log_search {
            let stats = searcher.stats();
            debug!(
                "chose {:?} in {:?}: {} nodes, {} leaves, {} cutoffs",
                best,
                started.elapsed(),
                stats.nodes,
                stats.leaves,
                stats.cutoffs
            );
        }

        best
    }
}
