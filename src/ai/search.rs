use crate::ai::eval::evaluate;
use crate::board::Board;
use crate::types::Color;

/// Counters for one search, reported through the engine's debug log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
}

/// Fixed-depth alpha-beta search maximizing for one color.
///
/// The maximizing side is always `perspective`, whichever color moved into a
/// node, so this is deliberately not negamax.
pub struct Searcher {
    perspective: Color,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(perspective: Color) -> Self {
        Self {
            perspective,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Scores a node. `board` already has the move into this node applied and
    /// `mover` is the color that played it.
    ///
    /// Candidates are tried by increasing column then row; each child sees the
    /// bounds as they stand when it is called. Returns `alpha` when `mover` is
    /// the perspective color and `beta` otherwise.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        mover: Color,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        // Auto-pass leaves a mover without moves only at game end.
        if depth <= 0 || !board.has_legal_moves() {
            self.stats.leaves += 1;
            return evaluate(board, self.perspective);
        }

        let maximizing = mover == self.perspective;
        for p in board.legal_positions() {
            let mut child = *board;
            let applied = child.apply_move(p.x, p.y);
            debug_assert!(applied.is_ok(), "legal position {p:?} was rejected");
            if applied.is_err() {
                continue;
            }

            let score = self.alpha_beta(&child, board.mover(), depth - 1, alpha, beta);
            if maximizing && score > alpha {
                alpha = score;
            } else if !maximizing && score < beta {
                beta = score;
            }

            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if maximizing { alpha } else { beta }
    }
}
