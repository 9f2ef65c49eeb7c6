use once_cell::sync::Lazy;

use crate::board::{Board, GRID_CELLS, GRID_WIDTH};
use crate::types::{Cell, Color};

/// Top-left 5x5 quadrant of the weight grid, wall ring included. The full
/// table mirrors it across both center lines.
const QUADRANT: [[i32; 5]; 5] = [
    [-120, -120, -120, -120, -120],
    [-120, 120, -20, 20, 5],
    [-120, -20, -40, -5, -5],
    [-120, 20, -5, 15, 3],
    [-120, 5, -5, 3, 3],
];

/// Positional weights in board index order (`x * 10 + y`).
static WEIGHTS: Lazy<[i32; GRID_CELLS]> = Lazy::new(|| {
    let mut weights = [0i32; GRID_CELLS];
    for (index, weight) in weights.iter_mut().enumerate() {
        let (x, y) = (index / GRID_WIDTH, index % GRID_WIDTH);
        let qx = x.min(GRID_WIDTH - 1 - x);
        let qy = y.min(GRID_WIDTH - 1 - y);
        *weight = QUADRANT[qx][qy];
    }
    weights
});

/// Positional score of `board` for `perspective`: own weighted discs minus
/// the opponent's.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let own = Cell::Disc(perspective);
    let opp = Cell::Disc(perspective.opponent());

    board
        .cells()
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(&cell, &weight)| {
            if cell == own {
                weight
            } else if cell == opp {
                -weight
            } else {
                0
            }
        })
        .sum()
}
