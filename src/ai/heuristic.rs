use crate::game::{Board, Mark};

use super::minimax::Score;

/// Points for a complete run of the win length.
pub const RUN_WEIGHT: Score = 10;
/// Points for a run one short of the win length.
pub const NEAR_RUN_WEIGHT: Score = 5;

/// Trait for evaluating a non-terminal board from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Mark) -> Score;
}

/// Default heuristic: counts aligned windows of length K and K-1 owned
/// entirely by each side.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineHeuristic;

impl LineHeuristic {
    fn side_total(board: &Board, mark: Mark) -> Score {
        let k = board.win_length();
        let full = board.count_runs(mark, k) as Score;
        let near = board.count_runs(mark, k - 1) as Score;
        full * RUN_WEIGHT + near * NEAR_RUN_WEIGHT
    }
}

impl Heuristic for LineHeuristic {
    fn evaluate(&self, board: &Board, player: Mark) -> Score {
        Self::side_total(board, player) - Self::side_total(board, player.other())
    }
}
