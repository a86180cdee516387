use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::game::{Board, Mark, Position};

use super::agent::Agent;

/// An agent that selects uniformly at random from the empty cells.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible games
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &mut Board, _mark: Mark) -> Result<Position, SearchError> {
        let cells: Vec<Position> = board.empty_cells().collect();
        cells
            .choose(&mut self.rng)
            .copied()
            .ok_or(SearchError::NoLegalMove)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
