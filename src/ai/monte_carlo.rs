use log::debug;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::error::SearchError;
use crate::game::{Board, Mark, Position};

use super::agent::Agent;

/// Rollout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Random games played after each candidate move
    pub simulations: u32,
    /// Random moves per game after the candidate; unfinished games count as
    /// not won
    pub max_rollout: u32,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        MonteCarloConfig {
            simulations: 300,
            max_rollout: 20,
        }
    }
}

/// Flat Monte Carlo agent: scores every empty cell by the number of random
/// playouts the agent wins after playing it.
///
/// Playouts run on the caller's board and are undone move by move, so the
/// board is never cloned.
pub struct MonteCarloAgent {
    config: MonteCarloConfig,
    rng: StdRng,
}

impl MonteCarloAgent {
    pub fn new(config: MonteCarloConfig) -> Self {
        MonteCarloAgent {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic agent for reproducible games
    pub fn with_seed(config: MonteCarloConfig, seed: u64) -> Self {
        MonteCarloAgent {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Play one random game from the current position with `mark`'s opponent
    /// to move. Returns whether `mark` won.
    fn rollout(&mut self, board: &mut Board, mark: Mark) -> Result<bool, SearchError> {
        let mut placed = Vec::with_capacity(self.config.max_rollout as usize);
        let won = self.play_randomly(board, mark, &mut placed);
        for pos in placed.iter().rev() {
            board.retract(pos.row, pos.col)?;
        }
        won
    }

    fn play_randomly(
        &mut self,
        board: &mut Board,
        mark: Mark,
        placed: &mut Vec<Position>,
    ) -> Result<bool, SearchError> {
        let mut turn = mark.other();
        loop {
            if board.has_win(mark) {
                return Ok(true);
            }
            if board.has_win(mark.other()) || placed.len() >= self.config.max_rollout as usize {
                return Ok(false);
            }

            let cells: Vec<Position> = board.empty_cells().collect();
            let Some(&pos) = cells.choose(&mut self.rng) else {
                return Ok(false);
            };
            board.place(pos.row, pos.col, turn)?;
            placed.push(pos);
            turn = turn.other();
        }
    }
}

impl Agent for MonteCarloAgent {
    fn select_move(&mut self, board: &mut Board, mark: Mark) -> Result<Position, SearchError> {
        let candidates: Vec<Position> = board.empty_cells().collect();
        let mut best: Option<(Position, u32)> = None;

        for pos in candidates {
            board.place(pos.row, pos.col, mark)?;
            let mut wins = 0;
            let mut result = Ok(());
            for _ in 0..self.config.simulations {
                match self.rollout(board, mark) {
                    Ok(true) => wins += 1,
                    Ok(false) => {}
                    Err(err) => {
                        result = Err(err);
                        break;
                    }
                }
            }
            board.retract(pos.row, pos.col)?;
            result?;

            if best.map_or(true, |(_, best_wins)| wins > best_wins) {
                best = Some((pos, wins));
            }
        }

        let (position, wins) = best.ok_or(SearchError::NoLegalMove)?;
        debug!(
            "{mark} plays {position} ({wins}/{} playouts won)",
            self.config.simulations
        );
        Ok(position)
    }

    fn name(&self) -> &str {
        "MonteCarlo"
    }
}
