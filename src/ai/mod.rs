//! Move selection: the minimax / alpha-beta engine, its static evaluator,
//! and the `Agent` trait shared with the random and Monte Carlo opponents.

mod agent;
pub mod heuristic;
pub mod minimax;
mod monte_carlo;
mod random;

pub use agent::Agent;
pub use heuristic::{Heuristic, LineHeuristic};
pub use minimax::{
    search, select_move, MinimaxAgent, Score, SearchConfig, SearchResult, SearchStats,
    INFINITY, MAX_UNLIMITED_CELLS, WIN_SCORE,
};
pub use monte_carlo::{MonteCarloAgent, MonteCarloConfig};
pub use random::RandomAgent;
