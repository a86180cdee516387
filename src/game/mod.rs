//! Core n-in-a-row game logic: board representation, marks, and a game state
//! machine with in-place transitions.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Position, MAX_DIMENSION};
pub use player::Mark;
pub use state::{GameOutcome, GameState, Scoreboard};
