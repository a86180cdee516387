//! # N in a Row
//!
//! An n-in-a-row board game (tic-tac-toe and its larger variants) with a
//! minimax opponent that uses alpha-beta pruning and a line-counting
//! heuristic for depth-limited searches.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, marks, game state
//! - [`ai`]: Agent trait, minimax / alpha-beta search, heuristic evaluator
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types
//! - [`logging`]: Logger setup for the binary

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
