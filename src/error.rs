use std::path::PathBuf;

use crate::game::Mark;

/// Errors raised by board queries and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    /// A retract without a matching place. Inside the search this means the
    /// place/retract pairing is broken.
    #[error("cell ({row}, {col}) is already empty")]
    CellAlreadyEmpty { row: usize, col: usize },

    #[error("invalid board dimensions {rows}x{cols} (each side must be 1..=32)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("win length {win_length} does not fit a {rows}x{cols} board")]
    InvalidWinLength {
        win_length: usize,
        rows: usize,
        cols: usize,
    },

    #[error("failed to parse board: {0}")]
    Parse(String),
}

/// Errors that can occur while searching for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no legal move: the board is full")]
    NoLegalMove,

    #[error("both sides cannot play {0}")]
    SameMarks(Mark),

    #[error("unlimited search needs a board of at most {max} cells, got {cells}")]
    UnboundedSearch { cells: usize, max: usize },

    #[error("board error during search: {0}")]
    Board(#[from] BoardError),
}

/// Errors that can occur while playing a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
