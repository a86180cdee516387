use std::path::Path;

use crate::ai::{MonteCarloConfig, SearchConfig};
use crate::error::ConfigError;
use crate::game::{Board, Mark, MAX_DIMENSION};

/// Board geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 5,
            cols: 5,
            win_length: 4,
        }
    }
}

impl BoardConfig {
    /// Build an empty board with this geometry
    pub fn build(&self) -> Result<Board, ConfigError> {
        Board::new(self.rows, self.cols, self.win_length)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Who sits opposite the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Human,
    Random,
    Minimax,
    #[serde(rename = "monte_carlo")]
    MonteCarlo,
}

impl std::str::FromStr for Opponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Opponent::Human),
            "random" => Ok(Opponent::Random),
            "minimax" => Ok(Opponent::Minimax),
            "monte_carlo" | "montecarlo" | "mc" => Ok(Opponent::MonteCarlo),
            other => Err(format!(
                "unknown opponent '{other}' (expected human, random, minimax or monte_carlo)"
            )),
        }
    }
}

/// Session settings for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlayConfig {
    /// Mark used by the human (or the non-engine side); the engine takes the other
    pub human_mark: Mark,
    pub human_first: bool,
    pub opponent: Opponent,
}

impl Default for PlayConfig {
    fn default() -> Self {
        PlayConfig {
            human_mark: Mark::X,
            human_first: true,
            opponent: Opponent::Human,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub monte_carlo: MonteCarloConfig,
    pub play: PlayConfig,
}

impl AppConfig {
    /// Classic 3x3 tic-tac-toe searched to the end of the game.
    pub fn classic() -> Self {
        AppConfig {
            board: BoardConfig {
                rows: 3,
                cols: 3,
                win_length: 3,
            },
            search: SearchConfig::unlimited(),
            monte_carlo: MonteCarloConfig::default(),
            play: PlayConfig::default(),
        }
    }

    /// 5x5 board, four in a row, three plies of lookahead.
    pub fn five_by_five() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            search: SearchConfig::with_depth(3),
            monte_carlo: MonteCarloConfig::default(),
            play: PlayConfig::default(),
        }
    }

    /// Look up a named preset.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "classic" | "3x3" => Some(Self::classic()),
            "five" | "5x5" => Some(Self::five_by_five()),
            _ => None,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let BoardConfig {
            rows,
            cols,
            win_length,
        } = self.board;

        if rows == 0 || rows > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.rows must be in 1..={MAX_DIMENSION}"
            )));
        }
        if cols == 0 || cols > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.cols must be in 1..={MAX_DIMENSION}"
            )));
        }
        if win_length == 0 {
            return Err(ConfigError::Validation(
                "board.win_length must be > 0".into(),
            ));
        }
        if win_length > rows.max(cols) {
            return Err(ConfigError::Validation(
                "board.win_length must be <= max(board.rows, board.cols)".into(),
            ));
        }

        check_search_bounds(&self.search, rows, cols)?;

        if self.monte_carlo.simulations == 0 {
            return Err(ConfigError::Validation(
                "monte_carlo.simulations must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}

/// Refuse an exhaustive search on a board too large to finish it. Shared by
/// [`AppConfig::validate`] and callers that build boards outside the config.
pub fn check_search_bounds(
    search: &SearchConfig,
    rows: usize,
    cols: usize,
) -> Result<(), ConfigError> {
    search
        .check_board_size(rows, cols)
        .map_err(|e| ConfigError::Validation(format!("search.max_depth: {e}")))
}
