use crate::error::SearchError;
use crate::game::{Board, Mark, Position};

/// Universal interface for move selectors.
pub trait Agent {
    /// Choose a cell for `mark` on `board`.
    ///
    /// Implementations may explore by placing and retracting marks but must
    /// return the board unchanged.
    fn select_move(&mut self, board: &mut Board, mark: Mark) -> Result<Position, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
