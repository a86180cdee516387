use super::{Board, Mark, Position};
use crate::error::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
}

/// A game in progress: the board, the side to move and the result once the
/// game has ended.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current: Mark,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Start a game on `board` with `first` to move
    pub fn new(board: Board, first: Mark) -> Self {
        let mut state = GameState {
            board,
            current: first,
            outcome: None,
        };
        state.update_outcome();
        state
    }

    /// Get the side to move
    pub fn current_player(&self) -> Mark {
        self.current
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for engines that explore by place/retract.
    /// Callers must leave the board as they found it.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Cells the side to move may play
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    /// Place the current player's mark, settle the outcome and pass the turn
    pub fn play(&mut self, row: usize, col: usize) -> Result<(), GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }

        self.board.place(row, col, self.current)?;
        self.update_outcome();
        self.current = self.current.other();

        Ok(())
    }

    /// Start a new round on the same board geometry
    pub fn reset(&mut self, first: Mark) {
        self.board.clear();
        self.current = first;
        self.outcome = None;
    }

    fn update_outcome(&mut self) {
        self.outcome = if self.board.has_win(Mark::X) {
            Some(GameOutcome::Winner(Mark::X))
        } else if self.board.has_win(Mark::O) {
            Some(GameOutcome::Winner(Mark::O))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };
    }
}

/// Running totals across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(Mark::X) => self.x_wins += 1,
            GameOutcome::Winner(Mark::O) => self.o_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }

    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;
    use crate::game::Cell;

    fn classic() -> GameState {
        GameState::new(Board::new(3, 3, 3).unwrap(), Mark::X)
    }

    #[test]
    fn test_initial_state() {
        let state = classic();
        assert_eq!(state.current_player(), Mark::X);
        assert!(!state.is_terminal());
        assert_eq!(state.legal_moves().len(), 9);
    }

    #[test]
    fn test_play_passes_turn() {
        let mut state = classic();
        state.play(1, 1).unwrap();
        assert_eq!(state.current_player(), Mark::O);
        assert_eq!(state.board().get(1, 1).unwrap(), Cell::X);
    }

    #[test]
    fn test_play_occupied_keeps_turn() {
        let mut state = classic();
        state.play(0, 0).unwrap();
        assert_eq!(
            state.play(0, 0),
            Err(GameError::Board(BoardError::CellOccupied { row: 0, col: 0 }))
        );
        assert_eq!(state.current_player(), Mark::O);
    }

    #[test]
    fn test_win_detection() {
        let mut state = classic();
        // X: top row, O: middle row
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            state.play(row, col).unwrap();
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Mark::X)));
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.play(2, 2), Err(GameError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut state = classic();
        // X O X / X O O / O X X
        for (row, col) in [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (1, 2),
            (2, 1),
            (2, 0),
            (2, 2),
        ] {
            state.play(row, col).unwrap();
        }
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_reset() {
        let mut state = classic();
        state.play(0, 0).unwrap();
        state.reset(Mark::O);
        assert_eq!(state.board().filled(), 0);
        assert_eq!(state.current_player(), Mark::O);
        assert!(!state.is_terminal());
    }

    #[test]
    fn test_scoreboard() {
        let mut score = Scoreboard::default();
        score.record(GameOutcome::Winner(Mark::O));
        score.record(GameOutcome::Winner(Mark::O));
        score.record(GameOutcome::Draw);
        assert_eq!(score.wins(Mark::O), 2);
        assert_eq!(score.wins(Mark::X), 0);
        assert_eq!(score.games(), 3);
    }
}
