use log::{debug, trace};

use crate::error::SearchError;
use crate::game::{Board, Mark, Position};

use super::agent::Agent;
use super::heuristic::{Heuristic, LineHeuristic};

/// Search score. Positive favors the maximizing side.
pub type Score = i32;

/// Score of a win found at the root. Wins found deeper score one point less
/// per ply, losses symmetrically. Strictly larger than any heuristic score
/// on a board within `MAX_DIMENSION`.
pub const WIN_SCORE: Score = 1_000_000;

/// Window sentinel; `-INFINITY` is representable.
pub const INFINITY: Score = Score::MAX;

/// Default ply limit used when nothing else is configured.
pub const DEFAULT_DEPTH: u32 = 3;

/// Largest board (in cells) that may be searched without a depth limit.
pub const MAX_UNLIMITED_CELLS: usize = 16;

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Remaining plies handed to each root move; `None` searches to terminal
    /// states.
    pub max_depth: Option<u32>,
    /// Enable the `beta <= alpha` cutoff. Disabling it gives plain minimax.
    pub pruning: bool,
}

impl SearchConfig {
    pub fn unlimited() -> Self {
        SearchConfig {
            max_depth: None,
            pruning: true,
        }
    }

    pub fn with_depth(depth: u32) -> Self {
        SearchConfig {
            max_depth: Some(depth),
            pruning: true,
        }
    }

    /// Reject an unlimited search on a board too large to finish.
    pub fn check_board_size(&self, rows: usize, cols: usize) -> Result<(), SearchError> {
        let cells = rows * cols;
        if self.max_depth.is_none() && cells > MAX_UNLIMITED_CELLS {
            return Err(SearchError::UnboundedSearch {
                cells,
                max: MAX_UNLIMITED_CELLS,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }
}

/// Node counters collected during one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub position: Position,
    pub score: Score,
    pub stats: SearchStats,
}

/// Pick a move for `ai` with the default line heuristic.
///
/// `max_depth: None` is only accepted on boards of at most
/// `MAX_UNLIMITED_CELLS` cells; larger boards fail with
/// `SearchError::UnboundedSearch`.
pub fn select_move(
    board: &mut Board,
    ai: Mark,
    human: Mark,
    max_depth: Option<u32>,
) -> Result<Position, SearchError> {
    let config = SearchConfig {
        max_depth,
        pruning: true,
    };
    search(board, ai, human, &config, &LineHeuristic).map(|result| result.position)
}

/// Run a full top-level search and report the chosen move with its score.
///
/// Every root move is evaluated with the full window and the first move with
/// the strictly greatest score wins. The board is explored in place and is
/// left exactly as it was passed in.
pub fn search(
    board: &mut Board,
    ai: Mark,
    human: Mark,
    config: &SearchConfig,
    heuristic: &dyn Heuristic,
) -> Result<SearchResult, SearchError> {
    if ai == human {
        return Err(SearchError::SameMarks(ai));
    }
    config.check_board_size(board.rows(), board.cols())?;

    let mut searcher = Searcher {
        board,
        ai,
        human,
        pruning: config.pruning,
        heuristic,
        stats: SearchStats::default(),
    };

    let mut best: Option<(Position, Score)> = None;
    let (rows, cols) = (searcher.board.rows(), searcher.board.cols());

    for idx in 0..rows * cols {
        let (row, col) = (idx / cols, idx % cols);
        if !searcher.board.is_empty(row, col)? {
            continue;
        }

        searcher.board.place(row, col, ai)?;
        let score = searcher.minimax(config.max_depth, 1, -INFINITY, INFINITY, false);
        debug_assert_eq!(searcher.board.get(row, col), Ok(ai.to_cell()));
        searcher.board.retract(row, col)?;
        let score = score?;

        trace!("root move ({row}, {col}) scored {score}");
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((Position::new(row, col), score));
        }
    }

    let (position, score) = best.ok_or(SearchError::NoLegalMove)?;
    let stats = searcher.stats;
    debug!(
        "{ai} plays {position} (score {score}, {} nodes, {} cutoffs)",
        stats.nodes, stats.cutoffs
    );

    Ok(SearchResult {
        position,
        score,
        stats,
    })
}

struct Searcher<'a> {
    board: &'a mut Board,
    ai: Mark,
    human: Mark,
    pruning: bool,
    heuristic: &'a dyn Heuristic,
    stats: SearchStats,
}

impl Searcher<'_> {
    /// `depth` is the remaining ply budget (`None` = unbounded), `ply` the
    /// number of marks placed since the root position.
    fn minimax(
        &mut self,
        depth: Option<u32>,
        ply: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Score, SearchError> {
        self.stats.nodes += 1;

        if self.board.has_win(self.ai) {
            return Ok(WIN_SCORE - ply as Score);
        }
        if self.board.has_win(self.human) {
            return Ok(-WIN_SCORE + ply as Score);
        }
        if self.board.is_full() {
            // The heuristic only applies to a bounded search; an exhaustive
            // search scores a full board as a draw.
            return Ok(match depth {
                Some(_) => self.heuristic.evaluate(&*self.board, self.ai),
                None => 0,
            });
        }
        if depth == Some(0) {
            return Ok(self.heuristic.evaluate(&*self.board, self.ai));
        }

        let child_depth = depth.map(|d| d - 1);
        let (mark, mut best) = if maximizing {
            (self.ai, -INFINITY)
        } else {
            (self.human, INFINITY)
        };
        let (rows, cols) = (self.board.rows(), self.board.cols());

        for idx in 0..rows * cols {
            let (row, col) = (idx / cols, idx % cols);
            if !self.board.is_empty(row, col)? {
                continue;
            }

            self.board.place(row, col, mark)?;
            let score = self.minimax(child_depth, ply + 1, alpha, beta, !maximizing);
            // Children restore every cell they touch, so our mark is still here.
            debug_assert_eq!(self.board.get(row, col), Ok(mark.to_cell()));
            self.board.retract(row, col)?;
            let score = score?;

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}

/// Minimax agent with alpha-beta pruning.
pub struct MinimaxAgent {
    config: SearchConfig,
    heuristic: Box<dyn Heuristic>,
    last_result: Option<SearchResult>,
}

impl MinimaxAgent {
    pub fn new(config: SearchConfig) -> Self {
        MinimaxAgent {
            config,
            heuristic: Box::new(LineHeuristic),
            last_result: None,
        }
    }

    pub fn with_heuristic(config: SearchConfig, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            config,
            heuristic,
            last_result: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Result of the most recent successful search
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last_result.as_ref()
    }
}

impl Agent for MinimaxAgent {
    fn select_move(&mut self, board: &mut Board, mark: Mark) -> Result<Position, SearchError> {
        let result = search(board, mark, mark.other(), &self.config, self.heuristic.as_ref())?;
        self.last_result = Some(result);
        Ok(result.position)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{GameOutcome, GameState};
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;
    use rand::SeedableRng;

    fn search_default(board: &mut Board, ai: Mark, config: SearchConfig) -> SearchResult {
        search(board, ai, ai.other(), &config, &LineHeuristic).unwrap()
    }

    /// Play a game between two agents; `x` moves first.
    fn play_out(x: &mut dyn Agent, o: &mut dyn Agent, board: Board) -> GameOutcome {
        let mut state = GameState::new(board, Mark::X);
        while !state.is_terminal() {
            let mark = state.current_player();
            let pos = if mark == Mark::X {
                x.select_move(state.board_mut(), mark)
            } else {
                o.select_move(state.board_mut(), mark)
            }
            .unwrap();
            state.play(pos.row, pos.col).unwrap();
        }
        state.outcome().unwrap()
    }

    // --- Terminal scoring ---

    #[test]
    fn takes_immediate_win() {
        let mut board = Board::from_rows(&["OO.", "XX.", "X.."], 3).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::unlimited());
        assert_eq!(result.position, Position::new(0, 2));
        assert_eq!(result.score, WIN_SCORE - 1);
    }

    #[test]
    fn prefers_win_over_block() {
        // both sides threaten; O to move should complete its own row
        let mut board = Board::from_rows(&["XXX.", "OOO.", "....", "...."], 4).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::with_depth(2));
        assert_eq!(result.position, Position::new(1, 3));
        assert_eq!(result.score, WIN_SCORE - 1);
    }

    #[test]
    fn blocks_opponent_win() {
        let mut board = Board::from_rows(&["XX.", ".O.", "..."], 3).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::unlimited());
        assert_eq!(result.position, Position::new(0, 2));
    }

    #[test]
    fn double_threat_scores_as_loss_in_two() {
        // X has two open threats (top row and left column); O cannot stop both
        let mut board = Board::from_rows(&["XX.", "XO.", "..O"], 3).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::unlimited());
        assert_eq!(result.score, -WIN_SCORE + 2);
    }

    #[test]
    fn depth_zero_scores_with_heuristic() {
        let mut board = Board::from_rows(&["O..", "...", "..."], 3).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::with_depth(0));
        // (0, 1) is the first cell that extends the corner into a pair
        assert_eq!(result.position, Position::new(0, 1));
        assert_eq!(result.score, 5);
    }

    #[test]
    fn ties_keep_first_move() {
        // a single mark never forms a pair, so every root move scores 0
        let mut board = Board::new(3, 3, 3).unwrap();
        let result = search_default(&mut board, Mark::O, SearchConfig::with_depth(0));
        assert_eq!(result.position, Position::new(0, 0));
        assert_eq!(result.score, 0);
    }

    // --- Errors ---

    #[test]
    fn full_board_has_no_legal_move() {
        let mut board = Board::from_rows(&["XOX", "XOO", "OXX"], 3).unwrap();
        assert_eq!(
            select_move(&mut board, Mark::O, Mark::X, Some(3)),
            Err(SearchError::NoLegalMove)
        );
    }

    #[test]
    fn rejects_identical_marks() {
        let mut board = Board::new(3, 3, 3).unwrap();
        assert_eq!(
            select_move(&mut board, Mark::X, Mark::X, None),
            Err(SearchError::SameMarks(Mark::X))
        );
    }

    #[test]
    fn rejects_unlimited_search_on_large_board() {
        let mut board = Board::new(5, 5, 4).unwrap();
        let before = board.clone();
        assert_eq!(
            select_move(&mut board, Mark::O, Mark::X, None),
            Err(SearchError::UnboundedSearch { cells: 25, max: 16 })
        );
        assert_eq!(board, before);
        // a 4x4 board is still small enough
        assert!(SearchConfig::unlimited().check_board_size(4, 4).is_ok());
        assert!(SearchConfig::with_depth(1).check_board_size(32, 32).is_ok());
    }

    // --- Mutation discipline ---

    #[test]
    fn search_leaves_board_unchanged() {
        let fixtures: [&[&str]; 3] = [
            &["...", "...", "..."],
            &["X..", ".O.", "..X"],
            &["XX...", ".O...", "..O..", ".....", "....."],
        ];
        for rows in fixtures {
            let k = rows.len().min(4);
            let mut board = Board::from_rows(rows, k).unwrap();
            let before = board.clone();
            let pos = select_move(&mut board, Mark::O, Mark::X, Some(2)).unwrap();
            assert_eq!(board, before);
            assert!(before.is_empty(pos.row, pos.col).unwrap());
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let mut board = Board::new(3, 3, 3).unwrap();
        let pruned = search_default(&mut board, Mark::O, SearchConfig::unlimited());
        let full = search_default(
            &mut board,
            Mark::O,
            SearchConfig {
                max_depth: None,
                pruning: false,
            },
        );
        assert_eq!(pruned.position, full.position);
        assert_eq!(pruned.score, full.score);
        assert_eq!(full.stats.cutoffs, 0);
        assert!(pruned.stats.cutoffs > 0);
        assert!(
            pruned.stats.nodes < full.stats.nodes,
            "pruned {} vs full {}",
            pruned.stats.nodes,
            full.stats.nodes
        );
    }

    #[test]
    fn alphabeta_matches_plain_minimax() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut checked = 0;

        while checked < 60 {
            let mut board = Board::new(3, 3, 3).unwrap();
            let moves = 1 + checked % 6;
            let mut mark = Mark::X;
            for _ in 0..moves {
                let cells: Vec<Position> = board.empty_cells().collect();
                let pos = *cells.choose(&mut rng).unwrap();
                board.place(pos.row, pos.col, mark).unwrap();
                mark = mark.other();
            }
            if board.has_win(Mark::X) || board.has_win(Mark::O) {
                continue;
            }

            for max_depth in [None, Some(2)] {
                let pruned = search_default(
                    &mut board,
                    mark,
                    SearchConfig {
                        max_depth,
                        pruning: true,
                    },
                );
                let full = search_default(
                    &mut board,
                    mark,
                    SearchConfig {
                        max_depth,
                        pruning: false,
                    },
                );
                assert_eq!(pruned.position, full.position, "board:\n{board}");
                assert_eq!(pruned.score, full.score, "board:\n{board}");
            }
            checked += 1;
        }
    }

    // --- Agent trait ---

    #[test]
    fn agent_records_last_result() {
        let mut agent = MinimaxAgent::new(SearchConfig::with_depth(1));
        assert!(agent.last_result().is_none());
        let mut board = Board::new(3, 3, 3).unwrap();
        let pos = agent.select_move(&mut board, Mark::X).unwrap();
        assert_eq!(agent.last_result().map(|r| r.position), Some(pos));
        assert_eq!(agent.name(), "Minimax");
    }

    #[test]
    fn optimal_self_play_is_a_draw() {
        let mut x = MinimaxAgent::new(SearchConfig::unlimited());
        let mut o = MinimaxAgent::new(SearchConfig::unlimited());
        let outcome = play_out(&mut x, &mut o, Board::new(3, 3, 3).unwrap());
        assert_eq!(outcome, GameOutcome::Draw);
    }

    #[test]
    fn never_loses_to_random_agent() {
        for seed in 0..10 {
            let mut minimax = MinimaxAgent::new(SearchConfig::unlimited());
            let mut random = RandomAgent::with_seed(seed);

            let outcome = play_out(&mut minimax, &mut random, Board::new(3, 3, 3).unwrap());
            assert_ne!(outcome, GameOutcome::Winner(Mark::O), "seed {seed}, minimax first");

            let outcome = play_out(&mut random, &mut minimax, Board::new(3, 3, 3).unwrap());
            assert_ne!(outcome, GameOutcome::Winner(Mark::X), "seed {seed}, minimax second");
        }
    }
}
