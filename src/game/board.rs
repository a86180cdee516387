use std::fmt;

use super::player::Mark;
use crate::error::BoardError;

/// Largest supported number of rows or columns.
pub const MAX_DIMENSION: usize = 32;

/// Direction vectors scanned for runs: right, down, down-right, down-left.
/// The remaining four directions are mirrors of these.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

/// A cell coordinate, row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Rectangular n-in-a-row board.
///
/// Cells are stored row-major. The search engine explores moves by placing
/// and retracting marks on a single instance, so the board is never cloned
/// inside the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    win_length: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize, win_length: usize) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        if win_length == 0 || win_length > rows.max(cols) {
            return Err(BoardError::InvalidWinLength {
                win_length,
                rows,
                cols,
            });
        }

        Ok(Board {
            rows,
            cols,
            win_length,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// Build a board from one string per row.
    ///
    /// `X`/`x` and `O`/`o` are marks; `.`, `-`, `_` and space are empty.
    pub fn from_rows(rows: &[&str], win_length: usize) -> Result<Self, BoardError> {
        let cols = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut board = Board::new(rows.len(), cols, win_length)?;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(BoardError::Parse(format!(
                    "row {row} has {found} cells, expected {cols}"
                )));
            }
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'X' | 'x' => Cell::X,
                    'O' | 'o' => Cell::O,
                    '.' | '-' | '_' | ' ' => Cell::Empty,
                    other => {
                        return Err(BoardError::Parse(format!(
                            "unexpected symbol '{other}' at ({row}, {col})"
                        )))
                    }
                };
                let idx = board.index(row, col);
                board.cells[idx] = cell;
            }
        }

        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row < self.rows && col < self.cols {
            Ok(self.index(row, col))
        } else {
            Err(BoardError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        let idx = self.check_bounds(row, col)?;
        Ok(self.cells[idx])
    }

    /// Check whether a cell is empty; out-of-range coordinates are an error
    pub fn is_empty(&self, row: usize, col: usize) -> Result<bool, BoardError> {
        Ok(self.get(row, col)? == Cell::Empty)
    }

    /// Put a mark on an empty cell
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> Result<(), BoardError> {
        let idx = self.check_bounds(row, col)?;
        if self.cells[idx] != Cell::Empty {
            return Err(BoardError::CellOccupied { row, col });
        }
        self.cells[idx] = mark.to_cell();
        Ok(())
    }

    /// Clear a previously placed mark. Used to undo exploratory moves.
    pub fn retract(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        let idx = self.check_bounds(row, col)?;
        if self.cells[idx] == Cell::Empty {
            return Err(BoardError::CellAlreadyEmpty { row, col });
        }
        self.cells[idx] = Cell::Empty;
        Ok(())
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Cell::Empty)
    }

    /// Number of non-empty cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == Cell::Empty)
            .map(|(idx, _)| Position::new(idx / self.cols, idx % self.cols))
    }

    /// Check if `mark` owns a run of the board's win length
    pub fn has_win(&self, mark: Mark) -> bool {
        self.has_run(mark, self.win_length)
    }

    /// Check if `mark` owns `len` contiguous cells along a row, column or diagonal
    pub fn has_run(&self, mark: Mark, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let cell = mark.to_cell();
        (0..self.rows).any(|row| {
            (0..self.cols).any(|col| {
                DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.run_at(row, col, dr, dc, len, cell))
            })
        })
    }

    /// Count every length-`len` window fully owned by `mark`.
    ///
    /// Each window is counted once, from its first cell along one of the
    /// four direction vectors. Overlapping windows are counted separately.
    pub fn count_runs(&self, mark: Mark, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let cell = mark.to_cell();
        let mut count = 0;
        for row in 0..self.rows {
            for col in 0..self.cols {
                for &(dr, dc) in &DIRECTIONS {
                    if self.run_at(row, col, dr, dc, len, cell) {
                        count += 1;
                    }
                }
            }
        }
        count
    }

    /// Walk `len` cells from (row, col) along (dr, dc); every cell must be
    /// in bounds and equal to `cell`.
    fn run_at(&self, row: usize, col: usize, dr: isize, dc: isize, len: usize, cell: Cell) -> bool {
        let last = len as isize - 1;
        let end_row = row as isize + dr * last;
        let end_col = col as isize + dc * last;
        if end_row < 0
            || end_col < 0
            || end_row >= self.rows as isize
            || end_col >= self.cols as isize
        {
            return false;
        }

        (0..len as isize).all(|i| {
            let r = (row as isize + dr * i) as usize;
            let c = (col as isize + dc * i) as usize;
            self.cells[self.index(r, c)] == cell
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.cols {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;
        for row in 0..self.rows {
            write!(f, "{row:>3}")?;
            for col in 0..self.cols {
                write!(f, "{:>3}", self.cells[self.index(row, col)].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
