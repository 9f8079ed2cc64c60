use std::fmt;

use super::player::Player;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Length of a winning run.
const RUN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    /// The player owning this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Player::Red),
            Cell::Yellow => Some(Player::Yellow),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }
}

/// Raw 6x7 grid. Row 0 is the top, row 5 is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

/// Row/column steps for the four alignment directions, in scan priority:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Number of pieces stacked in `col`, 0 for columns off the board.
    pub fn height(&self, col: usize) -> usize {
        self.cells
            .iter()
            .filter(|row| row.get(col).is_some_and(|&cell| cell != Cell::Empty))
            .count()
    }

    pub fn heights(&self) -> [usize; COLS] {
        let mut heights = [0; COLS];
        for (col, h) in heights.iter_mut().enumerate() {
            *h = self.height(col);
        }
        heights
    }

    /// Total number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    /// Drop a piece in a column, returns the row where it landed.
    /// Returns `None` when the column is out of range or full.
    pub(crate) fn drop_piece(&mut self, col: usize, cell: Cell) -> Option<usize> {
        if self.is_column_full(col) {
            return None;
        }

        // Find the lowest empty row in this column
        let row = (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][col] == Cell::Empty)?;
        self.cells[row][col] = cell;
        Some(row)
    }

    /// Scan every occupied cell row-major and report the first player owning
    /// four aligned cells starting there.
    pub fn winner(&self) -> Option<Player> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let cell = self.cells[row][col];
                let Some(player) = cell.owner() else {
                    continue;
                };
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.run_from(row, col, dr, dc, cell))
                {
                    return Some(player);
                }
            }
        }
        None
    }

    /// True if the `RUN` cells starting at (row, col) along (dr, dc) all hold `cell`.
    fn run_from(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> bool {
        (0..RUN as isize).all(|i| {
            let r = row as isize + dr * i;
            let c = col as isize + dc * i;
            (0..ROWS as isize).contains(&r)
                && (0..COLS as isize).contains(&c)
                && self.cells[r as usize][c as usize] == cell
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        let footer: String = (0..COLS).map(|c| char::from(b'0' + c as u8)).collect();
        write!(f, "{footer}")
    }
}
