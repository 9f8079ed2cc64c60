use std::fmt;

use super::board::{Board, COLS};
use super::player::Player;
use crate::error::MoveError;

/// Immutable connect-four position.
///
/// The side to move is derived from the number of occupied cells (even means
/// Red), so a state is fully described by its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameState {
    board: Board,
}

impl GameState {
    /// Create initial game state
    pub fn initial() -> Self {
        GameState {
            board: Board::new(),
        }
    }

    /// Replay a sequence of columns from the initial position.
    pub fn from_moves(columns: &[usize]) -> Result<Self, MoveError> {
        columns
            .iter()
            .try_fold(GameState::initial(), |state, &col| state.transition(col))
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player who makes the next move.
    pub fn current_player(&self) -> Player {
        if self.board.occupied() % 2 == 0 {
            Player::Red
        } else {
            Player::Yellow
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// A state is final once somebody has won or no column is free.
    pub fn is_final(&self) -> bool {
        self.winner().is_some() || self.board.is_full()
    }

    /// True iff `column` is on the board, not full, and the game is still open.
    pub fn is_applicable(&self, column: usize) -> bool {
        column < COLS && !self.board.is_column_full(column) && self.winner().is_none()
    }

    /// Get list of legal columns (ascending)
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.is_applicable(col)).collect()
    }

    pub fn heights(&self) -> [usize; COLS] {
        self.board.heights()
    }

    /// Drop the side-to-move's piece in `column` and return the new state.
    /// `self` is left untouched.
    pub fn transition(&self, column: usize) -> Result<GameState, MoveError> {
        if !self.is_applicable(column) {
            return Err(MoveError::InvalidMove { column });
        }

        let mut board = self.board;
        board
            .drop_piece(column, self.current_player().to_cell())
            .ok_or(MoveError::InvalidMove { column })?;

        Ok(GameState { board })
    }
}

impl From<Board> for GameState {
    fn from(board: Board) -> Self {
        GameState { board }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.board.fmt(f)
    }
}
