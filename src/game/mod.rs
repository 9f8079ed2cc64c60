//! Connect Four position logic: board grid, player types, and the immutable
//! game state consumed by the lookahead encoder.

mod board;
mod player;
mod state;

pub use crate::error::MoveError;
pub use board::{Board, Cell, COLS, ROWS};
pub use player::Player;
pub use state::GameState;
