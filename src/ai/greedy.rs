use crate::game::{GameState, COLS};

use super::opponent::Opponent;

/// Column ordering: center-first.
const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// One-ply opponent: completes its own four if it can, otherwise blocks an
/// immediate four of the other side, otherwise plays the most central legal
/// column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedyOpponent;

impl GreedyOpponent {
    /// First column (center-out) where `state`'s mover would win at once.
    fn winning_column(state: &GameState) -> Option<usize> {
        let mover = state.current_player();
        MOVE_ORDER.into_iter().find(|&col| {
            state
                .transition(col)
                .is_ok_and(|next| next.winner() == Some(mover))
        })
    }

    /// First column (center-out) where the waiting side would win if it
    /// could move now.
    fn threatened_column(state: &GameState) -> Option<usize> {
        let waiting = state.current_player().other();
        MOVE_ORDER.into_iter().find(|&col| {
            if !state.is_applicable(col) {
                return false;
            }
            let mut board = *state.board();
            board.drop_piece(col, waiting.to_cell()).is_some() && board.winner() == Some(waiting)
        })
    }
}

impl Opponent for GreedyOpponent {
    fn reply(&self, state: &GameState) -> usize {
        Self::winning_column(state)
            .or_else(|| Self::threatened_column(state))
            .or_else(|| MOVE_ORDER.into_iter().find(|&col| state.is_applicable(col)))
            .unwrap_or(0)
    }

    fn name(&self) -> &str {
        "Greedy"
    }
}
