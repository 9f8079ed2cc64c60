use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::opponent::Opponent;
use crate::game::GameState;

/// An opponent that replies uniformly at random among legal columns.
///
/// The generator sits behind a `RefCell` so the policy can be queried through
/// `&self` from inside the search's successor function.
pub struct RandomOpponent {
    rng: RefCell<StdRng>,
}

impl RandomOpponent {
    pub fn new() -> Self {
        RandomOpponent {
            rng: RefCell::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible replies for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomOpponent {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl Opponent for RandomOpponent {
    fn reply(&self, state: &GameState) -> usize {
        let actions = state.legal_columns();
        if actions.is_empty() {
            return 0;
        }
        let idx = self.rng.borrow_mut().random_range(0..actions.len());
        actions[idx]
    }

    fn name(&self) -> &str {
        "Random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_opponent_selects_legal_column() {
        let opponent = RandomOpponent::new();
        let state = GameState::from_moves(&[3, 3, 3, 3, 3, 3]).unwrap();
        let legal = state.legal_columns();

        for _ in 0..100 {
            let action = opponent.reply(&state);
            assert!(legal.contains(&action), "Action {} is not legal", action);
        }
    }

    #[test]
    fn random_opponent_plays_full_game() {
        let first = RandomOpponent::seeded(7);
        let second = RandomOpponent::seeded(11);
        let mut state = GameState::initial();

        let mut turn = 0;
        while !state.is_final() {
            let action = if turn % 2 == 0 {
                first.reply(&state)
            } else {
                second.reply(&state)
            };
            state = state.transition(action).unwrap();
            turn += 1;
        }

        assert!(state.is_final());
    }

    #[test]
    fn seeded_opponents_agree() {
        let a = RandomOpponent::seeded(42);
        let b = RandomOpponent::seeded(42);
        let state = GameState::initial();
        let replies_a: Vec<usize> = (0..20).map(|_| a.reply(&state)).collect();
        let replies_b: Vec<usize> = (0..20).map(|_| b.reply(&state)).collect();
        assert_eq!(replies_a, replies_b);
    }

    #[test]
    fn random_opponent_name() {
        assert_eq!(RandomOpponent::new().name(), "Random");
    }
}
