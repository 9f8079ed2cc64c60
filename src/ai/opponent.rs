use crate::game::GameState;

/// Policy that answers the favorable player's moves during lookahead.
///
/// Implementations should return a legal column whenever one exists. The
/// lookahead treats the opponent as untrusted: an illegal reply simply
/// prunes that branch.
pub trait Opponent {
    /// Column to play in `state`, where it is the opponent's turn.
    fn reply(&self, state: &GameState) -> usize;

    /// Return the policy's display name.
    fn name(&self) -> &str {
        "Custom"
    }
}

impl<F> Opponent for F
where
    F: Fn(&GameState) -> usize,
{
    fn reply(&self, state: &GameState) -> usize {
        self(state)
    }
}

/// Always plays the same column, legal or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedColumn(pub usize);

impl Opponent for FixedColumn {
    fn reply(&self, _state: &GameState) -> usize {
        self.0
    }

    fn name(&self) -> &str {
        "Fixed"
    }
}

/// Plays the lowest-numbered legal column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstLegal;

impl Opponent for FirstLegal {
    fn reply(&self, state: &GameState) -> usize {
        state.legal_columns().first().copied().unwrap_or(0)
    }

    fn name(&self) -> &str {
        "FirstLegal"
    }
}
