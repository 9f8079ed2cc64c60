mod builtin;
mod greedy;
mod opponent;
mod random;

pub use builtin::{BuiltinOpponent, OpponentSpec};
pub use greedy::GreedyOpponent;
pub use opponent::{FirstLegal, FixedColumn, Opponent};
pub use random::RandomOpponent;
