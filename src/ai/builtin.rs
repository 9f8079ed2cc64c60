use std::fmt;
use std::str::FromStr;

use super::greedy::GreedyOpponent;
use super::opponent::{FirstLegal, FixedColumn, Opponent};
use super::random::RandomOpponent;
use crate::game::{GameState, COLS};

/// Textual choice of a built-in opponent, as written in config files and on
/// the command line: `fixed:N`, `first`, `random` or `greedy`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OpponentSpec {
    Fixed(usize),
    FirstLegal,
    Random,
    #[default]
    Greedy,
}

impl OpponentSpec {
    /// Instantiate the policy. `seed` only affects `random`.
    pub fn build(self, seed: Option<u64>) -> BuiltinOpponent {
        match self {
            OpponentSpec::Fixed(col) => BuiltinOpponent::Fixed(FixedColumn(col)),
            OpponentSpec::FirstLegal => BuiltinOpponent::FirstLegal(FirstLegal),
            OpponentSpec::Random => BuiltinOpponent::Random(match seed {
                Some(seed) => RandomOpponent::seeded(seed),
                None => RandomOpponent::new(),
            }),
            OpponentSpec::Greedy => BuiltinOpponent::Greedy(GreedyOpponent),
        }
    }
}

impl fmt::Display for OpponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentSpec::Fixed(col) => write!(f, "fixed:{col}"),
            OpponentSpec::FirstLegal => f.write_str("first"),
            OpponentSpec::Random => f.write_str("random"),
            OpponentSpec::Greedy => f.write_str("greedy"),
        }
    }
}

impl FromStr for OpponentSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        if let Some(col) = s.strip_prefix("fixed:") {
            let col: usize = col
                .parse()
                .map_err(|_| format!("invalid fixed column '{col}'"))?;
            if col >= COLS {
                return Err(format!("fixed column {col} is off the board (0..{COLS})"));
            }
            return Ok(OpponentSpec::Fixed(col));
        }
        match s.as_str() {
            "first" | "first-legal" => Ok(OpponentSpec::FirstLegal),
            "random" => Ok(OpponentSpec::Random),
            "greedy" => Ok(OpponentSpec::Greedy),
            other => Err(format!(
                "unknown opponent '{other}' (expected fixed:N, first, random or greedy)"
            )),
        }
    }
}

impl TryFrom<String> for OpponentSpec {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OpponentSpec> for String {
    fn from(spec: OpponentSpec) -> Self {
        spec.to_string()
    }
}

/// Any of the bundled opponent policies.
pub enum BuiltinOpponent {
    Fixed(FixedColumn),
    FirstLegal(FirstLegal),
    Random(RandomOpponent),
    Greedy(GreedyOpponent),
}

impl Opponent for BuiltinOpponent {
    fn reply(&self, state: &GameState) -> usize {
        match self {
            BuiltinOpponent::Fixed(o) => o.reply(state),
            BuiltinOpponent::FirstLegal(o) => o.reply(state),
            BuiltinOpponent::Random(o) => o.reply(state),
            BuiltinOpponent::Greedy(o) => o.reply(state),
        }
    }

    fn name(&self) -> &str {
        match self {
            BuiltinOpponent::Fixed(o) => o.name(),
            BuiltinOpponent::FirstLegal(o) => o.name(),
            BuiltinOpponent::Random(o) => o.name(),
            BuiltinOpponent::Greedy(o) => o.name(),
        }
    }
}
