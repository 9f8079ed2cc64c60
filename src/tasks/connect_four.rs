use tracing::trace;

use crate::ai::Opponent;
use crate::error::TaskError;
use crate::game::{GameState, Player};
use crate::search::{SearchOrder, SearchProblem};

use super::Task;

/// A lookahead position: the board after the opponent's reply, plus the
/// favorable player's moves that led there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookaheadNode {
    pub state: GameState,
    pub moves: Vec<usize>,
}

/// Search for a move sequence that wins against a fixed opponent policy.
///
/// Each expansion tries every legal column for the favorable player and
/// answers it with the opponent's reply, so a node always has the favorable
/// player to move unless the game is over.
pub struct ConnectFourTask<O> {
    opponent: O,
    favorable: Player,
    start: GameState,
}

impl<O: Opponent> ConnectFourTask<O> {
    /// Play from the empty board. When `favorable` is Yellow the opponent
    /// opens, and an illegal opening is reported as an error.
    pub fn new(opponent: O, favorable: Player) -> Result<Self, TaskError> {
        let mut start = GameState::initial();
        if favorable == Player::Yellow {
            let column = opponent.reply(&start);
            start = start
                .transition(column)
                .map_err(|_| TaskError::IllegalOpening { column })?;
        }
        Ok(ConnectFourTask {
            opponent,
            favorable,
            start,
        })
    }

    /// Play from an arbitrary position where the favorable player is to move.
    pub fn from_position(opponent: O, state: GameState) -> Self {
        ConnectFourTask {
            opponent,
            favorable: state.current_player(),
            start: state,
        }
    }

    pub fn favorable(&self) -> Player {
        self.favorable
    }

    pub fn start(&self) -> &GameState {
        &self.start
    }

    pub fn opponent(&self) -> &O {
        &self.opponent
    }
}

impl<O: Opponent> SearchProblem for ConnectFourTask<O> {
    type Node = LookaheadNode;

    fn successors(&self, node: &LookaheadNode) -> Vec<LookaheadNode> {
        if node.state.is_final() {
            return Vec::new();
        }

        let mut children = Vec::new();
        for column in node.state.legal_columns() {
            let Ok(after_move) = node.state.transition(column) else {
                continue;
            };
            let mut moves = node.moves.clone();
            moves.push(column);

            if after_move.is_final() {
                children.push(LookaheadNode {
                    state: after_move,
                    moves,
                });
                continue;
            }

            let reply = self.opponent.reply(&after_move);
            match after_move.transition(reply) {
                Ok(state) => children.push(LookaheadNode { state, moves }),
                Err(err) => trace!(%err, opponent = self.opponent.name(), "skipping branch"),
            }
        }
        children
    }

    fn is_goal(&self, node: &LookaheadNode) -> bool {
        node.state.winner() == Some(self.favorable)
    }
}

impl<O: Opponent> Task for ConnectFourTask<O> {
    type Answer = Vec<usize>;

    fn root(&self) -> LookaheadNode {
        LookaheadNode {
            state: self.start,
            moves: Vec::new(),
        }
    }

    /// The favorable player's columns, empty when no win was found.
    fn decode(&self, best: Option<&LookaheadNode>) -> Vec<usize> {
        best.map(|node| node.moves.clone()).unwrap_or_default()
    }

    fn default_order(&self) -> SearchOrder {
        SearchOrder::BreadthFirst
    }
}
