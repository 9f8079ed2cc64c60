//! Problem encodings for the pathless search: each task supplies a root node,
//! the search callbacks, and a decoder back to its domain answer.

mod assignment;
mod connect_four;
mod jobshop;
mod sudoku;
mod tour;

use tracing::debug;

use crate::search::{SearchOrder, SearchOutcome, SearchProblem, SearchStats, TreeSearch};

pub use assignment::{AssignmentProblem, AssignmentTask};
pub use connect_four::{ConnectFourTask, LookaheadNode};
pub use jobshop::JobShopTask;
pub use sudoku::{SudokuGrid, SudokuTask};
pub use tour::{Tour, TourTask};

/// A search problem that knows where to start and how to read its solution.
pub trait Task: SearchProblem {
    type Answer;

    fn root(&self) -> Self::Node;

    /// Map the best node (or its absence) to the domain answer.
    fn decode(&self, best: Option<&Self::Node>) -> Self::Answer;

    fn default_order(&self) -> SearchOrder {
        SearchOrder::BreadthFirst
    }

    /// Wrap the task in a fresh engine rooted at [`root`](Self::root).
    fn into_search(self, order: SearchOrder) -> TreeSearch<Self>
    where
        Self: Sized,
    {
        let root = self.root();
        TreeSearch::new(self, root, order)
    }
}

/// Decoded answer plus how the search got there.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<A> {
    pub answer: A,
    /// Whether the answer was decoded from a goal node.
    pub found: bool,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

/// Run `task` to completion (or `max_steps` expansions) and decode the result.
///
/// A root that already satisfies the goal is returned without searching,
/// since the engine only tests children.
pub fn solve<T: Task>(task: T, order: SearchOrder, max_steps: Option<usize>) -> Solution<T::Answer> {
    let root = task.root();
    if task.is_goal(&root) {
        debug!("root node is already a goal");
        return Solution {
            answer: task.decode(Some(&root)),
            found: true,
            outcome: SearchOutcome::Solved,
            stats: SearchStats::default(),
        };
    }

    let mut search = TreeSearch::new(task, root, order);
    let outcome = search.run(max_steps);
    Solution {
        answer: search.problem().decode(search.best()),
        found: search.best().is_some(),
        outcome,
        stats: search.stats(),
    }
}
