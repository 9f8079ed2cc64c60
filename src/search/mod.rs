//! Pathless tree search: the problem contract, exploration order, and the
//! step-wise engine.
//!
//! A search never records how it reached a node. Problems therefore carry
//! everything they need (partial assignment, move history, ...) inside the
//! node itself.

mod engine;

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub use engine::{SearchOutcome, SearchStats, TreeSearch};

/// Capabilities a problem exposes to [`TreeSearch`].
pub trait SearchProblem {
    type Node: Clone;

    /// Children reachable from `node` in one expansion, in exploration order.
    fn successors(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is an acceptable complete solution.
    fn is_goal(&self, node: &Self::Node) -> bool;

    /// When false, the search stops at the first goal it meets. When true,
    /// the search keeps going and retains the best goal under
    /// [`is_better`](Self::is_better).
    fn ranks_goals(&self) -> bool {
        false
    }

    /// Strict "better-than" between two goal nodes.
    fn is_better(&self, _candidate: &Self::Node, _incumbent: &Self::Node) -> bool {
        false
    }
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type Node = P::Node;

    fn successors(&self, node: &Self::Node) -> Vec<Self::Node> {
        (**self).successors(node)
    }

    fn is_goal(&self, node: &Self::Node) -> bool {
        (**self).is_goal(node)
    }

    fn ranks_goals(&self) -> bool {
        (**self).ranks_goals()
    }

    fn is_better(&self, candidate: &Self::Node, incumbent: &Self::Node) -> bool {
        (**self).is_better(candidate, incumbent)
    }
}

/// Frontier discipline.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
pub enum SearchOrder {
    /// FIFO: children queue behind every pending node.
    #[serde(rename = "bfs", alias = "breadth_first")]
    #[value(name = "bfs", alias = "breadth-first")]
    BreadthFirst,
    /// LIFO: children are explored before their pending siblings.
    #[serde(rename = "dfs", alias = "depth_first")]
    #[value(name = "dfs", alias = "depth-first")]
    DepthFirst,
}

impl fmt::Display for SearchOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchOrder::BreadthFirst => "bfs",
            SearchOrder::DepthFirst => "dfs",
        })
    }
}

impl FromStr for SearchOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" | "breadth_first" => Ok(SearchOrder::BreadthFirst),
            "dfs" | "depth-first" | "depth_first" => Ok(SearchOrder::DepthFirst),
            other => Err(format!("unknown search order '{other}' (expected 'bfs' or 'dfs')")),
        }
    }
}

/// A [`SearchProblem`] assembled from closures.
///
/// ```
/// use pathless_search::search::{FnProblem, SearchOrder, TreeSearch};
///
/// // Count up from 0; any value above 3 is a goal.
/// let problem = FnProblem::new(|n: &u32| vec![n + 1, n + 2], |n: &u32| *n > 3);
/// let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
/// search.run(None);
/// assert_eq!(search.best(), Some(&4));
/// ```
pub struct FnProblem<N, S, G, B = fn(&N, &N) -> bool> {
    successors: S,
    goal: G,
    better: Option<B>,
    _node: PhantomData<fn() -> N>,
}

impl<N, S, G> FnProblem<N, S, G>
where
    S: Fn(&N) -> Vec<N>,
    G: Fn(&N) -> bool,
{
    pub fn new(successors: S, goal: G) -> Self {
        FnProblem {
            successors,
            goal,
            better: None,
            _node: PhantomData,
        }
    }
}

impl<N, S, G, B> FnProblem<N, S, G, B> {
    /// Rank goals with `better` instead of stopping at the first one.
    pub fn with_better<B2>(self, better: B2) -> FnProblem<N, S, G, B2>
    where
        B2: Fn(&N, &N) -> bool,
    {
        FnProblem {
            successors: self.successors,
            goal: self.goal,
            better: Some(better),
            _node: PhantomData,
        }
    }
}

impl<N, S, G, B> SearchProblem for FnProblem<N, S, G, B>
where
    N: Clone,
    S: Fn(&N) -> Vec<N>,
    G: Fn(&N) -> bool,
    B: Fn(&N, &N) -> bool,
{
    type Node = N;

    fn successors(&self, node: &N) -> Vec<N> {
        (self.successors)(node)
    }

    fn is_goal(&self, node: &N) -> bool {
        (self.goal)(node)
    }

    fn ranks_goals(&self) -> bool {
        self.better.is_some()
    }

    fn is_better(&self, candidate: &N, incumbent: &N) -> bool {
        self.better
            .as_ref()
            .is_some_and(|better| better(candidate, incumbent))
    }
}
