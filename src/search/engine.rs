use std::collections::VecDeque;

use tracing::{debug, info, trace};

use super::{SearchOrder, SearchProblem};

/// Counters accumulated since the last [`TreeSearch::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes removed from the frontier and expanded.
    pub expanded: usize,
    /// Children produced by all expansions.
    pub generated: usize,
    /// Children that satisfied the goal predicate.
    pub goals: usize,
    /// Times the best node was replaced.
    pub improvements: usize,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

/// Why [`TreeSearch::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A first-goal search found its goal and stopped.
    Solved,
    /// The frontier ran dry; `best` holds the optimum if any goal exists.
    Exhausted,
    /// The step budget ran out while nodes were still pending.
    StepLimit,
}

/// Incremental pathless tree search.
///
/// The frontier is a deque whose front is always the next node to expand.
/// Breadth-first appends children at the back; depth-first pushes each
/// expansion's children onto the front as one block, so the first child
/// returned by the problem is the next node expanded.
pub struct TreeSearch<P: SearchProblem> {
    problem: P,
    root: P::Node,
    order: SearchOrder,
    frontier: VecDeque<P::Node>,
    best: Option<P::Node>,
    stats: SearchStats,
}

impl<P: SearchProblem> TreeSearch<P> {
    pub fn new(problem: P, root: P::Node, order: SearchOrder) -> Self {
        let mut search = TreeSearch {
            problem,
            root,
            order,
            frontier: VecDeque::new(),
            best: None,
            stats: SearchStats::default(),
        };
        search.reset();
        search
    }

    /// Restart from the root, forgetting the best node and statistics.
    pub fn reset(&mut self) {
        self.frontier.clear();
        self.frontier.push_back(self.root.clone());
        self.best = None;
        self.stats = SearchStats {
            peak_frontier: 1,
            ..SearchStats::default()
        };
    }

    /// Expand one node. Returns true iff the best node changed.
    pub fn step(&mut self) -> bool {
        let Some(node) = self.frontier.pop_front() else {
            return false;
        };

        let children = self.problem.successors(&node);
        self.stats.expanded += 1;
        self.stats.generated += children.len();
        trace!(
            expanded = self.stats.expanded,
            children = children.len(),
            frontier = self.frontier.len(),
            "expanding node"
        );

        let ranks_goals = self.problem.ranks_goals();
        let mut improved = false;
        let mut block = Vec::new();

        for child in children {
            if !self.problem.is_goal(&child) {
                match self.order {
                    SearchOrder::BreadthFirst => self.frontier.push_back(child),
                    SearchOrder::DepthFirst => block.push(child),
                }
                continue;
            }

            self.stats.goals += 1;
            if !ranks_goals {
                self.best = Some(child);
                self.stats.improvements += 1;
                self.frontier.clear();
                debug!(expanded = self.stats.expanded, "first goal found");
                return true;
            }

            let better = match &self.best {
                None => true,
                Some(incumbent) => self.problem.is_better(&child, incumbent),
            };
            if better {
                self.best = Some(child);
                self.stats.improvements += 1;
                improved = true;
                debug!(
                    expanded = self.stats.expanded,
                    improvements = self.stats.improvements,
                    "best node improved"
                );
            }
        }

        for child in block.into_iter().rev() {
            self.frontier.push_front(child);
        }
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());

        improved
    }

    /// Step until the frontier empties, a first-goal search succeeds, or
    /// `max_steps` expansions have been made by this call.
    pub fn run(&mut self, max_steps: Option<usize>) -> SearchOutcome {
        let mut steps = 0;
        let outcome = loop {
            if !self.is_active() {
                break if !self.problem.ranks_goals() && self.best.is_some() {
                    SearchOutcome::Solved
                } else {
                    SearchOutcome::Exhausted
                };
            }
            if max_steps.is_some_and(|limit| steps >= limit) {
                break SearchOutcome::StepLimit;
            }
            self.step();
            steps += 1;
        };

        info!(
            event = "search_end",
            order = %self.order,
            outcome = ?outcome,
            steps,
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            improvements = self.stats.improvements,
            found = self.best.is_some(),
        );
        outcome
    }

    /// True while the frontier still holds unexpanded nodes.
    pub fn is_active(&self) -> bool {
        !self.frontier.is_empty()
    }

    pub fn best(&self) -> Option<&P::Node> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<P::Node> {
        self.best
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn root(&self) -> &P::Node {
        &self.root
    }

    pub fn order(&self) -> SearchOrder {
        self.order
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::super::FnProblem;
    use super::*;

    /// Explicit tree: node -> children. Nodes without an entry are leaves.
    fn tree(edges: &[(u32, &[u32])]) -> HashMap<u32, Vec<u32>> {
        edges.iter().map(|&(n, c)| (n, c.to_vec())).collect()
    }

    #[test]
    fn step_on_empty_frontier_is_noop() {
        let problem = FnProblem::new(|_: &u32| Vec::new(), |_: &u32| false);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
        assert!(search.is_active());
        assert!(!search.step());
        assert!(!search.is_active());
        assert!(!search.step());
        assert_eq!(search.stats().expanded, 1);
        assert_eq!(search.best(), None);
    }

    #[test]
    fn root_is_never_tested_as_goal() {
        let problem = FnProblem::new(|_: &u32| Vec::new(), |_: &u32| true);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
        assert_eq!(search.run(None), SearchOutcome::Exhausted);
        assert_eq!(search.best(), None);
    }

    #[test]
    fn breadth_first_expands_level_by_level() {
        let t = tree(&[(0, &[1, 2]), (1, &[3, 4]), (2, &[5, 6])]);
        let log = RefCell::new(Vec::new());
        let problem = FnProblem::new(
            |n: &u32| {
                log.borrow_mut().push(*n);
                t.get(n).cloned().unwrap_or_default()
            },
            |_: &u32| false,
        );
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
        assert_eq!(search.run(None), SearchOutcome::Exhausted);
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn depth_first_preserves_sibling_order() {
        let t = tree(&[(0, &[1, 2, 3])]);
        let log = RefCell::new(Vec::new());
        let problem = FnProblem::new(
            |n: &u32| {
                log.borrow_mut().push(*n);
                t.get(n).cloned().unwrap_or_default()
            },
            |_: &u32| false,
        );
        let mut search = TreeSearch::new(problem, 0, SearchOrder::DepthFirst);
        search.step();
        assert_eq!(search.frontier_len(), 3);
        search.step();
        search.step();
        search.step();
        assert_eq!(*log.borrow(), vec![0, 1, 2, 3]);
        assert!(!search.is_active());
    }

    #[test]
    fn depth_first_dives_before_siblings() {
        let t = tree(&[(0, &[1, 2]), (1, &[3, 4]), (2, &[5, 6])]);
        let log = RefCell::new(Vec::new());
        let problem = FnProblem::new(
            |n: &u32| {
                log.borrow_mut().push(*n);
                t.get(n).cloned().unwrap_or_default()
            },
            |_: &u32| false,
        );
        let mut search = TreeSearch::new(problem, 0, SearchOrder::DepthFirst);
        search.run(None);
        assert_eq!(*log.borrow(), vec![0, 1, 3, 4, 2, 5, 6]);
    }

    #[test]
    fn first_goal_clears_frontier() {
        let t = tree(&[(0, &[1, 2, 3]), (1, &[10, 11])]);
        let problem = FnProblem::new(
            |n: &u32| t.get(n).cloned().unwrap_or_default(),
            |n: &u32| *n >= 2,
        );
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
        assert!(search.step());
        assert_eq!(search.best(), Some(&2));
        assert!(!search.is_active());
        assert_eq!(search.stats().goals, 1);
    }

    #[test]
    fn run_reports_solved_for_first_goal() {
        let problem = FnProblem::new(|n: &u32| vec![n * 2, n * 2 + 1], |n: &u32| *n == 9);
        let mut search = TreeSearch::new(problem, 1, SearchOrder::BreadthFirst);
        assert_eq!(search.run(None), SearchOutcome::Solved);
        assert_eq!(search.best(), Some(&9));
    }

    #[test]
    fn ranked_search_keeps_frontier_and_siblings() {
        // 5 and 3 are goals under the root; 7 is not, but leads to goal 1.
        let t = tree(&[(0, &[5, 3, 7]), (7, &[1])]);
        let problem = FnProblem::new(
            |n: &u32| t.get(n).cloned().unwrap_or_default(),
            |n: &u32| *n != 7 && *n != 0,
        )
        .with_better(|a: &u32, b: &u32| a < b);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);

        assert!(search.step());
        assert_eq!(search.best(), Some(&3));
        assert!(search.is_active());

        assert!(search.step());
        assert_eq!(search.best(), Some(&1));
        assert_eq!(search.stats().improvements, 3);
        assert!(!search.is_active());
    }

    #[test]
    fn ranked_search_ignores_equal_goals() {
        let problem = FnProblem::new(
            |n: &u32| if *n == 0 { vec![4, 4] } else { Vec::new() },
            |n: &u32| *n > 0,
        )
        .with_better(|a: &u32, b: &u32| a < b);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::DepthFirst);
        assert_eq!(search.run(None), SearchOutcome::Exhausted);
        assert_eq!(search.stats().goals, 2);
        assert_eq!(search.stats().improvements, 1);
    }

    #[test]
    fn ranked_search_matches_brute_force_optimum() {
        // Complete ternary tree of depth 4; leaves are goals scored by a hash.
        fn score(path: &[u8]) -> u64 {
            path.iter()
                .fold(17u64, |acc, &d| (acc * 31 + d as u64 * 7 + 3) % 1009)
        }
        let depth = 4;

        let mut all_leaves = vec![Vec::new()];
        for _ in 0..depth {
            all_leaves = all_leaves
                .into_iter()
                .flat_map(|p: Vec<u8>| {
                    (0..3u8).map(move |d| {
                        let mut next = p.clone();
                        next.push(d);
                        next
                    })
                })
                .collect();
        }
        let optimum = all_leaves.iter().map(|p| score(p)).min().unwrap();

        for order in [SearchOrder::BreadthFirst, SearchOrder::DepthFirst] {
            let problem = FnProblem::new(
                |p: &Vec<u8>| {
                    if p.len() == depth {
                        return Vec::new();
                    }
                    (0..3u8)
                        .map(|d| {
                            let mut next = p.clone();
                            next.push(d);
                            next
                        })
                        .collect()
                },
                |p: &Vec<u8>| p.len() == depth,
            )
            .with_better(|a: &Vec<u8>, b: &Vec<u8>| score(a) < score(b));
            let mut search = TreeSearch::new(problem, Vec::new(), order);
            assert_eq!(search.run(None), SearchOutcome::Exhausted);
            let best = search.best().unwrap();
            assert_eq!(score(best), optimum, "order {order}");
            assert_eq!(search.stats().goals, all_leaves.len());
        }
    }

    #[test]
    fn run_respects_step_limit_and_resumes() {
        let problem = FnProblem::new(|n: &u64| vec![n + 1], |_: &u64| false);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::DepthFirst);
        assert_eq!(search.run(Some(5)), SearchOutcome::StepLimit);
        assert_eq!(search.stats().expanded, 5);
        assert_eq!(search.run(Some(3)), SearchOutcome::StepLimit);
        assert_eq!(search.stats().expanded, 8);
    }

    #[test]
    fn reset_restores_root() {
        let problem = FnProblem::new(|n: &u32| vec![n + 1], |n: &u32| *n == 3);
        let mut search = TreeSearch::new(problem, 0, SearchOrder::BreadthFirst);
        search.run(None);
        assert_eq!(search.best(), Some(&3));
        assert!(!search.is_active());

        search.reset();
        assert!(search.is_active());
        assert_eq!(search.best(), None);
        assert_eq!(search.stats().expanded, 0);
        assert_eq!(search.frontier_len(), 1);

        search.run(None);
        assert_eq!(search.into_best(), Some(3));
    }
}
