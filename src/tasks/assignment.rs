use crate::search::{SearchOrder, SearchProblem};

use super::Task;

/// A fixed-variable constraint problem.
///
/// Variables are identified by their position in [`domains`](Self::domains)
/// and are assigned in that order, so a partial assignment is simply the
/// values of the first `k` variables.
pub trait AssignmentTask {
    type Value: Clone;
    type Answer;

    /// Candidate values for each variable, in assignment order.
    fn domains(&self) -> &[Vec<Self::Value>];

    /// Feasibility of a partial assignment whose last value was just added.
    fn admits(&self, _partial: &[Self::Value]) -> bool {
        true
    }

    /// Whether complete assignments are ranked with [`is_better`](Self::is_better).
    fn ranks(&self) -> bool {
        false
    }

    fn is_better(&self, _candidate: &[Self::Value], _incumbent: &[Self::Value]) -> bool {
        false
    }

    fn decode(&self, assignment: Option<&[Self::Value]>) -> Self::Answer;

    fn default_order(&self) -> SearchOrder {
        SearchOrder::DepthFirst
    }
}

/// Adapts an [`AssignmentTask`] to the search engine.
///
/// Nodes are owned prefix vectors; every child is a fresh copy of its parent
/// plus one value, so sibling branches never share storage.
#[derive(Debug, Clone)]
pub struct AssignmentProblem<T> {
    task: T,
}

impl<T: AssignmentTask> AssignmentProblem<T> {
    pub fn new(task: T) -> Self {
        AssignmentProblem { task }
    }

    pub fn task(&self) -> &T {
        &self.task
    }

    pub fn into_task(self) -> T {
        self.task
    }
}

impl<T: AssignmentTask> SearchProblem for AssignmentProblem<T> {
    type Node = Vec<T::Value>;

    fn successors(&self, partial: &Self::Node) -> Vec<Self::Node> {
        let Some(domain) = self.task.domains().get(partial.len()) else {
            return Vec::new();
        };

        domain
            .iter()
            .filter_map(|value| {
                let mut next = Vec::with_capacity(partial.len() + 1);
                next.extend_from_slice(partial);
                next.push(value.clone());
                self.task.admits(&next).then_some(next)
            })
            .collect()
    }

    fn is_goal(&self, partial: &Self::Node) -> bool {
        partial.len() == self.task.domains().len()
    }

    fn ranks_goals(&self) -> bool {
        self.task.ranks()
    }

    fn is_better(&self, candidate: &Self::Node, incumbent: &Self::Node) -> bool {
        self.task.is_better(candidate, incumbent)
    }
}

impl<T: AssignmentTask> Task for AssignmentProblem<T> {
    type Answer = T::Answer;

    fn root(&self) -> Self::Node {
        Vec::new()
    }

    fn decode(&self, best: Option<&Self::Node>) -> Self::Answer {
        self.task.decode(best.map(Vec::as_slice))
    }

    fn default_order(&self) -> SearchOrder {
        self.task.default_order()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchOutcome;
    use crate::tasks::solve;

    /// N-queens: variable i is the column of the queen in row i.
    struct Queens {
        domains: Vec<Vec<usize>>,
    }

    impl Queens {
        fn new(n: usize) -> Self {
            Queens {
                domains: vec![(0..n).collect(); n],
            }
        }
    }

    impl AssignmentTask for Queens {
        type Value = usize;
        type Answer = Vec<usize>;

        fn domains(&self) -> &[Vec<usize>] {
            &self.domains
        }

        fn admits(&self, partial: &[usize]) -> bool {
            let row = partial.len() - 1;
            let col = partial[row];
            partial[..row]
                .iter()
                .enumerate()
                .all(|(r, &c)| c != col && row - r != col.abs_diff(c))
        }

        fn decode(&self, assignment: Option<&[usize]>) -> Vec<usize> {
            assignment.map(<[usize]>::to_vec).unwrap_or_default()
        }
    }

    /// A task without variables; its empty root is already complete.
    struct NoVariables;

    impl AssignmentTask for NoVariables {
        type Value = u8;
        type Answer = u32;

        fn domains(&self) -> &[Vec<u8>] {
            &[]
        }

        fn decode(&self, assignment: Option<&[u8]>) -> u32 {
            assignment.map_or(0, |a| a.iter().map(|&v| v as u32).sum())
        }
    }

    #[test]
    fn successors_extend_next_variable_with_admitted_values() {
        let problem = AssignmentProblem::new(Queens::new(4));
        let children = problem.successors(&vec![0]);
        assert_eq!(children, vec![vec![0, 2], vec![0, 3]]);
    }

    #[test]
    fn complete_assignment_has_no_successors() {
        let problem = AssignmentProblem::new(Queens::new(4));
        assert!(problem.is_goal(&vec![1, 3, 0, 2]));
        assert!(problem.successors(&vec![1, 3, 0, 2]).is_empty());
    }

    #[test]
    fn finds_four_queens() {
        let solution = solve(
            AssignmentProblem::new(Queens::new(4)),
            SearchOrder::DepthFirst,
            None,
        );
        assert_eq!(solution.outcome, SearchOutcome::Solved);
        assert_eq!(solution.answer, vec![1, 3, 0, 2]);
    }

    #[test]
    fn three_queens_has_no_solution() {
        for order in [SearchOrder::BreadthFirst, SearchOrder::DepthFirst] {
            let solution = solve(AssignmentProblem::new(Queens::new(3)), order, None);
            assert!(!solution.found);
            assert_eq!(solution.outcome, SearchOutcome::Exhausted);
            assert!(solution.answer.is_empty());
        }
    }

    #[test]
    fn empty_variable_set_is_solved_at_root() {
        let solution = solve(AssignmentProblem::new(NoVariables), SearchOrder::BreadthFirst, None);
        assert!(solution.found);
        assert_eq!(solution.answer, 0);
        assert_eq!(solution.stats.expanded, 0);
    }
}
