use crate::error::TaskError;
use crate::search::SearchOrder;

use super::assignment::{AssignmentProblem, AssignmentTask};

/// Identical parallel machines, independent jobs: assign every job to a
/// machine so that the busiest machine finishes as early as possible.
#[derive(Debug, Clone)]
pub struct JobShopTask {
    machines: usize,
    durations: Vec<u64>,
    domains: Vec<Vec<usize>>,
}

impl JobShopTask {
    pub fn new(machines: usize, durations: Vec<u64>) -> Result<Self, TaskError> {
        if machines == 0 {
            return Err(TaskError::NoMachines);
        }
        // The total bounds every machine load.
        if durations
            .iter()
            .try_fold(0u64, |total, &d| total.checked_add(d))
            .is_none()
        {
            return Err(TaskError::DurationOverflow);
        }
        let domains = vec![(0..machines).collect(); durations.len()];
        Ok(JobShopTask {
            machines,
            durations,
            domains,
        })
    }

    pub fn machines(&self) -> usize {
        self.machines
    }

    pub fn durations(&self) -> &[u64] {
        &self.durations
    }

    /// Total duration per machine for a (possibly partial) job assignment.
    pub fn loads(&self, assignment: &[usize]) -> Vec<u64> {
        let mut loads = vec![0u64; self.machines];
        for (job, &machine) in assignment.iter().enumerate() {
            loads[machine] = loads[machine].saturating_add(self.durations[job]);
        }
        loads
    }

    pub fn makespan(&self, assignment: &[usize]) -> u64 {
        self.loads(assignment).into_iter().max().unwrap_or(0)
    }

    pub fn into_problem(self) -> AssignmentProblem<Self> {
        AssignmentProblem::new(self)
    }
}

impl AssignmentTask for JobShopTask {
    type Value = usize;
    type Answer = Vec<usize>;

    fn domains(&self) -> &[Vec<usize>] {
        &self.domains
    }

    fn ranks(&self) -> bool {
        true
    }

    /// Strictly lower makespan.
    fn is_better(&self, candidate: &[usize], incumbent: &[usize]) -> bool {
        self.makespan(candidate) < self.makespan(incumbent)
    }

    /// Machine index per job; empty when no schedule was found.
    fn decode(&self, assignment: Option<&[usize]>) -> Vec<usize> {
        assignment.map(<[usize]>::to_vec).unwrap_or_default()
    }

    fn default_order(&self) -> SearchOrder {
        SearchOrder::DepthFirst
    }
}
