use crate::error::TaskError;
use crate::search::SearchOrder;

use super::assignment::{AssignmentProblem, AssignmentTask};

/// A route through every city, with its length when every leg has an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tour {
    pub cities: Vec<usize>,
    /// `None` for the empty tour or when some leg has no edge.
    pub length: Option<u64>,
}

/// Shortest Hamiltonian path between two pinned cities.
///
/// Position `i` of the path is variable `i`. The first and last positions
/// can only hold `from` and `to`; every other position ranges over the
/// remaining cities. A distance of 0 means there is no edge.
#[derive(Debug, Clone)]
pub struct TourTask {
    distances: Vec<Vec<u64>>,
    from: usize,
    to: usize,
    domains: Vec<Vec<usize>>,
}

impl TourTask {
    pub fn new(distances: Vec<Vec<u64>>, from: usize, to: usize) -> Result<Self, TaskError> {
        let size = distances.len();
        if size == 0 {
            return Err(TaskError::MatrixShape {
                row: 0,
                len: 0,
                size,
            });
        }
        if let Some((row, values)) = distances.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(TaskError::MatrixShape {
                row,
                len: values.len(),
                size,
            });
        }
        for city in [from, to] {
            if city >= size {
                return Err(TaskError::CityOutOfRange { city, size });
            }
        }

        let middle: Vec<usize> = (0..size).filter(|&c| c != from && c != to).collect();
        let mut domains = vec![middle; size];
        domains[0] = vec![from];
        domains[size - 1] = vec![to];

        Ok(TourTask {
            distances,
            from,
            to,
            domains,
        })
    }

    /// Parse a whitespace-separated matrix, one row per line.
    pub fn parse(text: &str) -> Result<Vec<Vec<u64>>, TaskError> {
        text.lines()
            .enumerate()
            .filter(|(_, line)| {
                let line = line.trim();
                !line.is_empty() && !line.starts_with('#')
            })
            .map(|(index, line)| {
                line.split(|c: char| c.is_whitespace() || c == ',')
                    .filter(|t| !t.is_empty())
                    .map(|token| {
                        token.parse::<u64>().map_err(|_| TaskError::Parse {
                            line: index + 1,
                            message: format!("invalid distance '{token}'"),
                        })
                    })
                    .collect()
            })
            .collect()
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.from, self.to)
    }

    /// Sum of leg distances, `None` if any leg has no edge or the sum does
    /// not fit in a `u64`.
    pub fn length(&self, path: &[usize]) -> Option<u64> {
        path.windows(2).try_fold(0u64, |total, leg| {
            match self.distances[leg[0]][leg[1]] {
                0 => None,
                d => total.checked_add(d),
            }
        })
    }

    pub fn into_problem(self) -> AssignmentProblem<Self> {
        AssignmentProblem::new(self)
    }
}

impl AssignmentTask for TourTask {
    type Value = usize;
    type Answer = Tour;

    fn domains(&self) -> &[Vec<usize>] {
        &self.domains
    }

    /// No city may appear twice.
    fn admits(&self, partial: &[usize]) -> bool {
        match partial.split_last() {
            Some((last, earlier)) => !earlier.contains(last),
            None => true,
        }
    }

    fn ranks(&self) -> bool {
        true
    }

    /// Strictly shorter, with a missing edge counting as infinitely long.
    fn is_better(&self, candidate: &[usize], incumbent: &[usize]) -> bool {
        match (self.length(candidate), self.length(incumbent)) {
            (Some(a), Some(b)) => a < b,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn decode(&self, assignment: Option<&[usize]>) -> Tour {
        match assignment {
            Some(path) => Tour {
                cities: path.to_vec(),
                length: self.length(path),
            },
            None => Tour::default(),
        }
    }

    fn default_order(&self) -> SearchOrder {
        SearchOrder::BreadthFirst
    }
}
