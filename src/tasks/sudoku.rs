use crate::error::TaskError;
use crate::search::SearchOrder;

use super::assignment::{AssignmentProblem, AssignmentTask};

/// Row-major grid, 0 marks an empty cell.
pub type SudokuGrid = Vec<Vec<u8>>;

/// Sudoku of side `n = b * b` (4x4, 9x9, 16x16 ...).
///
/// Every empty cell becomes a variable, ordered row-major, whose domain is
/// the set of digits not already given in its row, column or box.
#[derive(Debug, Clone)]
pub struct SudokuTask {
    grid: SudokuGrid,
    box_size: usize,
    cells: Vec<(usize, usize)>,
    domains: Vec<Vec<u8>>,
}

impl SudokuTask {
    pub fn new(grid: SudokuGrid) -> Result<Self, TaskError> {
        let size = grid.len();
        let box_size = (1..=size).find(|b| b * b >= size).unwrap_or(0);
        if size == 0
            || box_size * box_size != size
            || size > u8::MAX as usize
            || grid.iter().any(|row| row.len() != size)
        {
            return Err(TaskError::GridShape {
                rows: size,
                cols: grid.iter().map(Vec::len).max().unwrap_or(0),
            });
        }

        for (row, values) in grid.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if value as usize > size {
                    return Err(TaskError::CellValue {
                        row,
                        col,
                        value,
                        max: size,
                    });
                }
            }
        }

        let mut task = SudokuTask {
            grid,
            box_size,
            cells: Vec::new(),
            domains: Vec::new(),
        };

        for row in 0..size {
            for col in 0..size {
                let value = task.grid[row][col];
                if value == 0 {
                    continue;
                }
                if task.peers(row, col).any(|(r, c)| task.grid[r][c] == value) {
                    return Err(TaskError::DuplicateGiven { row, col, value });
                }
            }
        }

        for row in 0..size {
            for col in 0..size {
                if task.grid[row][col] != 0 {
                    continue;
                }
                let domain: Vec<u8> = (1..=size as u8)
                    .filter(|&v| task.peers(row, col).all(|(r, c)| task.grid[r][c] != v))
                    .collect();
                task.cells.push((row, col));
                task.domains.push(domain);
            }
        }

        Ok(task)
    }

    /// Parse a text grid: one row per line, digits with `0` or `.` for empty
    /// cells. Rows may be written compactly (`53..7....`) or as
    /// whitespace-separated numbers for sides above 9. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn parse(text: &str) -> Result<SudokuGrid, TaskError> {
        let mut grid = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let tokens: Vec<&str> = if line.contains(char::is_whitespace) {
                line.split_whitespace().collect()
            } else {
                line.split("").filter(|t| !t.is_empty()).collect()
            };
            let row = tokens
                .iter()
                .map(|token| match *token {
                    "." | "_" => Ok(0),
                    digits => digits.parse::<u8>().map_err(|_| TaskError::Parse {
                        line: index + 1,
                        message: format!("invalid cell '{digits}'"),
                    }),
                })
                .collect::<Result<Vec<u8>, _>>()?;
            grid.push(row);
        }
        Ok(grid)
    }

    pub fn grid(&self) -> &SudokuGrid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.len()
    }

    /// Empty cells in assignment order.
    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    pub fn into_problem(self) -> AssignmentProblem<Self> {
        AssignmentProblem::new(self)
    }

    fn same_box(&self, a: (usize, usize), b: (usize, usize)) -> bool {
        a.0 / self.box_size == b.0 / self.box_size && a.1 / self.box_size == b.1 / self.box_size
    }

    /// Cells sharing a row, column or box with (row, col), excluding itself.
    fn peers(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size();
        (0..size)
            .flat_map(move |r| (0..size).map(move |c| (r, c)))
            .filter(move |&(r, c)| {
                (r, c) != (row, col) && (r == row || c == col || self.same_box((r, c), (row, col)))
            })
    }
}

impl AssignmentTask for SudokuTask {
    type Value = u8;
    type Answer = SudokuGrid;

    fn domains(&self) -> &[Vec<u8>] {
        &self.domains
    }

    /// The newest value must not repeat among givens or earlier assignments
    /// in its row, column or box.
    fn admits(&self, partial: &[u8]) -> bool {
        let Some((&value, earlier)) = partial.split_last() else {
            return true;
        };
        let cell = self.cells[earlier.len()];

        let clashes_given = self
            .peers(cell.0, cell.1)
            .any(|(r, c)| self.grid[r][c] == value);
        let clashes_assigned = earlier.iter().zip(&self.cells).any(|(&v, &other)| {
            v == value && (other.0 == cell.0 || other.1 == cell.1 || self.same_box(other, cell))
        });

        !clashes_given && !clashes_assigned
    }

    /// Filled grid, or an all-zero grid of the same shape when unsolved.
    fn decode(&self, assignment: Option<&[u8]>) -> SudokuGrid {
        let Some(values) = assignment else {
            return vec![vec![0; self.size()]; self.size()];
        };
        let mut filled = self.grid.clone();
        for (&(row, col), &value) in self.cells.iter().zip(values) {
            filled[row][col] = value;
        }
        filled
    }

    fn default_order(&self) -> SearchOrder {
        SearchOrder::DepthFirst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchProblem;
    use crate::tasks::solve;

    fn solved_4x4() -> SudokuGrid {
        vec![
            vec![1, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 1],
        ]
    }

    #[test]
    fn domains_are_pruned_by_givens() {
        let mut grid = solved_4x4();
        grid[0][0] = 0;
        grid[0][1] = 0;
        let task = SudokuTask::new(grid).unwrap();
        assert_eq!(task.cells(), &[(0, 0), (0, 1)]);
        assert_eq!(task.domains(), &[vec![1], vec![2]]);
    }

    #[test]
    fn admits_rejects_repeat_between_assignments() {
        let task = SudokuTask::new(vec![vec![0; 4]; 4]).unwrap();
        assert_eq!(task.domains()[0], vec![1, 2, 3, 4]);
        assert!(task.admits(&[1]));
        assert!(task.admits(&[1, 2]));
        assert!(!task.admits(&[1, 1]));
    }

    #[test]
    fn forced_single_cell_is_filled() {
        let mut grid = solved_4x4();
        grid[2][1] = 0;
        let task = SudokuTask::new(grid).unwrap();
        let solution = solve(task.into_problem(), SearchOrder::DepthFirst, None);
        assert!(solution.found);
        assert_eq!(solution.answer, solved_4x4());
    }

    #[test]
    fn breadth_first_solves_too() {
        let grid = vec![
            vec![1, 0, 0, 4],
            vec![0, 4, 1, 0],
            vec![2, 0, 4, 0],
            vec![0, 3, 0, 1],
        ];
        let solution = solve(
            SudokuTask::new(grid).unwrap().into_problem(),
            SearchOrder::BreadthFirst,
            None,
        );
        assert_eq!(solution.answer, solved_4x4());
    }

    #[test]
    fn solves_classic_9x9() {
        let text = "\
            53..7....
            6..195...
            .98....6.
            8...6...3
            4..8.3..1
            7...2...6
            .6....28.
            ...419..5
            ....8..79";
        let grid = SudokuTask::parse(text).unwrap();
        let task = SudokuTask::new(grid).unwrap();
        let solution = solve(task.into_problem(), SearchOrder::DepthFirst, None);
        assert!(solution.found);
        assert_eq!(solution.answer[0], vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
        assert_eq!(solution.answer[8], vec![3, 4, 5, 2, 8, 6, 1, 7, 9]);
    }

    #[test]
    fn unsolvable_grid_decodes_to_zeros() {
        // (0,0) cannot be 1 (row), 2/4 (column) or 3/4 (box).
        let grid = vec![
            vec![0, 0, 0, 1],
            vec![4, 3, 0, 0],
            vec![2, 0, 0, 0],
            vec![0, 0, 0, 0],
        ];
        let task = SudokuTask::new(grid).unwrap();
        assert!(task.domains()[0].is_empty());
        let problem = task.into_problem();
        assert!(problem.successors(&Vec::new()).is_empty());
        let solution = solve(problem, SearchOrder::DepthFirst, None);
        assert!(!solution.found);
        assert_eq!(solution.answer, vec![vec![0; 4]; 4]);
    }

    #[test]
    fn complete_grid_is_returned_as_is() {
        let solution = solve(
            SudokuTask::new(solved_4x4()).unwrap().into_problem(),
            SearchOrder::DepthFirst,
            None,
        );
        assert!(solution.found);
        assert_eq!(solution.answer, solved_4x4());
    }

    #[test]
    fn rejects_bad_shapes_and_values() {
        assert_eq!(
            SudokuTask::new(vec![vec![0; 5]; 5]).unwrap_err(),
            TaskError::GridShape { rows: 5, cols: 5 }
        );
        assert!(matches!(
            SudokuTask::new(vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]]),
            Err(TaskError::GridShape { .. })
        ));
        assert!(matches!(
            SudokuTask::new(Vec::new()),
            Err(TaskError::GridShape { .. })
        ));

        let mut grid = vec![vec![0; 4]; 4];
        grid[1][2] = 5;
        assert_eq!(
            SudokuTask::new(grid).unwrap_err(),
            TaskError::CellValue {
                row: 1,
                col: 2,
                value: 5,
                max: 4
            }
        );
    }

    #[test]
    fn rejects_duplicate_givens() {
        let mut grid = vec![vec![0; 4]; 4];
        grid[0][0] = 3;
        grid[1][1] = 3;
        assert_eq!(
            SudokuTask::new(grid).unwrap_err(),
            TaskError::DuplicateGiven {
                row: 0,
                col: 0,
                value: 3
            }
        );
    }

    #[test]
    fn parse_accepts_separated_rows_and_comments() {
        let grid = SudokuTask::parse("# 4x4\n1 . 3 0\n\n0 0 0 16\n").unwrap();
        assert_eq!(grid, vec![vec![1, 0, 3, 0], vec![0, 0, 0, 16]]);
    }

    #[test]
    fn parse_reports_line_of_bad_cell() {
        let err = SudokuTask::parse("12\n3x\n").unwrap_err();
        assert_eq!(
            err,
            TaskError::Parse {
                line: 2,
                message: "invalid cell 'x'".into()
            }
        );
    }
}
