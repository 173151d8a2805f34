// 42a50994: clear every colored cell that has no colored cell among its
// 8 neighbors.

use crate::core::{Grid, Result};
use crate::core::grid::BACKGROUND;

use super::Solver;

pub const SOLVER: Solver = Solver {
    task_id: "42a50994",
    name: "remove isolated cells",
    summary: "clear cells whose in-bounds Moore neighborhood sums to zero",
    solve,
};

const OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Sum of the in-bounds Moore neighbors of `(r, c)`, excluding the cell itself.
pub fn neighbor_sum(grid: &Grid, r: usize, c: usize) -> u32 {
    OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let nr = r.checked_add_signed(dr)?;
            let nc = c.checked_add_signed(dc)?;
            grid.get(nr, nc)
        })
        .map(u32::from)
        .sum()
}

/// Reads neighbor sums from `grid` and writes into a fresh grid.
pub fn remove_isolated(grid: &Grid) -> Result<Grid> {
    Ok(Grid::from_fn(grid.rows(), grid.cols(), |r, c| {
        let color = grid[(r, c)];
        if color != BACKGROUND && neighbor_sum(grid, r, c) == 0 {
            BACKGROUND
        } else {
            color
        }
    })?)
}

fn solve(grid: &Grid) -> Result<Grid> {
    remove_isolated(grid)
}
