// 9172f3a0: every cell of the 3x3 input becomes a 3x3 block of its color.

use crate::core::{ArcError, Grid, Result};

use super::Solver;

pub const SOLVER: Solver = Solver {
    task_id: "9172f3a0",
    name: "block expansion",
    summary: "replace each cell with a 3x3 tile of its own color",
    solve,
};

const TILE: usize = 3;

fn solve(grid: &Grid) -> Result<Grid> {
    expand_blocks(grid, TILE, TILE)
}

/// Replace each cell with an `n`×`m` tile of its value.
/// Output shape is `(n * rows, m * cols)`.
pub fn expand_blocks(grid: &Grid, n: usize, m: usize) -> Result<Grid> {
    let (rows, cols) = match (grid.rows().checked_mul(n), grid.cols().checked_mul(m)) {
        (Some(rows), Some(cols)) => (rows, cols),
        _ => {
            return Err(ArcError::Solver(format!(
                "{}x{} tiles overflow a {}x{} grid",
                n,
                m,
                grid.rows(),
                grid.cols()
            )))
        }
    };
    Ok(Grid::from_fn(rows, cols, |r, c| grid[(r / n, c / m)])?)
}
