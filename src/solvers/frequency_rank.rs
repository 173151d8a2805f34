// f8b3ba0a: bars of colored cells sit on a background, separated by a marker
// color. Answer is the remaining colors, most frequent first, as a column.

use rustc_hash::FxHashMap;

use crate::core::{ArcError, Grid, Result};
use crate::core::grid::Color;

use super::Solver;

pub const SOLVER: Solver = Solver {
    task_id: "f8b3ba0a",
    name: "frequency ranking",
    summary: "rank non-background, non-marker colors by count as a single column",
    solve,
};

/// Background and marker are assumed to be the two most common colors.
const SKIPPED: usize = 2;

fn solve(grid: &Grid) -> Result<Grid> {
    let ranked = rank_colors(grid.cells().iter().copied());
    if ranked.len() <= SKIPPED {
        return Err(ArcError::Solver(format!(
            "expected more than {} distinct colors, found {}",
            SKIPPED,
            ranked.len()
        )));
    }
    let rest = &ranked[SKIPPED..];
    Ok(Grid::from_fn(rest.len(), 1, |r, _| rest[r])?)
}

/// Distinct values ordered by count, most frequent first.
/// Equal counts keep first-encounter order.
pub fn rank_colors(cells: impl IntoIterator<Item = Color>) -> Vec<Color> {
    let mut order: Vec<Color> = Vec::new();
    let mut counts: FxHashMap<Color, usize> = FxHashMap::default();
    for c in cells {
        let count = counts.entry(c).or_insert(0);
        if *count == 0 {
            order.push(c);
        }
        *count += 1;
    }
    // stable sort keeps encounter order for ties
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order
}
