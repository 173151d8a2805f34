// Solver registry.
// Each hand-written solver is paired with its task ID when the registry is
// built; there is no name-based discovery.

pub mod block_expand;
pub mod frequency_rank;
pub mod isolated_cells;

use rustc_hash::FxHashMap;

use crate::core::{ArcError, Grid, Result};

pub type SolveFn = fn(&Grid) -> Result<Grid>;

#[derive(Debug, Clone, Copy)]
pub struct Solver {
    pub task_id: &'static str,
    pub name: &'static str,
    pub summary: &'static str,
    pub solve: SolveFn,
}

impl Solver {
    pub fn apply(&self, input: &Grid) -> Result<Grid> {
        (self.solve)(input)
    }
}

/// ARC task IDs are 8 lowercase hex digits.
pub fn is_task_id(id: &str) -> bool {
    id.len() == 8 && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[derive(Debug, Clone, Default)]
pub struct SolverRegistry {
    solvers: Vec<Solver>,
    index: FxHashMap<&'static str, usize>,
}

impl SolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every solver shipped with the crate.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for solver in [block_expand::SOLVER, frequency_rank::SOLVER, isolated_cells::SOLVER] {
            registry.register(solver)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, solver: Solver) -> Result<()> {
        if !is_task_id(solver.task_id) {
            return Err(ArcError::InvalidTaskId(solver.task_id.to_string()));
        }
        if self.index.contains_key(solver.task_id) {
            return Err(ArcError::DuplicateSolver(solver.task_id.to_string()));
        }
        self.index.insert(solver.task_id, self.solvers.len());
        self.solvers.push(solver);
        Ok(())
    }

    pub fn get(&self, task_id: &str) -> Result<&Solver> {
        self.index
            .get(task_id)
            .map(|&i| &self.solvers[i])
            .ok_or_else(|| ArcError::UnknownTask(task_id.to_string()))
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.index.contains_key(task_id)
    }

    /// Task IDs in registration order.
    pub fn task_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.solvers.iter().map(|s| s.task_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Solver> {
        self.solvers.iter()
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}
