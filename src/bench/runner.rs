// Task runner.
// Resolves a task's solver, loads its examples and checks every produced
// grid against the expected output, train partition first.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error, info, warn};

use crate::core::{ArcError, Grid, Result};
use crate::perception::task::{Partition, TaskLoader};
use crate::solvers::{Solver, SolverRegistry};

#[derive(Debug, Clone)]
pub struct ExampleResult {
    pub task_id: String,
    pub partition: Partition,
    pub index: usize,
    pub input: Grid,
    pub expected: Grid,
    /// `None` when the solver failed.
    pub produced: Option<Grid>,
    pub failure: Option<String>,
    pub matched: bool,
}

/// Outcome of one task in a batch. A load failure stops that task only.
#[derive(Debug)]
pub struct TaskRun {
    pub task_id: String,
    pub outcome: Result<Vec<ExampleResult>>,
}

impl TaskRun {
    pub fn matched(&self) -> usize {
        self.outcome.as_ref().map(|r| r.iter().filter(|e| e.matched).count()).unwrap_or(0)
    }

    pub fn solved(&self) -> bool {
        matches!(&self.outcome, Ok(r) if !r.is_empty() && r.iter().all(|e| e.matched))
    }
}

pub struct Runner {
    registry: SolverRegistry,
    loader: TaskLoader,
}

impl Runner {
    pub fn new(registry: SolverRegistry, loader: TaskLoader) -> Self {
        Self { registry, loader }
    }

    pub fn run(&self, task_id: &str) -> Result<Vec<ExampleResult>> {
        let solver = self.registry.get(task_id)?;
        let task = self.loader.load(task_id)?;

        let mut results = Vec::with_capacity(task.train.len() + task.test.len());
        for partition in [Partition::Train, Partition::Test] {
            for (index, example) in task.partition(partition).iter().enumerate() {
                let (produced, failure) = match apply_guarded(solver, &example.input) {
                    Ok(grid) => (Some(grid), None),
                    Err(e) => {
                        warn!(task = task_id, %partition, index, error = %e, "solver failed");
                        (None, Some(e.to_string()))
                    }
                };
                let matched = produced.as_ref() == Some(&example.output);
                debug!(task = task_id, %partition, index, matched, "checked example");
                results.push(ExampleResult {
                    task_id: task_id.to_string(),
                    partition,
                    index,
                    input: example.input.clone(),
                    expected: example.output.clone(),
                    produced,
                    failure,
                    matched,
                });
            }
        }

        info!(
            task = task_id,
            examples = results.len(),
            matched = results.iter().filter(|r| r.matched).count(),
            "task finished"
        );
        Ok(results)
    }

    /// Run every registered task in registration order.
    pub fn run_all(&self) -> Vec<TaskRun> {
        self.registry.task_ids().map(|id| self.run_batch_entry(id)).collect()
    }

    /// Run the given tasks in order. Unknown IDs are rejected before any
    /// task runs.
    pub fn run_selected<S: AsRef<str>>(&self, task_ids: &[S]) -> Result<Vec<TaskRun>> {
        for id in task_ids {
            self.registry.get(id.as_ref())?;
        }
        Ok(task_ids.iter().map(|id| self.run_batch_entry(id.as_ref())).collect())
    }

    fn run_batch_entry(&self, task_id: &str) -> TaskRun {
        let outcome = self.run(task_id);
        match &outcome {
            Err(e) if e.is_load_failure() => warn!(task = task_id, error = %e, "task data unusable, skipping"),
            Err(e) => error!(task = task_id, error = %e, "task aborted"),
            Ok(_) => {}
        }
        TaskRun { task_id: task_id.to_string(), outcome }
    }
}

/// Apply a solver, turning both returned errors and panics into
/// `ArcError::Solver`.
fn apply_guarded(solver: &Solver, input: &Grid) -> Result<Grid> {
    match panic::catch_unwind(AssertUnwindSafe(|| solver.apply(input))) {
        Ok(Ok(grid)) => Ok(grid),
        Ok(Err(ArcError::Solver(reason))) => Err(ArcError::Solver(reason)),
        Ok(Err(other)) => Err(ArcError::Solver(other.to_string())),
        Err(payload) => Err(ArcError::Solver(format!("panicked: {}", panic_message(&*payload)))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
