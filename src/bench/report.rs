// Plain-text trace of a run. Purely formatting; nothing here feeds back into
// the runner.

use std::io::{self, Write};

use crate::core::{ArcError, Grid};
use crate::perception::task::Partition;

use super::runner::{ExampleResult, TaskRun};

pub fn write_task(out: &mut impl Write, task_id: &str, results: &[ExampleResult]) -> io::Result<()> {
    writeln!(out, "{}", task_id)?;
    for (partition, header) in [(Partition::Train, "Training grids"), (Partition::Test, "Test grids")] {
        writeln!(out, "{}", header)?;
        for result in results.iter().filter(|r| r.partition == partition) {
            write_example(out, result)?;
        }
    }
    Ok(())
}

pub fn write_task_error(out: &mut impl Write, task_id: &str, err: &ArcError) -> io::Result<()> {
    writeln!(out, "{}", task_id)?;
    writeln!(out, "Skipped: {}", err)?;
    writeln!(out)
}

fn write_example(out: &mut impl Write, result: &ExampleResult) -> io::Result<()> {
    writeln!(out, "Input")?;
    write_grid(out, &result.input)?;
    writeln!(out, "Correct output")?;
    write_grid(out, &result.expected)?;
    writeln!(out, "Our output")?;
    match (&result.produced, &result.failure) {
        (Some(grid), _) => write_grid(out, grid)?,
        (None, Some(cause)) => writeln!(out, "<{}>", cause)?,
        (None, None) => writeln!(out, "<no output>")?,
    }
    writeln!(out, "Correct?")?;
    writeln!(out, "{}", result.matched)?;
    writeln!(out)
}

fn write_grid(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    writeln!(out, "{}", grid)
}

/// Totals over a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub tasks: usize,
    pub solved: usize,
    pub load_failures: usize,
    pub examples: usize,
    pub matched: usize,
}

impl Summary {
    pub fn from_runs(runs: &[TaskRun]) -> Self {
        let mut summary = Self { tasks: runs.len(), ..Self::default() };
        for run in runs {
            match &run.outcome {
                Ok(results) => {
                    summary.examples += results.len();
                    summary.matched += run.matched();
                    if run.solved() {
                        summary.solved += 1;
                    }
                }
                Err(_) => summary.load_failures += 1,
            }
        }
        summary
    }
}

pub fn write_summary(out: &mut impl Write, summary: &Summary) -> io::Result<()> {
    writeln!(out, "=== Summary ===")?;
    writeln!(
        out,
        "Tasks: {} | Solved: {} | Not loaded: {}",
        summary.tasks, summary.solved, summary.load_failures
    )?;
    writeln!(out, "Examples: {} | Matched: {}", summary.examples, summary.matched)
}

/// Trace for every run in a batch, followed by the summary.
pub fn write_runs(out: &mut impl Write, runs: &[TaskRun], summary_only: bool) -> io::Result<()> {
    if !summary_only {
        for run in runs {
            match &run.outcome {
                Ok(results) => write_task(out, &run.task_id, results)?,
                Err(e) => write_task_error(out, &run.task_id, e)?,
            }
        }
    }
    write_summary(out, &Summary::from_runs(runs))
}
