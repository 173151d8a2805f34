use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use arc_handsolve::bench::report;
use arc_handsolve::bench::runner::Runner;
use arc_handsolve::perception::task::TaskLoader;
use arc_handsolve::solvers::SolverRegistry;

#[derive(Parser)]
#[command(name = "arc-handsolve", about = "Run hand-written ARC solvers against their task data")]
struct Cli {
    /// Task IDs to run (omit to run every registered solver)
    task_ids: Vec<String>,

    /// Directory holding <task-id>.json files
    #[arg(long, env = "ARC_DATA_DIR", default_value = "data/training")]
    data_dir: PathBuf,

    /// List registered solvers and exit
    #[arg(long)]
    list: bool,

    /// Print only the batch summary
    #[arg(long)]
    summary_only: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = SolverRegistry::builtin().context("building solver registry")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        for solver in registry.iter() {
            writeln!(out, "{}  {:<22} {}", solver.task_id, solver.name, solver.summary)?;
        }
        return Ok(());
    }

    let loader = TaskLoader::new(&cli.data_dir);
    if !loader.data_dir().is_dir() {
        bail!("data directory {} does not exist", loader.data_dir().display());
    }

    let runner = Runner::new(registry, loader);
    let runs = if cli.task_ids.is_empty() {
        runner.run_all()
    } else {
        runner.run_selected(cli.task_ids.as_slice())?
    };

    report::write_runs(&mut out, &runs, cli.summary_only).context("writing report")?;
    out.flush()?;
    Ok(())
}
