//! The `lumen process` command: one batch run at a fixed worker count.

use clap::Args;
use lumen_core::{BatchRun, Config, Dispatcher};
use std::num::NonZeroUsize;

use super::setup::{prepare, JobArgs};

/// Arguments for the `process` command.
#[derive(Args, Debug)]
pub struct ProcessArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Number of parallel workers (defaults to the available CPU count)
    #[arg(short, long)]
    pub workers: Option<NonZeroUsize>,
}

/// Execute the process command.
pub async fn execute(args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    let Some(job) = prepare(&args.job, config)? else {
        return Ok(());
    };
    let workers = args.workers.unwrap_or_else(default_workers);
    tracing::info!(
        "Processing {:?} -> {:?} with {} worker(s)",
        job.input,
        job.output,
        workers
    );

    let run = Dispatcher::new(job.processor).run(&job.tasks, workers).await;
    for (task, error) in run.failures() {
        tracing::error!("Failed: {:?} - {}", task.input, error);
    }

    print_summary(&run);
    Ok(())
}

fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Print a formatted summary table after a batch run.
fn print_summary(run: &BatchRun) {
    let elapsed = run.elapsed.as_secs_f64();
    let rate = if elapsed > 0.0 {
        run.succeeded() as f64 / elapsed
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Workers:      {:>8}", run.workers);
    eprintln!("    Succeeded:    {:>8}", run.succeeded());
    if run.failed() > 0 {
        eprintln!("    Failed:       {:>8}", run.failed());
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", run.outcomes.len());
    eprintln!("    Duration:     {:>7.1}s", elapsed);
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
