//! The `lumen bench` command: scaling benchmark across worker counts.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::{Benchmark, Config, ExecutionReport, OutputWriter, TrialEvent};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use super::setup::{prepare, JobArgs};
use super::types::ReportFormat;

/// Arguments for the `bench` command.
#[derive(Args, Debug)]
pub struct BenchArgs {
    #[command(flatten)]
    pub job: JobArgs,

    /// Comma-separated worker counts; the first is the baseline and should be 1.
    /// Defaults to `benchmark.worker_counts`
    #[arg(short, long, value_delimiter = ',')]
    pub workers: Vec<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Execute the bench command.
pub async fn execute(args: BenchArgs, config: Config) -> anyhow::Result<()> {
    let worker_counts = if args.workers.is_empty() {
        config.benchmark.worker_counts.clone()
    } else {
        args.workers.clone()
    };

    let Some(job) = prepare(&args.job, config)? else {
        return Ok(());
    };
    tracing::info!(
        "Benchmarking {:?} -> {:?} with worker counts {:?}",
        job.input,
        job.output,
        worker_counts
    );

    let task_count = job.tasks.len();
    let spinner = create_spinner();
    let bench = Benchmark::new(job.processor);
    let reports = bench
        .run_with(&job.tasks, &worker_counts, |event| match event {
            TrialEvent::Started { workers } => {
                spinner.set_message(format!("P={workers}: processing {task_count} image(s)"));
            }
            TrialEvent::Finished(run) => {
                for (task, error) in run.failures() {
                    tracing::error!("Failed: {:?} - {}", task.input, error);
                }
                spinner.println(format!(
                    "  P={} finished in {:.4}s ({}/{} succeeded)",
                    run.workers,
                    run.elapsed.as_secs_f64(),
                    run.succeeded(),
                    run.outcomes.len()
                ));
            }
        })
        .await;
    spinner.finish_and_clear();
    let reports = reports?;

    write_report(&reports, args.format, args.report.as_ref())
}

/// Render the reports to stdout or to `path` once every trial has finished.
fn write_report(
    reports: &[ExecutionReport],
    format: ReportFormat,
    path: Option<&PathBuf>,
) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = OutputWriter::new(BufWriter::new(file), format.into(), true);
            writer.write_reports(reports)?;
            writer.flush()?;
            tracing::info!("Report written to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), format.into(), true);
            writer.write_reports(reports)?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// Create a spinner shown on stderr while trials run.
fn create_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("starting...");
    spinner
}
