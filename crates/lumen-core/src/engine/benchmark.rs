//! Scaling benchmark across worker counts.
//!
//! The first worker count supplied is the serial baseline. Its report has
//! speed-up and efficiency fixed at 1.0; every later trial reports
//! `baseline / elapsed` and `speedup / workers`. The figures only describe
//! scaling against a serial run when the first count is 1. Any other first
//! count is still used as the baseline and a warning is logged.

use std::num::NonZeroUsize;

use crate::error::BenchmarkError;
use crate::types::{BatchRun, ExecutionReport, ImageTask};

use super::dispatcher::Dispatcher;
use super::TaskRunner;

/// Progress notifications emitted between trials.
#[derive(Debug)]
pub enum TrialEvent<'a> {
    /// A trial with this many workers is about to start
    Started { workers: usize },
    /// A trial finished
    Finished(&'a BatchRun),
}

/// Runs the dispatcher once per worker count.
#[derive(Debug, Clone)]
pub struct Benchmark<R> {
    dispatcher: Dispatcher<R>,
}

impl<R: TaskRunner> Benchmark<R> {
    pub fn new(runner: R) -> Self {
        Self {
            dispatcher: Dispatcher::new(runner),
        }
    }

    /// Run one trial per entry of `worker_counts`, in order.
    pub async fn run(
        &self,
        tasks: &[ImageTask],
        worker_counts: &[usize],
    ) -> Result<Vec<ExecutionReport>, BenchmarkError> {
        self.run_with(tasks, worker_counts, |_| {}).await
    }

    /// Like [`run`](Self::run), calling `observe` before and after each trial.
    pub async fn run_with<F>(
        &self,
        tasks: &[ImageTask],
        worker_counts: &[usize],
        mut observe: F,
    ) -> Result<Vec<ExecutionReport>, BenchmarkError>
    where
        F: FnMut(TrialEvent<'_>),
    {
        let counts = validate_counts(tasks, worker_counts)?;
        if counts[0].get() != 1 {
            tracing::warn!(
                "First worker count is {}, not 1: speed-up and efficiency are relative to \
                 that trial rather than a serial run",
                counts[0]
            );
        }

        let mut runs = Vec::with_capacity(counts.len());
        for workers in counts {
            observe(TrialEvent::Started {
                workers: workers.get(),
            });
            let run = self.dispatcher.run(tasks, workers).await;
            tracing::info!(
                "P={}: {} task(s) in {:.4}s ({} failed)",
                run.workers,
                run.outcomes.len(),
                run.elapsed.as_secs_f64(),
                run.failed()
            );
            observe(TrialEvent::Finished(&run));
            runs.push(run);
        }

        Ok(derive_reports(&runs))
    }
}

/// Check the preconditions shared by every benchmark run.
fn validate_counts(
    tasks: &[ImageTask],
    worker_counts: &[usize],
) -> Result<Vec<NonZeroUsize>, BenchmarkError> {
    if tasks.is_empty() {
        return Err(BenchmarkError::NoTasks);
    }
    if worker_counts.is_empty() {
        return Err(BenchmarkError::NoWorkerCounts);
    }
    worker_counts
        .iter()
        .map(|&p| NonZeroUsize::new(p).ok_or(BenchmarkError::InvalidWorkerCount(p)))
        .collect()
}

/// Turn recorded trials into reports relative to the first trial.
pub fn derive_reports(runs: &[BatchRun]) -> Vec<ExecutionReport> {
    let Some(baseline) = runs.first() else {
        return Vec::new();
    };
    let baseline_secs = baseline.elapsed.as_secs_f64();

    runs.iter()
        .enumerate()
        .map(|(index, run)| {
            let (speedup, efficiency) = if index == 0 {
                (1.0, 1.0)
            } else {
                let speedup = baseline_secs / run.elapsed.as_secs_f64();
                (speedup, speedup / run.workers as f64)
            };
            ExecutionReport {
                workers: run.workers,
                elapsed: run.elapsed,
                speedup,
                efficiency,
                succeeded: run.succeeded(),
                failed: run.failed(),
            }
        })
        .collect()
}
