//! Static scatter-gather over tokio's blocking thread pool.

use std::num::NonZeroUsize;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use crate::error::PipelineError;
use crate::types::{BatchRun, ImageTask, TaskOutcome};

use super::TaskRunner;

/// Split `tasks` into at most `workers` striped partitions.
///
/// Task `i` lands in partition `i % n` where `n = min(workers, tasks.len())`,
/// so every task appears in exactly one partition and no partition is empty.
pub fn partition(tasks: &[ImageTask], workers: usize) -> Vec<Vec<ImageTask>> {
    let n = workers.min(tasks.len());
    (0..n)
        .map(|start| tasks.iter().skip(start).step_by(n).cloned().collect())
        .collect()
}

/// Runs a task list across a fixed number of workers.
#[derive(Debug, Clone)]
pub struct Dispatcher<R> {
    runner: R,
}

impl<R: TaskRunner> Dispatcher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Process every task exactly once using `workers` parallel workers.
    ///
    /// Each partition is moved into its own blocking worker together with a
    /// clone of the runner. Elapsed time covers partitioning through the
    /// join of the last worker. Failed tasks are recorded, never retried.
    pub async fn run(&self, tasks: &[ImageTask], workers: NonZeroUsize) -> BatchRun {
        let start = Instant::now();
        let partitions = partition(tasks, workers.get());
        let stride = partitions.len();
        tracing::debug!(
            "Dispatching {} task(s) across {} worker(s)",
            tasks.len(),
            stride
        );

        let mut handles = Vec::with_capacity(stride);
        for (index, partition) in partitions.into_iter().enumerate() {
            let runner = self.runner.clone();
            let handle = tokio::task::spawn_blocking(move || {
                tracing::trace!("Worker {} starting with {} task(s)", index, partition.len());
                partition
                    .iter()
                    .map(|task| run_isolated(&runner, task))
                    .collect::<Vec<_>>()
            });
            handles.push(handle);
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(results) => outcomes.extend(results),
                Err(e) => {
                    tracing::error!("Worker {} terminated abnormally: {}", index, e);
                    // The lost partition is the same stripe `partition` built.
                    let lost = tasks.iter().skip(index).step_by(stride);
                    outcomes.extend(lost_partition(lost, &e.to_string()));
                }
            }
        }

        BatchRun {
            workers: workers.get(),
            outcomes,
            elapsed: start.elapsed(),
        }
    }
}

/// Mark every task of a partition whose worker died as failed.
fn lost_partition<'a>(
    tasks: impl Iterator<Item = &'a ImageTask> + 'a,
    message: &'a str,
) -> impl Iterator<Item = TaskOutcome> + 'a {
    tasks.map(move |task| TaskOutcome::Failure {
        task: task.clone(),
        error: PipelineError::Worker {
            path: task.input.clone(),
            message: message.to_string(),
        },
    })
}

/// Run one task, turning a panic into a failed outcome for that task only.
fn run_isolated<R: TaskRunner>(runner: &R, task: &ImageTask) -> TaskOutcome {
    panic::catch_unwind(AssertUnwindSafe(|| runner.run(task))).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic".to_string());
        TaskOutcome::Failure {
            task: task.clone(),
            error: PipelineError::Worker {
                path: task.input.clone(),
                message,
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn tasks(n: usize) -> Vec<ImageTask> {
        (0..n)
            .map(|i| ImageTask::new(format!("in/{i}.png"), format!("out/{i}.png")))
            .collect()
    }

    fn succeed(task: &ImageTask) -> TaskOutcome {
        TaskOutcome::Success { task: task.clone() }
    }

    fn sorted_inputs(run: &BatchRun) -> Vec<PathBuf> {
        let mut inputs: Vec<PathBuf> = run
            .outcomes
            .iter()
            .map(|o| o.task().input.clone())
            .collect();
        inputs.sort();
        inputs
    }

    #[test]
    fn test_partition_is_striped() {
        let parts = partition(&tasks(5), 2);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], vec![tasks(5)[0].clone(), tasks(5)[2].clone(), tasks(5)[4].clone()]);
        assert_eq!(parts[1], vec![tasks(5)[1].clone(), tasks(5)[3].clone()]);
    }

    #[test]
    fn test_partition_caps_workers_at_task_count() {
        assert_eq!(partition(&tasks(2), 8).len(), 2);
        assert!(partition(&[], 4).is_empty());
    }

    #[tokio::test]
    async fn test_every_task_processed_exactly_once() {
        let dispatcher = Dispatcher::new(succeed);
        for n in [0usize, 1, 3, 7, 16] {
            for p in [1usize, 2, 3, 4, 9] {
                let input = tasks(n);
                let run = dispatcher.run(&input, NonZeroUsize::new(p).unwrap()).await;

                assert_eq!(run.workers, p);
                assert_eq!(run.outcomes.len(), n);
                let mut expected: Vec<PathBuf> = input.iter().map(|t| t.input.clone()).collect();
                expected.sort();
                assert_eq!(sorted_inputs(&run), expected, "n={n} p={p}");
            }
        }
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_siblings() {
        let dispatcher = Dispatcher::new(|task: &ImageTask| {
            if task.input.ends_with("3.png") {
                TaskOutcome::Failure {
                    task: task.clone(),
                    error: PipelineError::FileNotFound(task.input.clone()),
                }
            } else {
                TaskOutcome::Success { task: task.clone() }
            }
        });

        let run = dispatcher.run(&tasks(6), NonZeroUsize::new(2).unwrap()).await;
        assert_eq!(run.succeeded(), 5);
        assert_eq!(run.failed(), 1);
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let dispatcher = Dispatcher::new(|task: &ImageTask| {
            if task.input.ends_with("1.png") {
                panic!("boom");
            }
            TaskOutcome::Success { task: task.clone() }
        });

        let run = dispatcher.run(&tasks(4), NonZeroUsize::new(1).unwrap()).await;
        assert_eq!(run.outcomes.len(), 4);
        assert_eq!(run.succeeded(), 3);
        let (task, error) = run.failures().next().unwrap();
        assert_eq!(task.input, PathBuf::from("in/1.png"));
        assert!(matches!(error, PipelineError::Worker { message, .. } if message == "boom"));
    }

    #[tokio::test]
    async fn test_workers_run_in_parallel() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let runner = {
            let (active, peak) = (active.clone(), peak.clone());
            move |task: &ImageTask| {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(100));
                active.fetch_sub(1, Ordering::SeqCst);
                TaskOutcome::Success { task: task.clone() }
            }
        };

        let run = Dispatcher::new(runner)
            .run(&tasks(4), NonZeroUsize::new(4).unwrap())
            .await;
        assert_eq!(run.succeeded(), 4);
        assert!(peak.load(Ordering::SeqCst) >= 2);
        assert!(peak.load(Ordering::SeqCst) <= 4);
        assert!(run.elapsed >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_serial_run_never_overlaps() {
        let active = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let runner = {
            let (active, peak) = (active.clone(), peak.clone());
            move |task: &ImageTask| {
                let now = active.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(5));
                active.fetch_sub(1, Ordering::SeqCst);
                TaskOutcome::Success { task: task.clone() }
            }
        };

        let run = Dispatcher::new(runner)
            .run(&tasks(4), NonZeroUsize::new(1).unwrap())
            .await;
        assert_eq!(run.succeeded(), 4);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_lost_partition_fails_each_task() {
        let all = tasks(5);
        let outcomes: Vec<_> = lost_partition(all.iter().skip(1).step_by(2), "cancelled").collect();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].task().input, PathBuf::from("in/1.png"));
        assert_eq!(outcomes[1].task().input, PathBuf::from("in/3.png"));
        assert!(outcomes.iter().all(|o| matches!(
            o.error(),
            Some(PipelineError::Worker { message, .. }) if message == "cancelled"
        )));
    }
}
