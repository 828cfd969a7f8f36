//! Parallel batch execution and scaling benchmarks.
//!
//! - **dispatcher**: Splits a task list across P blocking workers and
//!   gathers one outcome per task
//! - **benchmark**: Runs the dispatcher once per worker count and derives
//!   speed-up and efficiency against the first trial

pub mod benchmark;
pub mod dispatcher;

pub use benchmark::{derive_reports, Benchmark, TrialEvent};
pub use dispatcher::{partition, Dispatcher};

use crate::types::{ImageTask, TaskOutcome};

/// Work executed once per task inside a worker.
///
/// Implementations must be self-contained: each worker receives its own
/// clone and no state flows between tasks.
pub trait TaskRunner: Clone + Send + Sync + 'static {
    fn run(&self, task: &ImageTask) -> TaskOutcome;
}

impl<F> TaskRunner for F
where
    F: Fn(&ImageTask) -> TaskOutcome + Clone + Send + Sync + 'static,
{
    fn run(&self, task: &ImageTask) -> TaskOutcome {
        self(task)
    }
}
