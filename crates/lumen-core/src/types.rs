//! Core data types for the Lumen batch engine.
//!
//! These types describe units of work, their outcomes, and the per-trial
//! measurements produced by the benchmark harness.

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::PipelineError;

/// One image to transform: where to read it and where to write the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImageTask {
    /// Source image
    pub input: PathBuf,

    /// Destination in the mirrored output tree
    pub output: PathBuf,
}

impl ImageTask {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Build a task by re-rooting `input` from `input_root` to `output_root`.
    ///
    /// Returns `None` if `input` does not live under `input_root`.
    pub fn remap(input: &Path, input_root: &Path, output_root: &Path) -> Option<Self> {
        let relative = input.strip_prefix(input_root).ok()?;
        Some(Self::new(input, output_root.join(relative)))
    }
}

/// Result of running one [`ImageTask`] through the pipeline.
#[derive(Debug)]
pub enum TaskOutcome {
    /// The transformed image was written to `task.output`
    Success { task: ImageTask },

    /// The task failed; siblings are unaffected
    Failure { task: ImageTask, error: PipelineError },
}

impl TaskOutcome {
    /// The task this outcome belongs to.
    pub fn task(&self) -> &ImageTask {
        match self {
            TaskOutcome::Success { task } | TaskOutcome::Failure { task, .. } => task,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success { .. })
    }

    /// The failure cause, if any.
    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            TaskOutcome::Success { .. } => None,
            TaskOutcome::Failure { error, .. } => Some(error),
        }
    }
}

/// Everything the dispatcher collected for one batch.
#[derive(Debug)]
pub struct BatchRun {
    /// Number of workers the batch was split across
    pub workers: usize,

    /// One outcome per submitted task, in no particular order
    pub outcomes: Vec<TaskOutcome>,

    /// Wall-clock time from dispatch until every worker finished
    pub elapsed: Duration,
}

impl BatchRun {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Iterate over failed outcomes only.
    pub fn failures(&self) -> impl Iterator<Item = (&ImageTask, &PipelineError)> {
        self.outcomes.iter().filter_map(|o| match o {
            TaskOutcome::Failure { task, error } => Some((task, error)),
            TaskOutcome::Success { .. } => None,
        })
    }
}

/// Timing and scaling figures for one benchmark trial.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionReport {
    /// Worker count P
    pub workers: usize,

    /// Wall-clock duration of the trial
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,

    /// Baseline duration divided by this duration
    pub speedup: f64,

    /// Speed-up divided by P
    pub efficiency: f64,

    /// Tasks that completed successfully
    pub succeeded: usize,

    /// Tasks that failed
    pub failed: usize,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
