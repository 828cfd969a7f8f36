//! Error types for the Lumen filter pipeline and benchmark engine.
//!
//! Errors are organized by layer so that every message carries the context a
//! user needs to act on it: the offending path, the stage that failed, or the
//! configuration key that is out of range.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while pushing one image through the pipeline.
///
/// These never escape a worker: the processor converts them into a
/// [`TaskOutcome::Failure`](crate::types::TaskOutcome::Failure).
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Image could not be read or decoded
    #[error("Decode error for {}: {message}", path.display())]
    Decode { path: PathBuf, message: String },

    /// Output directory could not be created
    #[error("Filesystem error for {}: {message}", path.display())]
    Filesystem { path: PathBuf, message: String },

    /// Processed image could not be encoded or written
    #[error("Encode error for {}: {message}", path.display())]
    Encode { path: PathBuf, message: String },

    /// The worker running this task terminated abnormally
    #[error("Worker failed while processing {}: {message}", path.display())]
    Worker { path: PathBuf, message: String },
}

impl PipelineError {
    /// Input path the failure refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::FileNotFound(path) => path,
            Self::Decode { path, .. }
            | Self::Filesystem { path, .. }
            | Self::Encode { path, .. }
            | Self::Worker { path, .. } => path,
        }
    }
}

/// Preconditions the benchmark harness checks before running any trial.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BenchmarkError {
    /// The task list is empty
    #[error("No image tasks to benchmark")]
    NoTasks,

    /// The list of worker counts is empty
    #[error("At least one worker count is required")]
    NoWorkerCounts,

    /// A worker count of zero was supplied
    #[error("Worker count must be > 0 (got {0})")]
    InvalidWorkerCount(usize),
}

/// Errors building a [`PixelBuffer`](crate::buffer::PixelBuffer).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BufferError {
    /// Data length does not match `width * height * channels`
    #[error("Buffer length {actual} does not match {width}x{height}x{channels} = {expected}")]
    LengthMismatch {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    /// Only 1- and 3-channel buffers are supported
    #[error("Unsupported channel count: {0}")]
    UnsupportedChannels(usize),
}

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
