//! Lumen Core - fixed-pipeline image filtering and parallel scaling benchmarks.
//!
//! Lumen pushes every image of a directory tree through a fixed five-stage
//! filter chain and mirrors the results into an output tree, measuring how
//! wall-clock time scales with the number of parallel workers.
//!
//! # Architecture
//!
//! ```text
//! Benchmark → Dispatcher (per P) → ImageProcessor (per task, in a worker)
//!           → FilterChain → convolve
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use lumen_core::{Benchmark, Config, ImageProcessor};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let tasks = ImageProcessor::plan(&config);
//!     let bench = Benchmark::new(ImageProcessor::new(&config));
//!
//!     let reports = bench.run(&tasks, &config.benchmark.worker_counts).await?;
//!     for r in &reports {
//!         println!("P={} speed-up={:.2}", r.workers, r.speedup);
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod filters;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use buffer::{Channels, PixelBuffer};
pub use config::Config;
pub use engine::{Benchmark, Dispatcher, TaskRunner, TrialEvent};
pub use error::{BenchmarkError, BufferError, ConfigError, PipelineError, PipelineResult};
pub use filters::{FilterChain, Kernel, DEFAULT_BRIGHTNESS_FACTOR};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{FileDiscovery, ImageProcessor};
pub use types::{BatchRun, ExecutionReport, ImageTask, TaskOutcome};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
