//! Pipeline orchestration: decode, filter, encode for one task.

use std::time::Instant;

use crate::config::Config;
use crate::engine::TaskRunner;
use crate::error::PipelineResult;
use crate::filters::FilterChain;
use crate::types::{ImageTask, TaskOutcome};

use super::decode::ImageDecoder;
use super::discovery::FileDiscovery;
use super::encode::ImageEncoder;

/// Runs one image through decode → five filter stages → encode.
///
/// Holds only immutable settings, so cloning it per worker is cheap.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    decoder: ImageDecoder,
    filters: FilterChain,
    encoder: ImageEncoder,
}

impl ImageProcessor {
    /// Create a new image processor with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_filters(FilterChain::from_config(&config.filters))
    }

    /// Create a processor around an explicit filter chain.
    pub fn with_filters(filters: FilterChain) -> Self {
        Self {
            decoder: ImageDecoder::new(),
            filters,
            encoder: ImageEncoder::new(),
        }
    }

    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    /// Process one task, converting any error into a failed outcome.
    pub fn process(&self, task: &ImageTask) -> TaskOutcome {
        match self.try_process(task) {
            Ok(()) => TaskOutcome::Success { task: task.clone() },
            Err(error) => {
                tracing::debug!("Failed: {}", error);
                TaskOutcome::Failure {
                    task: task.clone(),
                    error,
                }
            }
        }
    }

    fn try_process(&self, task: &ImageTask) -> PipelineResult<()> {
        let start = Instant::now();
        tracing::debug!("Processing: {:?}", task.input);

        let decoded = self.decoder.decode(&task.input)?;
        let decode_time = start.elapsed();
        tracing::trace!("  Decode: {:?}", decode_time);

        let (width, height) = (decoded.width(), decoded.height());
        let filtered = self.filters.apply(&decoded);
        drop(decoded);

        let encode_start = Instant::now();
        self.encoder.encode(filtered, &task.output)?;
        tracing::trace!("  Encode: {:?}", encode_start.elapsed());

        tracing::debug!(
            "Processed {:?} in {:?} ({}x{})",
            task.input,
            start.elapsed(),
            width,
            height
        );
        Ok(())
    }

    /// Discover images under the configured roots and plan their tasks.
    pub fn plan(config: &Config) -> Vec<ImageTask> {
        FileDiscovery::new(config.processing.clone())
            .plan_tasks(&config.input_dir(), &config.output_dir())
    }
}

impl Default for ImageProcessor {
    fn default() -> Self {
        Self::with_filters(FilterChain::default())
    }
}

impl TaskRunner for ImageProcessor {
    fn run(&self, task: &ImageTask) -> TaskOutcome {
        self.process(task)
    }
}
