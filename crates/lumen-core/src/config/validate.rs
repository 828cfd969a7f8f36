//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.supported_formats.is_empty() {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must not be empty".into(),
            ));
        }
        if !self.filters.brightness_factor.is_finite() || self.filters.brightness_factor < 0.0 {
            return Err(ConfigError::ValidationError(
                "filters.brightness_factor must be a finite value >= 0.0".into(),
            ));
        }
        if self.benchmark.worker_counts.is_empty() {
            return Err(ConfigError::ValidationError(
                "benchmark.worker_counts must not be empty".into(),
            ));
        }
        if self.benchmark.worker_counts.contains(&0) {
            return Err(ConfigError::ValidationError(
                "benchmark.worker_counts entries must be > 0".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be \"pretty\" or \"json\" (got {:?})",
                self.logging.format
            )));
        }
        Ok(())
    }
}
