//! Writing processed buffers into the output tree.

use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;

/// Encodes buffers to disk, creating parent directories on demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEncoder;

impl ImageEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Write `buffer` to `path`, overwriting any existing file.
    ///
    /// The container format follows the extension of `path`.
    pub fn encode(&self, buffer: PixelBuffer, path: &Path) -> Result<(), PipelineError> {
        Self::ensure_parent(path)?;
        buffer
            .into_dynamic_image()
            .save(path)
            .map_err(|e| PipelineError::Encode {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Create the directory that will hold `path`.
    ///
    /// Safe to race: an already existing directory is not an error.
    fn ensure_parent(path: &Path) -> Result<(), PipelineError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
                .map_err(|e| PipelineError::Filesystem {
                    path: parent.to_path_buf(),
                    message: format!("Cannot create output directory: {}", e),
                }),
            _ => Ok(()),
        }
    }
}
