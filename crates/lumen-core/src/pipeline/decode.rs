//! Image decoding into the canonical RGB pixel buffer.

use image::ImageReader;
use std::path::Path;

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;

/// Decodes image files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Read `path` and convert it to an RGB8 [`PixelBuffer`].
    ///
    /// The format is detected from the file content, falling back to the
    /// extension. Alpha and palette information is discarded.
    pub fn decode(&self, path: &Path) -> Result<PixelBuffer, PipelineError> {
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let reader = ImageReader::open(path)
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot open file: {}", e),
            })?
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {}", e),
            })?;

        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(PixelBuffer::from(image.to_rgb8()))
    }
}
