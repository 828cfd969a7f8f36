//! Filter stage library and the fixed five-stage chain.
//!
//! ```text
//! RGB → Grayscale → Gaussian blur → Sobel → Sharpen → Brightness → Luma
//! ```
//!
//! The order is fixed. Sobel re-derives grayscale from its input and always
//! emits a single channel, so sharpen and brightness only ever see luma.

pub mod convolve;
pub mod stages;

pub use convolve::{convolve, convolve_plane, Kernel};
pub use stages::{
    brightness, gaussian_blur, grayscale, luminance, sharpen, sobel, DEFAULT_BRIGHTNESS_FACTOR,
};

use crate::buffer::PixelBuffer;
use crate::config::FilterConfig;

/// The fixed grayscale → blur → Sobel → sharpen → brightness chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterChain {
    brightness_factor: f64,
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new(DEFAULT_BRIGHTNESS_FACTOR)
    }
}

impl FilterChain {
    /// Create a chain with an explicit brightness multiplier.
    pub fn new(brightness_factor: f64) -> Self {
        Self { brightness_factor }
    }

    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.brightness_factor)
    }

    pub fn brightness_factor(&self) -> f64 {
        self.brightness_factor
    }

    /// Run all five stages in order.
    pub fn apply(&self, buffer: &PixelBuffer) -> PixelBuffer {
        let start = std::time::Instant::now();

        let gray = grayscale(buffer);
        tracing::trace!("  Grayscale: {:?}", start.elapsed());

        let blurred = gaussian_blur(&gray);
        tracing::trace!("  Gaussian blur: {:?}", start.elapsed());

        let edges = sobel(&blurred);
        tracing::trace!("  Sobel: {:?}", start.elapsed());

        let sharpened = sharpen(&edges);
        tracing::trace!("  Sharpen: {:?}", start.elapsed());

        let result = brightness(&sharpened, self.brightness_factor);
        tracing::trace!("  Brightness: {:?}", start.elapsed());

        result
    }
}
