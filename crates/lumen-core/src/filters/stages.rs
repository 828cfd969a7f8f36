//! The five pixel transforms of the Lumen pipeline.
//!
//! Every stage borrows its input and returns a freshly allocated buffer.

use crate::buffer::{Channels, PixelBuffer};

use super::convolve::{convolve, convolve_plane, Kernel};

/// Default multiplier for [`brightness`].
pub const DEFAULT_BRIGHTNESS_FACTOR: f64 = 1.2;

/// Luma of one RGB pixel: `0.299 R + 0.587 G + 0.114 B`, truncated.
///
/// Computed in integer thousandths so that flat grays map to themselves
/// exactly.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    (weighted / 1000) as u8
}

/// Stage 1: collapse RGB to a single luma channel.
///
/// Single-channel input is returned unchanged.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    match buffer.channels() {
        Channels::Gray => buffer.clone(),
        Channels::Rgb => {
            let data: Vec<u8> = buffer
                .as_slice()
                .chunks_exact(3)
                .map(|px| luminance(px[0], px[1], px[2]))
                .collect();
            PixelBuffer::from_raw_parts(buffer.width(), buffer.height(), Channels::Gray, data)
        }
    }
}

/// Stage 2: 3×3 Gaussian smoothing on every channel.
pub fn gaussian_blur(buffer: &PixelBuffer) -> PixelBuffer {
    convolve(buffer, &Kernel::GAUSSIAN)
}

/// Stage 3: Sobel gradient magnitude.
///
/// Grayscale is re-derived from the input rather than assumed, so the output
/// is single-channel for any input layout.
pub fn sobel(buffer: &PixelBuffer) -> PixelBuffer {
    let gray = grayscale(buffer);
    let (w, h) = (gray.width(), gray.height());
    let plane = gray.plane(0);

    let ix = convolve_plane(&plane, w, h, &Kernel::SOBEL_X);
    let iy = convolve_plane(&plane, w, h, &Kernel::SOBEL_Y);
    let magnitude: Vec<f32> = ix
        .iter()
        .zip(&iy)
        .map(|(gx, gy)| (gx * gx + gy * gy).sqrt())
        .collect();

    PixelBuffer::from_wide(w, h, Channels::Gray, &magnitude)
}

/// Stage 4: edge enhancement on whatever channels the buffer has.
pub fn sharpen(buffer: &PixelBuffer) -> PixelBuffer {
    convolve(buffer, &Kernel::SHARPEN)
}

/// Stage 5: scale every sample by `factor`, clamped to [0, 255].
pub fn brightness(buffer: &PixelBuffer, factor: f64) -> PixelBuffer {
    let data: Vec<u8> = buffer
        .as_slice()
        .iter()
        .map(|&v| {
            let scaled = f64::from(v) * factor;
            if scaled.is_nan() {
                0
            } else {
                scaled.clamp(0.0, 255.0) as u8
            }
        })
        .collect();
    PixelBuffer::from_raw_parts(buffer.width(), buffer.height(), buffer.channels(), data)
}
