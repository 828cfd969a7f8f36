//! In-memory pixel buffers shared by every filter stage.
//!
//! A [`PixelBuffer`] is a dense, row-major, channel-interleaved array of `u8`
//! intensities with either one (luma) or three (RGB) channels. Filters widen
//! to `f32` internally and clamp back to `u8` before returning.

use image::{DynamicImage, GrayImage, RgbImage};

use crate::error::BufferError;

/// Channel layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single intensity channel
    Gray,
    /// Red, green, blue interleaved
    Rgb,
}

impl Channels {
    /// Number of interleaved values per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }

    /// Map a raw channel count to a layout.
    pub fn from_count(count: usize) -> Result<Self, BufferError> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(BufferError::UnsupportedChannels(other)),
        }
    }
}

/// Dense 8-bit image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved data, checking its length against the dimensions.
    pub fn new(
        width: usize,
        height: usize,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                channels: channels.count(),
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Buffer where every pixel holds the same value per channel.
    pub fn filled(width: usize, height: usize, pixel: &[u8]) -> Result<Self, BufferError> {
        let channels = Channels::from_count(pixel.len())?;
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * pixel.len())
            .collect();
        Self::new(width, height, channels, data)
    }

    /// Wrap samples whose length the caller has already guaranteed.
    pub(crate) fn from_raw_parts(
        width: usize,
        height: usize,
        channels: Channels,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * channels.count());
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Build a buffer from `f32` samples, clamping to [0, 255] and truncating.
    pub(crate) fn from_wide(
        width: usize,
        height: usize,
        channels: Channels,
        samples: &[f32],
    ) -> Self {
        let data = samples.iter().map(|&v| clamp_to_u8(v)).collect();
        Self::from_raw_parts(width, height, channels, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Raw interleaved samples.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Number of pixels (not samples).
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Sample at `(x, y)` for channel `c`.
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[(y * self.width + x) * self.channels.count() + c]
    }

    /// Extract one channel as a widened plane.
    pub(crate) fn plane(&self, channel: usize) -> Vec<f32> {
        let stride = self.channels.count();
        self.data
            .iter()
            .skip(channel)
            .step_by(stride)
            .map(|&v| f32::from(v))
            .collect()
    }

    /// Convert to an `image` crate buffer for encoding.
    pub fn into_dynamic_image(self) -> DynamicImage {
        let (w, h) = (self.width as u32, self.height as u32);
        match self.channels {
            // Lengths were validated on construction, so these cannot fail.
            Channels::Gray => GrayImage::from_raw(w, h, self.data)
                .map(DynamicImage::ImageLuma8)
                .unwrap_or_else(|| DynamicImage::new_luma8(w, h)),
            Channels::Rgb => RgbImage::from_raw(w, h, self.data)
                .map(DynamicImage::ImageRgb8)
                .unwrap_or_else(|| DynamicImage::new_rgb8(w, h)),
        }
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(image: RgbImage) -> Self {
        let (w, h) = image.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            channels: Channels::Rgb,
            data: image.into_raw(),
        }
    }
}

impl From<GrayImage> for PixelBuffer {
    fn from(image: GrayImage) -> Self {
        let (w, h) = image.dimensions();
        Self {
            width: w as usize,
            height: h as usize,
            channels: Channels::Gray,
            data: image.into_raw(),
        }
    }
}

/// Clamp a wide sample to [0, 255] and truncate toward zero.
#[inline]
pub(crate) fn clamp_to_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, 255.0) as u8
}
