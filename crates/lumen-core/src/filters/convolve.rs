//! 3×3 convolution with reflected borders.
//!
//! - The kernel is applied as a true convolution (weights flipped), so
//!   asymmetric kernels such as Sobel produce derivatives with the
//!   conventional sign. Symmetric kernels are unaffected.
//! - Samples outside the buffer are taken by half-sample reflection
//!   (`d c b a | a b c d | d c b a`), the one border policy used by every
//!   filter in the pipeline.
//! - Accumulation happens in `f32`; only [`convolve`] clamps back to `u8`.

use crate::buffer::PixelBuffer;

/// Immutable 3×3 weight matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    weights: [[f32; 3]; 3],
}

impl Kernel {
    /// Normalized Gaussian smoothing kernel, `[[1,2,1],[2,4,2],[1,2,1]] / 16`.
    pub const GAUSSIAN: Kernel = Kernel::new([
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    ]);

    /// Horizontal Sobel derivative.
    pub const SOBEL_X: Kernel = Kernel::new([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);

    /// Vertical Sobel derivative.
    pub const SOBEL_Y: Kernel = Kernel::new([[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]]);

    /// Unity-sum edge enhancement kernel.
    pub const SHARPEN: Kernel = Kernel::new([
        [0.0, -1.0, 0.0],
        [-1.0, 5.0, -1.0],
        [0.0, -1.0, 0.0],
    ]);

    pub const fn new(weights: [[f32; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Sum of all weights (1.0 for brightness-preserving kernels).
    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }
}

/// Map a possibly out-of-range coordinate into `0..n` by reflection.
#[inline]
fn reflect(mut i: isize, n: usize) -> usize {
    let n = n as isize;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Convolve a single `f32` plane of `width * height` samples.
///
/// Returns the unclamped result so callers can combine several passes
/// (e.g. gradient magnitude) before narrowing.
pub fn convolve_plane(plane: &[f32], width: usize, height: usize, kernel: &Kernel) -> Vec<f32> {
    debug_assert_eq!(plane.len(), width * height);
    let mut out = vec![0.0f32; width * height];
    if width == 0 || height == 0 {
        return out;
    }

    let k = &kernel.weights;
    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0f32;
            for (ky, row) in k.iter().enumerate() {
                let sy = reflect(y as isize + 1 - ky as isize, height);
                let src = &plane[sy * width..(sy + 1) * width];
                for (kx, &w) in row.iter().enumerate() {
                    let sx = reflect(x as isize + 1 - kx as isize, width);
                    acc += w * src[sx];
                }
            }
            out[y * width + x] = acc;
        }
    }
    out
}

/// Convolve every channel of `buffer` independently and re-interleave.
///
/// The output has the same dimensions and channel count as the input; each
/// sample is clamped to [0, 255] and truncated.
pub fn convolve(buffer: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let (w, h) = (buffer.width(), buffer.height());
    let channels = buffer.channels();
    let stride = channels.count();

    let mut interleaved = vec![0.0f32; w * h * stride];
    for c in 0..stride {
        let result = convolve_plane(&buffer.plane(c), w, h, kernel);
        for (i, v) in result.into_iter().enumerate() {
            interleaved[i * stride + c] = v;
        }
    }
    PixelBuffer::from_wide(w, h, channels, &interleaved)
}
