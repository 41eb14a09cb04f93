//! Separable Gaussian blur on RGBA buffers.
//!
//! Smoothing runs ahead of gradient estimation so single-pixel noise does not
//! register as an edge.

use super::resample::PixelBuffer;

/// Default kernel radius.
pub const DEFAULT_BLUR_RADIUS: u32 = 2;

/// Largest accepted kernel radius.
pub const MAX_BLUR_RADIUS: u32 = 10;

/// Normalized 1-D Gaussian kernel of length `2 * radius + 1`.
///
/// `w[i] = exp(-i² / (2σ²))` for `i` in `[-radius, radius]` with
/// `σ = radius / 3`, scaled to sum to 1. Radius 0 yields the identity
/// kernel `[1.0]`.
pub fn gaussian_kernel(radius: u32) -> Vec<f32> {
    if radius == 0 {
        return vec![1.0];
    }

    let r = radius as i32;
    let sigma = radius as f64 / 3.0;
    let two_sigma_sq = 2.0 * sigma * sigma;

    let weights: Vec<f64> = (-r..=r)
        .map(|i| (-((i * i) as f64) / two_sigma_sq).exp())
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.into_iter().map(|w| (w / sum) as f32).collect()
}

/// Blur every channel of `pixels` with a Gaussian of the given radius.
///
/// Horizontal pass first, then vertical over its result. Neighbors past the
/// border replicate the edge pixel.
///
/// # Arguments
///
/// * `pixels` - Source RGBA buffer
/// * `radius` - Kernel radius; the kernel has `2 * radius + 1` taps
///
/// # Returns
///
/// A new buffer of the same dimensions. Radius 0 returns a copy.
pub fn gaussian_blur(pixels: &PixelBuffer, radius: u32) -> PixelBuffer {
    let width = pixels.width() as usize;
    let height = pixels.height() as usize;
    if radius == 0 || width == 0 || height == 0 {
        return pixels.clone();
    }

    let kernel = gaussian_kernel(radius);
    let horizontal = convolve(pixels.data(), width, height, &kernel, Axis::Horizontal);
    let vertical = convolve(&horizontal, width, height, &kernel, Axis::Vertical);

    // Same dimensions as the input, so the length check cannot fail.
    PixelBuffer::from_rgba(pixels.width(), pixels.height(), vertical)
        .unwrap_or_else(|| pixels.clone())
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn convolve(src: &[u8], width: usize, height: usize, kernel: &[f32], axis: Axis) -> Vec<u8> {
    let radius = (kernel.len() / 2) as isize;
    let weight_sum: f32 = kernel.iter().sum();
    let mut out = vec![0u8; src.len()];

    for y in 0..height {
        for x in 0..width {
            let mut acc = [0f32; 4];

            for (k, &weight) in kernel.iter().enumerate() {
                let offset = k as isize - radius;
                let (sx, sy) = match axis {
                    Axis::Horizontal => (clamp_index(x as isize + offset, width), y),
                    Axis::Vertical => (x, clamp_index(y as isize + offset, height)),
                };
                let idx = (sy * width + sx) * 4;
                for (c, sum) in acc.iter_mut().enumerate() {
                    *sum += src[idx + c] as f32 * weight;
                }
            }

            let idx = (y * width + x) * 4;
            for (c, sum) in acc.iter().enumerate() {
                out[idx + c] = (sum / weight_sum).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}
