//! Linear contrast stretch around the mid-gray point.

/// Remap one luminance sample: `floor(((v/255 - 0.5) * factor + 0.5) * 255)`.
///
/// Evaluated as `(v - 127.5) * factor + 127.5`, which is the same expression
/// but exact for `factor == 1.0`. Results outside the byte range saturate.
#[inline]
pub fn contrast(value: u8, factor: f32) -> u8 {
    let stretched = (value as f32 - 127.5) * factor + 127.5;
    stretched.floor().clamp(0.0, 255.0) as u8
}

/// Apply [`contrast`] to every sample.
pub fn apply_contrast(luminance: &[u8], factor: f32) -> Vec<u8> {
    luminance.iter().map(|&v| contrast(v, factor)).collect()
}
