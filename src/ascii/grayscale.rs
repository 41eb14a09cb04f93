//! RGBA to luminance conversion using the ITU-R BT.601 weights.

/// Luminance of one pixel: `floor(0.299*R + 0.587*G + 0.114*B)`.
///
/// Uses integer math with the coefficients scaled by 1000
/// (299 + 587 + 114 = 1000), which keeps white at exactly 255.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}

/// Convert RGBA bytes to one luminance byte per pixel, reusing an
/// existing buffer. Alpha is ignored.
///
/// A trailing partial pixel (length not divisible by 4) is skipped.
/// Returns the number of pixels written.
pub fn to_luminance_into(rgba: &[u8], buffer: &mut Vec<u8>) -> usize {
    buffer.clear();
    buffer.reserve(rgba.len() / 4);
    for px in rgba.chunks_exact(4) {
        buffer.push(luminance(px[0], px[1], px[2]));
    }
    buffer.len()
}
