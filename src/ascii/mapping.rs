//! Intensity to glyph mapping.

use super::charset::GlyphRamp;

/// Width of one intensity bucket for a ramp of `levels` glyphs.
///
/// `floor(255 / (levels - 1))`, never less than 1.
pub fn bucket_width(levels: usize) -> u8 {
    if levels < 2 {
        return 255;
    }
    ((255 / (levels - 1)) as u8).max(1)
}

/// Ramp index for an intensity sample: `min(floor(sample / divider), levels - 1)`.
///
/// Index 0 is returned for sample 0 and `levels - 1` for sample 255.
#[inline]
pub fn ramp_index(sample: u8, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    let divider = bucket_width(levels) as usize;
    (sample as usize / divider).min(levels - 1)
}

/// Map intensity samples to glyphs, reusing an existing buffer.
///
/// Returns the number of glyphs written.
///
/// # Example
/// ```ignore
/// let mut glyphs = Vec::new();
/// map_to_glyphs_into(&[0, 128, 255], GlyphRamp::standard(), &mut glyphs);
/// assert_eq!(glyphs, vec![' ', '0', 'Ñ']);
/// ```
pub fn map_to_glyphs_into(samples: &[u8], ramp: GlyphRamp, buffer: &mut Vec<char>) -> usize {
    buffer.clear();
    buffer.reserve(samples.len());
    buffer.extend(samples.iter().map(|&s| ramp.glyph_for(s)));
    samples.len()
}
