//! Output grid dimensions and aspect-ratio derivation.

/// Glyph cells are roughly twice as tall as they are wide.
pub const DEFAULT_CHAR_ASPECT_RATIO: f64 = 2.0;

/// Largest accepted output width or height.
pub const MAX_DIMENSION: u32 = 1000;

/// Default output width and height.
pub const DEFAULT_DIMENSION: u32 = 150;

/// Height that keeps a source of aspect ratio `aspect` (width / height)
/// undistorted at `width` columns: `floor(width / aspect / 2)`.
pub fn derive_height(width: u32, aspect: f64) -> u32 {
    derive_height_with_aspect(width, aspect, DEFAULT_CHAR_ASPECT_RATIO)
}

/// Width that keeps a source undistorted at `height` rows:
/// `floor(height * aspect * 2)`.
pub fn derive_width(height: u32, aspect: f64) -> u32 {
    derive_width_with_aspect(height, aspect, DEFAULT_CHAR_ASPECT_RATIO)
}

/// [`derive_height`] with a custom cell aspect ratio (height / width).
pub fn derive_height_with_aspect(width: u32, aspect: f64, char_aspect: f64) -> u32 {
    if aspect <= 0.0 || char_aspect <= 0.0 {
        return 0;
    }
    saturate((width as f64 / aspect) / char_aspect)
}

/// [`derive_width`] with a custom cell aspect ratio (height / width).
pub fn derive_width_with_aspect(height: u32, aspect: f64, char_aspect: f64) -> u32 {
    if aspect <= 0.0 || char_aspect <= 0.0 {
        return 0;
    }
    saturate((height as f64 * aspect) * char_aspect)
}

/// True if `value` is a usable output dimension.
pub fn is_valid_dimension(value: u32) -> bool {
    (1..=MAX_DIMENSION).contains(&value)
}

fn saturate(value: f64) -> u32 {
    if !value.is_finite() {
        return u32::MAX;
    }
    value.floor().clamp(0.0, u32::MAX as f64) as u32
}
