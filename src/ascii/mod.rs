//! Image to glyph conversion.
//!
//! The pipeline stages, leaves first:
//!
//! 1. **Resampling** - decoded image to an RGBA buffer on the output grid
//! 2. **Luminance** - RGBA to one byte per pixel using BT.601 weights
//! 3. **Contrast** - linear stretch around mid-gray
//! 4. **Blur** - separable Gaussian, ahead of edge detection
//! 5. **Edges** - Sobel gradient and 4-way direction bins
//! 6. **Rendering** - glyph selection per [`Mode`]
//!
//! # Character Sets
//!
//! Two glyph families are available via [`CharSet`]:
//! - `Ascii` - 29-level Latin/symbol ramp and box-drawing edge strokes
//! - `Braille` - 9-level (or 2-level) dot-matrix ramp and dot edge strokes

pub mod braille;
mod blur;
mod charset;
mod contrast;
mod dimensions;
mod edges;
mod grayscale;
mod grid;
mod mapping;
mod render;
mod resample;

pub use blur::{gaussian_blur, gaussian_kernel, DEFAULT_BLUR_RADIUS, MAX_BLUR_RADIUS};
pub use charset::{
    BrailleLevels, CharSet, EdgeGlyphSet, GlyphRamp, BRAILLE_BINARY_RAMP, BRAILLE_EDGES,
    BRAILLE_RAMP, STANDARD_EDGES, STANDARD_RAMP,
};
pub use contrast::{apply_contrast, contrast};
pub use dimensions::{
    derive_height, derive_height_with_aspect, derive_width, derive_width_with_aspect,
    is_valid_dimension, DEFAULT_CHAR_ASPECT_RATIO, DEFAULT_DIMENSION, MAX_DIMENSION,
};
pub use edges::{
    classify_edges, direction_for_angle, sobel_gradients, EdgeDirection, Gradient,
    DEFAULT_EDGE_THRESHOLD,
};
pub use grayscale::{luminance, to_luminance_into};
pub use grid::{Cell, GlyphGrid, OutputFormat};
pub use mapping::{bucket_width, map_to_glyphs_into, ramp_index};
pub use render::{
    render_color_shaded, render_edges, render_shaded, render_true_color, Mode, RenderPlan,
    TRUE_COLOR_GLYPH,
};
pub use resample::{resample, CellColor, PixelBuffer};
