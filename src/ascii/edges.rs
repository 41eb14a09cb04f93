//! Sobel edge estimation and direction classification.

/// Default gradient magnitude below which a pixel is considered flat.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 50.0;

/// Edge direction detected by gradient analysis.
///
/// Directions name the gradient, not the contour: a left-to-right brightness
/// step has its gradient along x and classifies as `Horizontal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Magnitude under the threshold
    Flat,
    /// Angle near 0° or 180°
    Horizontal,
    /// Angle near 45° or 225°
    Diagonal1,
    /// Angle near 90° or 270°
    Vertical,
    /// Angle near 135° or 315°
    Diagonal2,
}

/// Sobel gradient at one pixel, scaled by 1/8.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Gradient {
    pub gx: f32,
    pub gy: f32,
}

impl Gradient {
    pub fn magnitude(&self) -> f32 {
        (self.gx * self.gx + self.gy * self.gy).sqrt()
    }

    /// Gradient angle in degrees, normalized to `[0, 360)`.
    pub fn angle_degrees(&self) -> f32 {
        let angle = self.gy.atan2(self.gx).to_degrees();
        let angle = if angle < 0.0 { angle + 360.0 } else { angle };
        // -0.0 or a tiny negative angle can round up to exactly 360
        if angle >= 360.0 {
            0.0
        } else {
            angle
        }
    }

    /// Classify into one of four 45°-wide direction bins, or `Flat`.
    ///
    /// Bin boundaries sit at 22.5° + 45°k and are half-open: the lower
    /// boundary belongs to the bin.
    pub fn classify(&self, threshold: f32) -> EdgeDirection {
        if self.magnitude() < threshold {
            return EdgeDirection::Flat;
        }
        direction_for_angle(self.angle_degrees())
    }
}

/// Direction bin for a normalized angle in degrees.
pub fn direction_for_angle(angle: f32) -> EdgeDirection {
    if !(22.5..337.5).contains(&angle) || (157.5..202.5).contains(&angle) {
        EdgeDirection::Horizontal
    } else if (22.5..67.5).contains(&angle) || (202.5..247.5).contains(&angle) {
        EdgeDirection::Diagonal1
    } else if (67.5..112.5).contains(&angle) || (247.5..292.5).contains(&angle) {
        EdgeDirection::Vertical
    } else {
        EdgeDirection::Diagonal2
    }
}

/// Sobel gradients for the interior pixels of a luminance image.
///
/// The kernels used are:
/// ```text
/// Gx:          Gy:
/// [-1  0  1]   [-1 -2 -1]
/// [-2  0  2]   [ 0  0  0]
/// [-1  0  1]   [ 1  2  1]
/// ```
/// each divided by 8.
///
/// # Arguments
///
/// * `gray` - Luminance, one byte per pixel, row-major
/// * `width`, `height` - Dimensions of `gray`
///
/// # Returns
///
/// One gradient per interior pixel in row-major order. The outermost ring
/// is excluded, so the result has `(width - 2) * (height - 2)` entries, and
/// images narrower or shorter than 3 pixels yield an empty result.
pub fn sobel_gradients(gray: &[u8], width: u32, height: u32) -> Vec<Gradient> {
    let w = width as usize;
    let h = height as usize;
    if w < 3 || h < 3 || gray.len() < w * h {
        return Vec::new();
    }

    let mut result = Vec::with_capacity((w - 2) * (h - 2));
    let at = |x: usize, y: usize| gray[y * w + x] as f32;

    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let nw = at(x - 1, y - 1);
            let n = at(x, y - 1);
            let ne = at(x + 1, y - 1);
            let west = at(x - 1, y);
            let east = at(x + 1, y);
            let sw = at(x - 1, y + 1);
            let s = at(x, y + 1);
            let se = at(x + 1, y + 1);

            let gx = (-nw + ne - 2.0 * west + 2.0 * east - sw + se) / 8.0;
            let gy = (-nw - 2.0 * n - ne + sw + 2.0 * s + se) / 8.0;
            result.push(Gradient { gx, gy });
        }
    }

    result
}

/// Classify every interior pixel of a luminance image, in the same order as
/// [`sobel_gradients`].
pub fn classify_edges(gray: &[u8], width: u32, height: u32, threshold: f32) -> Vec<EdgeDirection> {
    sobel_gradients(gray, width, height)
        .iter()
        .map(|g| g.classify(threshold))
        .collect()
}
