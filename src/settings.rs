//! Conversion settings and the typed update path.

use std::fmt;

use crate::ascii::{
    derive_height, derive_width, is_valid_dimension, BrailleLevels, CharSet, Mode,
    DEFAULT_BLUR_RADIUS, DEFAULT_DIMENSION, DEFAULT_EDGE_THRESHOLD, MAX_BLUR_RADIUS,
    MAX_DIMENSION,
};
use crate::error::ConvertError;

/// Session-wide conversion settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_width: u32,
    pub output_height: u32,
    /// 1.0 leaves luminance unchanged
    pub contrast_factor: f32,
    pub reverse_intensity: bool,
    pub maintain_aspect_ratio: bool,
    pub mode: Mode,
    pub charset: CharSet,
    /// Gaussian radius ahead of edge detection; 0 disables smoothing
    pub blur_radius: u32,
    /// Gradient magnitude below which a pixel is flat
    pub edge_threshold: f32,
    pub braille_levels: BrailleLevels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_width: DEFAULT_DIMENSION,
            output_height: DEFAULT_DIMENSION,
            contrast_factor: 1.0,
            reverse_intensity: false,
            maintain_aspect_ratio: false,
            mode: Mode::Grayscale,
            charset: CharSet::Ascii,
            blur_radius: DEFAULT_BLUR_RADIUS,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            braille_levels: BrailleLevels::Nine,
        }
    }
}

/// One setting change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingUpdate {
    OutputWidth(u32),
    OutputHeight(u32),
    ContrastFactor(f32),
    ReverseIntensity(bool),
    MaintainAspectRatio(bool),
    Mode(Mode),
    CharSet(CharSet),
    BlurRadius(u32),
    EdgeThreshold(f32),
    BrailleLevels(BrailleLevels),
}

/// Setting keys accepted by [`SettingUpdate::parse`].
pub const SETTING_KEYS: [&str; 10] = [
    "outputWidth",
    "outputHeight",
    "contrastFactor",
    "reverseIntensity",
    "maintainAspectRatio",
    "mode",
    "charSet",
    "blurRadius",
    "edgeThreshold",
    "brailleLevels",
];

impl SettingUpdate {
    /// Parse a string key and value.
    ///
    /// Keys are matched case-insensitively with `-` and `_` ignored, so
    /// `outputWidth`, `output_width` and `output-width` are the same key.
    pub fn parse(key: &str, value: &str) -> Result<Self, ConvertError> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let value = value.trim();
        let invalid = || ConvertError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        let update = match normalized.as_str() {
            "outputwidth" | "width" => {
                let raw = parse_integer(value).ok_or_else(invalid)?;
                SettingUpdate::OutputWidth(parse_dimension("outputWidth", raw)?)
            }
            "outputheight" | "height" => {
                let raw = parse_integer(value).ok_or_else(invalid)?;
                SettingUpdate::OutputHeight(parse_dimension("outputHeight", raw)?)
            }
            "contrastfactor" | "contrast" => {
                SettingUpdate::ContrastFactor(value.parse().map_err(|_| invalid())?)
            }
            "reverseintensity" | "reverse" => {
                SettingUpdate::ReverseIntensity(parse_bool(value).ok_or_else(invalid)?)
            }
            "maintainaspectratio" => {
                SettingUpdate::MaintainAspectRatio(parse_bool(value).ok_or_else(invalid)?)
            }
            "mode" => SettingUpdate::Mode(value.parse().map_err(|_| invalid())?),
            "charset" => SettingUpdate::CharSet(value.parse().map_err(|_| invalid())?),
            "blurradius" => SettingUpdate::BlurRadius(value.parse().map_err(|_| invalid())?),
            "edgethreshold" => {
                SettingUpdate::EdgeThreshold(value.parse().map_err(|_| invalid())?)
            }
            "braillelevels" => {
                let count: u8 = value.parse().map_err(|_| invalid())?;
                SettingUpdate::BrailleLevels(BrailleLevels::from_count(count).ok_or_else(invalid)?)
            }
            _ => return Err(ConvertError::UnknownSetting(key.to_string())),
        };
        Ok(update)
    }
}

/// Parse an integer, saturating digit strings too long for `i64`.
fn parse_integer(value: &str) -> Option<i64> {
    if let Ok(parsed) = value.parse() {
        return Some(parsed);
    }
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(if negative { i64::MIN } else { i64::MAX })
}

/// Numeric dimensions outside `1..=MAX_DIMENSION` are range errors, not
/// malformed values, even when they do not fit a `u32`.
fn parse_dimension(dimension: &'static str, raw: i64) -> Result<u32, ConvertError> {
    u32::try_from(raw)
        .ok()
        .filter(|value| is_valid_dimension(*value))
        .ok_or(ConvertError::Dimension {
            dimension,
            value: raw,
            max: MAX_DIMENSION,
        })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Which cached buffers a settings change makes stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Invalidation {
    /// Render-time setting only
    None,
    /// Blurred pixels and blurred luminance
    Blur,
    /// Resolution changed: every derived buffer
    All,
}

impl fmt::Display for Invalidation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Invalidation::None => "none",
            Invalidation::Blur => "blur",
            Invalidation::All => "all",
        };
        f.write_str(name)
    }
}

impl Settings {
    /// Apply one update.
    ///
    /// `aspect` is the loaded image's width / height, if any; with
    /// `maintain_aspect_ratio` set it drives re-derivation of the paired
    /// dimension. The settings are left untouched when the update fails.
    pub fn apply(
        &mut self,
        update: SettingUpdate,
        aspect: Option<f64>,
    ) -> Result<Invalidation, ConvertError> {
        let mut next = self.clone();

        let invalidation = match update {
            SettingUpdate::OutputWidth(width) => {
                next.output_width = width;
                if let Some(aspect) = aspect.filter(|_| next.maintain_aspect_ratio) {
                    next.output_height = derive_height(width, aspect);
                }
                next.validate_dimensions()?;
                next.resolution_change(self)
            }
            SettingUpdate::OutputHeight(height) => {
                next.output_height = height;
                if let Some(aspect) = aspect.filter(|_| next.maintain_aspect_ratio) {
                    next.output_width = derive_width(height, aspect);
                }
                next.validate_dimensions()?;
                next.resolution_change(self)
            }
            SettingUpdate::MaintainAspectRatio(enabled) => {
                next.maintain_aspect_ratio = enabled;
                if let Some(aspect) = aspect.filter(|_| enabled) {
                    next.output_height = derive_height(next.output_width, aspect);
                    next.validate_dimensions()?;
                }
                next.resolution_change(self)
            }
            SettingUpdate::ContrastFactor(factor) => {
                validate_factor("contrastFactor", factor)?;
                next.contrast_factor = factor;
                Invalidation::None
            }
            SettingUpdate::ReverseIntensity(reverse) => {
                next.reverse_intensity = reverse;
                Invalidation::None
            }
            SettingUpdate::Mode(mode) => {
                next.mode = mode;
                Invalidation::None
            }
            SettingUpdate::CharSet(charset) => {
                next.charset = charset;
                Invalidation::None
            }
            SettingUpdate::BlurRadius(radius) => {
                validate_blur_radius(radius)?;
                next.blur_radius = radius;
                if radius == self.blur_radius {
                    Invalidation::None
                } else {
                    Invalidation::Blur
                }
            }
            SettingUpdate::EdgeThreshold(threshold) => {
                validate_factor("edgeThreshold", threshold)?;
                next.edge_threshold = threshold;
                Invalidation::None
            }
            SettingUpdate::BrailleLevels(levels) => {
                next.braille_levels = levels;
                Invalidation::None
            }
        };

        *self = next;
        Ok(invalidation)
    }

    /// Re-derive the height from the width for a newly loaded image.
    ///
    /// Out-of-range results are clamped rather than rejected, since the
    /// load itself succeeded.
    pub fn fit_to_aspect(&mut self, aspect: f64) -> Invalidation {
        if !self.maintain_aspect_ratio {
            return Invalidation::None;
        }
        let derived = derive_height(self.output_width, aspect);
        let clamped = derived.clamp(1, MAX_DIMENSION);
        if clamped != derived {
            log::warn!(
                "Derived output height {} out of range, clamped to {}",
                derived,
                clamped
            );
        }
        if clamped == self.output_height {
            return Invalidation::None;
        }
        self.output_height = clamped;
        Invalidation::All
    }

    /// Check every range-constrained field.
    ///
    /// [`Settings::apply`] validates each update as it lands; this covers
    /// settings assembled directly through the public fields.
    pub fn validate(&self) -> Result<(), ConvertError> {
        self.validate_dimensions()?;
        validate_factor("contrastFactor", self.contrast_factor)?;
        validate_blur_radius(self.blur_radius)?;
        validate_factor("edgeThreshold", self.edge_threshold)
    }

    fn validate_dimensions(&self) -> Result<(), ConvertError> {
        for (dimension, value) in [
            ("outputWidth", self.output_width),
            ("outputHeight", self.output_height),
        ] {
            if !is_valid_dimension(value) {
                return Err(ConvertError::Dimension {
                    dimension,
                    value: i64::from(value),
                    max: MAX_DIMENSION,
                });
            }
        }
        Ok(())
    }

    fn resolution_change(&self, previous: &Settings) -> Invalidation {
        if self.output_width != previous.output_width
            || self.output_height != previous.output_height
        {
            Invalidation::All
        } else {
            Invalidation::None
        }
    }
}

fn validate_factor(setting: &'static str, value: f32) -> Result<(), ConvertError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConvertError::OutOfRange {
            setting,
            message: format!("must be a finite value >= 0, got {}", value),
        });
    }
    Ok(())
}

fn validate_blur_radius(radius: u32) -> Result<(), ConvertError> {
    if radius > MAX_BLUR_RADIUS {
        return Err(ConvertError::OutOfRange {
            setting: "blurRadius",
            message: format!("must be at most {}, got {}", MAX_BLUR_RADIUS, radius),
        });
    }
    Ok(())
}
