//! Configuration file handling for glyphcast.
//!
//! Loads configuration from `<config_dir>/glyphcast/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ascii::{BrailleLevels, CharSet, Mode};
use crate::error::ConvertError;
use crate::settings::{SettingUpdate, Settings};

/// Configuration file structure.
///
/// Every field is optional; anything left out keeps the built-in default.
#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub maintain_aspect_ratio: Option<bool>,
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    pub mode: Option<Mode>,
    pub charset: Option<CharSet>,
    pub contrast: Option<f32>,
    pub reverse: Option<bool>,
    pub blur_radius: Option<u32>,
    pub edge_threshold: Option<f32>,
    pub braille_levels: Option<u8>,
}

/// Contents written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# glyphcast configuration

[output]
# Grid size in glyph cells (1-1000)
width = 150
height = 150
# Derive the height from the width and the image's aspect ratio
maintain_aspect_ratio = false

[render]
# grayscale, color, colorBrightnessMap, grayscaleBraille,
# edgeDetectionOutline, edgeDetectionFill, edgeDetectionBraille
mode = "grayscale"
# ascii or braille
charset = "ascii"
# Linear contrast around mid-gray; 1.0 leaves luminance unchanged
contrast = 1.0
# Swap the dark and light ends of the ramp
reverse = false
# Gaussian radius ahead of edge detection (0-10)
blur_radius = 2
# Gradient magnitude below which a pixel counts as flat
edge_threshold = 50.0
# Braille shading levels: 9 or 2
braille_levels = 9
"#;

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            log::debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// The updates this file asks for, in application order.
    pub fn updates(&self) -> Result<Vec<SettingUpdate>, ConvertError> {
        let mut updates = Vec::new();
        let out = &self.output;
        let render = &self.render;

        if let Some(enabled) = out.maintain_aspect_ratio {
            updates.push(SettingUpdate::MaintainAspectRatio(enabled));
        }
        if let Some(width) = out.width {
            updates.push(SettingUpdate::OutputWidth(width));
        }
        if let Some(height) = out.height {
            updates.push(SettingUpdate::OutputHeight(height));
        }
        if let Some(mode) = render.mode {
            updates.push(SettingUpdate::Mode(mode));
        }
        if let Some(charset) = render.charset {
            updates.push(SettingUpdate::CharSet(charset));
        }
        if let Some(factor) = render.contrast {
            updates.push(SettingUpdate::ContrastFactor(factor));
        }
        if let Some(reverse) = render.reverse {
            updates.push(SettingUpdate::ReverseIntensity(reverse));
        }
        if let Some(radius) = render.blur_radius {
            updates.push(SettingUpdate::BlurRadius(radius));
        }
        if let Some(threshold) = render.edge_threshold {
            updates.push(SettingUpdate::EdgeThreshold(threshold));
        }
        if let Some(count) = render.braille_levels {
            let levels = BrailleLevels::from_count(count).ok_or_else(|| {
                ConvertError::InvalidValue {
                    key: "braille_levels".to_string(),
                    value: count.to_string(),
                }
            })?;
            updates.push(SettingUpdate::BrailleLevels(levels));
        }
        Ok(updates)
    }

    /// Apply the file's values on top of `settings`.
    ///
    /// Validation is the same as for any other update; no image is loaded
    /// yet, so no dimension is derived here.
    pub fn apply_to(&self, settings: &mut Settings) -> Result<(), ConvertError> {
        for update in self.updates()? {
            settings.apply(update, None)?;
        }
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyphcast").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(".glyphcast.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("");
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let file = write_config(DEFAULT_CONFIG);
        let config = Config::load(Some(file.path())).unwrap();
        let mut settings = Settings::default();
        config.apply_to(&mut settings).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_config() {
        let file = write_config(
            r#"
[output]
width = 80

[render]
mode = "edgeDetectionFill"
charset = "braille"
reverse = true
"#,
        );
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.output.width, Some(80));
        assert_eq!(config.output.height, None);
        assert_eq!(config.render.mode, Some(Mode::EdgeDetectionFill));
        assert_eq!(config.render.charset, Some(CharSet::Braille));

        let mut settings = Settings::default();
        config.apply_to(&mut settings).unwrap();
        assert_eq!(settings.output_width, 80);
        assert_eq!(settings.output_height, 150);
        assert!(settings.reverse_intensity);
    }

    #[test]
    fn test_parse_error() {
        let file = write_config("[output]\nwidth = \"wide\"\n");
        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_mode_is_parse_error() {
        let file = write_config("[render]\nmode = \"sepia\"\n");
        assert!(Config::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_out_of_range_values_rejected_on_apply() {
        let file = write_config("[output]\nwidth = 5000\n");
        let config = Config::load(Some(file.path())).unwrap();
        let mut settings = Settings::default();
        assert!(config.apply_to(&mut settings).is_err());

        let file = write_config("[render]\nbraille_levels = 4\n");
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.apply_to(&mut settings).is_err());
    }

    #[test]
    fn test_default_path_file_name() {
        let path = default_path();
        assert!(path.ends_with("config.toml") || path.ends_with(".glyphcast.toml"));
    }
}
