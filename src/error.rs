//! Error types for the conversion pipeline.

use std::path::PathBuf;

use crate::ascii::{CharSet, Mode};

/// Broad category of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing source or failed decode
    Load,
    /// Output dimension out of range
    Validation,
    /// Unknown setting, unparsable value or unsupported mode/charset pairing
    Config,
    /// Operation needs a loaded image
    State,
}

/// Errors that can occur while configuring, loading or rendering.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("No image source provided")]
    NoSource,

    #[error("Failed to read image '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image decoding task failed: {0}")]
    DecodeTask(String),

    #[error("{dimension} must be between 1 and {max}, got {value}")]
    Dimension {
        dimension: &'static str,
        value: i64,
        max: u32,
    },

    #[error("{setting} out of range: {message}")]
    OutOfRange {
        setting: &'static str,
        message: String,
    },

    #[error("Unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("Mode '{mode}' cannot render with the {charset} charset")]
    UnsupportedCharSet { mode: Mode, charset: CharSet },

    #[error("No image loaded")]
    NoImage,
}

impl ConvertError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::NoSource
            | ConvertError::Read { .. }
            | ConvertError::Decode(_)
            | ConvertError::DecodeTask(_) => ErrorKind::Load,
            ConvertError::Dimension { .. } | ConvertError::OutOfRange { .. } => {
                ErrorKind::Validation
            }
            ConvertError::UnknownSetting(_)
            | ConvertError::InvalidValue { .. }
            | ConvertError::UnsupportedCharSet { .. } => ErrorKind::Config,
            ConvertError::NoImage => ErrorKind::State,
        }
    }
}
