//! glyphcast library crate.
//!
//! Converts raster images into ASCII and Braille art. [`pipeline::Pipeline`]
//! is the stateful entry point; [`ascii`] holds the stateless algorithms.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod settings;

pub use error::{ConvertError, ErrorKind};
pub use pipeline::{ImageSource, Pipeline, SourceInfo, Stage};
pub use settings::{Invalidation, SettingUpdate, Settings, SETTING_KEYS};
