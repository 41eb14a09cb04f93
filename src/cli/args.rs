//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{CharacterSet, DotLevels, Format, RenderMode};

/// Convert an image into ASCII or Braille art
#[derive(Parser, Debug)]
#[command(name = "glyphcast")]
#[command(version, about = "Render images as ASCII and Braille art", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image file to convert (PNG, JPEG, GIF, BMP, WebP, ...)
    pub input: Option<PathBuf>,

    /// Output width in glyph cells
    #[arg(long, short = 'W')]
    pub width: Option<u32>,

    /// Output height in glyph cells
    #[arg(long, short = 'H')]
    pub height: Option<u32>,

    /// Derive the height from the width and the image's aspect ratio
    #[arg(long, short = 'k')]
    pub keep_aspect: bool,

    /// Contrast factor (1.0 = unchanged)
    #[arg(long, short)]
    pub contrast: Option<f32>,

    /// Swap dark and light ends of the ramp (for light backgrounds)
    #[arg(long, short)]
    pub reverse: bool,

    /// Rendering mode
    #[arg(long, short)]
    pub mode: Option<RenderMode>,

    /// Glyph family (defaults to what the mode needs)
    #[arg(long)]
    pub charset: Option<CharacterSet>,

    /// Output encoding
    #[arg(long, short, default_value = "text")]
    pub format: Format,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Gaussian blur radius ahead of edge detection
    #[arg(long)]
    pub blur_radius: Option<u32>,

    /// Gradient magnitude below which a pixel counts as flat
    #[arg(long)]
    pub edge_threshold: Option<f32>,

    /// Braille shading levels (9 or 2)
    #[arg(long)]
    pub braille_levels: Option<DotLevels>,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["glyphcast", "photo.png"]);
        assert_eq!(args.input, Some(PathBuf::from("photo.png")));
        assert!(args.width.is_none());
        assert!(args.height.is_none());
        assert!(!args.keep_aspect);
        assert!(args.contrast.is_none());
        assert!(!args.reverse);
        assert!(args.mode.is_none());
        assert!(args.charset.is_none());
        assert_eq!(args.format, Format::Text);
        assert!(args.output.is_none());
        assert!(args.config.is_none());
        assert!(!args.verbose);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_args_dimensions() {
        let args = Args::parse_from(["glyphcast", "a.png", "-W", "80", "--height", "40"]);
        assert_eq!(args.width, Some(80));
        assert_eq!(args.height, Some(40));
    }

    #[test]
    fn test_args_mode_and_charset() {
        let args = Args::parse_from([
            "glyphcast",
            "a.png",
            "--mode",
            "edge-detection-fill",
            "--charset",
            "braille",
        ]);
        assert_eq!(args.mode, Some(RenderMode::EdgeDetectionFill));
        assert_eq!(args.charset, Some(CharacterSet::Braille));
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from(["glyphcast", "a.png", "-k", "-r", "-v"]);
        assert!(args.keep_aspect);
        assert!(args.reverse);
        assert!(args.verbose);
    }

    #[test]
    fn test_args_format_and_output() {
        let args = Args::parse_from(["glyphcast", "a.png", "-f", "json", "-o", "out.json"]);
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_args_braille_levels() {
        let args = Args::parse_from(["glyphcast", "a.png", "--braille-levels", "2"]);
        assert_eq!(args.braille_levels, Some(DotLevels::Two));
        assert!(Args::try_parse_from(["glyphcast", "a.png", "--braille-levels", "4"]).is_err());
    }

    #[test]
    fn test_args_invalid_mode() {
        assert!(Args::try_parse_from(["glyphcast", "a.png", "--mode", "sepia"]).is_err());
    }

    #[test]
    fn test_args_config_subcommand() {
        let args = Args::parse_from(["glyphcast", "config", "show"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Show
            })
        ));

        let args = Args::parse_from(["glyphcast", "config", "init"]);
        assert!(matches!(
            args.command,
            Some(Command::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn test_args_custom_config() {
        let args = Args::parse_from(["glyphcast", "a.png", "--config", "/tmp/g.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/g.toml")));
    }
}
