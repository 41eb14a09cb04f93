//! CLI enum types for mode, character set, output format and dot levels.

use clap::ValueEnum;

use crate::ascii;

/// Rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderMode {
    #[default]
    Grayscale,
    Color,
    ColorBrightnessMap,
    GrayscaleBraille,
    EdgeDetectionOutline,
    EdgeDetectionFill,
    EdgeDetectionBraille,
}

impl From<RenderMode> for ascii::Mode {
    fn from(m: RenderMode) -> Self {
        match m {
            RenderMode::Grayscale => ascii::Mode::Grayscale,
            RenderMode::Color => ascii::Mode::Color,
            RenderMode::ColorBrightnessMap => ascii::Mode::ColorBrightnessMap,
            RenderMode::GrayscaleBraille => ascii::Mode::GrayscaleBraille,
            RenderMode::EdgeDetectionOutline => ascii::Mode::EdgeDetectionOutline,
            RenderMode::EdgeDetectionFill => ascii::Mode::EdgeDetectionFill,
            RenderMode::EdgeDetectionBraille => ascii::Mode::EdgeDetectionBraille,
        }
    }
}

/// Glyph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Ascii,
    Braille,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Ascii => ascii::CharSet::Ascii,
            CharacterSet::Braille => ascii::CharSet::Braille,
        }
    }
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Plain text, HTML color spans for colored modes
    #[default]
    Text,
    /// Text wrapped in a `<pre>` block
    Html,
    /// 24-bit terminal color escapes
    Ansi,
    /// Structured glyph grid
    Json,
}

impl From<Format> for ascii::OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => ascii::OutputFormat::Text,
            Format::Html => ascii::OutputFormat::Html,
            Format::Ansi => ascii::OutputFormat::Ansi,
            Format::Json => ascii::OutputFormat::Json,
        }
    }
}

/// Braille shading depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DotLevels {
    #[value(name = "2")]
    Two,
    #[default]
    #[value(name = "9")]
    Nine,
}

impl From<DotLevels> for ascii::BrailleLevels {
    fn from(l: DotLevels) -> Self {
        match l {
            DotLevels::Two => ascii::BrailleLevels::Two,
            DotLevels::Nine => ascii::BrailleLevels::Nine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_covers_every_mode() {
        let converted: Vec<ascii::Mode> = RenderMode::value_variants()
            .iter()
            .map(|m| ascii::Mode::from(*m))
            .collect();
        assert_eq!(converted, ascii::Mode::ALL.to_vec());
    }

    #[test]
    fn test_render_mode_names() {
        assert_eq!(
            RenderMode::from_str("color-brightness-map", true).unwrap(),
            RenderMode::ColorBrightnessMap
        );
        assert_eq!(
            RenderMode::from_str("grayscale-braille", true).unwrap(),
            RenderMode::GrayscaleBraille
        );
    }

    #[test]
    fn test_charset_to_ascii_charset() {
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Ascii),
            ascii::CharSet::Ascii
        );
        assert_eq!(
            ascii::CharSet::from(CharacterSet::Braille),
            ascii::CharSet::Braille
        );
    }

    #[test]
    fn test_format_to_output_format() {
        assert_eq!(ascii::OutputFormat::from(Format::Text), ascii::OutputFormat::Text);
        assert_eq!(ascii::OutputFormat::from(Format::Html), ascii::OutputFormat::Html);
        assert_eq!(ascii::OutputFormat::from(Format::Ansi), ascii::OutputFormat::Ansi);
        assert_eq!(ascii::OutputFormat::from(Format::Json), ascii::OutputFormat::Json);
    }

    #[test]
    fn test_dot_levels() {
        assert_eq!(DotLevels::from_str("2", false).unwrap(), DotLevels::Two);
        assert_eq!(ascii::BrailleLevels::from(DotLevels::Nine).count(), 9);
        assert_eq!(ascii::BrailleLevels::from(DotLevels::Two).count(), 2);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(RenderMode::default(), RenderMode::Grayscale);
        assert_eq!(CharacterSet::default(), CharacterSet::Ascii);
        assert_eq!(Format::default(), Format::Text);
        assert_eq!(DotLevels::default(), DotLevels::Nine);
    }
}
