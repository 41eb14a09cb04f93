//! Render modes and the glyph renderers behind them.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::charset::{BrailleLevels, CharSet, EdgeGlyphSet, GlyphRamp};
use super::edges::{classify_edges, EdgeDirection};
use super::grid::{Cell, GlyphGrid};
use super::mapping::map_to_glyphs_into;
use super::resample::PixelBuffer;
use crate::error::ConvertError;

/// Glyph used by the true-color single-character mode.
pub const TRUE_COLOR_GLYPH: char = '@';

/// Rendering mode selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Mode {
    /// Ramp glyph per pixel from contrast-adjusted luminance
    #[default]
    Grayscale,
    /// '@' per pixel in the pixel's own color
    Color,
    /// Ramp glyph per pixel in the pixel's own color
    ColorBrightnessMap,
    /// Grayscale through the dot-matrix ramp
    GrayscaleBraille,
    /// Direction strokes only
    EdgeDetectionOutline,
    /// Direction strokes over shaded flat areas
    EdgeDetectionFill,
    /// Filled edge rendering with dot-matrix glyphs
    EdgeDetectionBraille,
}

impl Mode {
    pub const ALL: [Mode; 7] = [
        Mode::Grayscale,
        Mode::Color,
        Mode::ColorBrightnessMap,
        Mode::GrayscaleBraille,
        Mode::EdgeDetectionOutline,
        Mode::EdgeDetectionFill,
        Mode::EdgeDetectionBraille,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Grayscale => "grayscale",
            Mode::Color => "color",
            Mode::ColorBrightnessMap => "colorBrightnessMap",
            Mode::GrayscaleBraille => "grayscaleBraille",
            Mode::EdgeDetectionOutline => "edgeDetectionOutline",
            Mode::EdgeDetectionFill => "edgeDetectionFill",
            Mode::EdgeDetectionBraille => "edgeDetectionBraille",
        }
    }

    /// Charset this mode renders with when none is chosen explicitly.
    pub fn default_charset(&self) -> CharSet {
        match self {
            Mode::GrayscaleBraille | Mode::EdgeDetectionBraille => CharSet::Braille,
            _ => CharSet::Ascii,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts camelCase, kebab-case and snake_case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.name().to_ascii_lowercase() == key)
            .ok_or_else(|| format!("unknown mode '{}'", s))
    }
}

impl TryFrom<String> for Mode {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A mode resolved against a charset and intensity orientation.
///
/// Each variant carries exactly what its renderer consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RenderPlan {
    /// Ramp glyphs from contrast-adjusted luminance, trailing blanks dropped
    Shaded { ramp: GlyphRamp, blank: char },
    /// One fixed glyph colored by each pixel
    TrueColor { glyph: char },
    /// Ramp glyphs from luminance colored by each pixel
    ColorShaded { ramp: GlyphRamp },
    /// Direction strokes; flat areas shaded from `fill` or left empty
    Edges {
        glyphs: EdgeGlyphSet,
        fill: Option<GlyphRamp>,
    },
}

impl RenderPlan {
    /// Resolve a mode for a charset.
    ///
    /// Fails with a config error when the pairing has no renderer: the
    /// color modes only exist for ascii, the braille modes only for braille.
    pub fn resolve(
        mode: Mode,
        charset: CharSet,
        reverse: bool,
        levels: BrailleLevels,
    ) -> Result<Self, ConvertError> {
        let unsupported = || ConvertError::UnsupportedCharSet { mode, charset };
        let ramp = GlyphRamp::for_charset(charset, levels).oriented(reverse);

        let plan = match (mode, charset) {
            (Mode::Grayscale, _) | (Mode::GrayscaleBraille, CharSet::Braille) => {
                RenderPlan::Shaded {
                    ramp,
                    blank: charset.blank(),
                }
            }
            (Mode::Color, CharSet::Ascii) => RenderPlan::TrueColor {
                glyph: TRUE_COLOR_GLYPH,
            },
            (Mode::ColorBrightnessMap, CharSet::Ascii) => RenderPlan::ColorShaded { ramp },
            (Mode::EdgeDetectionOutline, _) => RenderPlan::Edges {
                glyphs: EdgeGlyphSet::for_charset(charset),
                fill: None,
            },
            (Mode::EdgeDetectionFill, _) | (Mode::EdgeDetectionBraille, CharSet::Braille) => {
                RenderPlan::Edges {
                    glyphs: EdgeGlyphSet::for_charset(charset),
                    fill: Some(ramp),
                }
            }
            (Mode::Color, CharSet::Braille)
            | (Mode::ColorBrightnessMap, CharSet::Braille)
            | (Mode::GrayscaleBraille, CharSet::Ascii)
            | (Mode::EdgeDetectionBraille, CharSet::Ascii) => return Err(unsupported()),
        };
        Ok(plan)
    }
}

/// Render samples through a ramp, dropping the trailing run of `blank` on
/// each row.
///
/// Interior blank runs stay in place, so for the dot-matrix family a run of
/// empty cells reads as a prefix of the next raised glyph.
pub fn render_shaded(samples: &[u8], width: usize, ramp: GlyphRamp, blank: char) -> GlyphGrid {
    let mut grid = GlyphGrid::new(width);
    if width == 0 {
        return grid;
    }
    let mut glyphs = Vec::with_capacity(width);
    for row in samples.chunks(width) {
        map_to_glyphs_into(row, ramp, &mut glyphs);
        let visible = glyphs.iter().rposition(|&g| g != blank).map_or(0, |i| i + 1);
        grid.push_row(glyphs[..visible].iter().map(|&g| Cell::plain(g)).collect());
    }
    grid
}

/// Render one fixed glyph per pixel, colored by the pixel.
pub fn render_true_color(pixels: &PixelBuffer, glyph: char) -> GlyphGrid {
    let width = pixels.width() as usize;
    let mut grid = GlyphGrid::new(width);
    for y in 0..pixels.height() as usize {
        let row = (0..width)
            .map(|x| Cell::colored(glyph, pixels.color(y * width + x)))
            .collect();
        grid.push_row(row);
    }
    grid
}

/// Render ramp glyphs from `luminance`, each colored by its pixel.
///
/// Rows are scanned right to left and whitespace glyphs are skipped until
/// the first visible glyph; everything left of it is kept.
pub fn render_color_shaded(pixels: &PixelBuffer, luminance: &[u8], ramp: GlyphRamp) -> GlyphGrid {
    let width = pixels.width() as usize;
    let mut grid = GlyphGrid::new(width);
    for y in 0..pixels.height() as usize {
        let mut row = Vec::with_capacity(width);
        let mut trimming = true;
        for x in (0..width).rev() {
            let i = y * width + x;
            let glyph = ramp.glyph_for(luminance[i]);
            if trimming && glyph.is_whitespace() {
                continue;
            }
            trimming = false;
            row.push(Cell::colored(glyph, pixels.color(i)));
        }
        row.reverse();
        grid.push_row(row);
    }
    grid
}

/// Render interior pixels of a blurred luminance image as direction strokes.
///
/// # Arguments
///
/// * `blurred` - Blurred luminance, one byte per pixel, row-major
/// * `width`, `height` - Dimensions of `blurred`
/// * `glyphs` - Stroke glyphs for each edge direction
/// * `fill` - Ramp for flat pixels; `None` leaves them as `glyphs.empty`
/// * `threshold` - Minimum gradient magnitude for an edge
///
/// # Returns
///
/// A `(width - 2) x (height - 2)` grid, empty when either dimension is
/// below 3. Flat pixels take the ramp glyph of their own luminance.
pub fn render_edges(
    blurred: &[u8],
    width: u32,
    height: u32,
    glyphs: EdgeGlyphSet,
    fill: Option<GlyphRamp>,
    threshold: f32,
) -> GlyphGrid {
    let inner_width = (width as usize).saturating_sub(2);
    let mut grid = GlyphGrid::new(inner_width);
    let directions = classify_edges(blurred, width, height, threshold);
    if inner_width == 0 || directions.is_empty() {
        return grid;
    }

    let w = width as usize;
    for (row_index, row) in directions.chunks(inner_width).enumerate() {
        let y = row_index + 1;
        let cells = row
            .iter()
            .enumerate()
            .map(|(col, direction)| {
                let glyph = match direction {
                    EdgeDirection::Flat => match fill {
                        Some(ramp) => ramp.glyph_for(blurred[y * w + col + 1]),
                        None => glyphs.empty,
                    },
                    EdgeDirection::Horizontal => glyphs.horizontal,
                    EdgeDirection::Vertical => glyphs.vertical,
                    EdgeDirection::Diagonal1 => glyphs.diagonal1,
                    EdgeDirection::Diagonal2 => glyphs.diagonal2,
                };
                Cell::plain(glyph)
            })
            .collect();
        grid.push_row(cells);
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ascii::charset::{BRAILLE_EDGES, STANDARD_EDGES};
    use crate::ascii::edges::DEFAULT_EDGE_THRESHOLD;
    use crate::ascii::resample::CellColor;
    use crate::error::ErrorKind;

    #[test]
    fn test_mode_from_str_spellings() {
        assert_eq!("colorBrightnessMap".parse::<Mode>(), Ok(Mode::ColorBrightnessMap));
        assert_eq!("color-brightness-map".parse::<Mode>(), Ok(Mode::ColorBrightnessMap));
        assert_eq!("edge_detection_fill".parse::<Mode>(), Ok(Mode::EdgeDetectionFill));
        assert!("edgeDetection".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_names_round_trip() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn test_resolve_rejects_unsupported_pairs() {
        let levels = BrailleLevels::Nine;
        for (mode, charset) in [
            (Mode::Color, CharSet::Braille),
            (Mode::ColorBrightnessMap, CharSet::Braille),
            (Mode::GrayscaleBraille, CharSet::Ascii),
            (Mode::EdgeDetectionBraille, CharSet::Ascii),
        ] {
            let err = RenderPlan::resolve(mode, charset, false, levels).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Config);
        }
    }

    #[test]
    fn test_resolve_default_charsets_succeed() {
        for mode in Mode::ALL {
            let charset = mode.default_charset();
            let plan = RenderPlan::resolve(mode, charset, false, BrailleLevels::Nine);
            assert!(plan.is_ok(), "mode {}", mode);
        }
    }

    #[test]
    fn test_resolve_edge_plans() {
        let outline = RenderPlan::resolve(
            Mode::EdgeDetectionOutline,
            CharSet::Ascii,
            false,
            BrailleLevels::Nine,
        )
        .unwrap();
        assert_eq!(
            outline,
            RenderPlan::Edges {
                glyphs: STANDARD_EDGES,
                fill: None
            }
        );
        let braille = RenderPlan::resolve(
            Mode::EdgeDetectionBraille,
            CharSet::Braille,
            true,
            BrailleLevels::Nine,
        )
        .unwrap();
        assert_eq!(
            braille,
            RenderPlan::Edges {
                glyphs: BRAILLE_EDGES,
                fill: Some(GlyphRamp::braille(BrailleLevels::Nine).reversed()),
            }
        );
    }

    #[test]
    fn test_render_shaded_trims_trailing_blanks() {
        let samples = [255, 0, 255, 0, 0, 0, 0, 0];
        let grid = render_shaded(&samples, 4, GlyphRamp::standard(), ' ');
        assert_eq!(grid.to_text(), "Ñ Ñ\n");
        assert_eq!(grid.columns(), 4);
    }

    #[test]
    fn test_render_shaded_braille_keeps_interior_blanks() {
        let samples = [0, 0, 255, 0, 0];
        let ramp = GlyphRamp::braille(BrailleLevels::Nine);
        let grid = render_shaded(&samples, 5, ramp, '⠀');
        assert_eq!(grid.to_text(), "⠀⠀⣿");
    }

    #[test]
    fn test_render_shaded_reversed_blank_is_bright() {
        // With the reversed ramp the blank glyph sits at the bright end.
        let grid = render_shaded(&[0, 255, 255], 3, GlyphRamp::standard().reversed(), ' ');
        assert_eq!(grid.to_text(), "Ñ");
    }

    #[test]
    fn test_render_true_color() {
        let pixels = PixelBuffer::from_rgba(2, 1, vec![1, 2, 3, 255, 4, 5, 6, 255]).unwrap();
        let grid = render_true_color(&pixels, TRUE_COLOR_GLYPH);
        assert_eq!(
            grid.to_text(),
            concat!(
                "<span style=\"color: rgb(1, 2, 3)\">@</span>",
                "<span style=\"color: rgb(4, 5, 6)\">@</span>"
            )
        );
    }

    #[test]
    fn test_render_color_shaded_trims_right_side() {
        let pixels = PixelBuffer::filled(4, 1, [9, 9, 9, 255]);
        let grid = render_color_shaded(&pixels, &[0, 255, 0, 0], GlyphRamp::standard());
        let row = &grid.rows()[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row[0].glyph, ' ');
        assert_eq!(row[1].glyph, 'Ñ');
        assert_eq!(row[1].color, Some(CellColor { r: 9, g: 9, b: 9 }));
    }

    #[test]
    fn test_render_color_shaded_all_blank_row() {
        let pixels = PixelBuffer::filled(3, 2, [0, 0, 0, 255]);
        let grid = render_color_shaded(&pixels, &[0; 6], GlyphRamp::standard());
        assert_eq!(grid.row_count(), 2);
        assert!(grid.rows().iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_render_edges_outline_and_fill() {
        // 6x5 step along x: interior columns 2 and 3 are edges.
        let gray: Vec<u8> = (0..5)
            .flat_map(|_| (0..6).map(|x| if x < 3 { 0 } else { 255 }))
            .collect();

        let outline = render_edges(&gray, 6, 5, STANDARD_EDGES, None, DEFAULT_EDGE_THRESHOLD);
        assert_eq!(outline.row_count(), 3);
        assert_eq!(outline.to_plain(), " ── \n ── \n ── ");

        let fill = render_edges(
            &gray,
            6,
            5,
            STANDARD_EDGES,
            Some(GlyphRamp::standard()),
            DEFAULT_EDGE_THRESHOLD,
        );
        assert_eq!(fill.to_plain(), " ──Ñ\n ──Ñ\n ──Ñ");
    }

    #[test]
    fn test_render_edges_too_small() {
        let grid = render_edges(&[0; 4], 2, 2, STANDARD_EDGES, None, DEFAULT_EDGE_THRESHOLD);
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.to_text(), "");
    }
}
