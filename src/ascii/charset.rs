//! Glyph ramps and edge glyph sets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::braille::{grid_to_braille, BRAILLE_BASE};

/// Standard textual ramp, darkest (space) to brightest (Ñ).
pub const STANDARD_RAMP: &[char] = &[
    ' ', '_', '.', ',', '-', '=', '+', ':', ';', 'c', 'b', 'a', '!', '?', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', '$', 'W', '#', '@', 'Ñ',
];

/// Dot-matrix ramp (9 levels), from no dots to all eight dots.
pub const BRAILLE_RAMP: &[char] = &['⠀', '⠁', '⠃', '⠇', '⠏', '⠟', '⠿', '⡿', '⣿'];

/// Two-level dot-matrix ramp.
pub const BRAILLE_BINARY_RAMP: &[char] = &['⠀', '⣿'];

/// Glyph family used for ramps and edge strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    /// Latin letters, digits and symbols
    #[default]
    Ascii,
    /// Unicode braille patterns
    Braille,
}

impl CharSet {
    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Ascii => "ascii",
            CharSet::Braille => "braille",
        }
    }

    /// The glyph that renders as empty space in this family.
    pub fn blank(&self) -> char {
        match self {
            CharSet::Ascii => ' ',
            CharSet::Braille => '⠀',
        }
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "standard" => Ok(CharSet::Ascii),
            "braille" => Ok(CharSet::Braille),
            _ => Err(format!("unknown charset '{}'", s)),
        }
    }
}

/// Number of intensity levels in the dot-matrix ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrailleLevels {
    /// Off/on only
    Two,
    /// Progressive fill, one dot at a time
    #[default]
    Nine,
}

impl BrailleLevels {
    pub fn count(&self) -> u8 {
        match self {
            BrailleLevels::Two => 2,
            BrailleLevels::Nine => 9,
        }
    }

    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            2 => Some(BrailleLevels::Two),
            9 => Some(BrailleLevels::Nine),
            _ => None,
        }
    }
}

/// An ordered glyph ramp, possibly read back to front.
///
/// Index 0 is always the glyph chosen for the darkest sample, so reversing
/// the ramp swaps which glyph that is without changing the indexing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRamp {
    glyphs: &'static [char],
    reversed: bool,
}

impl GlyphRamp {
    /// The 29-glyph textual ramp.
    pub const fn standard() -> Self {
        Self {
            glyphs: STANDARD_RAMP,
            reversed: false,
        }
    }

    /// The dot-matrix ramp with the given number of levels.
    pub const fn braille(levels: BrailleLevels) -> Self {
        let glyphs = match levels {
            BrailleLevels::Two => BRAILLE_BINARY_RAMP,
            BrailleLevels::Nine => BRAILLE_RAMP,
        };
        Self {
            glyphs,
            reversed: false,
        }
    }

    /// Ramp for a charset family.
    pub fn for_charset(charset: CharSet, levels: BrailleLevels) -> Self {
        match charset {
            CharSet::Ascii => Self::standard(),
            CharSet::Braille => Self::braille(levels),
        }
    }

    /// The same glyphs in opposite order.
    pub fn reversed(self) -> Self {
        Self {
            glyphs: self.glyphs,
            reversed: !self.reversed,
        }
    }

    /// Reverse when `reverse` is set, otherwise return the ramp unchanged.
    pub fn oriented(self, reverse: bool) -> Self {
        if reverse {
            self.reversed()
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Glyph at `index` in the active orientation.
    ///
    /// Indices past the end are clamped to the last glyph.
    pub fn glyph(&self, index: usize) -> char {
        let last = self.glyphs.len() - 1;
        let index = index.min(last);
        if self.reversed {
            self.glyphs[last - index]
        } else {
            self.glyphs[index]
        }
    }

    /// Width of one intensity bucket: `floor(255 / (len - 1))`.
    pub fn divider(&self) -> u8 {
        super::mapping::bucket_width(self.glyphs.len())
    }

    /// Glyph for an intensity sample.
    pub fn glyph_for(&self, sample: u8) -> char {
        self.glyph(super::mapping::ramp_index(sample, self.glyphs.len()))
    }

    /// All glyphs in the active orientation.
    pub fn glyphs(&self) -> Vec<char> {
        (0..self.glyphs.len()).map(|i| self.glyph(i)).collect()
    }
}

/// Glyphs used by the edge renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeGlyphSet {
    /// Gradient pointing along x
    pub horizontal: char,
    /// Gradient pointing along y
    pub vertical: char,
    /// Gradient around 45° / 225°
    pub diagonal1: char,
    /// Gradient around 135° / 315°
    pub diagonal2: char,
    /// Flat region in outline mode
    pub empty: char,
}

/// Box-drawing and slash strokes.
pub const STANDARD_EDGES: EdgeGlyphSet = EdgeGlyphSet {
    horizontal: '─',
    vertical: '│',
    diagonal1: '/',
    diagonal2: '\\',
    empty: ' ',
};

/// Partial braille patterns tracing each stroke inside the 2x4 cell.
pub const BRAILLE_EDGES: EdgeGlyphSet = EdgeGlyphSet {
    horizontal: grid_to_braille([[false, true, false, false], [false, true, false, false]]),
    vertical: grid_to_braille([[true; 4], [false; 4]]),
    diagonal1: grid_to_braille([[false, false, true, true], [true, true, false, false]]),
    diagonal2: grid_to_braille([[true, true, false, false], [false, false, true, true]]),
    empty: BRAILLE_BASE,
};

impl EdgeGlyphSet {
    pub fn for_charset(charset: CharSet) -> Self {
        match charset {
            CharSet::Ascii => STANDARD_EDGES,
            CharSet::Braille => BRAILLE_EDGES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_ramp_literal() {
        let literal: String = STANDARD_RAMP.iter().collect();
        assert_eq!(literal, " _.,-=+:;cba!?0123456789$W#@Ñ");
        assert_eq!(GlyphRamp::standard().divider(), 9);
    }

    #[test]
    fn test_reversed_ramp_literal() {
        let reversed: String = GlyphRamp::standard().reversed().glyphs().into_iter().collect();
        assert_eq!(reversed, "Ñ@#W$9876543210?!abc;:+=-,._ ");
    }

    #[test]
    fn test_reversed_twice_is_identity() {
        let ramp = GlyphRamp::braille(BrailleLevels::Nine);
        assert_eq!(ramp.reversed().reversed(), ramp);
        assert_eq!(ramp.oriented(false), ramp);
        assert_eq!(ramp.oriented(true), ramp.reversed());
    }

    #[test]
    fn test_braille_ramp_fills_one_dot_per_level() {
        // Dot fill order: left column top to bottom, then right column.
        let order = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2), (0, 3), (1, 3)];
        let mut grid = [[false; 4]; 2];
        assert_eq!(BRAILLE_RAMP[0], grid_to_braille(grid));
        for (level, &(x, y)) in order.iter().enumerate() {
            grid[x][y] = true;
            assert_eq!(BRAILLE_RAMP[level + 1], grid_to_braille(grid));
        }
    }

    #[test]
    fn test_braille_edges_trace_strokes() {
        assert_eq!(BRAILLE_EDGES.horizontal, '⠒');
        assert_eq!(BRAILLE_EDGES.vertical, '⡇');
        assert_eq!(BRAILLE_EDGES.diagonal1, '⡜');
        assert_eq!(BRAILLE_EDGES.diagonal2, '⢣');
        assert_eq!(BRAILLE_EDGES.empty, '⠀');
    }

    #[test]
    fn test_charset_from_str() {
        assert_eq!("ascii".parse::<CharSet>(), Ok(CharSet::Ascii));
        assert_eq!("Braille".parse::<CharSet>(), Ok(CharSet::Braille));
        assert!("blocks".parse::<CharSet>().is_err());
    }

    #[test]
    fn test_blank_glyphs() {
        assert_eq!(CharSet::Ascii.blank(), STANDARD_RAMP[0]);
        assert_eq!(CharSet::Braille.blank(), BRAILLE_RAMP[0]);
    }

    #[test]
    fn test_glyph_clamps_past_end() {
        let ramp = GlyphRamp::braille(BrailleLevels::Two);
        assert_eq!(ramp.glyph(7), '⣿');
        assert_eq!(ramp.reversed().glyph(7), '⠀');
    }
}
