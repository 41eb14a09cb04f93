//! Braille cell encoding.
//!
//! Each braille character is a 2x4 dot matrix. The dot-matrix edge glyphs
//! are built from this encoding at compile time.

/// Braille base character (U+2800, empty braille pattern).
pub const BRAILLE_BASE: char = '\u{2800}';

/// Bit for each dot, indexed `[x][y]`.
/// ```text
/// [0,0]=1   [1,0]=8
/// [0,1]=2   [1,1]=16
/// [0,2]=4   [1,2]=32
/// [0,3]=64  [1,3]=128
/// ```
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

/// Convert a 2x4 boolean grid (`grid[x][y]`) to a braille character.
pub const fn grid_to_braille(grid: [[bool; 4]; 2]) -> char {
    let mut code = 0u32;
    let mut x = 0;
    while x < 2 {
        let mut y = 0;
        while y < 4 {
            if grid[x][y] {
                code |= DOT_BITS[x][y] as u32;
            }
            y += 1;
        }
        x += 1;
    }
    match char::from_u32(BRAILLE_BASE as u32 + code) {
        Some(c) => c,
        None => BRAILLE_BASE,
    }
}
