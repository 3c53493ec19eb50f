//! Compile-time bitmaps.
//!
//! Every bitmap is stored page by page: one byte covers eight vertical pixels
//! (least significant bit on top) and consecutive bytes are consecutive
//! columns, matching the horizontal addressing mode.

/// Width of a digit glyph, in columns.
pub const GLYPH_WIDTH: usize = 12;
/// Height of a digit glyph, in pages.
pub const GLYPH_PAGES: usize = 2;
/// Bytes per glyph.
pub const GLYPH_BYTES: usize = GLYPH_WIDTH * GLYPH_PAGES;

/// Index of the plus sign in [`GLYPHS`]; digits occupy 0 to 9.
pub const GLYPH_PLUS: usize = 10;
/// Index of the minus sign in [`GLYPHS`].
pub const GLYPH_MINUS: usize = 11;
/// Index of the decimal point in [`GLYPHS`].
pub const GLYPH_DOT: usize = 12;
/// Index of the degree sign in [`GLYPHS`].
pub const GLYPH_DEGREE: usize = 13;

/// Width of the roll/pitch arrows, in columns.
pub const ARROWS_WIDTH: usize = 32;
/// Height of the roll/pitch arrows, in pages.
pub const ARROWS_PAGES: usize = 8;

/// Width of a status icon, in columns (one page tall).
pub const ICON_WIDTH: usize = 16;

/// Digits 0 to 9 followed by the sign, dot and degree glyphs.
pub static GLYPHS: [[u8; GLYPH_BYTES]; 14] = [
    // 0
    [
        0x00, 0xF8, 0xF8, 0x06, 0x06, 0x86, 0x86, 0x66, 0x66, 0xF8, 0xF8, 0x00,
        0x00, 0x1F, 0x1F, 0x66, 0x66, 0x61, 0x61, 0x60, 0x60, 0x1F, 0x1F, 0x00,
    ],
    // 1
    [
        0x00, 0x00, 0x00, 0x18, 0x18, 0xFE, 0xFE, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x60, 0x60, 0x7F, 0x7F, 0x60, 0x60, 0x00, 0x00, 0x00,
    ],
    // 2
    [
        0x00, 0x18, 0x18, 0x06, 0x06, 0x06, 0x06, 0x86, 0x86, 0x78, 0x78, 0x00,
        0x00, 0x60, 0x60, 0x78, 0x78, 0x66, 0x66, 0x61, 0x61, 0x60, 0x60, 0x00,
    ],
    // 3
    [
        0x00, 0x06, 0x06, 0x06, 0x06, 0x66, 0x66, 0x9E, 0x9E, 0x06, 0x06, 0x00,
        0x00, 0x18, 0x18, 0x60, 0x60, 0x60, 0x60, 0x61, 0x61, 0x1E, 0x1E, 0x00,
    ],
    // 4
    [
        0x00, 0x80, 0x80, 0x60, 0x60, 0x18, 0x18, 0xFE, 0xFE, 0x00, 0x00, 0x00,
        0x00, 0x07, 0x07, 0x06, 0x06, 0x06, 0x06, 0x7F, 0x7F, 0x06, 0x06, 0x00,
    ],
    // 5
    [
        0x00, 0x7E, 0x7E, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x86, 0x86, 0x00,
        0x00, 0x18, 0x18, 0x60, 0x60, 0x60, 0x60, 0x60, 0x60, 0x1F, 0x1F, 0x00,
    ],
    // 6
    [
        0x00, 0xE0, 0xE0, 0x98, 0x98, 0x86, 0x86, 0x86, 0x86, 0x00, 0x00, 0x00,
        0x00, 0x1F, 0x1F, 0x61, 0x61, 0x61, 0x61, 0x61, 0x61, 0x1E, 0x1E, 0x00,
    ],
    // 7
    [
        0x00, 0x06, 0x06, 0x06, 0x06, 0x86, 0x86, 0x66, 0x66, 0x1E, 0x1E, 0x00,
        0x00, 0x00, 0x00, 0x7E, 0x7E, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
    // 8
    [
        0x00, 0x78, 0x78, 0x86, 0x86, 0x86, 0x86, 0x86, 0x86, 0x78, 0x78, 0x00,
        0x00, 0x1E, 0x1E, 0x61, 0x61, 0x61, 0x61, 0x61, 0x61, 0x1E, 0x1E, 0x00,
    ],
    // 9
    [
        0x00, 0x78, 0x78, 0x86, 0x86, 0x86, 0x86, 0x86, 0x86, 0xF8, 0xF8, 0x00,
        0x00, 0x00, 0x00, 0x61, 0x61, 0x61, 0x61, 0x19, 0x19, 0x07, 0x07, 0x00,
    ],
    // plus
    [
        0x00, 0x80, 0x80, 0x80, 0x80, 0xF8, 0xF8, 0x80, 0x80, 0x80, 0x80, 0x00,
        0x00, 0x01, 0x01, 0x01, 0x01, 0x1F, 0x1F, 0x01, 0x01, 0x01, 0x01, 0x00,
    ],
    // minus
    [
        0x00, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00,
        0x00, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00,
    ],
    // decimal point
    [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x78, 0x78, 0x78, 0x78, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
    // degree sign
    [
        0x00, 0x78, 0x78, 0x86, 0x86, 0x86, 0x86, 0x78, 0x78, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
];

/// Roll arrows on the upper half, pitch arrows on the lower half.
pub static ARROWS: [u8; ARROWS_WIDTH * ARROWS_PAGES] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x80, 0xC0, 0xA0, 0x90, 0x88, 0x84, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80,
    0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x84, 0x88, 0x90, 0xA0, 0xC0, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x03, 0x05, 0x09, 0x11, 0x21, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01,
    0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x21, 0x11, 0x09, 0x05, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, 0x40, 0x20, 0xF0,
    0xF0, 0x20, 0x40, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x01, 0x00, 0x00, 0x00, 0xFF,
    0xFF, 0x00, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x80, 0x00, 0x00, 0x00, 0xFF,
    0xFF, 0x00, 0x00, 0x00, 0x80, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x04, 0x0F,
    0x0F, 0x04, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Absolute referential marker.
pub static ABSOLUTE_ICON: [u8; ICON_WIDTH] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x7E, 0x09, 0x09, 0x09, 0x7E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Relative (zeroed) referential marker.
pub static RELATIVE_ICON: [u8; ICON_WIDTH] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x09, 0x19, 0x29, 0x46, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Measurement hold marker.
pub static HOLD_ICON: [u8; ICON_WIDTH] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

