//! Glyph rasterizer
//!
//! Expands one 6x8 font cell into the pixel buffer. Every pixel of the
//! cell is written, so drawing over an old glyph leaves nothing behind.

use crate::font::{glyph, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::framebuffer::PixelBuffer;
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// Render `code` into text cell (`row`, `column`)
///
/// Cells outside the 2x16 grid are skipped entirely.
pub fn render_glyph(fb: &mut PixelBuffer, code: u8, row: usize, column: usize) {
    if row >= SCREEN_ROWS || column >= SCREEN_COLS {
        return;
    }

    let x0 = column * GLYPH_WIDTH;
    let y0 = row * GLYPH_HEIGHT;

    for (r, &bits) in glyph(code).iter().enumerate() {
        let mut bits = bits;
        for p in 0..GLYPH_WIDTH {
            fb.set_pixel(x0 + p, y0 + r, bits & 0x80 != 0);
            bits <<= 1;
        }
    }
}
