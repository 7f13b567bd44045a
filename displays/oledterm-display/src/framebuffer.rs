//! Packed 1bpp pixel buffer shadowing the panel
//!
//! Row-major, 12 bytes per pixel row. Within a byte the leftmost pixel
//! is the most significant bit; the controller's column addressing
//! depends on that order, so it is spelled out in [`REVERSE_BITS`]
//! rather than derived.

/// Panel width in pixels
pub const WIDTH: usize = 96;

/// Panel height in pixels
pub const HEIGHT: usize = 16;

/// Bytes per pixel row
pub const ROW_BYTES: usize = WIDTH / 8;

/// Total buffer size in bytes
pub const BUFFER_SIZE: usize = (WIDTH * HEIGHT) / 8;

/// Bit mask for pixel `x % 8` within its byte
pub const REVERSE_BITS: [u8; 8] = [0x80, 0x40, 0x20, 0x10, 0x08, 0x04, 0x02, 0x01];

/// 96x16 monochrome frame buffer
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelBuffer {
    /// Create an all-off buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_SIZE],
        }
    }

    /// Byte index and mask for a pixel, or `None` if off-panel
    fn locate(x: usize, y: usize) -> Option<(usize, u8)> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }
        Some(((y * WIDTH) / 8 + x / 8, REVERSE_BITS[x % 8]))
    }

    /// Set or clear a pixel
    ///
    /// Coordinates outside the panel are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        let Some((index, mask)) = Self::locate(x, y) else {
            return;
        };
        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }
    }

    /// Read a pixel; off-panel pixels read as off
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        match Self::locate(x, y) {
            Some((index, mask)) => self.bytes[index] & mask != 0,
            None => false,
        }
    }

    /// Raw packed bytes, in transmission order
    pub fn as_bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// One pixel row's packed bytes
    ///
    /// Returns `None` for `y >= HEIGHT`.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * ROW_BYTES;
        Some(&self.bytes[start..start + ROW_BYTES])
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "PixelBuffer {{")?;
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                f.write_str(if self.get_pixel(x, y) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PixelBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PixelBuffer{=[u8]:x}", &self.bytes[..]);
    }
}
