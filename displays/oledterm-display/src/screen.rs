//! Text shadow buffer
//!
//! Remembers the last character written to each of the 32 text cells so
//! the whole panel can be redrawn without the host resending text.

/// Number of text rows on the panel
pub const SCREEN_ROWS: usize = 2;

/// Number of text columns per row
pub const SCREEN_COLS: usize = 16;

/// Character shown in a cell that was never written or was cleared
pub const BLANK: u8 = b' ';

/// 2x16 character shadow of the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            cells: [[BLANK; SCREEN_COLS]; SCREEN_ROWS],
        }
    }

    /// Blank every cell
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(BLANK);
        }
    }

    /// Record `code` at (`row`, `col`); ignored outside the grid
    pub fn set(&mut self, row: usize, col: usize, code: u8) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = code;
        }
    }

    /// Character at (`row`, `col`)
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// All characters of one row
    pub fn row_bytes(&self, row: usize) -> Option<&[u8; SCREEN_COLS]> {
        self.cells.get(row)
    }

    /// Every cell in redraw order: row-major, as (row, col, code)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &code)| (row, col, code))
        })
    }

    /// Check whether every cell is blank
    pub fn is_blank(&self) -> bool {
        self.cells.iter().flatten().all(|&c| c == BLANK)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.cells.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            match core::str::from_utf8(line) {
                Ok(text) => defmt::write!(f, "{=str}", text),
                Err(_) => defmt::write!(f, "{=[u8]}", &line[..]),
            }
        }
        defmt::write!(f, "]");
    }
}
