//! Text cursor and line model
//!
//! The panel has exactly two text rows. Line feed flips between them and
//! wrapping off the bottom row homes the cursor; nothing ever scrolls.

use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

/// Text cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    row: u8,
    col: u8,
}

impl Cursor {
    /// Last valid column index
    pub const LAST_COL: u8 = (SCREEN_COLS - 1) as u8;

    /// Cursor at the home position
    pub const fn new() -> Self {
        Self { row: 0, col: 0 }
    }

    /// Cursor at (`row`, `col`), with the row folded to its low bit and
    /// the column clamped to the last column
    pub const fn at(row: u8, col: u8) -> Self {
        Self {
            row: row & 1,
            col: if col > Self::LAST_COL {
                Self::LAST_COL
            } else {
                col
            },
        }
    }

    /// Current row (0 or 1)
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Current column (0-15)
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Move to (0, 0)
    pub fn home(&mut self) {
        *self = Self::new();
    }

    /// Move to column 0 on the current row
    pub fn carriage_return(&mut self) {
        self.col = 0;
    }

    /// Flip to the other row, keeping the column
    pub fn line_feed(&mut self) {
        self.row = (self.row + 1) % SCREEN_ROWS as u8;
    }

    /// Set the row from a parameter byte; only bit 0 is honoured
    pub fn set_row(&mut self, row: u8) {
        self.row = row & 1;
    }

    /// Set the column, clamping to the last column
    ///
    /// Returns `false` if the requested column had to be clamped.
    pub fn set_col(&mut self, col: u8) -> bool {
        let in_range = col <= Self::LAST_COL;
        self.col = col.min(Self::LAST_COL);
        in_range
    }

    /// Step past a freshly drawn glyph
    ///
    /// The end of row 0 continues on row 1; the end of row 1 goes home.
    pub fn advance(&mut self) {
        if self.col == Self::LAST_COL {
            if self.row != 0 {
                self.home();
            } else {
                self.col = 0;
                self.row = 1;
            }
        } else {
            self.col += 1;
        }
    }

    /// Cells left on the current row, including the cursor cell
    pub const fn remaining_in_row(&self) -> usize {
        SCREEN_COLS - self.col as usize
    }
}
