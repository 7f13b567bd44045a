//! SSD1303 command set
//!
//! Only the registers this driver programs are modelled as [`Command`]
//! variants; the full opcode list is kept in [`opcode`] for reference.

use heapless::Vec;

/// SSD1303 opcodes
pub mod opcode {
    pub const SET_LOWER_COLUMN: u8 = 0x00;
    pub const SET_HIGHER_COLUMN: u8 = 0x10;
    pub const SET_HORIZ_SCROLL_SETUP: u8 = 0x26;
    pub const DEACTIVATE_HORIZ_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_HORIZ_SCROLL: u8 = 0x2F;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_BRIGHTNESS: u8 = 0x82;
    pub const SET_SEG_REMAP: u8 = 0xA0;
    pub const SET_ENTIRE_ON: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DC_DC: u8 = 0xAD;
    pub const NOP: u8 = 0xAA;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_AREA_COLOUR: u8 = 0xD8;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
}

/// One register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Low nibble of the display RAM column start
    LowerColumn(u8),
    /// High nibble of the display RAM column start
    HigherColumn(u8),
    /// Contrast level
    Contrast(u8),
    /// Brightness (colour bank) level
    Brightness(u8),
    /// Mirror column addressing
    SegmentRemap(bool),
    /// RAM line shown at the top of the panel (0-63)
    StartLine(u8),
    /// Vertical COM shift (0-63)
    DisplayOffset(u8),
    /// Panel on or off
    Display(bool),
}

impl Command {
    /// Encoded opcode plus operand, without the trailing NOP
    pub fn bytes(self) -> Vec<u8, 2> {
        let (op, operand) = match self {
            Command::LowerColumn(nibble) => (opcode::SET_LOWER_COLUMN | (nibble & 0x0F), None),
            Command::HigherColumn(nibble) => (opcode::SET_HIGHER_COLUMN | (nibble & 0x0F), None),
            Command::Contrast(level) => (opcode::SET_CONTRAST, Some(level)),
            Command::Brightness(level) => (opcode::SET_BRIGHTNESS, Some(level)),
            Command::SegmentRemap(remap) => (opcode::SET_SEG_REMAP | remap as u8, None),
            Command::StartLine(line) => (opcode::SET_START_LINE | (line & 0x3F), None),
            Command::DisplayOffset(offset) => (opcode::SET_DISPLAY_OFFSET, Some(offset & 0x3F)),
            Command::Display(on) => (
                if on {
                    opcode::DISPLAY_ON
                } else {
                    opcode::DISPLAY_OFF
                },
                None,
            ),
        };
        core::iter::once(op).chain(operand).collect()
    }
}
