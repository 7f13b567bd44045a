//! Character stream interpreter
//!
//! Splits the incoming byte stream into printable glyphs, single-byte
//! control codes and multi-byte escape commands:
//!
//! ```text
//! HOME (0x1E)            cursor to (0, 0)
//! CLS  (0x1A)            reprogram panel, blank screen, home
//! CR   (0x0D)            column 0
//! LF   (0x0A)            other row
//! ESC '=' <row> <col>    position cursor; row = byte & 1, col = byte - ' '
//! ESC '!' <op>           'C'/'c' contrast up/down, 'B'/'b' brightness up/down
//! ESC 'T'                clear to end of line
//! ```
//!
//! The parser only decides *what* a byte means. Applying the resulting
//! [`Action`] is the terminal's job.

/// Control codes
pub mod ctrl {
    /// Home cursor
    pub const HOME: u8 = 0x1E;
    /// Clear screen
    pub const CLS: u8 = 0x1A;
    /// Start of an escape sequence
    pub const ESC: u8 = 0x1B;
    /// Carriage return
    pub const CR: u8 = 0x0D;
    /// Line feed
    pub const LF: u8 = 0x0A;
}

/// Escape command selectors (second byte after ESC)
pub mod esc {
    /// Cursor position, followed by row and column bytes
    pub const POSITION: u8 = b'=';
    /// Panel configuration, followed by one operation byte
    pub const CONFIG: u8 = b'!';
    /// Clear to end of line
    pub const CLEAR_EOL: u8 = b'T';
}

/// Interpreter state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for a glyph or control code
    #[default]
    Idle,
    /// Got ESC, waiting for the command selector
    AfterEscape,
    /// Got ESC '=', waiting for the row byte
    AwaitRow,
    /// Got the row, waiting for the column byte
    AwaitColumn,
    /// Got ESC '!', waiting for the configuration operation
    AwaitConfigByte,
}

/// Contrast/brightness adjustment requested by ESC '!'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigOp {
    /// 'C'
    ContrastUp,
    /// 'c'
    ContrastDown,
    /// 'B'
    BrightnessUp,
    /// 'b'
    BrightnessDown,
    /// Any other byte: values unchanged but still pushed to the panel
    Refresh,
}

impl ConfigOp {
    /// Decode an operation byte
    pub const fn from_byte(byte: u8) -> Self {
        match byte {
            b'C' => ConfigOp::ContrastUp,
            b'c' => ConfigOp::ContrastDown,
            b'B' => ConfigOp::BrightnessUp,
            b'b' => ConfigOp::BrightnessDown,
            _ => ConfigOp::Refresh,
        }
    }
}

/// What the terminal should do after a byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Byte consumed as part of an unfinished sequence, or discarded
    None,
    /// Display a glyph at the cursor
    Glyph(u8),
    /// Cursor home
    Home,
    /// Full reinitialise
    Clear,
    /// Carriage return
    CarriageReturn,
    /// Line feed
    LineFeed,
    /// Blank from the cursor to the end of the row
    ClearToEol,
    /// Row byte of ESC '='
    SetRow(u8),
    /// Raw column byte of ESC '=' (not yet offset by ' ')
    SetColumn(u8),
    /// Configuration operation of ESC '!'
    Config(ConfigOp),
}

/// Escape sequence state machine
#[derive(Debug, Clone, Default)]
pub struct EscapeParser {
    state: State,
}

impl EscapeParser {
    /// Create a parser in the idle state
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Abandon any partial sequence
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }

    /// Feed a single byte to the parser
    pub fn feed(&mut self, byte: u8) -> Action {
        match self.state {
            State::Idle => match byte {
                ctrl::HOME => Action::Home,
                ctrl::CLS => Action::Clear,
                ctrl::ESC => {
                    self.state = State::AfterEscape;
                    Action::None
                }
                ctrl::CR => Action::CarriageReturn,
                ctrl::LF => Action::LineFeed,
                _ => Action::Glyph(byte),
            },
            State::AfterEscape => match byte {
                esc::POSITION => {
                    self.state = State::AwaitRow;
                    Action::None
                }
                esc::CONFIG => {
                    self.state = State::AwaitConfigByte;
                    Action::None
                }
                esc::CLEAR_EOL => {
                    self.state = State::Idle;
                    Action::ClearToEol
                }
                // Unknown selectors are dropped silently
                _ => {
                    self.state = State::Idle;
                    Action::None
                }
            },
            State::AwaitRow => {
                self.state = State::AwaitColumn;
                Action::SetRow(byte)
            }
            State::AwaitColumn => {
                self.state = State::Idle;
                Action::SetColumn(byte)
            }
            State::AwaitConfigByte => {
                self.state = State::Idle;
                Action::Config(ConfigOp::from_byte(byte))
            }
        }
    }
}
