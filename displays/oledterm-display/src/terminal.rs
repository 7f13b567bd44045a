//! SSD1303 text terminal driver
//!
//! Drives a 96x16 SSD1303 OLED module as a 2-row x 16-column text
//! terminal. Text is kept in a [`Screen`] shadow and rasterized into a
//! [`PixelBuffer`]; [`Terminal::flush`] sends the pixels to the panel.
//!
//! # Usage
//!
//! ```ignore
//! let mut term = Terminal::new(SpiTransport::new(spi, cs, dc));
//! term.init()?;
//! write!(term, "\x1b=\x01\x20Temp {}C", temp)?;
//! term.flush()?;
//! ```

use oledterm_hal::DisplayTransport;

use crate::command::{opcode, Command};
use crate::config::DeviceConfig;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::escape::{Action, EscapeParser, State};
use crate::framebuffer::PixelBuffer;
use crate::raster;
use crate::screen::{Screen, BLANK};

/// Text terminal on an SSD1303 panel
pub struct Terminal<T> {
    transport: T,
    config: DeviceConfig,
    parser: EscapeParser,
    cursor: Cursor,
    screen: Screen,
    framebuffer: PixelBuffer,
}

impl<T> Terminal<T>
where
    T: DisplayTransport,
{
    /// Create a driver with the stock panel configuration
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, DeviceConfig::new())
    }

    /// Create a driver with a custom panel configuration
    pub fn with_config(transport: T, config: DeviceConfig) -> Self {
        Self {
            transport,
            config,
            parser: EscapeParser::new(),
            cursor: Cursor::new(),
            screen: Screen::new(),
            framebuffer: PixelBuffer::new(),
        }
    }

    /// Program the panel registers and blank the screen
    ///
    /// Safe to call again at any time; the result is the same.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("oled init: {}", self.config);

        self.clear()
    }

    /// Reprogram the panel, blank every cell and home the cursor
    ///
    /// This is what the CLS control code does. The local reset happens
    /// even when reprogramming fails; the transport error is returned
    /// afterwards.
    pub fn clear(&mut self) -> Result<(), Error<T::Error>> {
        let programmed = self.reprogram();
        self.screen.clear();
        self.redraw();
        self.cursor.home();
        programmed
    }

    /// Feed one byte of the character stream
    ///
    /// Transport errors abort the byte's side effects part-way; the
    /// interpreter state still advances. A column out of range is applied
    /// clamped and then reported.
    pub fn feed(&mut self, byte: u8) -> Result<(), Error<T::Error>> {
        let action = self.parser.feed(byte);

        #[cfg(feature = "defmt")]
        defmt::trace!("feed {=u8:#x} -> {} ({})", byte, action, self.parser.state());

        match action {
            Action::None => {}
            Action::Glyph(code) => self.display_glyph(code),
            Action::Home => self.cursor.home(),
            Action::Clear => self.clear()?,
            Action::CarriageReturn => self.cursor.carriage_return(),
            Action::LineFeed => self.cursor.line_feed(),
            Action::ClearToEol => self.clear_to_end_of_line(),
            Action::SetRow(byte) => self.cursor.set_row(byte),
            Action::SetColumn(byte) => self.set_column(byte)?,
            Action::Config(op) => {
                self.config.apply(op);

                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "contrast {} brightness {}",
                    self.config.contrast,
                    self.config.brightness
                );

                self.push_levels()?;
            }
        }

        Ok(())
    }

    /// Feed a run of bytes
    ///
    /// Stops at the first transport error. A clamped column does not stop
    /// the run; the first one is reported once all bytes are consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(), Error<T::Error>> {
        let mut deferred = None;
        for &byte in bytes {
            match self.feed(byte) {
                Ok(()) => {}
                Err(Error::Transport(e)) => return Err(Error::Transport(e)),
                Err(e) => {
                    deferred.get_or_insert(e);
                }
            }
        }
        deferred.map_or(Ok(()), Err)
    }

    fn set_column(&mut self, byte: u8) -> Result<(), Error<T::Error>> {
        let in_range = match byte.checked_sub(b' ') {
            Some(col) => self.cursor.set_col(col),
            None => {
                self.cursor.set_col(0);
                false
            }
        };
        if in_range {
            return Ok(());
        }

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "column byte {=u8:#x} out of range, clamped to {}",
            byte,
            self.cursor.col()
        );

        Err(Error::ColumnOutOfRange { requested: byte })
    }

    /// Write `code` at the cursor and advance
    pub fn display_glyph(&mut self, code: u8) {
        let (row, col) = (self.cursor.row() as usize, self.cursor.col() as usize);
        self.screen.set(row, col, code);
        raster::render_glyph(&mut self.framebuffer, code, row, col);
        self.cursor.advance();
    }

    /// Blank from the cursor to the end of its row, cursor unchanged
    pub fn clear_to_end_of_line(&mut self) {
        let saved = self.cursor;
        for _ in 0..saved.remaining_in_row() {
            self.display_glyph(BLANK);
        }
        self.cursor = saved;
    }

    /// Re-render every cell of the text shadow into the frame buffer
    pub fn redraw(&mut self) {
        let saved = self.cursor;
        self.cursor.home();
        for (row, col, code) in self.screen.cells() {
            raster::render_glyph(&mut self.framebuffer, code, row, col);
        }
        self.cursor = saved;
    }

    /// Set or clear a single pixel; off-panel coordinates are ignored
    ///
    /// Direct pixel writes are not recorded in the text shadow, so the
    /// next [`redraw`](Self::redraw) or CLS paints over them.
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.framebuffer.set_pixel(x, y, on);
    }

    /// Read a single pixel of the frame buffer
    pub fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.framebuffer.get_pixel(x, y)
    }

    /// Render `code` into a text cell without touching the cursor or
    /// the text shadow
    pub fn render_glyph(&mut self, code: u8, row: usize, col: usize) {
        raster::render_glyph(&mut self.framebuffer, code, row, col);
    }

    /// Send the frame buffer to the panel
    pub fn flush(&mut self) -> Result<(), Error<T::Error>> {
        let Self {
            transport,
            framebuffer,
            ..
        } = self;

        transaction(transport, |t| {
            t.set_data_mode()?;
            t.send_bytes(framebuffer.as_bytes())
        })?;
        Ok(())
    }

    /// Write every configuration register
    pub fn reprogram(&mut self) -> Result<(), Error<T::Error>> {
        for cmd in self.config.init_commands() {
            self.command(cmd)?;
        }
        Ok(())
    }

    /// Push the current contrast and brightness
    fn push_levels(&mut self) -> Result<(), Error<T::Error>> {
        for cmd in self.config.level_commands() {
            self.command(cmd)?;
        }
        Ok(())
    }

    /// Turn the panel on or off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.command(Command::Display(on))
    }

    /// Select the RAM line shown at the top of the panel
    pub fn set_start_line(&mut self, line: u8) -> Result<(), Error<T::Error>> {
        self.command(Command::StartLine(line))
    }

    /// Shift the panel's COM mapping vertically
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error<T::Error>> {
        self.command(Command::DisplayOffset(offset))
    }

    /// One command transaction, terminated with a NOP
    pub fn command(&mut self, cmd: Command) -> Result<(), Error<T::Error>> {
        transaction(&mut self.transport, |t| {
            t.set_command_mode()?;
            t.send_bytes(&cmd.bytes())?;
            t.send_byte(opcode::NOP)
        })?;
        Ok(())
    }

    /// Current cursor
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current interpreter state
    pub fn state(&self) -> State {
        self.parser.state()
    }

    /// Current panel configuration
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Frame buffer
    pub fn framebuffer(&self) -> &PixelBuffer {
        &self.framebuffer
    }

    /// Text shadow
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Access the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Release the transport
    pub fn release(self) -> T {
        self.transport
    }
}

/// Run `body` between select and deselect
///
/// The device is deselected even when `body` fails; the body's error
/// wins over a deselect error.
fn transaction<T, F>(transport: &mut T, body: F) -> Result<(), T::Error>
where
    T: DisplayTransport,
    F: FnOnce(&mut T) -> Result<(), T::Error>,
{
    transport.select_device()?;
    let result = body(transport);
    let released = transport.deselect_device();
    result.and(released)
}

impl<T> core::fmt::Write for Terminal<T>
where
    T: DisplayTransport,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.feed_bytes(s.as_bytes()).map_err(|_| core::fmt::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::ctrl::{CLS, CR, ESC, HOME, LF};
    use crate::mock::{Event, MockError, RecordingTransport};
    use core::fmt::Write;

    fn term() -> Terminal<RecordingTransport> {
        let mut t = Terminal::new(RecordingTransport::default());
        t.init().unwrap();
        t.transport_mut().clear();
        t
    }

    fn pos(t: &Terminal<RecordingTransport>) -> (u8, u8) {
        (t.cursor().row(), t.cursor().col())
    }

    fn blank_framebuffer() -> PixelBuffer {
        let mut fb = PixelBuffer::new();
        for (row, col, code) in Screen::new().cells() {
            raster::render_glyph(&mut fb, code, row, col);
        }
        fb
    }

    #[test]
    fn test_init_programs_registers() {
        let mut t = Terminal::new(RecordingTransport::default());
        t.init().unwrap();

        let cmds = t.transport_mut().commands();
        let expected: [&[u8]; 5] = [
            &[0x04, 0xAA],
            &[0x1C, 0xAA],
            &[0x81, 0x80, 0xAA],
            &[0x82, 0x80, 0xAA],
            &[0xA1, 0xAA],
        ];
        assert_eq!(cmds.len(), 5);
        for (got, want) in cmds.iter().zip(expected) {
            assert_eq!(got.as_slice(), want);
        }
        assert_eq!(pos(&t), (0, 0));
        assert!(t.screen().is_blank());
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut t = term();
        t.feed_bytes(b"hello").unwrap();
        t.init().unwrap();
        let first = t.framebuffer().clone();
        t.init().unwrap();
        assert_eq!(t.framebuffer(), &first);
        assert_eq!(t.framebuffer(), &blank_framebuffer());
        assert_eq!(pos(&t), (0, 0));
    }

    #[test]
    fn test_text_lands_in_shadow_and_pixels() {
        let mut t = term();
        t.feed_bytes(b"Hi").unwrap();
        assert_eq!(t.screen().get(0, 0), Some(b'H'));
        assert_eq!(t.screen().get(0, 1), Some(b'i'));
        assert_eq!(pos(&t), (0, 2));

        let mut fb = blank_framebuffer();
        raster::render_glyph(&mut fb, b'H', 0, 0);
        raster::render_glyph(&mut fb, b'i', 0, 1);
        assert_eq!(t.framebuffer(), &fb);
    }

    #[test]
    fn test_wrap_law() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'=', 0, b' ' + 15]).unwrap();
        t.feed(b'x').unwrap();
        assert_eq!(pos(&t), (1, 0));

        t.feed_bytes(&[ESC, b'=', 1, b' ' + 15]).unwrap();
        t.feed(b'y').unwrap();
        assert_eq!(pos(&t), (0, 0));
    }

    #[test]
    fn test_thirty_two_glyphs_fill_and_home() {
        let mut t = term();
        t.feed_bytes(b"0123456789abcdefGHIJKLMNOPQRSTUV").unwrap();
        assert_eq!(pos(&t), (0, 0));
        assert_eq!(t.screen().row_bytes(0).unwrap(), b"0123456789abcdef");
        assert_eq!(t.screen().row_bytes(1).unwrap(), b"GHIJKLMNOPQRSTUV");
    }

    #[test]
    fn test_home_cr_lf() {
        let mut t = term();
        t.feed_bytes(b"abc").unwrap();
        t.feed(LF).unwrap();
        assert_eq!(pos(&t), (1, 3));
        t.feed(CR).unwrap();
        assert_eq!(pos(&t), (1, 0));
        t.feed(LF).unwrap();
        assert_eq!(pos(&t), (0, 0));
        t.feed_bytes(b"zz").unwrap();
        t.feed(HOME).unwrap();
        assert_eq!(pos(&t), (0, 0));
        // Cursor moves never touch the shadow
        assert_eq!(&t.screen().row_bytes(0).unwrap()[..3], b"zzc");
    }

    #[test]
    fn test_position_escape() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'=', 0x01, 0x25]).unwrap();
        assert_eq!(pos(&t), (1, 5));
        assert_eq!(t.state(), State::Idle);
        assert!(t.transport_mut().events.is_empty());
    }

    #[test]
    fn test_row_byte_low_bit_only() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'=', b'3', b' ']).unwrap();
        assert_eq!(pos(&t), (1, 0));
        t.feed_bytes(&[ESC, b'=', b'2', b'!']).unwrap();
        assert_eq!(pos(&t), (0, 1));
    }

    #[test]
    fn test_column_overflow_is_clamped_and_reported() {
        let mut t = term();
        let result = t.feed_bytes(&[ESC, b'=', 0, b'z']);
        assert_eq!(result, Err(Error::ColumnOutOfRange { requested: b'z' }));
        assert_eq!(pos(&t), (0, 15));
        assert_eq!(t.state(), State::Idle);

        // Wrap still works from the clamped column
        t.feed(b'q').unwrap();
        assert_eq!(pos(&t), (1, 0));
    }

    #[test]
    fn test_column_below_space_clamps_to_zero() {
        let mut t = term();
        t.feed_bytes(b"abcd").unwrap();
        let result = t.feed_bytes(&[ESC, b'=', 1, 0x05]);
        assert_eq!(result, Err(Error::ColumnOutOfRange { requested: 0x05 }));
        assert_eq!(pos(&t), (1, 0));
    }

    #[test]
    fn test_column_error_does_not_stop_run() {
        let mut t = term();
        let result = t.feed_bytes(&[ESC, b'=', 0, 0x7F, b'A']);
        assert!(matches!(result, Err(Error::ColumnOutOfRange { .. })));
        assert_eq!(t.screen().get(0, 15), Some(b'A'));
    }

    #[test]
    fn test_escape_discard() {
        let mut t = term();
        t.feed_bytes(b"ab").unwrap();
        let fb = t.framebuffer().clone();
        let screen = t.screen().clone();

        t.feed_bytes(&[ESC, b'x']).unwrap();
        assert_eq!(t.state(), State::Idle);
        assert_eq!(pos(&t), (0, 2));
        assert_eq!(t.framebuffer(), &fb);
        assert_eq!(t.screen(), &screen);
        assert!(t.transport_mut().events.is_empty());
    }

    #[test]
    fn test_contrast_up_pushes_once() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'!', b'C']).unwrap();
        assert_eq!(t.config().contrast, 129);

        let cmds = t.transport_mut().commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[0].as_slice(), &[0x81, 129, 0xAA]);
        assert_eq!(cmds[1].as_slice(), &[0x82, 128, 0xAA]);
    }

    #[test]
    fn test_contrast_down_twice() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'!', b'c', ESC, b'!', b'c']).unwrap();
        assert_eq!(t.config().contrast, 126);
        assert_eq!(t.config().brightness, 128);
    }

    #[test]
    fn test_brightness_and_unknown_op() {
        let mut t = term();
        t.feed_bytes(&[ESC, b'!', b'B', ESC, b'!', b'b', ESC, b'!', b'b']).unwrap();
        assert_eq!(t.config().brightness, 127);

        t.transport_mut().clear();
        t.feed_bytes(&[ESC, b'!', b'?']).unwrap();
        assert_eq!(t.config().brightness, 127);
        let cmds = t.transport_mut().commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[1].as_slice(), &[0x82, 127, 0xAA]);
    }

    #[test]
    fn test_levels_sent_masked() {
        let mut t = Terminal::with_config(
            RecordingTransport::default(),
            DeviceConfig::new().with_contrast(255),
        );
        t.feed_bytes(&[ESC, b'!', b'C']).unwrap();
        assert_eq!(t.config().contrast, 256);
        assert_eq!(t.transport_mut().commands()[0].as_slice(), &[0x81, 0x00, 0xAA]);
    }

    #[test]
    fn test_cls_resets_everything() {
        let mut t = term();
        t.feed_bytes(b"some text\nmore").unwrap();
        t.set_pixel(95, 15, true);
        t.feed(CLS).unwrap();

        assert!(t.screen().is_blank());
        assert_eq!(pos(&t), (0, 0));
        assert_eq!(t.framebuffer(), &blank_framebuffer());
        // CLS reprograms the panel
        assert_eq!(t.transport_mut().commands().len(), 5);
    }

    #[test]
    fn test_clear_to_eol_mid_row() {
        let mut t = term();
        t.feed_bytes(b"0123456789ABCDEF").unwrap();
        t.feed_bytes(b"second").unwrap();
        t.feed_bytes(&[ESC, b'=', 0, b' ' + 10]).unwrap();
        t.feed_bytes(&[ESC, b'T']).unwrap();

        assert_eq!(t.screen().row_bytes(0).unwrap(), b"0123456789      ");
        assert_eq!(&t.screen().row_bytes(1).unwrap()[..6], b"second");
        assert_eq!(pos(&t), (0, 10));
    }

    #[test]
    fn test_clear_to_eol_from_column_zero_of_bottom_row() {
        let mut t = term();
        t.feed_bytes(b"top").unwrap();
        t.feed_bytes(&[ESC, b'=', 1, b' ']).unwrap();
        t.feed_bytes(b"bottom row text!").unwrap();
        t.feed_bytes(&[ESC, b'=', 1, b' ']).unwrap();
        t.feed_bytes(&[ESC, b'T']).unwrap();

        assert_eq!(t.screen().row_bytes(1).unwrap(), b"                ");
        assert_eq!(&t.screen().row_bytes(0).unwrap()[..3], b"top");
        assert_eq!(pos(&t), (1, 0));
    }

    #[test]
    fn test_redraw_restores_text_after_pixel_damage() {
        let mut t = term();
        t.feed_bytes(b"Redraw me").unwrap();
        let clean = t.framebuffer().clone();
        let cursor = t.cursor();

        for x in 0..96 {
            t.set_pixel(x, 3, true);
        }
        assert_ne!(t.framebuffer(), &clean);

        t.redraw();
        assert_eq!(t.framebuffer(), &clean);
        assert_eq!(t.cursor(), cursor);
    }

    #[test]
    fn test_render_glyph_leaves_shadow_alone() {
        let mut t = term();
        t.render_glyph(b'W', 1, 4);
        assert!(t.screen().is_blank());
        assert_eq!(pos(&t), (0, 0));
        assert!(t.get_pixel(4 * 6, 8));
    }

    #[test]
    fn test_flush_sends_framebuffer() {
        let mut t = term();
        t.feed_bytes(b"X").unwrap();
        t.flush().unwrap();

        let events = &t.transport_mut().events;
        assert_eq!(events.first(), Some(&Event::Select));
        assert_eq!(events.get(1), Some(&Event::Data));
        assert_eq!(events.last(), Some(&Event::Deselect));

        let data = t.transport_mut().data_bytes();
        assert_eq!(data.as_slice(), &t.framebuffer().as_bytes()[..]);
    }

    #[test]
    fn test_extra_registers() {
        let mut t = term();
        t.set_display_on(false).unwrap();
        t.set_start_line(3).unwrap();
        t.set_display_offset(16).unwrap();

        let cmds = t.transport_mut().commands();
        assert_eq!(cmds[0].as_slice(), &[0xAE, 0xAA]);
        assert_eq!(cmds[1].as_slice(), &[0x43, 0xAA]);
        assert_eq!(cmds[2].as_slice(), &[0xD3, 16, 0xAA]);
    }

    #[test]
    fn test_transport_error_propagates() {
        // Select, command mode, then the opcode byte fails
        let mut t = Terminal::new(RecordingTransport::failing_after(2));
        assert_eq!(t.init(), Err(Error::Transport(MockError)));

        let mut t = Terminal::new(RecordingTransport::failing_after(0));
        t.feed_bytes(&[ESC, b'!']).unwrap();
        assert_eq!(t.feed(b'C'), Err(Error::Transport(MockError)));
        // The adjustment is kept and the interpreter is ready for more
        assert_eq!(t.config().contrast, 129);
        assert_eq!(t.state(), State::Idle);
    }

    #[test]
    fn test_cls_resets_locally_when_transport_fails() {
        let mut t = Terminal::new(RecordingTransport::failing_after(0));
        t.feed_bytes(b"hello").unwrap();
        t.set_pixel(95, 15, true);

        assert_eq!(t.feed(CLS), Err(Error::Transport(MockError)));
        assert!(t.screen().is_blank());
        assert_eq!(pos(&t), (0, 0));
        assert_eq!(t.framebuffer(), &blank_framebuffer());
        assert_eq!(t.state(), State::Idle);
    }

    #[test]
    fn test_transaction_deselects_after_body_failure() {
        let mut transport = RecordingTransport::default();
        let result: Result<(), MockError> = transaction(&mut transport, |_| Err(MockError));
        assert_eq!(result, Err(MockError));
        assert_eq!(transport.events.as_slice(), &[Event::Select, Event::Deselect]);
    }

    #[test]
    fn test_fmt_write() {
        let mut t = term();
        write!(t, "T={}", 42).unwrap();
        assert_eq!(&t.screen().row_bytes(0).unwrap()[..4], b"T=42");

        assert!(write!(t, "\x1b=\x00z").is_err());
    }
}
