//! Text terminal for 96x16 SSD1303 OLED modules
//!
//! This crate provides:
//! - `Terminal`, a driver that turns a character stream with in-band
//!   control codes and escape sequences into pixels on the panel
//! - `PixelBuffer`, a packed 1bpp shadow of the panel
//! - `Screen`, a 2x16 text shadow used to redraw without the host
//! - `SharedTerminal`, a mutex wrapper for multiple producers
//!
//! # Architecture
//!
//! ```text
//!  bytes ──► EscapeParser ──► Action ──► Cursor / Screen
//!                                           │
//!                                           ▼
//!                                  raster::render_glyph
//!                                           │
//!                                           ▼
//!                                      PixelBuffer ──flush──► DisplayTransport
//! ```
//!
//! Register writes (contrast, brightness, column start, remap) go straight
//! to the transport as they happen. Pixels only move on
//! [`Terminal::flush`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod cursor;
pub mod error;
pub mod escape;
pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod screen;
pub mod shared;
pub mod terminal;

#[cfg(test)]
mod mock;

// Re-export key types
pub use config::DeviceConfig;
pub use cursor::Cursor;
pub use error::Error;
pub use escape::{Action, ConfigOp, EscapeParser, State};
pub use framebuffer::{PixelBuffer, HEIGHT, WIDTH};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
pub use shared::SharedTerminal;
pub use terminal::Terminal;
