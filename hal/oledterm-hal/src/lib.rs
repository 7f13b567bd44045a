//! oledterm Hardware Abstraction Layer
//!
//! This crate defines the hardware seam between the terminal driver and
//! the physical display controller. The driver only ever talks to a
//! [`DisplayTransport`]; how the bytes reach the panel is up to the
//! implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  oledterm-display (terminal + raster)   │
//! └─────────────────────────────────────────┘
//!                     │ DisplayTransport
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  SpiTransport (this crate)              │
//! └─────────────────────────────────────────┘
//!                     │ SpiBus + OutputPin
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  chip HAL     │
//! │  adapters     │       │  impls        │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - chip-select and data/command lines
//! - [`spi::SpiBus`] - byte transmission
//! - [`transport::DisplayTransport`] - controller transaction bracketing

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod spi;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use embedded::{EhPin, EhSpi};
pub use gpio::OutputPin;
pub use spi::SpiBus;
pub use transport::{DisplayTransport, SpiTransport, TransportError};
