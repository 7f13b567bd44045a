//! Display controller transport
//!
//! The controller sees a stream of bytes framed by chip select. The D/C
//! line decides whether a byte is an opcode or display/parameter data.

use crate::gpio::{ActiveLevel, OutputPin};
use crate::spi::SpiBus;

/// Byte transport to the display controller
///
/// A transaction is bracketed by [`select_device`](Self::select_device)
/// and [`deselect_device`](Self::deselect_device). The mode calls may be
/// issued at any point inside a transaction and stay in effect until
/// changed.
pub trait DisplayTransport {
    /// Error type for transport operations
    type Error;

    /// Assert chip select
    fn select_device(&mut self) -> Result<(), Self::Error>;

    /// Release chip select
    fn deselect_device(&mut self) -> Result<(), Self::Error>;

    /// Following bytes are controller commands
    fn set_command_mode(&mut self) -> Result<(), Self::Error>;

    /// Following bytes are display RAM or parameter data
    fn set_data_mode(&mut self) -> Result<(), Self::Error>;

    /// Transmit one byte
    fn send_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Transmit a run of bytes
    fn send_bytes(&mut self, values: &[u8]) -> Result<(), Self::Error> {
        for &value in values {
            self.send_byte(value)?;
        }
        Ok(())
    }
}

/// Errors raised by [`SpiTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError<S, P> {
    /// SPI bus failure
    Spi(S),
    /// Chip select or D/C line failure
    Pin(P),
}

/// Four-wire serial transport: SPI bus plus CS and D/C lines
///
/// D/C low selects command mode, D/C high selects data mode.
pub struct SpiTransport<SPI, CS, DC> {
    spi: SPI,
    cs: CS,
    dc: DC,
    cs_level: ActiveLevel,
}

impl<SPI, CS, DC> SpiTransport<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    /// Create a transport with an active-low chip select
    pub fn new(spi: SPI, cs: CS, dc: DC) -> Self {
        Self::with_cs_level(spi, cs, dc, ActiveLevel::Low)
    }

    /// Create a transport with an explicit chip select polarity
    pub fn with_cs_level(spi: SPI, cs: CS, dc: DC, cs_level: ActiveLevel) -> Self {
        Self {
            spi,
            cs,
            dc,
            cs_level,
        }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, CS, DC) {
        (self.spi, self.cs, self.dc)
    }
}

impl<SPI, CS, DC> DisplayTransport for SpiTransport<SPI, CS, DC>
where
    SPI: SpiBus,
    CS: OutputPin,
    DC: OutputPin<Error = CS::Error>,
{
    type Error = TransportError<SPI::Error, CS::Error>;

    fn select_device(&mut self) -> Result<(), Self::Error> {
        self.cs
            .set_state(self.cs_level.asserted())
            .map_err(TransportError::Pin)
    }

    fn deselect_device(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(TransportError::Spi)?;
        self.cs
            .set_state(self.cs_level.released())
            .map_err(TransportError::Pin)
    }

    fn set_command_mode(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(TransportError::Spi)?;
        self.dc.set_low().map_err(TransportError::Pin)
    }

    fn set_data_mode(&mut self) -> Result<(), Self::Error> {
        self.spi.flush().map_err(TransportError::Spi)?;
        self.dc.set_high().map_err(TransportError::Pin)
    }

    fn send_byte(&mut self, value: u8) -> Result<(), Self::Error> {
        self.spi.write_byte(value).map_err(TransportError::Spi)
    }

    fn send_bytes(&mut self, values: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(values).map_err(TransportError::Spi)
    }
}
