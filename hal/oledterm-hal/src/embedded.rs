//! Adapters from `embedded-hal` 1.0 peripherals
//!
//! Most chip HALs already implement the `embedded-hal` traits. Wrapping
//! their pins and buses here lets them drive [`SpiTransport`] without a
//! per-chip implementation crate.
//!
//! [`SpiTransport`]: crate::transport::SpiTransport

use embedded_hal::digital::OutputPin as EhOutputPin;
use embedded_hal::spi::SpiBus as EhSpiBus;

use crate::gpio::OutputPin;
use crate::spi::SpiBus;

/// `embedded-hal` output pin used as a control line
pub struct EhPin<P>(pub P);

impl<P: EhOutputPin> OutputPin for EhPin<P> {
    type Error = P::Error;

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }
}

/// `embedded-hal` SPI bus used as the controller's serial link
///
/// Chip select is driven by the transport, so this wraps the raw bus
/// rather than an `SpiDevice`.
pub struct EhSpi<S>(pub S);

impl<S: EhSpiBus<u8>> SpiBus for EhSpi<S> {
    type Error = S::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        EhSpiBus::write(&mut self.0, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        EhSpiBus::flush(&mut self.0)
    }
}
