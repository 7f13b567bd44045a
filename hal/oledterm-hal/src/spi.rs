//! SPI bus abstractions
//!
//! The display controller is write-only from the driver's point of view,
//! so only the transmit half of an SPI master is modelled here.

/// SPI bus master (transmit only)
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Write a single byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.write(&[byte])
    }

    /// Wait until all queued bytes have left the shifter
    ///
    /// Must be called before releasing chip select.
    fn flush(&mut self) -> Result<(), Self::Error>;
}
