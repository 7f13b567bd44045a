//! GPIO pin abstractions
//!
//! The SSD1303 needs two control lines besides the bus itself: an
//! active-low chip select and the data/command (D/C) select line.

/// Digital output pin
///
/// Implementations handle the register manipulation for the specific
/// chip. Pins on most MCUs cannot fail; those that can (I/O expanders)
/// report it through `Error`.
pub trait OutputPin {
    /// Error type for pin operations
    type Error;

    /// Set the pin high (logic 1)
    fn set_high(&mut self) -> Result<(), Self::Error>;

    /// Set the pin low (logic 0)
    fn set_low(&mut self) -> Result<(), Self::Error>;

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) -> Result<(), Self::Error> {
        if high {
            self.set_high()
        } else {
            self.set_low()
        }
    }
}

/// Logic level that asserts a control line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Line is asserted when driven low (chip select on most panels)
    Low,
    /// Line is asserted when driven high
    High,
}

impl ActiveLevel {
    /// Pin state that asserts a line with this polarity
    pub const fn asserted(self) -> bool {
        matches!(self, ActiveLevel::High)
    }

    /// Pin state that releases a line with this polarity
    pub const fn released(self) -> bool {
        !self.asserted()
    }
}
