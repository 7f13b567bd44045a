//! Panel configuration
//!
//! Register values programmed whenever the panel is (re)initialised.
//! Contrast and brightness can also be nudged at runtime through the
//! `ESC '!'` command.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::escape::ConfigOp;

/// Default contrast level
pub const DEFAULT_CONTRAST: i32 = 128;

/// Default brightness level
pub const DEFAULT_BRIGHTNESS: i32 = 128;

/// Panel register configuration
///
/// `contrast` and `brightness` are kept unbounded, like the counters the
/// host steps with `ESC '!'`; only their low byte reaches the panel. Many
/// decrements from 0 therefore wrap round to a bright setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceConfig {
    /// Contrast level
    pub contrast: i32,
    /// Brightness (colour bank) level
    pub brightness: i32,
    /// Low nibble of the RAM column the 96 visible columns start at
    pub column_start_low: u8,
    /// High nibble of the RAM column the 96 visible columns start at
    pub column_start_high: u8,
    /// Mirror column addressing
    pub segment_remap: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceConfig {
    /// Stock configuration for the 96x16 module
    pub const fn new() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            brightness: DEFAULT_BRIGHTNESS,
            column_start_low: 4,
            column_start_high: 12,
            segment_remap: true,
        }
    }

    /// Override the contrast level
    pub const fn with_contrast(mut self, contrast: i32) -> Self {
        self.contrast = contrast;
        self
    }

    /// Override the brightness level
    pub const fn with_brightness(mut self, brightness: i32) -> Self {
        self.brightness = brightness;
        self
    }

    /// Override the RAM column start nibbles
    pub const fn with_column_start(mut self, low: u8, high: u8) -> Self {
        self.column_start_low = low;
        self.column_start_high = high;
        self
    }

    /// Override segment remapping
    pub const fn with_segment_remap(mut self, remap: bool) -> Self {
        self.segment_remap = remap;
        self
    }

    /// Contrast as sent to the panel
    pub const fn contrast_byte(&self) -> u8 {
        (self.contrast & 0xFF) as u8
    }

    /// Brightness as sent to the panel
    pub const fn brightness_byte(&self) -> u8 {
        (self.brightness & 0xFF) as u8
    }

    /// Apply a runtime adjustment
    pub fn apply(&mut self, op: ConfigOp) {
        match op {
            ConfigOp::ContrastUp => self.contrast = self.contrast.wrapping_add(1),
            ConfigOp::ContrastDown => self.contrast = self.contrast.wrapping_sub(1),
            ConfigOp::BrightnessUp => self.brightness = self.brightness.wrapping_add(1),
            ConfigOp::BrightnessDown => self.brightness = self.brightness.wrapping_sub(1),
            ConfigOp::Refresh => {}
        }
    }

    /// Level registers, in the order they are pushed
    pub fn level_commands(&self) -> [Command; 2] {
        [
            Command::Contrast(self.contrast_byte()),
            Command::Brightness(self.brightness_byte()),
        ]
    }

    /// Full reprogramming sequence
    pub fn init_commands(&self) -> [Command; 5] {
        let [contrast, brightness] = self.level_commands();
        [
            Command::LowerColumn(self.column_start_low),
            Command::HigherColumn(self.column_start_high),
            contrast,
            brightness,
            Command::SegmentRemap(self.segment_remap),
        ]
    }
}
