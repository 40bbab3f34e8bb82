//! Configuration type definitions
//!
//! Layout of both eyes on the panel and the panel's bus settings.
//! Defaults place two 60x60 eyes on a 128x64 display.

use embedded_graphics::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default I2C address of the panel
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// Rest geometry of one eye
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EyeLayout {
    /// White region center x (pixels)
    pub center_x: i32,
    /// White region center y (pixels)
    pub center_y: i32,
    /// White region width (pixels)
    pub width: i32,
    /// White region height (pixels)
    pub height: i32,
    /// Pupil offset from the white center, x (pixels)
    pub pupil_offset_x: i32,
    /// Pupil offset from the white center, y (pixels)
    pub pupil_offset_y: i32,
    /// Pupil diameter (pixels)
    pub pupil_diameter: i32,
}

impl EyeLayout {
    /// Default layout centered at (`center_x`, 32)
    pub const fn at(center_x: i32) -> Self {
        Self {
            center_x,
            center_y: 32,
            width: 60,
            height: 60,
            pupil_offset_x: 0,
            pupil_offset_y: 10,
            pupil_diameter: 30,
        }
    }

    /// White region center
    pub const fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Pupil offset at rest
    pub const fn pupil_offset(&self) -> Point {
        Point::new(self.pupil_offset_x, self.pupil_offset_y)
    }
}

/// Display bus configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub i2c_address: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
        }
    }
}

/// Complete eyes configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EyesConfig {
    /// Eye on the display's left
    pub left: EyeLayout,
    /// Eye on the display's right
    pub right: EyeLayout,
    /// Panel settings
    pub display: DisplayConfig,
}

impl Default for EyesConfig {
    fn default() -> Self {
        Self {
            left: EyeLayout::at(30),
            right: EyeLayout::at(96),
            display: DisplayConfig::default(),
        }
    }
}
