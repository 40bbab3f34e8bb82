//! Display device trait
//!
//! Defines the interface between the renderer and a physical panel.

use embedded_graphics::geometry::Size;
use embedded_hal::i2c::ErrorKind;

use crate::framebuffer::FrameBuffer;

/// Display device errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer to the panel failed
    Bus(ErrorKind),
    /// Reset pin could not be driven
    Reset,
    /// Device used before `initialize`
    NotInitialized,
    /// Framebuffer size does not match the panel
    FrameMismatch,
}

/// Display device trait
///
/// A fixed-size monochrome bitmap device addressed as a 2D pixel grid.
/// Implementations own the bus and copy finished frames to the panel;
/// all drawing happens in a [`FrameBuffer`] beforehand.
pub trait DisplayDevice {
    /// Error type for device operations
    type Error;

    /// Bring the panel up and report its dimensions in pixels
    fn initialize(&mut self) -> Result<Size, Self::Error>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Copy a finished frame to the panel
    fn present(&mut self, frame: &FrameBuffer) -> Result<(), Self::Error>;
}
