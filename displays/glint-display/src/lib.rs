//! Display abstraction and shared raster types for Glint
//!
//! This crate provides:
//! - `FrameBuffer`, a 1-bit page-organized raster that implements
//!   embedded-graphics' `DrawTarget`
//! - `DisplayDevice` trait for panels that can present a framebuffer
//! - `Ssd1306` driver for 128x64 I2C OLED modules
//!
//! # Architecture
//!
//! Everything is drawn into a `FrameBuffer` first. A `DisplayDevice` only
//! knows how to bring the panel up, blank it and copy a finished frame
//! across. The eye logic in glint-core never touches the bus directly.
//!
//! ## Memory layout
//!
//! The framebuffer uses the same layout as SSD1306/SH1106 display RAM:
//! the screen is split into pages of 8 rows, each byte is one column of a
//! page, and bit 0 is the topmost row of that page. Presenting a frame is
//! therefore a straight copy, one page at a time.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backend;
pub mod framebuffer;
pub mod ssd1306;

// Re-export key types
pub use backend::{DisplayDevice, DisplayError};
pub use framebuffer::{FrameBuffer, FrameBufferError, MAX_HEIGHT, MAX_WIDTH};
pub use ssd1306::{Ssd1306, SSD1306_ADDR};
