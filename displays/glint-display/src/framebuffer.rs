//! Monochrome frame buffer
//!
//! A 1-bit raster organized in 8-row pages, matching SSD1306 display RAM.

use core::convert::Infallible;

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    Pixel,
};
use heapless::Vec;

/// Widest supported panel in pixels
pub const MAX_WIDTH: u32 = 128;

/// Tallest supported panel in pixels
pub const MAX_HEIGHT: u32 = 64;

/// Rows per display RAM page
pub const PAGE_HEIGHT: u32 = 8;

/// Buffer capacity in bytes
const MAX_BUFFER_LEN: usize = (MAX_WIDTH * MAX_HEIGHT / PAGE_HEIGHT) as usize;

/// Frame buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameBufferError {
    /// Requested size exceeds `MAX_WIDTH` x `MAX_HEIGHT`
    TooLarge,
}

/// 1-bit-per-pixel frame buffer
///
/// Byte `page * width + x` holds column `x` of rows `page * 8 ..
/// page * 8 + 7`, least significant bit on top. Drawing outside the
/// buffer is silently clipped.
#[derive(Clone)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    buffer: Vec<u8, MAX_BUFFER_LEN>,
}

impl FrameBuffer {
    /// Create a blank (all off) frame buffer of the given size
    pub fn new(size: Size) -> Result<Self, FrameBufferError> {
        if size.width > MAX_WIDTH || size.height > MAX_HEIGHT {
            return Err(FrameBufferError::TooLarge);
        }

        let len = (size.width * size.height.div_ceil(PAGE_HEIGHT)) as usize;
        let mut buffer = Vec::new();
        buffer
            .resize(len, 0)
            .map_err(|_| FrameBufferError::TooLarge)?;

        Ok(Self {
            width: size.width,
            height: size.height,
            buffer,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of 8-row pages
    pub fn pages(&self) -> u32 {
        self.height.div_ceil(PAGE_HEIGHT)
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: BinaryColor) {
        let byte = if color.is_on() { 0xFF } else { 0x00 };
        self.buffer.fill(byte);
    }

    /// Read a pixel, or `None` if the point is outside the buffer
    pub fn pixel(&self, point: Point) -> Option<BinaryColor> {
        let (index, bit) = self.locate(point)?;
        if self.buffer[index] & bit != 0 {
            Some(BinaryColor::On)
        } else {
            Some(BinaryColor::Off)
        }
    }

    /// Raw bytes of one page
    pub fn page(&self, page: u32) -> Option<&[u8]> {
        let start = (page * self.width) as usize;
        self.buffer.get(start..start + self.width as usize)
    }

    /// Raw bytes of the whole buffer, page by page
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of pixels that are on
    pub fn count_on(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                if self.pixel(Point::new(x, y)) == Some(BinaryColor::On) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Byte index and bit mask for a point
    fn locate(&self, point: Point) -> Option<(usize, u8)> {
        if point.x < 0 || point.y < 0 {
            return None;
        }

        let x = point.x as u32;
        let y = point.y as u32;
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (y / PAGE_HEIGHT * self.width + x) as usize;
        Some((index, 1 << (y % PAGE_HEIGHT)))
    }

    fn set_pixel(&mut self, point: Point, color: BinaryColor) {
        if let Some((index, bit)) = self.locate(point) {
            match color {
                BinaryColor::On => self.buffer[index] |= bit,
                BinaryColor::Off => self.buffer[index] &= !bit,
            }
        }
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
