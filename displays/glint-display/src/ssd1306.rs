//! SSD1306 OLED Display Driver
//!
//! Driver for 128x64 SSD1306-based OLED displays via I2C, with a hardware
//! reset line. Frames are drawn into a [`FrameBuffer`] and copied across
//! with horizontal addressing, one page per I2C write.

use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{Error as _, I2c};

use crate::backend::{DisplayDevice, DisplayError};
use crate::framebuffer::{FrameBuffer, PAGE_HEIGHT};

/// SSD1306 I2C address (typically 0x3C or 0x3D)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
const WIDTH: u32 = 128;
const HEIGHT: u32 = 64;
const PAGES: u32 = HEIGHT / PAGE_HEIGHT;

/// Control bytes
const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

/// SSD1306 commands
mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_RESUME: u8 = 0xA4;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Initialization sequence for a 128x64 panel on the internal charge pump
const INIT_SEQUENCE: &[u8] = &[
    cmd::DISPLAY_OFF,
    cmd::SET_CLOCK_DIV,
    0x80, // Default clock
    cmd::SET_MUX_RATIO,
    0x3F, // 64 lines
    cmd::SET_DISPLAY_OFFSET,
    0x00,
    cmd::SET_START_LINE,
    cmd::SET_CHARGE_PUMP,
    0x14, // Enable charge pump
    cmd::SET_MEMORY_MODE,
    0x00,                  // Horizontal addressing
    cmd::SET_SEG_REMAP,    // Flip horizontally
    cmd::SET_COM_SCAN_DEC, // Flip vertically
    cmd::SET_COM_PINS,
    0x12, // Alternative COM config
    cmd::SET_CONTRAST,
    0xCF, // High contrast
    cmd::SET_PRECHARGE,
    0xF1,
    cmd::SET_VCOM_DETECT,
    0x40,
    cmd::DISPLAY_RESUME,
    cmd::SET_NORMAL,
    cmd::DISPLAY_ON,
];

/// SSD1306 OLED driver
pub struct Ssd1306<I2C, RST, DELAY> {
    i2c: I2C,
    reset: RST,
    delay: DELAY,
    address: u8,
    initialized: bool,
}

impl<I2C, RST, DELAY> Ssd1306<I2C, RST, DELAY>
where
    I2C: I2c,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Create a driver at the default address
    pub fn new(i2c: I2C, reset: RST, delay: DELAY) -> Self {
        Self::with_address(i2c, reset, delay, SSD1306_ADDR)
    }

    /// Create a driver at a specific I2C address
    pub fn with_address(i2c: I2C, reset: RST, delay: DELAY, address: u8) -> Self {
        Self {
            i2c,
            reset,
            delay,
            address,
            initialized: false,
        }
    }

    /// I2C address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus, reset pin and delay
    pub fn release(self) -> (I2C, RST, DELAY) {
        (self.i2c, self.reset, self.delay)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.commands(&[cmd::SET_CONTRAST, contrast])
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if on {
            self.command(cmd::DISPLAY_ON)
        } else {
            self.command(cmd::DISPLAY_OFF)
        }
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if inverted {
            self.command(cmd::SET_INVERSE)
        } else {
            self.command(cmd::SET_NORMAL)
        }
    }

    /// Pulse the reset line: high 1 ms, low 10 ms, then high
    fn hard_reset(&mut self) -> Result<(), DisplayError> {
        self.reset.set_high().map_err(|_| DisplayError::Reset)?;
        self.delay.delay_ms(1);
        self.reset.set_low().map_err(|_| DisplayError::Reset)?;
        self.delay.delay_ms(10);
        self.reset.set_high().map_err(|_| DisplayError::Reset)
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }

    /// Send a command to the display
    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[CONTROL_COMMAND, cmd])
            .map_err(|e| DisplayError::Bus(e.kind()))
    }

    fn commands(&mut self, cmds: &[u8]) -> Result<(), DisplayError> {
        for &c in cmds {
            self.command(c)?;
        }
        Ok(())
    }

    /// Address the whole panel so page writes land in order
    fn set_full_window(&mut self) -> Result<(), DisplayError> {
        self.commands(&[
            cmd::SET_COLUMN_ADDR,
            0,
            (WIDTH - 1) as u8,
            cmd::SET_PAGE_ADDR,
            0,
            (PAGES - 1) as u8,
        ])
    }

    /// Send one page of display data
    fn write_page(&mut self, page: &[u8]) -> Result<(), DisplayError> {
        let mut data = [0u8; WIDTH as usize + 1];
        data[0] = CONTROL_DATA;
        data[1..].copy_from_slice(page);
        self.i2c
            .write(self.address, &data)
            .map_err(|e| DisplayError::Bus(e.kind()))
    }
}

impl<I2C, RST, DELAY> DisplayDevice for Ssd1306<I2C, RST, DELAY>
where
    I2C: I2c,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Error = DisplayError;

    fn initialize(&mut self) -> Result<Size, DisplayError> {
        self.hard_reset()?;
        self.commands(INIT_SEQUENCE)?;
        self.initialized = true;
        Ok(Size::new(WIDTH, HEIGHT))
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.set_full_window()?;

        let blank = [0u8; WIDTH as usize];
        for _ in 0..PAGES {
            self.write_page(&blank)?;
        }
        Ok(())
    }

    fn present(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        if frame.size() != Size::new(WIDTH, HEIGHT) {
            return Err(DisplayError::FrameMismatch);
        }

        self.set_full_window()?;
        for page in 0..PAGES {
            let bytes = frame.page(page).ok_or(DisplayError::FrameMismatch)?;
            self.write_page(bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};

    #[derive(Default)]
    struct MockI2c {
        writes: Vec<(u8, Vec<u8>)>,
        fail: bool,
    }

    impl MockI2c {
        fn commands(&self) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(_, bytes)| bytes[0] == CONTROL_COMMAND)
                .map(|(_, bytes)| bytes[1])
                .collect()
        }

        fn data_writes(&self) -> Vec<&[u8]> {
            self.writes
                .iter()
                .filter(|(_, bytes)| bytes[0] == CONTROL_DATA)
                .map(|(_, bytes)| &bytes[1..])
                .collect()
        }
    }

    impl ErrorType for MockI2c {
        type Error = ErrorKind;
    }

    impl I2c for MockI2c {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Bus);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.writes.push((address, bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockPin {
        levels: Vec<bool>,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.levels.push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.levels.push(true);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockDelay {
        total_ns: u64,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
        }
    }

    type TestDisplay = Ssd1306<MockI2c, MockPin, MockDelay>;

    fn display() -> TestDisplay {
        Ssd1306::new(MockI2c::default(), MockPin::default(), MockDelay::default())
    }

    #[test]
    fn test_initialize_reports_size() {
        let mut disp = display();
        assert_eq!(disp.initialize(), Ok(Size::new(128, 64)));

        let (i2c, reset, delay) = disp.release();
        assert_eq!(reset.levels, vec![true, false, true]);
        assert!(delay.total_ns >= 11_000_000);
        assert_eq!(i2c.commands(), INIT_SEQUENCE.to_vec());
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == SSD1306_ADDR));
    }

    #[test]
    fn test_custom_address() {
        let mut disp = Ssd1306::with_address(
            MockI2c::default(),
            MockPin::default(),
            MockDelay::default(),
            0x3D,
        );
        assert_eq!(disp.address(), 0x3D);
        disp.initialize().unwrap();

        let (i2c, _, _) = disp.release();
        assert!(i2c.writes.iter().all(|(addr, _)| *addr == 0x3D));
    }

    #[test]
    fn test_requires_initialize() {
        let mut disp = display();
        let frame = FrameBuffer::new(Size::new(128, 64)).unwrap();

        assert_eq!(disp.clear(), Err(DisplayError::NotInitialized));
        assert_eq!(disp.present(&frame), Err(DisplayError::NotInitialized));
        assert_eq!(disp.set_contrast(0x10), Err(DisplayError::NotInitialized));
    }

    #[test]
    fn test_present_streams_pages() {
        let mut disp = display();
        disp.initialize().unwrap();

        let mut frame = FrameBuffer::new(Size::new(128, 64)).unwrap();
        frame
            .draw_iter([
                Pixel(Point::new(0, 0), BinaryColor::On),
                Pixel(Point::new(127, 63), BinaryColor::On),
            ])
            .unwrap();
        disp.present(&frame).unwrap();

        let (i2c, _, _) = disp.release();
        let pages = i2c.data_writes();
        assert_eq!(pages.len(), 8);
        assert!(pages.iter().all(|p| p.len() == 128));
        assert_eq!(pages[0][0], 0b0000_0001);
        assert_eq!(pages[7][127], 0b1000_0000);

        let commands = i2c.commands();
        let window = &commands[INIT_SEQUENCE.len()..];
        assert_eq!(
            window,
            &[cmd::SET_COLUMN_ADDR, 0, 127, cmd::SET_PAGE_ADDR, 0, 7]
        );
    }

    #[test]
    fn test_clear_writes_blank_pages() {
        let mut disp = display();
        disp.initialize().unwrap();
        disp.clear().unwrap();

        let (i2c, _, _) = disp.release();
        let pages = i2c.data_writes();
        assert_eq!(pages.len(), 8);
        assert!(pages.iter().all(|p| p.iter().all(|&b| b == 0)));
    }

    #[test]
    fn test_frame_mismatch() {
        let mut disp = display();
        disp.initialize().unwrap();
        let frame = FrameBuffer::new(Size::new(64, 32)).unwrap();
        assert_eq!(disp.present(&frame), Err(DisplayError::FrameMismatch));
    }

    #[test]
    fn test_bus_error_propagates() {
        let i2c = MockI2c {
            fail: true,
            ..Default::default()
        };
        let mut disp = Ssd1306::new(i2c, MockPin::default(), MockDelay::default());
        assert_eq!(disp.initialize(), Err(DisplayError::Bus(ErrorKind::Bus)));
    }

    #[test]
    fn test_panel_settings() {
        let mut disp = display();
        disp.initialize().unwrap();
        disp.set_contrast(0x7F).unwrap();
        disp.set_inverted(true).unwrap();
        disp.set_display_on(false).unwrap();

        let (i2c, _, _) = disp.release();
        let commands = i2c.commands();
        assert_eq!(
            &commands[INIT_SEQUENCE.len()..],
            &[cmd::SET_CONTRAST, 0x7F, cmd::SET_INVERSE, cmd::DISPLAY_OFF]
        );
    }
}
