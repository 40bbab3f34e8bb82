//! Glint - Robot Eyes Firmware
//!
//! Drives a 128x64 SSD1306 OLED from an RP2040 and cycles the eyes
//! through their expressions.
//!
//! Wiring (I2C0): SDA = GPIO4, SCL = GPIO5, RST = GPIO6.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use glint_core::config::{parse_config, EyesConfig};
use glint_core::{Direction, Expression, Eyes};
use glint_display::Ssd1306;

/// Embedded layout configuration (compiled into firmware)
/// Edit eyes.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../eyes.toml");

/// I2C bus speed
const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Expressions shown in a loop, with hold time in milliseconds
const SEQUENCE: [(Expression, u64); 12] = [
    (Expression::Normal, 2000),
    (
        Expression::Gaze {
            direction: Direction::LEFT,
            rate: 1.0,
        },
        800,
    ),
    (
        Expression::Gaze {
            direction: Direction::RIGHT,
            rate: 1.0,
        },
        800,
    ),
    (
        Expression::Gaze {
            direction: Direction::UP,
            rate: 1.0,
        },
        800,
    ),
    (Expression::Normal, 1000),
    (Expression::Anger(3), 800),
    (Expression::Anger(6), 800),
    (Expression::Anger(10), 1500),
    (Expression::Normal, 1000),
    (Expression::Surprised(1), 600),
    (Expression::Surprised(5), 1500),
    (Expression::Normal, 1000),
];

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Glint firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let reset = Output::new(p.PIN_6, Level::High);

    let display = Ssd1306::with_address(i2c, reset, Delay, config.display.i2c_address);
    info!(
        "SSD1306 on I2C0 at address {=u8:#x}",
        config.display.i2c_address
    );

    let mut eyes = match Eyes::with_config(display, config) {
        Ok(eyes) => eyes,
        Err(e) => {
            error!("Failed to initialize display: {:?}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };
    info!("Eyes initialized");

    loop {
        for (expression, hold_ms) in SEQUENCE {
            if let Err(e) = eyes.apply(expression) {
                warn!("Failed to show {:?}: {:?}", expression, e);
            }
            Timer::after(Duration::from_millis(hold_ms)).await;
        }
    }
}

/// Parse the embedded eyes.toml, falling back to the default layout
fn load_config() -> EyesConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded eyes.toml");
            debug!("Layout: {:?}", config);
            config
        }
        Err(e) => {
            warn!("Invalid eyes.toml ({:?}), using defaults", e);
            EyesConfig::default()
        }
    }
}
