//! Single eye model
//!
//! One eye is a white ellipse, a black pupil ellipse on top of it, and
//! optional upper and lower eyelid polygons painted over both in the
//! background color. The lid polygons are derived from the white region's
//! box and four height rates; every setter that changes an input
//! re-derives them before returning.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::BinaryColor;

use crate::eyelid::{self, EyelidRates, Eyelids};
use crate::geometry::{Bounds, Quad};
use crate::traits::Canvas;

/// Sclera color
pub const LIGHT: BinaryColor = BinaryColor::On;

/// Pupil, eyelid and background color
pub const DARK: BinaryColor = BinaryColor::Off;

/// White region (sclera)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WhiteRegion {
    pub center: Point,
    pub width: i32,
    pub height: i32,
    pub bounds: Bounds,
}

/// Black pupil
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pupil {
    pub center: Point,
    pub diameter: i32,
    pub bounds: Bounds,
}

/// Geometry and drawing for one eye
///
/// Starts zero-initialized: a degenerate white region at the origin, no
/// pupil and open lids.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eye {
    white: WhiteRegion,
    pupil: Pupil,
    rates: EyelidRates,
    lids: Eyelids,
    draw_upper: bool,
    draw_lower: bool,
}

impl Eye {
    /// Create an eye with zeroed geometry
    pub fn new() -> Self {
        let mut eye = Self::default();
        eye.update_eyelids();
        eye
    }

    /// Set the white region's center and size
    ///
    /// No validation: zero or negative sizes give a degenerate or
    /// inverted box.
    pub fn set_white_eye(&mut self, center_x: i32, center_y: i32, width: i32, height: i32) {
        let center = Point::new(center_x, center_y);
        self.white = WhiteRegion {
            center,
            width,
            height,
            bounds: Bounds::from_center(center, width, height),
        };
        self.update_eyelids();
    }

    /// Place the pupil relative to the white region's center
    ///
    /// Uses the current white center, so call after `set_white_eye`.
    pub fn set_black_eye(&mut self, offset_x: i32, offset_y: i32, diameter: i32) {
        let center = Point::new(
            self.white.center.x.saturating_add(offset_x),
            self.white.center.y.saturating_add(offset_y),
        );
        self.pupil = Pupil {
            center,
            diameter,
            bounds: Bounds::from_center(center, diameter, diameter),
        };
    }

    /// Set the four eyelid height rates
    pub fn set_eyelid(
        &mut self,
        upper_left_rate: f32,
        upper_right_rate: f32,
        lower_left_rate: f32,
        lower_right_rate: f32,
    ) {
        self.set_eyelid_rates(EyelidRates::new(
            upper_left_rate,
            upper_right_rate,
            lower_left_rate,
            lower_right_rate,
        ));
    }

    /// Set the eyelid rates from a bundle
    pub fn set_eyelid_rates(&mut self, rates: EyelidRates) {
        self.rates = rates;
        self.draw_upper = rates.upper_visible();
        self.draw_lower = rates.lower_visible();
        self.update_eyelids();
    }

    /// Paint the eye: white, pupil, upper lid, lower lid
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        canvas.fill_ellipse(self.white.bounds, LIGHT, LIGHT)?;
        canvas.fill_ellipse(self.pupil.bounds, DARK, DARK)?;

        if self.draw_upper {
            canvas.fill_polygon(self.lids.upper.vertices(), DARK, DARK)?;
        }
        if self.draw_lower {
            canvas.fill_polygon(self.lids.lower.vertices(), DARK, DARK)?;
        }

        Ok(())
    }

    pub fn white(&self) -> &WhiteRegion {
        &self.white
    }

    pub fn pupil(&self) -> &Pupil {
        &self.pupil
    }

    pub fn eyelid_rates(&self) -> &EyelidRates {
        &self.rates
    }

    pub fn upper_eyelid(&self) -> &Quad {
        &self.lids.upper
    }

    pub fn lower_eyelid(&self) -> &Quad {
        &self.lids.lower
    }

    /// Whether `draw` paints the upper lid
    pub fn draws_upper_eyelid(&self) -> bool {
        self.draw_upper
    }

    /// Whether `draw` paints the lower lid
    pub fn draws_lower_eyelid(&self) -> bool {
        self.draw_lower
    }

    fn update_eyelids(&mut self) {
        self.lids = eyelid::derive(
            self.white.bounds.top_left,
            self.white.width,
            self.white.height,
            &self.rates,
        );
    }
}
