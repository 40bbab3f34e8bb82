//! Eyelid polygon derivation
//!
//! Each lid is a trapezoid with vertical sides hanging from the top edge
//! (upper lid) or rising from the bottom edge (lower lid) of the white
//! region's box. The left and right sides are scaled independently, so
//! unequal rates tilt the lid.

use embedded_graphics::geometry::Point;

use crate::geometry::Quad;

/// Fraction of the white region's height each lid covers at each corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EyelidRates {
    pub upper_left: f32,
    pub upper_right: f32,
    pub lower_left: f32,
    pub lower_right: f32,
}

impl EyelidRates {
    /// Lids fully open
    pub const OPEN: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(upper_left: f32, upper_right: f32, lower_left: f32, lower_right: f32) -> Self {
        Self {
            upper_left,
            upper_right,
            lower_left,
            lower_right,
        }
    }

    /// Upper lid is drawn unless both of its rates are exactly zero
    pub fn upper_visible(&self) -> bool {
        !(self.upper_left == 0.0 && self.upper_right == 0.0)
    }

    /// Lower lid is drawn unless both of its rates are exactly zero
    pub fn lower_visible(&self) -> bool {
        !(self.lower_left == 0.0 && self.lower_right == 0.0)
    }
}

/// Upper and lower lid polygons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eyelids {
    pub upper: Quad,
    pub lower: Quad,
}

/// Lid drop in whole pixels, truncated toward zero
fn drop_px(height: i32, rate: f32) -> i32 {
    (height as f32 * rate) as i32
}

/// Derive both lid polygons from the white region's top-left corner and size
///
/// Upper: top-left, bottom-left, bottom-right, top-right.
/// Lower: bottom-left, top-left, top-right, bottom-right.
/// Coordinates saturate at the `i32` range.
pub fn derive(top_left: Point, width: i32, height: i32, rates: &EyelidRates) -> Eyelids {
    let left = top_left.x;
    let right = left.saturating_add(width);
    let top = top_left.y;
    let bottom = top.saturating_add(height);

    let upper = Quad::new([
        Point::new(left, top),
        Point::new(left, top.saturating_add(drop_px(height, rates.upper_left))),
        Point::new(right, top.saturating_add(drop_px(height, rates.upper_right))),
        Point::new(right, top),
    ]);

    let lower = Quad::new([
        Point::new(left, bottom),
        Point::new(left, bottom.saturating_sub(drop_px(height, rates.lower_left))),
        Point::new(right, bottom.saturating_sub(drop_px(height, rates.lower_right))),
        Point::new(right, bottom),
    ]);

    Eyelids { upper, lower }
}
