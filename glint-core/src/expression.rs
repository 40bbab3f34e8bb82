//! Expression presets
//!
//! Level clamps and parameter arithmetic for each named expression, kept
//! separate from `Eyes` so they can be checked without a display.

use embedded_graphics::geometry::Point;

use crate::eyelid::EyelidRates;

/// Anger level range
pub const ANGER_LEVEL_MIN: i32 = 1;
pub const ANGER_LEVEL_MAX: i32 = 10;

/// Lower lid rate on both eyes while angry
pub const ANGER_LOWER_RATE: f32 = 0.1;

/// Surprise level range
pub const SURPRISE_LEVEL_MIN: i32 = 1;
pub const SURPRISE_LEVEL_MAX: i32 = 5;

/// White region side length at surprise level 0
pub const SURPRISE_BASE_SIZE: i32 = 50;

/// Extra side length per surprise level
pub const SURPRISE_SIZE_STEP: i32 = 3;

/// Gaze rate range
pub const GAZE_RATE_MIN: f32 = -1.0;
pub const GAZE_RATE_MAX: f32 = 1.0;

/// A named preset applied to both eyes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Expression {
    /// Idle eyes, lids open
    Normal,
    /// Slanted upper lids converging toward the nose (level 1-10)
    Anger(i32),
    /// Enlarged round whites (level 1-5)
    Surprised(i32),
    /// Pupils shifted toward a direction
    Gaze { direction: Direction, rate: f32 },
}

/// Which eye on the display
///
/// Display-left is the subject's right eye and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Side {
    Left,
    Right,
}

/// Upper lid rates for an angry expression
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AngerRates {
    /// Rate at the corner facing the display edge
    pub outer: f32,
    /// Rate at the corner facing the other eye
    pub inner: f32,
}

impl AngerRates {
    /// Lid rates for one eye, outer corner on the display edge side
    pub fn eyelids(&self, side: Side) -> EyelidRates {
        match side {
            Side::Left => {
                EyelidRates::new(self.outer, self.inner, ANGER_LOWER_RATE, ANGER_LOWER_RATE)
            }
            Side::Right => {
                EyelidRates::new(self.inner, self.outer, ANGER_LOWER_RATE, ANGER_LOWER_RATE)
            }
        }
    }
}

/// Clamp an anger level into 1..=10
pub fn clamp_anger_level(level: i32) -> i32 {
    level.clamp(ANGER_LEVEL_MIN, ANGER_LEVEL_MAX)
}

/// Upper lid rates for an anger level: outer 0.05/level, inner 0.2/3 per level
pub fn anger_rates(level: i32) -> AngerRates {
    let level = clamp_anger_level(level) as f32;
    AngerRates {
        outer: 0.1 * level / 2.0,
        inner: 0.2 * level / 3.0,
    }
}

/// Clamp a surprise level into 1..=5
pub fn clamp_surprise_level(level: i32) -> i32 {
    level.clamp(SURPRISE_LEVEL_MIN, SURPRISE_LEVEL_MAX)
}

/// Side length of the square white region for a surprise level
pub fn surprise_size(level: i32) -> i32 {
    SURPRISE_BASE_SIZE + SURPRISE_SIZE_STEP * clamp_surprise_level(level)
}

/// Clamp a gaze rate into -1.0..=1.0
pub fn clamp_gaze_rate(rate: f32) -> f32 {
    rate.clamp(GAZE_RATE_MIN, GAZE_RATE_MAX)
}

/// Gaze direction in display coordinates (x right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Direction {
    pub x: f32,
    pub y: f32,
}

impl Direction {
    pub const CENTER: Self = Self::new(0.0, 0.0);
    pub const LEFT: Self = Self::new(-1.0, 0.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0);
    pub const UP: Self = Self::new(0.0, -1.0);
    pub const DOWN: Self = Self::new(0.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y)
    }

    /// Scale down to unit length if longer; shorter vectors are kept
    pub fn clamped_to_unit(&self) -> Self {
        let len = self.length();
        if len > 1.0 {
            Self::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }
}

/// Semi-axes of the ellipse a pupil center may move inside
///
/// The white ellipse is shrunk by `1 - r / min(a, b)`, where `a`, `b` are
/// its semi-axes and `r` the pupil radius. A disk of radius `r` centered
/// anywhere inside the shrunk ellipse lies inside the white ellipse. For a
/// round white this is `(size - diameter) / 2`. Zero when the pupil does
/// not fit.
pub fn pupil_reach(white_width: i32, white_height: i32, pupil_diameter: i32) -> Point {
    let width = i64::from(white_width);
    let height = i64::from(white_height);
    let narrow = width.min(height);
    let room = narrow - i64::from(pupil_diameter).abs();
    if narrow <= 0 || room <= 0 {
        return Point::zero();
    }

    Point::new(
        (width * room / (2 * narrow)) as i32,
        (height * room / (2 * narrow)) as i32,
    )
}

/// Pupil offset for a gaze
///
/// Moves `rest` by `direction * rate * reach`, then pulls the result back
/// onto the ellipse with semi-axes `reach` so the pupil stays inside the
/// white region.
pub fn gaze_offset(rest: Point, reach: Point, direction: Direction, rate: f32) -> Point {
    let direction = direction.clamped_to_unit();
    let rate = clamp_gaze_rate(rate);

    let shift_x = (direction.x * rate * reach.x as f32) as i32;
    let shift_y = (direction.y * rate * reach.y as f32) as i32;

    clamp_to_ellipse(
        Point::new(rest.x.saturating_add(shift_x), rest.y.saturating_add(shift_y)),
        reach,
    )
}

/// Scale `offset` toward the origin until it lies inside the ellipse with
/// semi-axes `reach`
///
/// Points already inside are returned unchanged. A zero semi-axis
/// collapses the ellipse to a segment on the other axis.
pub fn clamp_to_ellipse(offset: Point, reach: Point) -> Point {
    let rx = reach.x.max(0);
    let ry = reach.y.max(0);

    if rx == 0 || ry == 0 {
        return Point::new(offset.x.clamp(-rx, rx), offset.y.clamp(-ry, ry));
    }
    if within_ellipse(offset, rx, ry) {
        return offset;
    }

    let nx = offset.x as f32 / rx as f32;
    let ny = offset.y as f32 / ry as f32;
    let scale = 1.0 / libm::sqrtf(nx * nx + ny * ny);
    let mut x = (libm::roundf(offset.x as f32 * scale) as i32).clamp(-rx, rx);
    let mut y = (libm::roundf(offset.y as f32 * scale) as i32).clamp(-ry, ry);

    // Rounding can land one pixel outside; step the worse axis inward
    while !within_ellipse(Point::new(x, y), rx, ry) {
        if (x as f32 / rx as f32).abs() >= (y as f32 / ry as f32).abs() {
            x -= x.signum();
        } else {
            y -= y.signum();
        }
    }

    Point::new(x, y)
}

/// `(x / rx)^2 + (y / ry)^2 <= 1` in exact integer arithmetic
fn within_ellipse(point: Point, rx: i32, ry: i32) -> bool {
    if point.x.unsigned_abs() > rx.unsigned_abs() || point.y.unsigned_abs() > ry.unsigned_abs() {
        return false;
    }
    let (x, y) = (i128::from(point.x), i128::from(point.y));
    let (rx, ry) = (i128::from(rx), i128::from(ry));
    x * x * ry * ry + y * y * rx * rx <= rx * rx * ry * ry
}
