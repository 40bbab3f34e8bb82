//! Pixel-space geometry shared by the eye model
//!
//! All coordinates are integer pixels with the origin in the top-left
//! corner of the canvas and y growing downwards.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Axis-aligned box given by two inclusive corners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bounds {
    /// Top-left corner
    pub top_left: Point,
    /// Bottom-right corner
    pub bottom_right: Point,
}

impl Bounds {
    /// Create bounds from two corners
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Box of `width` x `height` around `center`
    ///
    /// Half sizes use truncating integer division, so odd sizes lose a
    /// pixel. Negative sizes produce inverted corners. Corners saturate at
    /// the `i32` range.
    pub const fn from_center(center: Point, width: i32, height: i32) -> Self {
        let half_w = width / 2;
        let half_h = height / 2;
        Self {
            top_left: Point::new(
                center.x.saturating_sub(half_w),
                center.y.saturating_sub(half_h),
            ),
            bottom_right: Point::new(
                center.x.saturating_add(half_w),
                center.y.saturating_add(half_h),
            ),
        }
    }

    /// Span between the corners along x
    pub const fn width(&self) -> i32 {
        self.bottom_right.x.saturating_sub(self.top_left.x)
    }

    /// Span between the corners along y
    pub const fn height(&self) -> i32 {
        self.bottom_right.y.saturating_sub(self.top_left.y)
    }

    /// Midpoint of the corners
    pub const fn center(&self) -> Point {
        Point::new(
            midpoint(self.top_left.x, self.bottom_right.x),
            midpoint(self.top_left.y, self.bottom_right.y),
        )
    }

    /// Smallest rectangle containing both corners
    pub fn to_rectangle(&self) -> Rectangle {
        let (x0, x1) = ordered(self.top_left.x, self.bottom_right.x);
        let (y0, y1) = ordered(self.top_left.y, self.bottom_right.y);
        Rectangle::new(Point::new(x0, y0), Size::new(span(x0, x1), span(y0, y1)))
    }

    /// Part of the box inside `area`, `None` when they do not overlap
    ///
    /// Works for boxes anywhere in the `i32` range, including ones whose
    /// `Rectangle` form would overflow.
    pub fn clip_to(&self, area: &Rectangle) -> Option<Rectangle> {
        let area_br = area.bottom_right()?;
        let (x0, x1) = ordered(self.top_left.x, self.bottom_right.x);
        let (y0, y1) = ordered(self.top_left.y, self.bottom_right.y);

        let left = x0.max(area.top_left.x);
        let right = x1.min(area_br.x);
        let top = y0.max(area.top_left.y);
        let bottom = y1.min(area_br.y);
        if left > right || top > bottom {
            return None;
        }

        Some(Rectangle::with_corners(
            Point::new(left, top),
            Point::new(right, bottom),
        ))
    }
}

const fn ordered(a: i32, b: i32) -> (i32, i32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Inclusive pixel count from `lo` to `hi`
fn span(lo: i32, hi: i32) -> u32 {
    (i64::from(hi) - i64::from(lo) + 1).min(i64::from(u32::MAX)) as u32
}

const fn midpoint(a: i32, b: i32) -> i32 {
    ((a as i64 + b as i64) / 2) as i32
}

/// Four-vertex polygon, vertices in drawing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Quad {
    vertices: [Point; 4],
}

impl Quad {
    /// Create a quad from vertices in drawing order
    pub const fn new(vertices: [Point; 4]) -> Self {
        Self { vertices }
    }

    /// Vertices in drawing order
    pub fn vertices(&self) -> &[Point; 4] {
        &self.vertices
    }
}
