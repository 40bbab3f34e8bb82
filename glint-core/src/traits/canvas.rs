//! Raster canvas trait
//!
//! The three fill operations the eye model needs, over two colors.
//! Every embedded-graphics `DrawTarget<Color = BinaryColor>` is a canvas.

use embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{Dimensions, Point, Size},
    pixelcolor::BinaryColor,
    primitives::{
        Ellipse, Line, Primitive, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle,
        StrokeAlignment,
    },
    Drawable,
};
use heapless::Vec;

use crate::geometry::Bounds;

/// Most vertices `fill_polygon` will use; extra vertices are ignored
pub const MAX_POLYGON_VERTICES: usize = 8;

/// Outline segments with an endpoint past this coordinate are clipped to
/// the target before drawing
const LINE_LIMIT: u32 = 1 << 14;

/// Monochrome raster surface
///
/// Coordinates outside the surface are clipped, never rejected.
pub trait Canvas {
    /// Error type of the underlying surface
    type Error;

    /// Fill the box between two inclusive corners
    fn fill_rect(&mut self, bounds: Bounds, color: BinaryColor) -> Result<(), Self::Error>;

    /// Fill the ellipse inscribed in the box, with a one pixel outline
    fn fill_ellipse(
        &mut self,
        bounds: Bounds,
        outline: BinaryColor,
        fill: BinaryColor,
    ) -> Result<(), Self::Error>;

    /// Fill a closed polygon (even-odd rule), with a one pixel outline
    fn fill_polygon(
        &mut self,
        vertices: &[Point],
        outline: BinaryColor,
        fill: BinaryColor,
    ) -> Result<(), Self::Error>;
}

impl<T> Canvas for T
where
    T: DrawTarget<Color = BinaryColor>,
{
    type Error = T::Error;

    fn fill_rect(&mut self, bounds: Bounds, color: BinaryColor) -> Result<(), Self::Error> {
        match bounds.clip_to(&self.bounding_box()) {
            Some(area) => self.fill_solid(&area, color),
            None => Ok(()),
        }
    }

    fn fill_ellipse(
        &mut self,
        bounds: Bounds,
        outline: BinaryColor,
        fill: BinaryColor,
    ) -> Result<(), Self::Error> {
        if bounds.clip_to(&self.bounding_box()).is_none() {
            return Ok(());
        }

        let rect = bounds.to_rectangle();
        let style = PrimitiveStyleBuilder::new()
            .fill_color(fill)
            .stroke_color(outline)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        Ellipse::new(rect.top_left, rect.size)
            .into_styled(style)
            .draw(self)
    }

    fn fill_polygon(
        &mut self,
        vertices: &[Point],
        outline: BinaryColor,
        fill: BinaryColor,
    ) -> Result<(), Self::Error> {
        let vertices = &vertices[..vertices.len().min(MAX_POLYGON_VERTICES)];
        if vertices.is_empty() {
            return Ok(());
        }

        let area = self.bounding_box();
        let Some(area_br) = area.bottom_right() else {
            return Ok(());
        };

        let min_y = vertices.iter().map(|v| v.y).min().unwrap_or(0);
        let max_y = vertices.iter().map(|v| v.y).max().unwrap_or(0);

        for y in min_y.max(area.top_left.y)..=max_y.min(area_br.y) {
            let crossings = scanline_crossings(vertices, y);
            for span in crossings.chunks_exact(2) {
                let x0 = span[0].max(area.top_left.x);
                let x1 = span[1].min(area_br.x);
                if x0 > x1 {
                    continue;
                }
                let row = Rectangle::new(Point::new(x0, y), Size::new((x1 - x0 + 1) as u32, 1));
                self.fill_solid(&row, fill)?;
            }
        }

        let stroke = PrimitiveStyle::with_stroke(outline, 1);
        for (i, &start) in vertices.iter().enumerate() {
            let end = vertices[(i + 1) % vertices.len()];
            if Bounds::new(start, end).clip_to(&area).is_none() {
                continue;
            }
            let far = |p: Point| p.x.unsigned_abs() > LINE_LIMIT || p.y.unsigned_abs() > LINE_LIMIT;
            let (start, end) = if far(start) || far(end) {
                match clip_segment(start, end, &area) {
                    Some(segment) => segment,
                    None => continue,
                }
            } else {
                (start, end)
            };
            Line::new(start, end).into_styled(stroke).draw(self)?;
        }

        Ok(())
    }
}

/// Sorted x positions where row `y` crosses the polygon's edges
///
/// Edges are half-open in y (top end included, bottom end excluded), so
/// a vertex shared by two edges is counted once and horizontal edges are
/// skipped. The outline pass covers the rows this leaves out.
fn scanline_crossings(vertices: &[Point], y: i32) -> Vec<i32, MAX_POLYGON_VERTICES> {
    let mut crossings = Vec::new();

    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        let spans_row = (a.y <= y && y < b.y) || (b.y <= y && y < a.y);
        if !spans_row {
            continue;
        }

        let (ax, ay) = (i64::from(a.x), i64::from(a.y));
        let (bx, by) = (i64::from(b.x), i64::from(b.y));
        let x = ax + (i64::from(y) - ay) * (bx - ax) / (by - ay);
        let pushed = crossings.push(x as i32);
        debug_assert!(pushed.is_ok());
    }

    crossings.sort_unstable();
    crossings
}

/// Part of the segment inside `area` (Liang-Barsky), endpoints rounded
fn clip_segment(start: Point, end: Point, area: &Rectangle) -> Option<(Point, Point)> {
    let br = area.bottom_right()?;
    let (x0, y0) = (f64::from(start.x), f64::from(start.y));
    let dx = f64::from(end.x) - x0;
    let dy = f64::from(end.y) - y0;

    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (p, q) in [
        (-dx, x0 - f64::from(area.top_left.x)),
        (dx, f64::from(br.x) - x0),
        (-dy, y0 - f64::from(area.top_left.y)),
        (dy, f64::from(br.y) - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| {
        Point::new(
            libm::round(x0 + t * dx) as i32,
            libm::round(y0 + t * dy) as i32,
        )
    };
    Some((at(t0), at(t1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::ContainsPoint;
    use glint_display::FrameBuffer;

    fn oled() -> FrameBuffer {
        FrameBuffer::new(Size::new(128, 64)).unwrap()
    }

    #[test]
    fn test_fill_rect_inclusive() {
        let mut fb = oled();
        fb.fill_rect(
            Bounds::new(Point::new(2, 2), Point::new(5, 3)),
            BinaryColor::On,
        )
        .unwrap();
        assert_eq!(fb.count_on(), 8);
    }

    #[test]
    fn test_fill_rect_clips() {
        let mut fb = oled();
        fb.fill_rect(
            Bounds::new(Point::new(-1000, -1000), Point::new(1000, 1000)),
            BinaryColor::On,
        )
        .unwrap();
        assert_eq!(fb.count_on(), 128 * 64);
    }

    #[test]
    fn test_fill_ellipse_stays_in_bounds() {
        let mut fb = oled();
        let bounds = Bounds::new(Point::new(0, 2), Point::new(60, 62));
        fb.fill_ellipse(bounds, BinaryColor::On, BinaryColor::On)
            .unwrap();

        assert_eq!(fb.pixel(Point::new(30, 32)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(0, 2)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(60, 62)), Some(BinaryColor::Off));
        for y in 0..64 {
            for x in 0..128 {
                let p = Point::new(x, y);
                if fb.pixel(p) == Some(BinaryColor::On) {
                    assert!(bounds.to_rectangle().contains(p), "{:?} outside", p);
                }
            }
        }
    }

    #[test]
    fn test_fill_polygon_square() {
        let mut fb = oled();
        let square = [
            Point::new(0, 0),
            Point::new(0, 9),
            Point::new(9, 9),
            Point::new(9, 0),
        ];
        fb.fill_polygon(&square, BinaryColor::On, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 100);
    }

    #[test]
    fn test_fill_polygon_trapezoid() {
        let mut fb = oled();
        // Upper lid shape: left side drops 4, right side drops 8
        let lid = [
            Point::new(10, 0),
            Point::new(10, 4),
            Point::new(20, 8),
            Point::new(20, 0),
        ];
        fb.fill_polygon(&lid, BinaryColor::On, BinaryColor::On)
            .unwrap();

        assert_eq!(fb.pixel(Point::new(15, 2)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(19, 7)), Some(BinaryColor::On));
        assert_eq!(fb.pixel(Point::new(11, 7)), Some(BinaryColor::Off));
        assert_eq!(fb.pixel(Point::new(21, 0)), Some(BinaryColor::Off));
    }

    #[test]
    fn test_fill_polygon_off_erases() {
        let mut fb = oled();
        fb.fill(BinaryColor::On);
        let square = [
            Point::new(0, 0),
            Point::new(0, 9),
            Point::new(9, 9),
            Point::new(9, 0),
        ];
        fb.fill_polygon(&square, BinaryColor::Off, BinaryColor::Off)
            .unwrap();
        assert_eq!(fb.count_on(), 128 * 64 - 100);
    }

    #[test]
    fn test_fill_polygon_degenerate_is_a_line() {
        let mut fb = oled();
        let flat = [
            Point::new(0, 2),
            Point::new(0, 2),
            Point::new(60, 2),
            Point::new(60, 2),
        ];
        fb.fill_polygon(&flat, BinaryColor::On, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 61);
    }

    #[test]
    fn test_fill_polygon_empty() {
        let mut fb = oled();
        fb.fill_polygon(&[], BinaryColor::On, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 0);
    }

    #[test]
    fn test_fill_polygon_clips_far_vertices() {
        let mut fb = oled();
        let huge = [
            Point::new(-100_000, -100_000),
            Point::new(-100_000, 100_000),
            Point::new(100_000, 100_000),
            Point::new(100_000, -100_000),
        ];
        fb.fill_polygon(&huge, BinaryColor::Off, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 128 * 64);
    }

    #[test]
    fn test_extreme_shapes_are_clipped() {
        let mut fb = oled();
        let far = Bounds::new(Point::new(i32::MAX - 2, -2), Point::new(i32::MAX, 2));
        fb.fill_ellipse(far, BinaryColor::On, BinaryColor::On)
            .unwrap();
        fb.fill_rect(far, BinaryColor::On).unwrap();

        let sliver = [
            Point::new(i32::MIN, 0),
            Point::new(i32::MIN, 3),
            Point::new(i32::MAX, 3),
            Point::new(i32::MAX, 0),
        ];
        fb.fill_polygon(&sliver[..2], BinaryColor::On, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 0);

        // Rows 0..3 filled, the outline adds row 3
        fb.fill_polygon(&sliver, BinaryColor::On, BinaryColor::On)
            .unwrap();
        assert_eq!(fb.count_on(), 128 * 4);
    }

    #[test]
    fn test_clip_segment() {
        let area = Rectangle::new(Point::zero(), Size::new(128, 64));

        assert_eq!(
            clip_segment(Point::new(i32::MIN, 3), Point::new(i32::MAX, 3), &area),
            Some((Point::new(0, 3), Point::new(127, 3)))
        );
        assert_eq!(
            clip_segment(Point::new(-100, -100), Point::new(100, 100), &area),
            Some((Point::new(0, 0), Point::new(63, 63)))
        );
        assert_eq!(
            clip_segment(Point::new(-5, 70), Point::new(200, 70), &area),
            None
        );
    }

    #[test]
    fn test_crossings_full_range_edge() {
        let edge = [Point::new(i32::MIN, 0), Point::new(i32::MAX, 10), Point::new(i32::MIN, 10)];
        let crossings = scanline_crossings(&edge, 5);
        assert_eq!(crossings.len(), 2);
        assert_eq!(crossings[0], i32::MIN);
    }

    #[test]
    fn test_crossings_shared_vertex_counted_once() {
        let diamond = [
            Point::new(5, 0),
            Point::new(0, 5),
            Point::new(5, 10),
            Point::new(10, 5),
        ];
        assert_eq!(scanline_crossings(&diamond, 5).as_slice(), &[0, 10]);
        assert_eq!(scanline_crossings(&diamond, 0).as_slice(), &[5, 5]);
        assert!(scanline_crossings(&diamond, 10).is_empty());
    }
}
