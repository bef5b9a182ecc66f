/*
 *  geometry.rs
 *
 *  dialface - analog watch face renderer
 *  (c) 2020-26 Stuart Hunter
 *
 *  Angle to point mapping, hand polygon placement and rotation
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

//! All angles in this crate are *turn fractions*: `0.0` is 12 o'clock,
//! `0.25` is 3 o'clock, increasing clockwise, one full turn is `1.0`.
//! Every angle is derived from absolute state (time, percentage) on each
//! frame, so there is nothing to accumulate and nothing to drift.

use core::f32::consts::TAU;
use embedded_graphics::geometry::Point;

/// Map a turn fraction on a circle of `radius` around `center` to a pixel.
pub fn point_on_circle(center: Point, radius: i32, angle: f32) -> Point {
    let (s, c) = (angle * TAU).sin_cos();
    let r = radius as f32;
    Point::new(
        center.x + (s * r).round() as i32,
        center.y - (c * r).round() as i32,
    )
}

/// Turn fraction in `[0, 1)` of the offset `(dx, dy)` (screen axes, y down).
pub fn angle_of_offset(dx: f32, dy: f32) -> f32 {
    let a = dx.atan2(-dy) / TAU;
    if a < 0.0 { a + 1.0 } else if a >= 1.0 { a - 1.0 } else { a }
}

/// Convert a sweep in degrees to a turn fraction.
#[inline]
pub fn degrees_to_turn(degrees: f32) -> f32 {
    degrees / 360.0
}

/// A closed shape positioned on the canvas, rotating about `pivot`.
///
/// Points are stored already translated to the canvas, so rotation is the
/// only per-frame work.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    pivot: Point,
}

impl Polygon {
    /// Place a shape defined around a local origin so that origin lands on `pivot`.
    pub fn from_local(local: &[Point], pivot: Point) -> Self {
        Self::scaled_from_local(local, pivot, 1.0)
    }

    /// Same as [`Polygon::from_local`] with a uniform scale applied first.
    pub fn scaled_from_local(local: &[Point], pivot: Point, scale: f32) -> Self {
        let points = local
            .iter()
            .map(|p| {
                Point::new(
                    pivot.x + (p.x as f32 * scale).round() as i32,
                    pivot.y + (p.y as f32 * scale).round() as i32,
                )
            })
            .collect();
        Self { points, pivot }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn pivot(&self) -> Point {
        self.pivot
    }

    /// Tip of the shape: the point furthest from the pivot.
    pub fn tip(&self) -> Option<Point> {
        self.points.iter().copied().max_by_key(|p| {
            let d = *p - self.pivot;
            d.x * d.x + d.y * d.y
        })
    }
}

/// Rotate every point of `polygon` clockwise by `angle` turns about its pivot.
pub fn rotate_polygon(polygon: &Polygon, angle: f32) -> Polygon {
    let (s, c) = (angle * TAU).sin_cos();
    let pivot = polygon.pivot;
    let points = polygon
        .points
        .iter()
        .map(|p| {
            let dx = (p.x - pivot.x) as f32;
            let dy = (p.y - pivot.y) as f32;
            Point::new(
                pivot.x + (dx * c - dy * s).round() as i32,
                pivot.y + (dx * s + dy * c).round() as i32,
            )
        })
        .collect();
    Polygon { points, pivot }
}

/// Horizontal spans covering the interior of a closed polygon.
///
/// Returns `(y, x_start, x_end)` with inclusive x bounds, sampling at pixel
/// centres with the even-odd rule.
pub fn scanline_spans(points: &[Point]) -> Vec<(i32, i32, i32)> {
    let mut spans = Vec::new();
    if points.len() < 3 {
        return spans;
    }
    let y_min = points.iter().map(|p| p.y).min().unwrap_or(0);
    let y_max = points.iter().map(|p| p.y).max().unwrap_or(0);

    let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
    for y in y_min..y_max {
        let yc = y as f32 + 0.5;
        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            if a.y == b.y {
                continue;
            }
            let (lo, hi) = if a.y < b.y { (a, &b) } else { (&b, a) };
            if yc >= lo.y as f32 && yc < hi.y as f32 {
                let t = (yc - lo.y as f32) / (hi.y - lo.y) as f32;
                crossings.push(lo.x as f32 + t * (hi.x - lo.x) as f32);
            }
        }
        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            let x_start = (pair[0] - 0.5).ceil() as i32;
            let x_end = (pair[1] - 0.5).ceil() as i32 - 1;
            if x_end >= x_start {
                spans.push((y, x_start, x_end));
            }
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: Point = Point::new(72, 84);

    #[test]
    fn point_on_circle_cardinals() {
        assert_eq!(point_on_circle(C, 10, 0.0), Point::new(72, 74));
        assert_eq!(point_on_circle(C, 10, 0.25), Point::new(82, 84));
        assert_eq!(point_on_circle(C, 10, 0.5), Point::new(72, 94));
        assert_eq!(point_on_circle(C, 10, 0.75), Point::new(62, 84));
    }

    #[test]
    fn angle_of_offset_inverts_point_on_circle() {
        for i in 0..60 {
            let a = i as f32 / 60.0;
            let p = point_on_circle(C, 1000, a);
            let back = angle_of_offset((p.x - C.x) as f32, (p.y - C.y) as f32);
            let err = (back - a).abs().min(1.0 - (back - a).abs());
            assert!(err < 1e-3, "angle {a} came back as {back}");
        }
    }

    #[test]
    fn rotation_is_clockwise_about_pivot() {
        let hand = Polygon::from_local(&[Point::new(0, -70)], C);
        assert_eq!(hand.points()[0], Point::new(72, 14));

        let quarter = rotate_polygon(&hand, 0.25);
        assert_eq!(quarter.points()[0], Point::new(142, 84));
        assert_eq!(quarter.pivot(), C);

        let half = rotate_polygon(&hand, 0.5);
        assert_eq!(half.points()[0], Point::new(72, 154));
    }

    #[test]
    fn rotation_from_absolute_angle_does_not_drift() {
        let hand = Polygon::from_local(&[Point::new(4, -64), Point::new(0, -70)], C);
        // Sixty one-minute steps, each computed from the resting shape.
        let last = (0..=60)
            .map(|m| rotate_polygon(&hand, m as f32 / 60.0))
            .last()
            .unwrap();
        assert_eq!(last, hand);
    }

    #[test]
    fn tip_is_furthest_point() {
        let hand = Polygon::from_local(
            &[Point::new(5, 16), Point::new(-5, 16), Point::new(0, -70)],
            C,
        );
        assert_eq!(hand.tip(), Some(Point::new(72, 14)));
    }

    #[test]
    fn scaled_placement() {
        let hand = Polygon::scaled_from_local(&[Point::new(0, -70)], Point::new(90, 110), 1.5);
        assert_eq!(hand.points()[0], Point::new(90, 5));
    }

    #[test]
    fn spans_fill_axis_aligned_square() {
        let square = [
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ];
        let spans = scanline_spans(&square);
        assert_eq!(spans.len(), 4);
        for (i, (y, x0, x1)) in spans.iter().enumerate() {
            assert_eq!(*y, i as i32);
            assert_eq!((*x0, *x1), (0, 3));
        }
    }

    #[test]
    fn degenerate_polygon_has_no_spans() {
        assert!(scanline_spans(&[Point::new(0, 0), Point::new(5, 5)]).is_empty());
    }
}
