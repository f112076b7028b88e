//! Boxes, rotated rectangles and polygon helpers for candidate regions.

use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point;
use serde::Serialize;

/// Guards ratios against zero-sized sides
const EPSILON: f32 = 1e-6;

/// Axis-aligned box in pixel coordinates, always inside its source raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Tight box around `points`, clamped to a `bounds` (width, height) raster.
    ///
    /// Returns `None` when nothing of the box lies inside the raster.
    pub fn enclosing(points: &[Point<i32>], bounds: (u32, u32)) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Self::clamped(
            min_x as i64,
            min_y as i64,
            max_x as i64 + 1,
            max_y as i64 + 1,
            bounds,
        )
    }

    /// Grow by `ratio * max(width, height)` on every side, clamped to `bounds`.
    pub fn padded(&self, ratio: f32, bounds: (u32, u32)) -> Self {
        let pad = (self.width.max(self.height) as f32 * ratio.max(0.0)) as i64;
        Self::clamped(
            self.x as i64 - pad,
            self.y as i64 - pad,
            self.right() as i64 + pad,
            self.bottom() as i64 + pad,
            bounds,
        )
        .unwrap_or(*self)
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    fn clamped(x0: i64, y0: i64, x1: i64, y1: i64, bounds: (u32, u32)) -> Option<Self> {
        let x0 = x0.clamp(0, bounds.0 as i64);
        let y0 = y0.clamp(0, bounds.1 as i64);
        let x1 = x1.clamp(0, bounds.0 as i64);
        let y1 = y1.clamp(0, bounds.1 as i64);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Self {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Minimal-area rectangle at an arbitrary angle
///
/// `angle` is in degrees within [-90, 0): the rotation of the `width` side
/// from the x axis, in image coordinates (y pointing down). An axis-aligned
/// rectangle therefore reports -90 with width and height swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RotatedRect {
    pub center: (f32, f32),
    pub size: (f32, f32),
    pub angle: f32,
}

impl RotatedRect {
    /// Build from four consecutive corners, as returned by
    /// `imageproc::geometry::min_area_rect`.
    pub fn from_corners(corners: &[Point<i32>; 4]) -> Self {
        let cx = corners.iter().map(|p| p.x as f32).sum::<f32>() / 4.0;
        let cy = corners.iter().map(|p| p.y as f32).sum::<f32>() / 4.0;

        let (ex, ey) = (
            (corners[1].x - corners[0].x) as f32,
            (corners[1].y - corners[0].y) as f32,
        );
        let (fx, fy) = (
            (corners[2].x - corners[1].x) as f32,
            (corners[2].y - corners[1].y) as f32,
        );

        let mut width = ex.hypot(ey);
        let mut height = fx.hypot(fy);
        let mut angle = ey.atan2(ex).to_degrees();

        // Each quarter turn swaps which side counts as the width
        while angle >= 0.0 {
            angle -= 90.0;
            std::mem::swap(&mut width, &mut height);
        }
        while angle < -90.0 {
            angle += 90.0;
            std::mem::swap(&mut width, &mut height);
        }

        Self {
            center: (cx, cy),
            size: (width, height),
            angle,
        }
    }

    /// max(side) / min(side); near 1 for squares, 0 for degenerate rectangles
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = self.size;
        w.max(h) / (w.min(h) + EPSILON)
    }

    /// Same rectangle with its center moved by (-dx, -dy)
    pub fn offset_by(&self, dx: f32, dy: f32) -> Self {
        Self {
            center: (self.center.0 - dx, self.center.1 - dy),
            ..*self
        }
    }
}

/// Area enclosed by a closed polygon (shoelace formula)
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let twice_area: i64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64)
        .sum();

    twice_area.abs() as f64 / 2.0
}

/// Douglas-Peucker simplification of a closed curve.
///
/// The curve is split at the point farthest from its start so both halves are
/// open curves, then vertices lying within `epsilon` of the line through their
/// neighbours are dropped.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    if points.len() < 3 || epsilon <= 0.0 {
        return points.to_vec();
    }

    let start = points[0];
    let far = points
        .iter()
        .enumerate()
        .max_by_key(|(_, p)| {
            let (dx, dy) = ((p.x - start.x) as i64, (p.y - start.y) as i64);
            dx * dx + dy * dy
        })
        .map(|(i, _)| i)
        .unwrap_or(0);
    if far == 0 {
        return vec![start];
    }

    let mut closing: Vec<Point<i32>> = points[far..].to_vec();
    closing.push(start);

    let mut polygon = approximate_polygon_dp(&points[..=far], epsilon, false);
    polygon.pop();
    polygon.extend(approximate_polygon_dp(&closing, epsilon, false));
    polygon.pop();
    polygon.dedup();

    drop_collinear(polygon, epsilon)
}

fn drop_collinear(mut polygon: Vec<Point<i32>>, epsilon: f64) -> Vec<Point<i32>> {
    let mut i = 0;
    while polygon.len() > 3 && i < polygon.len() {
        let n = polygon.len();
        let prev = polygon[(i + n - 1) % n];
        let next = polygon[(i + 1) % n];
        if distance_to_line(polygon[i], prev, next) <= epsilon {
            polygon.remove(i);
            i = 0;
        } else {
            i += 1;
        }
    }
    polygon
}

fn distance_to_line(p: Point<i32>, a: Point<i32>, b: Point<i32>) -> f64 {
    let (abx, aby) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
    let (apx, apy) = ((p.x - a.x) as f64, (p.y - a.y) as f64);
    let length = abx.hypot(aby);
    if length == 0.0 {
        return apx.hypot(apy);
    }
    (abx * apy - aby * apx).abs() / length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_outline(x0: i32, y0: i32, side: i32) -> Vec<Point<i32>> {
        let mut points = Vec::new();
        for x in x0..x0 + side {
            points.push(Point::new(x, y0));
        }
        for y in y0 + 1..y0 + side {
            points.push(Point::new(x0 + side - 1, y));
        }
        for x in (x0..x0 + side - 1).rev() {
            points.push(Point::new(x, y0 + side - 1));
        }
        for y in (y0 + 1..y0 + side - 1).rev() {
            points.push(Point::new(x0, y));
        }
        points
    }

    #[test]
    fn test_padding_clamps_at_origin() {
        let bbox = BoundingBox {
            x: 0,
            y: 3,
            width: 50,
            height: 40,
        };
        let padded = bbox.padded(0.2, (120, 80));

        // 20% of 50 = 10 px, cut off on the left and top
        assert_eq!(padded.x, 0);
        assert_eq!(padded.y, 0);
        assert_eq!(padded.right(), 60);
        assert_eq!(padded.bottom(), 53);
    }

    #[test]
    fn test_padding_clamps_at_far_edge() {
        let bbox = BoundingBox {
            x: 90,
            y: 50,
            width: 30,
            height: 30,
        };
        let padded = bbox.padded(0.2, (120, 80));

        assert_eq!(padded.x, 84);
        assert_eq!(padded.y, 44);
        assert!(padded.right() <= 120);
        assert!(padded.bottom() <= 80);
    }

    #[test]
    fn test_enclosing_box_is_clamped() {
        let points = vec![Point::new(-5, 2), Point::new(30, 200)];
        let bbox = BoundingBox::enclosing(&points, (20, 100)).unwrap();
        assert_eq!(
            bbox,
            BoundingBox {
                x: 0,
                y: 2,
                width: 20,
                height: 98
            }
        );
    }

    #[test]
    fn test_enclosing_box_outside_raster() {
        let points = vec![Point::new(200, 200)];
        assert!(BoundingBox::enclosing(&points, (20, 20)).is_none());
        assert!(BoundingBox::enclosing(&[], (20, 20)).is_none());
    }

    #[test]
    fn test_axis_aligned_rect_reports_minus_ninety() {
        let corners = [
            Point::new(10, 10),
            Point::new(50, 10),
            Point::new(50, 30),
            Point::new(10, 30),
        ];
        let rect = RotatedRect::from_corners(&corners);

        assert_eq!(rect.angle, -90.0);
        assert_eq!(rect.size, (20.0, 40.0));
        assert_eq!(rect.center, (30.0, 20.0));
        assert!((rect.aspect_ratio() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_tilted_rect_angle_in_range() {
        // Square tilted by atan(3/10) ~= 16.7 degrees
        let corners = [
            Point::new(0, 0),
            Point::new(10, 3),
            Point::new(7, 13),
            Point::new(-3, 10),
        ];
        let rect = RotatedRect::from_corners(&corners);

        assert!((-90.0..0.0).contains(&rect.angle));
        assert!((rect.angle + 73.3).abs() < 0.1, "angle {}", rect.angle);
        assert!((rect.aspect_ratio() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_rect_has_zero_aspect() {
        let p = Point::new(4, 4);
        let rect = RotatedRect::from_corners(&[p, p, p, p]);
        assert_eq!(rect.aspect_ratio(), 0.0);
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            Point::new(0, 0),
            Point::new(10, 0),
            Point::new(10, 10),
            Point::new(0, 10),
        ];
        assert_eq!(polygon_area(&square), 100.0);
        assert_eq!(polygon_area(&square[..2]), 0.0);
    }

    #[test]
    fn test_square_outline_simplifies_to_four_corners() {
        let outline = square_outline(5, 7, 40);
        let polygon = approximate_closed_polygon(&outline, 0.04 * 156.0);

        assert_eq!(polygon.len(), 4);
        assert!(polygon.contains(&Point::new(5, 7)));
        assert!(polygon.contains(&Point::new(44, 46)));
    }
}
