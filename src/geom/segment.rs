//! Straight line segments.

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;

/// A directed segment from `p1` to `p2`.
///
/// Angle and length are computed at construction so repeated queries
/// during intersection sweeps stay cheap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    p1: Point,
    p2: Point,
    angle: f64,
    length: f64,
}

impl LineSegment {
    pub fn new(p1: Point, p2: Point) -> Self {
        LineSegment {
            p1,
            p2,
            angle: p1.angle_to(p2),
            length: p1.distance_to(p2),
        }
    }

    /// Builds the segment from a start point, a length, and a direction.
    pub fn from_polar(p1: Point, length: f64, angle: f64) -> Self {
        LineSegment {
            p1,
            p2: Point::polar(p1, angle, length),
            angle,
            length,
        }
    }

    pub fn start(&self) -> Point {
        self.p1
    }

    pub fn end(&self) -> Point {
        self.p2
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn center(&self) -> Point {
        self.p1.midpoint(self.p2)
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            Point::new(self.p1.x.min(self.p2.x), self.p1.y.min(self.p2.y)),
            Point::new(self.p1.x.max(self.p2.x), self.p1.y.max(self.p2.y)),
        )
    }

    /// Intersection point of two segments, if they cross within both spans.
    ///
    /// Parallel segments have a zero denominator; the parametric values go
    /// non-finite and the range check rejects them, so collinear overlap
    /// reports no intersection point.
    pub fn intersection(&self, other: &LineSegment) -> Option<Point> {
        let d1x = self.p2.x - self.p1.x;
        let d1y = self.p2.y - self.p1.y;
        let d2x = other.p2.x - other.p1.x;
        let d2y = other.p2.y - other.p1.y;

        let denom = -d2x * d1y + d1x * d2y;

        let s = (-d1y * (self.p1.x - other.p1.x) + d1x * (self.p1.y - other.p1.y)) / denom;
        let t = (d2x * (self.p1.y - other.p1.y) - d2y * (self.p1.x - other.p1.x)) / denom;

        if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
            Some(Point::new(self.p1.x + t * d1x, self.p1.y + t * d1y))
        } else {
            None
        }
    }

    pub fn intersects(&self, other: &LineSegment) -> bool {
        self.intersection(other).is_some()
    }

    /// The point on the segment nearest to `p`, clamped to the endpoints.
    pub fn closest_point(&self, p: Point) -> Point {
        let to_p = p - self.p1;
        let dir = self.p2 - self.p1;

        let len2 = dir.dx * dir.dx + dir.dy * dir.dy;
        if len2 <= f64::EPSILON {
            return self.p1;
        }

        let t = (to_p.dx * dir.dx + to_p.dy * dir.dy) / len2;
        if t <= 0.0 {
            self.p1
        } else if t >= 1.0 {
            self.p2
        } else {
            Point::new(self.p1.x + dir.dx * t, self.p1.y + dir.dy * t)
        }
    }

    pub fn distance_to(&self, p: Point) -> f64 {
        self.closest_point(p).distance_to(p)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> LineSegment {
        LineSegment::new(self.p1.translate(dx, dy), self.p2.translate(dx, dy))
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> LineSegment {
        LineSegment::new(self.p1.rotate(angle, pivot), self.p2.rotate(angle, pivot))
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> LineSegment {
        LineSegment::new(self.p1.scale(factor, pivot), self.p2.scale(factor, pivot))
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> LineSegment {
        LineSegment::new(self.p1.transform(m), self.p2.transform(m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn angle_and_length() {
        let seg = LineSegment::new(Point::new(1.0, 1.0), Point::new(4.0, 5.0));

        assert!((seg.length() - 5.0).abs() < 1e-12);
        assert!((seg.angle() - (4.0f64 / 3.0).atan()).abs() < 1e-12);
        assert_eq!(seg.center(), Point::new(2.5, 3.0));
    }

    #[test]
    fn from_polar_matches_two_point_form() {
        let a = LineSegment::from_polar(Point::new(2.0, 1.0), 5.0, PI / 6.0);
        let b = LineSegment::new(a.start(), a.end());

        assert!((a.length() - b.length()).abs() < 1e-12);
        assert!((a.angle() - b.angle()).abs() < 1e-12);
    }

    #[test]
    fn crossing_segments_intersect() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let b = LineSegment::new(Point::new(0.0, 10.0), Point::new(10.0, 0.0));

        let p = a.intersection(&b).unwrap();
        assert!((p.x - 5.0).abs() < 1e-12);
        assert!((p.y - 5.0).abs() < 1e-12);
        assert!(a.intersects(&b));
    }

    #[test]
    fn disjoint_and_parallel_segments_do_not_intersect() {
        let a = LineSegment::new(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let b = LineSegment::new(Point::new(2.0, 1.0), Point::new(3.0, 1.0));
        let parallel = LineSegment::new(Point::new(0.0, 1.0), Point::new(1.0, 1.0));

        assert!(a.intersection(&b).is_none());
        assert!(a.intersection(&parallel).is_none());
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let seg = LineSegment::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0));

        assert_eq!(seg.closest_point(Point::new(5.0, 3.0)), Point::new(5.0, 0.0));
        assert_eq!(seg.closest_point(Point::new(-4.0, 2.0)), Point::new(0.0, 0.0));
        assert_eq!(seg.closest_point(Point::new(14.0, 2.0)), Point::new(10.0, 0.0));
        assert!((seg.distance_to(Point::new(5.0, 3.0)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_returns_its_point() {
        let seg = LineSegment::new(Point::new(2.0, 2.0), Point::new(2.0, 2.0));

        assert_eq!(seg.closest_point(Point::new(7.0, 7.0)), Point::new(2.0, 2.0));
    }

    #[test]
    fn bounding_box_is_normalized() {
        let seg = LineSegment::new(Point::new(5.0, -1.0), Point::new(2.0, 3.0));
        let bbox = seg.bounding_box();

        assert_eq!(bbox.p1, Point::new(2.0, -1.0));
        assert_eq!(bbox.p2, Point::new(5.0, 3.0));
    }
}
