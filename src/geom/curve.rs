//! Bezier curves of order 0 through 6.
//!
//! Intersection testing works by recursive subdivision: split both curves
//! at the midpoint and recurse into the pairs whose control-point boxes
//! still overlap, until the boxes are small enough to call it.

use crate::errors::GeometryError;

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;
use super::segment::LineSegment;
use super::util;

/// Binomial coefficient rows for orders 0 through 6.
const BINOMIAL: [&[f64]; 7] = [
    &[1.0],
    &[1.0, 1.0],
    &[1.0, 2.0, 1.0],
    &[1.0, 3.0, 3.0, 1.0],
    &[1.0, 4.0, 6.0, 4.0, 1.0],
    &[1.0, 5.0, 10.0, 10.0, 5.0, 1.0],
    &[1.0, 6.0, 15.0, 20.0, 15.0, 6.0, 1.0],
];

pub const MAX_ORDER: usize = BINOMIAL.len() - 1;

/// Cubic approximation constant for a quarter circle.
const ARC_KAPPA: f64 = 0.5522847498;

/// Combined box area below which subdivision stops for a boolean test.
const INTERSECTS_AREA_LIMIT: f64 = 0.01;

/// Combined box area below which leaf chords are intersected to produce
/// points. Looser than the boolean limit, trading accuracy for recursion
/// depth since every leaf here does a segment intersection.
const INTERSECTIONS_AREA_LIMIT: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Bezier {
    points: Vec<Point>,
}

impl Bezier {
    /// Builds a curve from its control points. The order is one less than
    /// the point count and may not exceed [`MAX_ORDER`].
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::EmptyCurve);
        }
        if points.len() - 1 > MAX_ORDER {
            return Err(GeometryError::UnsupportedOrder {
                order: points.len() - 1,
                max: MAX_ORDER,
            });
        }

        Ok(Bezier { points })
    }

    /// Order-1 curve equivalent to the segment.
    pub fn from_segment(segment: &LineSegment) -> Self {
        Bezier {
            points: vec![segment.start(), segment.end()],
        }
    }

    /// Cubic approximation of a circular arc from `start_angle` to
    /// `end_angle` on `circle`.
    ///
    /// Both angles are normalized into `[0, 2*pi)` first. Accuracy degrades
    /// for sweeps beyond a quarter turn; callers wanting a longer arc
    /// should chain several curves.
    pub fn from_arc(circle: &super::circle::Circle, start_angle: f64, end_angle: f64) -> Self {
        let start = util::normalize_angle_positive(start_angle);
        let end = util::normalize_angle_positive(end_angle);
        let r = circle.radius;

        let a = (end - start) / 2.0;
        let x4 = r * a.cos();
        let y4 = r * a.sin();
        let x1 = x4;
        let y1 = -y4;

        let f = ARC_KAPPA * a.tan();

        let x2 = x1 + f * y4;
        let y2 = y1 + f * x4;
        let x3 = x2;
        let y3 = -y2;

        let ar = a + start;
        let (sin_ar, cos_ar) = ar.sin_cos();

        let curve = Bezier {
            points: vec![
                Point::new(r * start.cos(), r * start.sin()),
                Point::new(x2 * cos_ar - y2 * sin_ar, x2 * sin_ar + y2 * cos_ar),
                Point::new(x3 * cos_ar - y3 * sin_ar, x3 * sin_ar + y3 * cos_ar),
                Point::new(r * end.cos(), r * end.sin()),
            ],
        };

        curve.translate(circle.center.x, circle.center.y)
    }

    pub fn order(&self) -> usize {
        self.points.len() - 1
    }

    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    pub fn start_point(&self) -> Point {
        self.points[0]
    }

    pub fn end_point(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Direction of the curve leaving the start point.
    pub fn start_angle(&self) -> f64 {
        match self.points.len() {
            1 => 0.0,
            _ => self.points[0].angle_to(self.points[1]),
        }
    }

    /// Direction of the curve arriving at the end point.
    pub fn end_angle(&self) -> f64 {
        match self.points.len() {
            1 => 0.0,
            n => self.points[n - 2].angle_to(self.points[n - 1]),
        }
    }

    /// Evaluates the curve at parameter `t` in `[0, 1]`.
    ///
    /// Orders 0 through 3 use the expanded Bernstein forms; higher orders
    /// fall back to the general polynomial.
    pub fn point_at(&self, t: f64) -> Point {
        let p = &self.points;
        let mt = 1.0 - t;

        match self.order() {
            0 => p[0],
            1 => Point::new(mt * p[0].x + t * p[1].x, mt * p[0].y + t * p[1].y),
            2 => {
                let t2 = t * t;
                let mt2 = mt * mt;
                Point::new(
                    mt2 * p[0].x + 2.0 * t * mt * p[1].x + t2 * p[2].x,
                    mt2 * p[0].y + 2.0 * t * mt * p[1].y + t2 * p[2].y,
                )
            }
            3 => {
                let t2 = t * t;
                let mt2 = mt * mt;
                let t3 = t2 * t;
                let mt3 = mt2 * mt;
                Point::new(
                    mt3 * p[0].x + 3.0 * mt2 * t * p[1].x + 3.0 * mt * t2 * p[2].x + t3 * p[3].x,
                    mt3 * p[0].y + 3.0 * mt2 * t * p[1].y + 3.0 * mt * t2 * p[2].y + t3 * p[3].y,
                )
            }
            n => {
                let coeffs = BINOMIAL[n];
                let mut x = 0.0;
                let mut y = 0.0;

                for (i, pt) in p.iter().enumerate() {
                    let w = coeffs[i] * mt.powi((n - i) as i32) * t.powi(i as i32);
                    x += w * pt.x;
                    y += w * pt.y;
                }

                Point::new(x, y)
            }
        }
    }

    /// Splits the curve at parameter `t` using de Casteljau's construction.
    /// Both halves have the same order as the original.
    pub fn split(&self, t: f64) -> (Bezier, Bezier) {
        let mut left = Vec::with_capacity(self.points.len());
        let mut right = Vec::with_capacity(self.points.len());

        let mut level = self.points.clone();

        while level.len() > 1 {
            left.push(level[0]);
            right.push(level[level.len() - 1]);

            for i in 0..level.len() - 1 {
                level[i] = Point::new(
                    (1.0 - t) * level[i].x + t * level[i + 1].x,
                    (1.0 - t) * level[i].y + t * level[i + 1].y,
                );
            }
            level.pop();
        }

        left.push(level[0]);
        right.push(level[0]);
        right.reverse();

        (Bezier { points: left }, Bezier { points: right })
    }

    /// `n` evenly spaced points along the curve, endpoints included.
    /// Fewer than 3 samples cannot describe a curve and is an error.
    pub fn points(&self, n: usize) -> Result<Vec<Point>, GeometryError> {
        if n < 3 {
            return Err(GeometryError::TooFewSamples { wanted: n });
        }

        Ok((0..n)
            .map(|i| self.point_at(i as f64 / (n - 1) as f64))
            .collect())
    }

    /// Approximates the curve with `segments` chords.
    pub fn partition(&self, segments: usize) -> Vec<LineSegment> {
        let mut out = Vec::with_capacity(segments);
        let mut prev = self.start_point();

        for i in 1..=segments {
            let next = self.point_at(i as f64 / segments as f64);
            out.push(LineSegment::new(prev, next));
            prev = next;
        }

        out
    }

    /// Approximate arc length over a 10-chord partition.
    pub fn length(&self) -> f64 {
        self.partition(10).iter().map(|s| s.length()).sum()
    }

    /// Control-point hull box. Contains the curve, but is not tight.
    pub fn bounding_box(&self) -> Rect {
        let mut min = self.points[0];
        let mut max = self.points[0];

        for p in &self.points[1..] {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }

        Rect::new(min, max)
    }

    /// Nearest of 10 sampled points to `p`. Coarse by construction.
    pub fn closest_point(&self, p: Point) -> Point {
        let samples = (0..10).map(|i| self.point_at(i as f64 / 9.0));

        // 10 samples, never empty
        util::closest_of(samples, p).unwrap_or_else(|| self.start_point())
    }

    pub fn intersects(&self, other: &Bezier) -> bool {
        let b1 = self.bounding_box();
        let b2 = other.bounding_box();

        if !b1.intersects(&b2) {
            return false;
        }

        if b1.area() + b2.area() < INTERSECTS_AREA_LIMIT {
            return true;
        }

        let (a1, a2) = self.split(0.5);
        let (b1, b2) = other.split(0.5);

        a1.intersects(&b1) || a1.intersects(&b2) || a2.intersects(&b1) || a2.intersects(&b2)
    }

    pub fn intersects_segment(&self, segment: &LineSegment) -> bool {
        self.intersects(&Bezier::from_segment(segment))
    }

    /// Approximate intersection points with another curve.
    pub fn intersections(&self, other: &Bezier) -> Vec<Point> {
        let mut points = Vec::new();
        collect_intersections(self, other, &mut points);
        points
    }

    pub fn intersections_with_segment(&self, segment: &LineSegment) -> Vec<Point> {
        self.intersections(&Bezier::from_segment(segment))
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Bezier {
        Bezier {
            points: self.points.iter().map(|p| p.translate(dx, dy)).collect(),
        }
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Bezier {
        Bezier {
            points: self.points.iter().map(|p| p.rotate(angle, pivot)).collect(),
        }
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Bezier {
        Bezier {
            points: self.points.iter().map(|p| p.scale(factor, pivot)).collect(),
        }
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> Bezier {
        Bezier {
            points: self.points.iter().map(|p| p.transform(m)).collect(),
        }
    }
}

fn collect_intersections(c1: &Bezier, c2: &Bezier, out: &mut Vec<Point>) {
    let b1 = c1.bounding_box();
    let b2 = c2.bounding_box();

    if !b1.intersects(&b2) {
        return;
    }

    if b1.area() + b2.area() < INTERSECTIONS_AREA_LIMIT {
        let chord1 = LineSegment::new(c1.start_point(), c1.end_point());
        let chord2 = LineSegment::new(c2.start_point(), c2.end_point());

        if let Some(p) = chord1.intersection(&chord2) {
            out.push(p);
        }
        return;
    }

    let (c1a, c1b) = c1.split(0.5);
    let (c2a, c2b) = c2.split(0.5);

    collect_intersections(&c1a, &c2a, out);
    collect_intersections(&c1a, &c2b, out);
    collect_intersections(&c1b, &c2a, out);
    collect_intersections(&c1b, &c2b, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::circle::Circle;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn cubic() -> Bezier {
        Bezier::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn order_limits() {
        assert!(Bezier::new(vec![Point::ZERO]).is_ok());
        assert!(Bezier::new(vec![Point::ZERO; 7]).is_ok());
        assert!(matches!(
            Bezier::new(vec![Point::ZERO; 8]),
            Err(GeometryError::UnsupportedOrder { order: 7, max: 6 })
        ));
        assert!(matches!(
            Bezier::new(vec![]),
            Err(GeometryError::EmptyCurve)
        ));
    }

    #[test]
    fn endpoint_evaluation() {
        let c = cubic();

        assert_eq!(c.point_at(0.0), c.start_point());
        assert_eq!(c.point_at(1.0), c.end_point());

        let mid = c.point_at(0.5);
        assert!((mid.x - 5.0).abs() < 1e-12);
        assert!((mid.y - 7.5).abs() < 1e-12);
    }

    #[test]
    fn high_order_matches_general_form() {
        // A degree-5 curve with collinear control points is a straight line.
        let line = Bezier::new(
            (0..6).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect(),
        )
        .unwrap();

        let p = line.point_at(0.4);
        assert!((p.y - 2.0 * p.x).abs() < 1e-12);
    }

    #[test]
    fn split_halves_agree_with_parent() {
        let c = cubic();
        let (left, right) = c.split(0.5);

        assert_eq!(left.order(), 3);
        assert_eq!(right.order(), 3);
        assert_eq!(left.start_point(), c.start_point());
        assert_eq!(right.end_point(), c.end_point());
        assert_eq!(left.end_point(), right.start_point());

        // left covers t in [0, 0.5]: left(u) == parent(u / 2)
        for i in 0..=4 {
            let u = i as f64 / 4.0;
            let a = left.point_at(u);
            let b = c.point_at(u / 2.0);
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);

            let a = right.point_at(u);
            let b = c.point_at(0.5 + u / 2.0);
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn arc_approximation_stays_near_the_circle() {
        let circle = Circle::new(Point::ZERO, 10.0);
        let arc = Bezier::from_arc(&circle, 0.0, FRAC_PI_2);

        assert_eq!(arc.order(), 3);
        let start = arc.start_point();
        let end = arc.end_point();
        assert!((start.x - 10.0).abs() < 1e-9 && start.y.abs() < 1e-9);
        assert!(end.x.abs() < 1e-9 && (end.y - 10.0).abs() < 1e-9);

        for p in arc.points(21).unwrap() {
            let r = Point::ZERO.distance_to(p);
            assert!((r - 10.0).abs() < 0.01, "radius drifted to {r}");
        }
    }

    #[test]
    fn sampling_needs_three_points() {
        let c = cubic();

        assert!(matches!(
            c.points(2),
            Err(GeometryError::TooFewSamples { wanted: 2 })
        ));
        assert_eq!(c.points(5).unwrap().len(), 5);
    }

    #[test]
    fn length_of_a_straight_curve() {
        let line = Bezier::new(vec![Point::ZERO, Point::new(3.0, 4.0)]).unwrap();
        assert!((line.length() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn angles_follow_the_control_polygon() {
        let c = cubic();

        assert!((c.start_angle() - FRAC_PI_2).abs() < 1e-12);
        assert!((c.end_angle() - (-FRAC_PI_2)).abs() < 1e-12);
    }

    #[test]
    fn crossing_curves_intersect() {
        let c = cubic();
        let vertical = Bezier::new(vec![Point::new(5.0, -5.0), Point::new(5.0, 20.0)]).unwrap();
        let far = Bezier::new(vec![Point::new(50.0, 50.0), Point::new(60.0, 60.0)]).unwrap();

        assert!(c.intersects(&vertical));
        assert!(!c.intersects(&far));

        let hits = c.intersections(&vertical);
        assert!(!hits.is_empty());
        for p in hits {
            assert!((p.x - 5.0).abs() < 0.5);
        }
    }

    #[test]
    fn segment_intersection_goes_through_curve_form() {
        let c = cubic();
        let seg = LineSegment::new(Point::new(-1.0, 5.0), Point::new(11.0, 5.0));

        assert!(c.intersects_segment(&seg));
        assert_eq!(c.intersections_with_segment(&seg).len(), 2);
    }

    #[test]
    fn rigid_transforms_preserve_shape() {
        let c = cubic();
        let back = c.rotate(PI, None).rotate(-PI, None);

        for (a, b) in c.control_points().iter().zip(back.control_points()) {
            assert!((a.x - b.x).abs() < 1e-9);
            assert!((a.y - b.y).abs() < 1e-9);
        }

        let moved = c.translate(3.0, -2.0);
        assert_eq!(moved.start_point(), Point::new(3.0, -2.0));
    }
}
