//! A spline is an ordered run of Bezier pieces treated as one curve.

use std::sync::OnceLock;

use super::curve::Bezier;
use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;
use super::segment::LineSegment;
use super::util;

/// Pieces are expected to join end-to-start; the type does not enforce it.
#[derive(Debug, Clone)]
pub struct Spline {
    curves: Vec<Bezier>,
    closed: bool,
    bbox: OnceLock<Rect>,
}

impl PartialEq for Spline {
    fn eq(&self, other: &Self) -> bool {
        self.closed == other.closed && self.curves == other.curves
    }
}

impl Spline {
    pub fn new(curves: Vec<Bezier>, closed: bool) -> Self {
        Spline {
            curves,
            closed,
            bbox: OnceLock::new(),
        }
    }

    pub fn curves(&self) -> &[Bezier] {
        &self.curves
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn length(&self) -> f64 {
        self.curves.iter().map(Bezier::length).sum()
    }

    pub fn start_point(&self) -> Option<Point> {
        self.curves.first().map(Bezier::start_point)
    }

    pub fn end_point(&self) -> Option<Point> {
        self.curves.last().map(Bezier::end_point)
    }

    pub fn start_angle(&self) -> Option<f64> {
        self.curves.first().map(Bezier::start_angle)
    }

    pub fn end_angle(&self) -> Option<f64> {
        self.curves.last().map(Bezier::end_angle)
    }

    /// Union of the pieces' control hull boxes, cached after first use.
    pub fn bounding_box(&self) -> Rect {
        *self.bbox.get_or_init(|| {
            util::bounding_box_of(self.curves.iter().map(Bezier::bounding_box))
                .unwrap_or(Rect::new(Point::ZERO, Point::ZERO))
        })
    }

    pub fn closest_point(&self, p: Point) -> Option<Point> {
        util::closest_of(self.curves.iter().map(|c| c.closest_point(p)), p)
    }

    pub fn intersects(&self, other: &Bezier) -> bool {
        self.curves.iter().any(|c| c.intersects(other))
    }

    pub fn intersects_segment(&self, segment: &LineSegment) -> bool {
        self.curves.iter().any(|c| c.intersects_segment(segment))
    }

    pub fn intersects_spline(&self, other: &Spline) -> bool {
        self.curves.iter().any(|c| other.intersects(c))
    }

    pub fn intersections(&self, other: &Bezier) -> Vec<Point> {
        self.curves
            .iter()
            .flat_map(|c| c.intersections(other))
            .collect()
    }

    pub fn intersections_with_segment(&self, segment: &LineSegment) -> Vec<Point> {
        self.curves
            .iter()
            .flat_map(|c| c.intersections_with_segment(segment))
            .collect()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Spline {
        Spline::new(
            self.curves.iter().map(|c| c.translate(dx, dy)).collect(),
            self.closed,
        )
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Spline {
        Spline::new(
            self.curves.iter().map(|c| c.rotate(angle, pivot)).collect(),
            self.closed,
        )
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Spline {
        Spline::new(
            self.curves.iter().map(|c| c.scale(factor, pivot)).collect(),
            self.closed,
        )
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> Spline {
        Spline::new(
            self.curves.iter().map(|c| c.transform(m)).collect(),
            self.closed,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::circle::Circle;
    use std::f64::consts::{FRAC_PI_2, PI};

    /// Full circle out of four quarter-turn arcs.
    fn ring(radius: f64) -> Spline {
        let circle = Circle::new(Point::ZERO, radius);

        Spline::new(
            (0..4)
                .map(|i| {
                    Bezier::from_arc(
                        &circle,
                        i as f64 * FRAC_PI_2,
                        (i + 1) as f64 * FRAC_PI_2,
                    )
                })
                .collect(),
            true,
        )
    }

    #[test]
    fn ring_length_approximates_the_circumference() {
        let r = ring(10.0);

        assert!(r.is_closed());
        assert!((r.length() - 2.0 * PI * 10.0).abs() < 0.1);
    }

    #[test]
    fn endpoints_delegate_to_the_pieces() {
        let r = ring(10.0);

        let start = r.start_point().unwrap();
        let end = r.end_point().unwrap();
        assert!((start.x - 10.0).abs() < 1e-9);
        assert!((start.distance_to(end)) < 1e-9);

        assert!(Spline::new(vec![], false).start_point().is_none());
    }

    #[test]
    fn bounding_box_unions_the_pieces() {
        let b = ring(10.0).bounding_box();

        assert!(b.min_x() <= -10.0 && b.max_x() >= 10.0);
        assert!(b.min_y() <= -10.0 && b.max_y() >= 10.0);
    }

    #[test]
    fn segment_through_the_ring_intersects() {
        let r = ring(10.0);
        let through = LineSegment::new(Point::new(-20.0, 0.0), Point::new(20.0, 0.0));
        let outside = LineSegment::new(Point::new(30.0, 30.0), Point::new(40.0, 30.0));

        assert!(r.intersects_segment(&through));
        assert!(!r.intersects_segment(&outside));
        assert_eq!(r.intersections_with_segment(&through).len(), 2);
    }

    #[test]
    fn disjoint_rings_do_not_intersect() {
        let a = ring(10.0);
        let b = ring(10.0).translate(50.0, 0.0);
        let overlapping = ring(10.0).translate(15.0, 0.0);

        assert!(!a.intersects_spline(&b));
        assert!(a.intersects_spline(&overlapping));
    }

    #[test]
    fn transforms_apply_to_every_piece() {
        let r = ring(10.0).scale(2.0, None);
        assert!((r.length() - 2.0 * PI * 20.0).abs() < 0.2);

        let shifted = ring(1.0).translate(5.0, 0.0);
        let b = shifted.bounding_box();
        assert!((b.center().x - 5.0).abs() < 1e-9);
    }
}
