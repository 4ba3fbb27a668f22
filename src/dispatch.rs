//! Pairwise operation dispatch across shape kinds.
//!
//! There is no full method matrix. Each shape declares which counterparts
//! it can test directly by answering `Some(..)` from the `Pairwise` hooks;
//! the free functions try the pair in both orders and fail closed with
//! [`DispatchError::NoRule`] when neither side knows the other.

use enum_dispatch::enum_dispatch;

use crate::errors::{DispatchError, GeometryError};
use crate::geom::{
    Arc, Bezier, Circle, Ellipse, LineSegment, MultiGeometry, MultiPoint, MultiPolyline, Point,
    Poly, Rect, Spline,
};
use crate::geom::{matrix::AffineMatrix2D, util};
use crate::log::trace;

/// Operations every shape kind supports.
#[enum_dispatch]
pub trait GeometryOps {
    fn kind(&self) -> &'static str;
    fn bounding_box(&self) -> Rect;
    /// `None` only for empty aggregates.
    fn closest_point(&self, p: Point) -> Option<Point>;
    fn translate(&self, dx: f64, dy: f64) -> Geometry;
    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError>;
    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry;
    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError>;
}

/// Capability hooks for pairwise testing. `None` means "I don't know this
/// counterpart"; the dispatcher will then ask the other side.
#[enum_dispatch]
pub trait Pairwise {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        let _ = other;
        None
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        let _ = other;
        None
    }

    fn try_overlaps(&self, other: &Geometry) -> Option<bool> {
        let _ = other;
        None
    }
}

/// Every concrete shape kind, unified for storage and dispatch.
#[enum_dispatch(GeometryOps, Pairwise)]
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Segment(LineSegment),
    Rect(Rect),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Bezier(Bezier),
    Poly(Poly),
    Spline(Spline),
    MultiPoint(MultiPoint),
    MultiPolyline(MultiPolyline),
    Multi(MultiGeometry),
}

/// True when the shapes touch or cross, in either argument order.
pub fn intersects(a: &Geometry, b: &Geometry) -> Result<bool, DispatchError> {
    trace!("intersects: {} vs {}", a.kind(), b.kind());

    a.try_intersects(b)
        .or_else(|| b.try_intersects(a))
        .ok_or(DispatchError::NoRule {
            op: "intersects",
            lhs: a.kind(),
            rhs: b.kind(),
        })
}

/// Approximate crossing points, in either argument order.
pub fn intersections(a: &Geometry, b: &Geometry) -> Result<Vec<Point>, DispatchError> {
    trace!("intersections: {} vs {}", a.kind(), b.kind());

    a.try_intersections(b)
        .or_else(|| b.try_intersections(a))
        .ok_or(DispatchError::NoRule {
            op: "intersections",
            lhs: a.kind(),
            rhs: b.kind(),
        })
}

/// True when one shape covers any part of the other.
pub fn overlaps(a: &Geometry, b: &Geometry) -> Result<bool, DispatchError> {
    trace!("overlaps: {} vs {}", a.kind(), b.kind());

    a.try_overlaps(b)
        .or_else(|| b.try_overlaps(a))
        .ok_or(DispatchError::NoRule {
            op: "overlaps",
            lhs: a.kind(),
            rhs: b.kind(),
        })
}

// ===== Point =====

impl GeometryOps for Point {
    fn kind(&self) -> &'static str {
        "point"
    }

    fn bounding_box(&self) -> Rect {
        Point::bounding_box(self)
    }

    fn closest_point(&self, _p: Point) -> Option<Point> {
        Some(*self)
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Point::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Point::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Point::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(Point::transform(self, m).into())
    }
}

impl Pairwise for Point {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Point(p) => Some(self == p),
            Geometry::Circle(c) => Some(c.is_point_inside(*self)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Point(p) => Some(if self == p { vec![*self] } else { vec![] }),
            _ => None,
        }
    }
}

// ===== LineSegment =====

impl GeometryOps for LineSegment {
    fn kind(&self) -> &'static str {
        "segment"
    }

    fn bounding_box(&self) -> Rect {
        LineSegment::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(LineSegment::closest_point(self, p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        LineSegment::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(LineSegment::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        LineSegment::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(LineSegment::transform(self, m).into())
    }
}

impl Pairwise for LineSegment {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Segment(s) => Some(self.intersects(s)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Segment(s) => Some(self.intersection(s).into_iter().collect()),
            _ => None,
        }
    }
}

// ===== Rect =====

impl GeometryOps for Rect {
    fn kind(&self) -> &'static str {
        "rect"
    }

    fn bounding_box(&self) -> Rect {
        *self
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(Rect::closest_point(self, p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Rect::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Rect::rotate(self, angle, pivot).map(Geometry::from)
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Rect::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Rect::transform(self, m).map(Geometry::from)
    }
}

impl Pairwise for Rect {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Rect(r) => Some(self.intersects(r)),
            _ => None,
        }
    }
}

// ===== Circle =====

impl GeometryOps for Circle {
    fn kind(&self) -> &'static str {
        "circle"
    }

    fn bounding_box(&self) -> Rect {
        Circle::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(Circle::closest_point(self, p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Circle::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Circle::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Circle::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Circle::transform(self, m).map(Geometry::from)
    }
}

impl Pairwise for Circle {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Circle(c) => Some(self.intersects(c)),
            Geometry::Point(p) => Some(self.is_point_inside(*p)),
            _ => None,
        }
    }

    fn try_overlaps(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Circle(c) => Some(self.overlaps(c)),
            Geometry::Point(p) => Some(self.overlaps_point(*p)),
            _ => None,
        }
    }
}

// ===== Arc =====

impl GeometryOps for Arc {
    fn kind(&self) -> &'static str {
        "arc"
    }

    fn bounding_box(&self) -> Rect {
        // Conservative: the whole carrier circle.
        self.circle.bounding_box()
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(self.circle.closest_point(p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Arc::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Arc::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Arc::new(
            self.circle.scale(factor, pivot),
            self.start_angle,
            self.end_angle,
            self.increasing,
        )
        .into()
    }

    fn transform(&self, _m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Err(GeometryError::UnsupportedTransform {
            kind: "Arc",
            op: "transform",
        })
    }
}

impl Pairwise for Arc {}

// ===== Ellipse =====

impl GeometryOps for Ellipse {
    fn kind(&self) -> &'static str {
        "ellipse"
    }

    fn bounding_box(&self) -> Rect {
        Ellipse::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        // Nearest of 16 boundary samples.
        util::closest_of(
            (0..16).map(|i| self.point_at(i as f64 * std::f64::consts::TAU / 16.0)),
            p,
        )
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Ellipse::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Ellipse::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Ellipse::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ellipse::transform(self, m).map(Geometry::from)
    }
}

impl Pairwise for Ellipse {}

// ===== Bezier =====

impl GeometryOps for Bezier {
    fn kind(&self) -> &'static str {
        "bezier"
    }

    fn bounding_box(&self) -> Rect {
        Bezier::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(Bezier::closest_point(self, p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Bezier::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Bezier::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Bezier::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(Bezier::transform(self, m).into())
    }
}

impl Pairwise for Bezier {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Bezier(c) => Some(self.intersects(c)),
            Geometry::Segment(s) => Some(self.intersects_segment(s)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Bezier(c) => Some(self.intersections(c)),
            Geometry::Segment(s) => Some(self.intersections_with_segment(s)),
            _ => None,
        }
    }
}

// ===== Poly =====

impl GeometryOps for Poly {
    fn kind(&self) -> &'static str {
        "poly"
    }

    fn bounding_box(&self) -> Rect {
        Poly::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Some(Poly::closest_point(self, p))
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Poly::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Poly::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Poly::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(Poly::transform(self, m).into())
    }
}

impl Pairwise for Poly {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Poly(p) => Some(self.intersects(p)),
            Geometry::Segment(s) => Some(self.intersects_segment(s)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Poly(p) => Some(self.intersections(p)),
            Geometry::Segment(s) => Some(self.intersections_with_segment(s)),
            _ => None,
        }
    }
}

// ===== Spline =====

impl GeometryOps for Spline {
    fn kind(&self) -> &'static str {
        "spline"
    }

    fn bounding_box(&self) -> Rect {
        Spline::bounding_box(self)
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        Spline::closest_point(self, p)
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        Spline::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(Spline::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        Spline::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(Spline::transform(self, m).into())
    }
}

impl Pairwise for Spline {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Spline(s) => Some(self.intersects_spline(s)),
            Geometry::Bezier(c) => Some(self.intersects(c)),
            Geometry::Segment(s) => Some(self.intersects_segment(s)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Bezier(c) => Some(self.intersections(c)),
            Geometry::Segment(s) => Some(self.intersections_with_segment(s)),
            _ => None,
        }
    }
}

// ===== Aggregates =====

impl GeometryOps for MultiPoint {
    fn kind(&self) -> &'static str {
        "multipoint"
    }

    fn bounding_box(&self) -> Rect {
        MultiPoint::bounding_box(self).unwrap_or(Rect::new(Point::ZERO, Point::ZERO))
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        MultiPoint::closest_point(self, p)
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        MultiPoint::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(MultiPoint::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        MultiPoint::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(MultiPoint::transform(self, m).into())
    }
}

impl Pairwise for MultiPoint {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Point(p) => Some(self.intersects_point(*p)),
            Geometry::MultiPoint(mp) => Some(self.intersects(mp)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Point(p) => Some(self.intersections_with_point(*p)),
            Geometry::MultiPoint(mp) => Some(self.intersections(mp)),
            _ => None,
        }
    }
}

impl GeometryOps for MultiPolyline {
    fn kind(&self) -> &'static str {
        "multipolyline"
    }

    fn bounding_box(&self) -> Rect {
        MultiPolyline::bounding_box(self).unwrap_or(Rect::new(Point::ZERO, Point::ZERO))
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        MultiPolyline::closest_point(self, p)
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        MultiPolyline::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        Ok(MultiPolyline::rotate(self, angle, pivot).into())
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        MultiPolyline::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        Ok(MultiPolyline::transform(self, m).into())
    }
}

impl Pairwise for MultiPolyline {
    fn try_intersects(&self, other: &Geometry) -> Option<bool> {
        match other {
            Geometry::Poly(p) => Some(self.intersects(p)),
            _ => None,
        }
    }

    fn try_intersections(&self, other: &Geometry) -> Option<Vec<Point>> {
        match other {
            Geometry::Poly(p) => Some(self.intersections(p)),
            _ => None,
        }
    }
}

impl GeometryOps for MultiGeometry {
    fn kind(&self) -> &'static str {
        "multigeometry"
    }

    fn bounding_box(&self) -> Rect {
        MultiGeometry::bounding_box(self).unwrap_or(Rect::new(Point::ZERO, Point::ZERO))
    }

    fn closest_point(&self, p: Point) -> Option<Point> {
        MultiGeometry::closest_point(self, p)
    }

    fn translate(&self, dx: f64, dy: f64) -> Geometry {
        MultiGeometry::translate(self, dx, dy).into()
    }

    fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<Geometry, GeometryError> {
        MultiGeometry::rotate(self, angle, pivot).map(Geometry::from)
    }

    fn scale(&self, factor: f64, pivot: Option<Point>) -> Geometry {
        MultiGeometry::scale(self, factor, pivot).into()
    }

    fn transform(&self, m: &AffineMatrix2D) -> Result<Geometry, GeometryError> {
        MultiGeometry::transform(self, m).map(Geometry::from)
    }
}

impl Pairwise for MultiGeometry {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_pairs_resolve_in_both_orders() {
        let a = Geometry::from(Circle::new(Point::ZERO, 10.0));
        let p = Geometry::from(Point::new(5.0, 0.0));

        assert_eq!(intersects(&a, &p), Ok(true));
        assert_eq!(intersects(&p, &a), Ok(true));
        assert_eq!(overlaps(&a, &p), Ok(true));
        assert_eq!(overlaps(&p, &a), Ok(true));
    }

    #[test]
    fn swapped_order_uses_the_other_side() {
        // Only the bezier knows segments; segment-first must still resolve.
        let curve = Geometry::from(
            Bezier::new(vec![Point::new(0.0, -5.0), Point::new(0.0, 5.0)]).unwrap(),
        );
        let seg = Geometry::from(LineSegment::new(
            Point::new(-5.0, 0.0),
            Point::new(5.0, 0.0),
        ));

        assert_eq!(intersects(&seg, &curve), Ok(true));
        assert_eq!(intersections(&seg, &curve).map(|v| v.len()), Ok(1));
    }

    #[test]
    fn unknown_pairs_fail_closed() {
        let circle = Geometry::from(Circle::new(Point::ZERO, 1.0));
        let poly = Geometry::from(Poly::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ]));

        assert_eq!(
            intersects(&circle, &poly),
            Err(DispatchError::NoRule {
                op: "intersects",
                lhs: "circle",
                rhs: "poly",
            })
        );
        assert!(overlaps(&poly, &circle).is_err());
    }

    #[test]
    fn enum_transforms_delegate() {
        let g = Geometry::from(Point::new(1.0, 0.0));
        let turned = g.rotate(std::f64::consts::FRAC_PI_2, None).unwrap();

        match turned {
            Geometry::Point(p) => {
                assert!(p.x.abs() < 1e-12);
                assert!((p.y - 1.0).abs() < 1e-12);
            }
            other => panic!("expected point, got {other:?}"),
        }

        let rect = Geometry::from(Rect::new(Point::ZERO, Point::new(1.0, 1.0)));
        assert!(rect.rotate(1.0, None).is_err());
        assert_eq!(rect.bounding_box().area(), 1.0);
    }

    #[test]
    fn intersections_of_equal_points() {
        let a = Geometry::from(Point::new(2.0, 3.0));
        let b = Geometry::from(Point::new(2.0, 3.0));

        assert_eq!(intersections(&a, &b), Ok(vec![Point::new(2.0, 3.0)]));
        assert_eq!(intersects(&a, &Geometry::from(Point::ZERO)), Ok(false));
    }
}
