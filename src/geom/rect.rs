//! Axis-aligned rectangle, used both as a shape and as a bounding box.

use crate::errors::GeometryError;

use super::point::Point;
use super::poly::Poly;

/// Two corner points, in caller-provided order.
///
/// The type does not normalize the corner order: callers are expected to
/// pass (min, max). A swapped pair is representable and yields negative
/// `width`/`height`, which is deliberate (and tested).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub p1: Point,
    pub p2: Point,
}

impl Rect {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Rect { p1, p2 }
    }

    pub fn from_size(origin: Point, width: f64, height: f64) -> Self {
        Rect::new(origin, Point::new(origin.x + width, origin.y + height))
    }

    pub fn min_x(&self) -> f64 {
        self.p1.x
    }

    pub fn min_y(&self) -> f64 {
        self.p1.y
    }

    pub fn max_x(&self) -> f64 {
        self.p2.x
    }

    pub fn max_y(&self) -> f64 {
        self.p2.y
    }

    pub fn width(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    pub fn height(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        Point::new(self.p1.x + self.width() / 2.0, self.p1.y + self.height() / 2.0)
    }

    pub fn intersects(&self, r: &Rect) -> bool {
        !(r.min_x() > self.max_x()
            || r.max_x() < self.min_x()
            || r.min_y() > self.max_y()
            || r.max_y() < self.min_y())
    }

    /// The smallest rectangle covering both.
    pub fn union(&self, r: &Rect) -> Rect {
        Rect::new(
            Point::new(self.min_x().min(r.min_x()), self.min_y().min(r.min_y())),
            Point::new(self.max_x().max(r.max_x()), self.max_y().max(r.max_y())),
        )
    }

    pub fn bounding_box(&self) -> Rect {
        *self
    }

    /// Explicit conversion to a closed 4-corner polygon.
    ///
    /// Rotating or affinely transforming a rectangle has no axis-aligned
    /// result; those operations live on the polygon instead.
    pub fn to_polygon(&self) -> Poly {
        Poly::polygon(vec![
            self.p1,
            Point::new(self.p2.x, self.p1.y),
            self.p2,
            Point::new(self.p1.x, self.p2.y),
        ])
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.p1.translate(dx, dy), self.p2.translate(dx, dy))
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Rect {
        Rect::new(self.p1.scale(factor, pivot), self.p2.scale(factor, pivot))
    }

    /// Not representable on an axis-aligned box.
    pub fn rotate(&self, _angle: f64, _pivot: Option<Point>) -> Result<Rect, GeometryError> {
        Err(GeometryError::UnsupportedTransform {
            kind: "Rect",
            op: "rotate",
        })
    }

    /// Not representable on an axis-aligned box.
    pub fn transform(
        &self,
        _m: &super::matrix::AffineMatrix2D,
    ) -> Result<Rect, GeometryError> {
        Err(GeometryError::UnsupportedTransform {
            kind: "Rect",
            op: "transform",
        })
    }

    pub fn closest_point(&self, p: Point) -> Point {
        self.to_polygon().closest_point(p)
    }
}
