//! Circles and circular arcs.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::errors::GeometryError;

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;
use super::util;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Circle { center, radius }
    }

    /// Circumcircle of three points.
    ///
    /// Collinear input makes the slope difference zero and the result is
    /// NaN-valued rather than an error. Callers who cannot rule out
    /// collinear triples must check `center.x.is_finite()` themselves.
    pub fn circumcircle(a: Point, b: Point, c: Point) -> Self {
        let slope_ab = (b.y - a.y) / (b.x - a.x);
        let slope_bc = (c.y - b.y) / (c.x - b.x);

        let cx = (slope_ab * slope_bc * (a.y - c.y) + slope_bc * (a.x + b.x)
            - slope_ab * (b.x + c.x))
            / (2.0 * (slope_bc - slope_ab));
        let cy = -(cx - (a.x + b.x) / 2.0) / slope_ab + (a.y + b.y) / 2.0;

        let center = Point::new(cx, cy);
        Circle {
            center,
            radius: a.distance_to(center),
        }
    }

    pub fn area(&self) -> f64 {
        self.radius * self.radius * PI
    }

    /// Boundary inclusive.
    pub fn is_point_inside(&self, p: Point) -> bool {
        self.center.distance_to(p) <= self.radius
    }

    /// Radial projection of `p` onto the circle boundary.
    pub fn closest_point(&self, p: Point) -> Point {
        Point::polar(self.center, self.center.angle_to(p), self.radius)
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::from_size(
            Point::new(self.center.x - self.radius, self.center.y - self.radius),
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// True when the discs touch or overlap.
    pub fn intersects(&self, other: &Circle) -> bool {
        self.center.distance_to(other.center) <= self.radius + other.radius
    }

    /// Gap between the two boundaries, zero when they touch or overlap.
    pub fn distance_to(&self, other: &Circle) -> f64 {
        (self.center.distance_to(other.center) - self.radius - other.radius).max(0.0)
    }

    pub fn distance_to_point(&self, p: Point) -> f64 {
        (self.center.distance_to(p) - self.radius).max(0.0)
    }

    pub fn overlaps_point(&self, p: Point) -> bool {
        self.is_point_inside(p)
    }

    pub fn overlaps(&self, other: &Circle) -> bool {
        self.intersects(other)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Circle {
        Circle::new(self.center.translate(dx, dy), self.radius)
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Circle {
        Circle::new(self.center.rotate(angle, pivot), self.radius)
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Circle {
        Circle::new(self.center.scale(factor, pivot), self.radius * factor)
    }

    /// A general affine map turns a circle into an ellipse; convert first.
    pub fn transform(&self, _m: &AffineMatrix2D) -> Result<Circle, GeometryError> {
        Err(GeometryError::UnsupportedTransform {
            kind: "Circle",
            op: "transform",
        })
    }
}

/// A circular arc: a circle plus a swept angle range and a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub circle: Circle,
    pub start_angle: f64,
    pub end_angle: f64,
    /// Counter-clockwise sweep when true.
    pub increasing: bool,
}

impl Arc {
    pub const fn new(circle: Circle, start_angle: f64, end_angle: f64, increasing: bool) -> Self {
        Arc {
            circle,
            start_angle,
            end_angle,
            increasing,
        }
    }

    pub fn length(&self) -> f64 {
        let sweep = if self.increasing {
            util::normalize_angle_positive(self.end_angle - self.start_angle)
        } else {
            util::normalize_angle_positive(self.start_angle - self.end_angle)
        };

        util::arc_length(self.circle.radius, sweep)
    }

    /// Tangent direction at the end point, following the sweep direction.
    pub fn end_direction_angle(&self) -> f64 {
        if self.increasing {
            util::normalize_angle(self.end_angle + FRAC_PI_2)
        } else {
            util::normalize_angle(self.end_angle - FRAC_PI_2)
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Arc {
        Arc::new(
            self.circle.translate(dx, dy),
            self.start_angle,
            self.end_angle,
            self.increasing,
        )
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Arc {
        Arc::new(
            Circle::new(self.circle.center.rotate(angle, pivot), self.circle.radius),
            self.start_angle + angle,
            self.end_angle + angle,
            self.increasing,
        )
    }
}
