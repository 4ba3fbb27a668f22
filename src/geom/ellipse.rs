//! Axis-angled ellipse.

use std::f64::consts::PI;

use crate::errors::GeometryError;

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;
use super::segment::LineSegment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Rotation of the x radius relative to the x axis, in radians.
    pub angle: f64,
}

impl Ellipse {
    pub const fn new(center: Point, radius_x: f64, radius_y: f64, angle: f64) -> Self {
        Ellipse {
            center,
            radius_x,
            radius_y,
            angle,
        }
    }

    /// Builds the ellipse from its two foci and the major-axis length
    /// (the "cord"): the locus of points whose focal distances sum to it.
    pub fn from_foci(f1: Point, f2: Point, cord: f64) -> Self {
        let focal = LineSegment::new(f1, f2);

        Ellipse {
            center: focal.center(),
            radius_x: cord / 2.0,
            radius_y: (cord * cord / 4.0 - focal.length() * focal.length() / 4.0).sqrt(),
            angle: focal.angle(),
        }
    }

    pub fn from_circle(circle: &super::circle::Circle) -> Self {
        Ellipse::new(circle.center, circle.radius, circle.radius, 0.0)
    }

    /// Major-axis length: the constant sum of distances to the two foci.
    pub fn cord(&self) -> f64 {
        2.0 * self.radius_x.max(self.radius_y)
    }

    /// Segment between the two foci. Degenerates to the center for a circle.
    pub fn focal_segment(&self) -> LineSegment {
        let (major, along_x) = if self.radius_x >= self.radius_y {
            (self.radius_x, true)
        } else {
            (self.radius_y, false)
        };
        let minor = self.radius_x.min(self.radius_y);
        let c = (major * major - minor * minor).sqrt();

        let (f1, f2) = if along_x {
            (
                Point::new(self.center.x - c, self.center.y),
                Point::new(self.center.x + c, self.center.y),
            )
        } else {
            (
                Point::new(self.center.x, self.center.y - c),
                Point::new(self.center.x, self.center.y + c),
            )
        };

        LineSegment::new(
            f1.rotate(self.angle, Some(self.center)),
            f2.rotate(self.angle, Some(self.center)),
        )
    }

    /// Parametric evaluation at `t` in `[0, 2*pi)`.
    pub fn point_at(&self, t: f64) -> Point {
        let (sin_t, cos_t) = t.sin_cos();
        let (sin_a, cos_a) = self.angle.sin_cos();

        Point::new(
            self.center.x + self.radius_x * cos_t * cos_a - self.radius_y * sin_t * sin_a,
            self.center.y + self.radius_y * sin_t * cos_a + self.radius_x * cos_t * sin_a,
        )
    }

    pub fn area(&self) -> f64 {
        self.radius_x * self.radius_y * PI
    }

    /// Tight box around the rotated ellipse.
    pub fn bounding_box(&self) -> Rect {
        let (sin_a, cos_a) = self.angle.sin_cos();

        let half_w = ((self.radius_x * cos_a).powi(2) + (self.radius_y * sin_a).powi(2)).sqrt();
        let half_h = ((self.radius_x * sin_a).powi(2) + (self.radius_y * cos_a).powi(2)).sqrt();

        Rect::new(
            Point::new(self.center.x - half_w, self.center.y - half_h),
            Point::new(self.center.x + half_w, self.center.y + half_h),
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Ellipse {
        Ellipse::new(
            self.center.translate(dx, dy),
            self.radius_x,
            self.radius_y,
            self.angle,
        )
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Ellipse {
        Ellipse::new(
            self.center.rotate(angle, pivot),
            self.radius_x,
            self.radius_y,
            self.angle + angle,
        )
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Ellipse {
        Ellipse::new(
            self.center.scale(factor, pivot),
            self.radius_x * factor,
            self.radius_y * factor,
            self.angle,
        )
    }

    /// Shear would break the center/radii/angle representation.
    pub fn transform(&self, _m: &AffineMatrix2D) -> Result<Ellipse, GeometryError> {
        Err(GeometryError::UnsupportedTransform {
            kind: "Ellipse",
            op: "transform",
        })
    }
}
