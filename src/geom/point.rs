//! Position and displacement primitives.
//!
//! `Point` is an absolute position, `Vector` a displacement between
//! positions. They are kept as distinct types: `Point + Vector = Point`,
//! `Point - Point = Vector`, and adding two points is unrepresentable.

use std::ops::{Add, Mul, Sub};

use glam::{DVec2, dvec2};

use super::matrix::AffineMatrix2D;
use super::rect::Rect;

/// An immutable position in the plane. Freely copyable, value equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Polar offset: the point at `distance` from `base` in direction `angle`.
    pub fn polar(base: Point, angle: f64, distance: f64) -> Self {
        Point {
            x: base.x + distance * angle.cos(),
            y: base.y + distance * angle.sin(),
        }
    }

    pub(crate) fn to_dvec2(self) -> DVec2 {
        dvec2(self.x, self.y)
    }

    pub(crate) fn from_dvec2(v: DVec2) -> Self {
        Point { x: v.x, y: v.y }
    }

    /// Direction from `self` to `p` via two-argument arctangent, in radians.
    pub fn angle_to(&self, p: Point) -> f64 {
        (p.y - self.y).atan2(p.x - self.x)
    }

    /// Euclidean distance to `p`.
    pub fn distance_to(&self, p: Point) -> f64 {
        self.to_dvec2().distance(p.to_dvec2())
    }

    pub fn midpoint(&self, p: Point) -> Point {
        Point::new(self.x + (p.x - self.x) / 2.0, self.y + (p.y - self.y) / 2.0)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Rotate around `pivot` (origin when `None`).
    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Point {
        let o = pivot.unwrap_or(Point::ZERO);
        let (sin, cos) = angle.sin_cos();

        Point::new(
            cos * (self.x - o.x) - sin * (self.y - o.y) + o.x,
            sin * (self.x - o.x) + cos * (self.y - o.y) + o.y,
        )
    }

    /// Scale away from `pivot` (origin when `None`).
    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Point {
        match pivot {
            None => Point::new(self.x * factor, self.y * factor),
            Some(o) => Point::new(
                (self.x - o.x) * factor + o.x,
                (self.y - o.y) * factor + o.y,
            ),
        }
    }

    /// Point reflection: the image of `self` on the far side of `around`.
    pub fn mirror(&self, around: Point) -> Point {
        Point::new(around.x * 2.0 - self.x, around.y * 2.0 - self.y)
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> Point {
        Point::new(
            self.x * m.xx + self.y * m.xy + m.tx,
            self.x * m.yx + self.y * m.yy + m.ty,
        )
    }

    /// A point's bounding box is the degenerate box at the point itself.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(*self, *self)
    }
}

/// An immutable displacement in the plane, distinct from `Point`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Vector { dx, dy }
    }

    pub fn length(&self) -> f64 {
        dvec2(self.dx, self.dy).length()
    }

    /// Direction of the displacement, in radians.
    pub fn angle(&self) -> f64 {
        self.dy.atan2(self.dx)
    }

    /// Unit vector in the same direction.
    ///
    /// A zero-length vector yields NaN components; the degeneracy is
    /// propagated rather than validated.
    pub fn normalized(&self) -> Vector {
        let len = self.length();
        Vector::new(self.dx / len, self.dy / len)
    }

    pub fn rotate(&self, angle: f64) -> Vector {
        let (sin, cos) = angle.sin_cos();
        Vector::new(cos * self.dx - sin * self.dy, sin * self.dx + cos * self.dy)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.dx, self.y + v.dy)
    }
}

impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, p: Point) -> Vector {
        Vector::new(self.x - p.x, self.y - p.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, r: f64) -> Vector {
        Vector::new(self.dx * r, self.dy * r)
    }
}
