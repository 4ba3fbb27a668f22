//! 2D affine transform algebra.
//!
//! An `AffineMatrix2D` is the top two rows of a 3x3 homogeneous matrix:
//!
//! ```text
//! | xx  xy  tx |   | x |
//! | yx  yy  ty | * | y |
//! |  0   0   1 |   | 1 |
//! ```
//!
//! Composition is associative but not commutative. The fluent methods
//! (`translate`, `rotate`, ...) prepend in application order: `m.translate(..)`
//! applies the translation first and `m` second.

use std::ops::Mul;

use super::point::Point;
use super::segment::LineSegment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMatrix2D {
    pub xx: f64,
    pub xy: f64,
    pub yx: f64,
    pub yy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl AffineMatrix2D {
    pub const IDENTITY: AffineMatrix2D = AffineMatrix2D::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    /// Reflection across the x axis (y negated).
    pub const MIRROR_X: AffineMatrix2D = AffineMatrix2D::new(1.0, 0.0, 0.0, -1.0, 0.0, 0.0);

    /// Reflection across the y axis (x negated).
    pub const MIRROR_Y: AffineMatrix2D = AffineMatrix2D::new(-1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(xx: f64, xy: f64, yx: f64, yy: f64, tx: f64, ty: f64) -> Self {
        AffineMatrix2D { xx, xy, yx, yy, tx, ty }
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        AffineMatrix2D::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Scale away from `pivot` instead of the origin.
    pub fn scale_about(sx: f64, sy: f64, pivot: Point) -> Self {
        AffineMatrix2D::translation(pivot.x, pivot.y)
            .scaled(sx, sy)
            .translate(-pivot.x, -pivot.y)
    }

    pub const fn translation(dx: f64, dy: f64) -> Self {
        AffineMatrix2D::new(1.0, 0.0, 0.0, 1.0, dx, dy)
    }

    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        AffineMatrix2D::new(cos, -sin, sin, cos, 0.0, 0.0)
    }

    /// Rotate around `pivot` instead of the origin.
    pub fn rotation_about(angle: f64, pivot: Point) -> Self {
        AffineMatrix2D::translation(pivot.x, pivot.y)
            .rotate(angle)
            .translate(-pivot.x, -pivot.y)
    }

    /// Point reflection: maps every point to its image on the far side of `p`.
    pub const fn mirror_point(p: Point) -> Self {
        AffineMatrix2D::new(-1.0, 0.0, 0.0, -1.0, 2.0 * p.x, 2.0 * p.y)
    }

    /// Reflection across the infinite line through `line`.
    pub fn mirror_line(line: &LineSegment) -> Self {
        let angle = line.angle();
        let p = line.start();

        AffineMatrix2D::translation(p.x, p.y)
            .rotate(angle)
            .compose(Self::MIRROR_X)
            .rotate(-angle)
            .translate(-p.x, -p.y)
    }

    /// Apply a scale before this matrix.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        self * AffineMatrix2D::scale(sx, sy)
    }

    /// Apply a translation before this matrix.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        self * AffineMatrix2D::translation(dx, dy)
    }

    /// Apply a rotation before this matrix.
    pub fn rotate(self, angle: f64) -> Self {
        self * AffineMatrix2D::rotation(angle)
    }

    /// Apply an arbitrary matrix before this one.
    pub fn compose(self, m: AffineMatrix2D) -> Self {
        self * m
    }

    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// The inverse transform, or `None` when the determinant is exactly zero.
    ///
    /// The zero check is exact on purpose: a nearly-singular matrix still
    /// inverts (with large coefficients), matching the rest of the kernel's
    /// no-epsilon policy.
    pub fn invert(&self) -> Option<AffineMatrix2D> {
        let det = self.determinant();

        if det == 0.0 {
            return None;
        }

        Some(AffineMatrix2D::new(
            self.yy / det,
            -self.xy / det,
            -self.yx / det,
            self.xx / det,
            (self.xy * self.ty - self.yy * self.tx) / det,
            (self.yx * self.tx - self.xx * self.ty) / det,
        ))
    }

    pub fn apply(&self, p: Point) -> Point {
        p.transform(self)
    }
}

impl Mul for AffineMatrix2D {
    type Output = AffineMatrix2D;

    /// `(m1 * m2).apply(p) == m1.apply(m2.apply(p))`: the right factor acts first.
    fn mul(self, m: AffineMatrix2D) -> AffineMatrix2D {
        AffineMatrix2D::new(
            self.xx * m.xx + self.xy * m.yx,
            self.xx * m.xy + self.xy * m.yy,
            self.yx * m.xx + self.yy * m.yx,
            self.yx * m.xy + self.yy * m.yy,
            self.xx * m.tx + self.xy * m.ty + self.tx,
            self.yx * m.tx + self.yy * m.ty + self.ty,
        )
    }
}
