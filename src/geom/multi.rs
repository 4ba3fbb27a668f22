//! Aggregate containers: collections of points, polylines, or mixed shapes.

use crate::dispatch::{Geometry, GeometryOps};
use crate::errors::GeometryError;

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::poly::Poly;
use super::rect::Rect;
use super::util;

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
}

impl MultiPoint {
    pub fn new(points: Vec<Point>) -> Self {
        MultiPoint { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        util::bounding_box_of(self.points.iter().map(|p| p.bounding_box()))
    }

    pub fn closest_point(&self, p: Point) -> Option<Point> {
        util::closest_of(self.points.iter().copied(), p)
    }

    /// Exact coordinate equality; membership, not proximity.
    pub fn intersects_point(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    pub fn intersections_with_point(&self, p: Point) -> Vec<Point> {
        self.points.iter().copied().filter(|pt| *pt == p).collect()
    }

    pub fn intersects(&self, other: &MultiPoint) -> bool {
        self.points.iter().any(|p| other.points.contains(p))
    }

    pub fn intersections(&self, other: &MultiPoint) -> Vec<Point> {
        self.points
            .iter()
            .copied()
            .filter(|p| other.points.contains(p))
            .collect()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> MultiPoint {
        MultiPoint::new(self.points.iter().map(|p| p.translate(dx, dy)).collect())
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> MultiPoint {
        MultiPoint::new(self.points.iter().map(|p| p.rotate(angle, pivot)).collect())
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> MultiPoint {
        MultiPoint::new(self.points.iter().map(|p| p.scale(factor, pivot)).collect())
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> MultiPoint {
        MultiPoint::new(self.points.iter().map(|p| p.transform(m)).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolyline {
    polys: Vec<Poly>,
}

impl MultiPolyline {
    pub fn new(polys: Vec<Poly>) -> Self {
        MultiPolyline { polys }
    }

    pub fn polys(&self) -> &[Poly] {
        &self.polys
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        util::bounding_box_of(self.polys.iter().map(Poly::bounding_box))
    }

    pub fn closest_point(&self, p: Point) -> Option<Point> {
        util::closest_of(self.polys.iter().map(|poly| poly.closest_point(p)), p)
    }

    pub fn intersects(&self, other: &Poly) -> bool {
        self.polys.iter().any(|poly| poly.intersects(other))
    }

    pub fn intersections(&self, other: &Poly) -> Vec<Point> {
        self.polys
            .iter()
            .flat_map(|poly| poly.intersections(other))
            .collect()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> MultiPolyline {
        MultiPolyline::new(self.polys.iter().map(|p| p.translate(dx, dy)).collect())
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> MultiPolyline {
        MultiPolyline::new(self.polys.iter().map(|p| p.rotate(angle, pivot)).collect())
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> MultiPolyline {
        MultiPolyline::new(self.polys.iter().map(|p| p.scale(factor, pivot)).collect())
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> MultiPolyline {
        MultiPolyline::new(self.polys.iter().map(|p| p.transform(m)).collect())
    }
}

/// Heterogeneous collection over the [`Geometry`] enum.
///
/// Transforms apply element-wise and fail as a whole if any child rejects
/// the operation (an axis-aligned box cannot rotate, for one).
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGeometry {
    children: Vec<Geometry>,
}

impl MultiGeometry {
    pub fn new(children: Vec<Geometry>) -> Self {
        MultiGeometry { children }
    }

    pub fn children(&self) -> &[Geometry] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn bounding_box(&self) -> Option<Rect> {
        util::bounding_box_of(self.children.iter().map(|g| g.bounding_box()))
    }

    pub fn closest_point(&self, p: Point) -> Option<Point> {
        util::closest_of(
            self.children.iter().filter_map(|g| g.closest_point(p)),
            p,
        )
    }

    pub fn translate(&self, dx: f64, dy: f64) -> MultiGeometry {
        MultiGeometry::new(self.children.iter().map(|g| g.translate(dx, dy)).collect())
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Result<MultiGeometry, GeometryError> {
        Ok(MultiGeometry::new(
            self.children
                .iter()
                .map(|g| g.rotate(angle, pivot))
                .collect::<Result<_, _>>()?,
        ))
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> MultiGeometry {
        MultiGeometry::new(
            self.children
                .iter()
                .map(|g| g.scale(factor, pivot))
                .collect(),
        )
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> Result<MultiGeometry, GeometryError> {
        Ok(MultiGeometry::new(
            self.children
                .iter()
                .map(|g| g.transform(m))
                .collect::<Result<_, _>>()?,
        ))
    }
}
