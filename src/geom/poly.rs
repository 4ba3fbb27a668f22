//! Open polylines and closed polygons over one point-sequence type.

use std::sync::OnceLock;

use crate::errors::GeometryError;

use super::matrix::AffineMatrix2D;
use super::point::Point;
use super::rect::Rect;
use super::segment::LineSegment;
use super::util;

/// An ordered point sequence, open (polyline) or closed (polygon).
///
/// A closed poly implicitly connects its last point back to the first for
/// segment iteration, containment, and length. The bounding box is computed
/// on first use and cached; the value never changes since the points don't.
#[derive(Debug, Clone)]
pub struct Poly {
    points: Vec<Point>,
    closed: bool,
    bbox: OnceLock<Rect>,
}

impl PartialEq for Poly {
    fn eq(&self, other: &Self) -> bool {
        self.closed == other.closed && self.points == other.points
    }
}

impl Poly {
    pub fn polyline(points: Vec<Point>) -> Self {
        Poly {
            points,
            closed: false,
            bbox: OnceLock::new(),
        }
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Poly {
            points,
            closed: true,
            bbox: OnceLock::new(),
        }
    }

    fn like_self(&self, points: Vec<Point>) -> Poly {
        Poly {
            points,
            closed: self.closed,
            bbox: OnceLock::new(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Edges in order, including the closing edge for polygons.
    pub fn segments(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let wrap = if self.closed && self.points.len() > 1 {
            Some(LineSegment::new(self.points[self.points.len() - 1], self.points[0]))
        } else {
            None
        };

        self.points
            .windows(2)
            .map(|w| LineSegment::new(w[0], w[1]))
            .chain(wrap)
    }

    pub fn length(&self) -> f64 {
        util::points_length(&self.points, self.closed)
    }

    /// Even-odd containment test. Only meaningful on a closed polygon.
    pub fn is_point_inside(&self, p: Point) -> Result<bool, GeometryError> {
        if !self.closed {
            return Err(GeometryError::NotClosed { op: "is_point_inside" });
        }

        let pts = &self.points;
        if pts.is_empty() {
            return Ok(false);
        }

        let mut inside = false;
        let mut j = pts.len() - 1;

        for i in 0..pts.len() {
            if ((pts[i].y >= p.y) != (pts[j].y >= p.y))
                && p.x <= (pts[j].x - pts[i].x) * (p.y - pts[i].y) / (pts[j].y - pts[i].y) + pts[i].x
            {
                inside = !inside;
            }
            j = i;
        }

        Ok(inside)
    }

    /// Unsigned shoelace area. Only meaningful on a closed polygon.
    pub fn area(&self) -> Result<f64, GeometryError> {
        if !self.closed {
            return Err(GeometryError::NotClosed { op: "area" });
        }

        let pts = &self.points;
        if pts.is_empty() {
            return Ok(0.0);
        }

        let mut doubled = 0.0;
        let mut j = pts.len() - 1;

        for i in 0..pts.len() {
            doubled += pts[j].x * pts[i].y - pts[i].x * pts[j].y;
            j = i;
        }

        Ok((doubled / 2.0).abs())
    }

    /// Douglas-Peucker reduction: drops points whose perpendicular distance
    /// from the enclosing chord stays within `tolerance`. The first and last
    /// points always survive; a run of leading/trailing duplicates collapses
    /// to that pair.
    pub fn simplify(&self, tolerance: f64) -> Poly {
        self.like_self(douglas_peucker(&self.points, tolerance))
    }

    pub fn bounding_box(&self) -> Rect {
        *self.bbox.get_or_init(|| {
            let mut min = Point::new(f64::MAX, f64::MAX);
            let mut max = Point::new(f64::MIN, f64::MIN);

            for p in &self.points {
                min = Point::new(min.x.min(p.x), min.y.min(p.y));
                max = Point::new(max.x.max(p.x), max.y.max(p.y));
            }

            Rect::new(min, max)
        })
    }

    pub fn closest_point(&self, p: Point) -> Point {
        util::closest_of(self.segments().map(|s| s.closest_point(p)), p)
            .unwrap_or_else(|| self.points.first().copied().unwrap_or(Point::ZERO))
    }

    /// Edge-pair test, plus a containment check so that one shape fully
    /// inside the other still counts. Containment is probed with a single
    /// vertex, which is exact here because edge crossings were ruled out.
    pub fn intersects(&self, other: &Poly) -> bool {
        if self
            .segments()
            .any(|seg| other.segments().any(|o| seg.intersects(&o)))
        {
            return true;
        }

        let contains = |poly: &Poly, pts: &[Point]| {
            poly.closed && pts.first().is_some_and(|p| poly.is_point_inside(*p) == Ok(true))
        };
        contains(self, &other.points) || contains(other, &self.points)
    }

    pub fn intersections(&self, other: &Poly) -> Vec<Point> {
        self.segments()
            .flat_map(|seg| {
                other
                    .segments()
                    .filter_map(move |o| o.intersection(&seg))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn intersects_segment(&self, segment: &LineSegment) -> bool {
        self.segments().any(|seg| seg.intersects(segment))
            || (self.closed && self.is_point_inside(segment.start()) == Ok(true))
    }

    pub fn intersections_with_segment(&self, segment: &LineSegment) -> Vec<Point> {
        self.segments()
            .filter_map(|seg| seg.intersection(segment))
            .collect()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Poly {
        self.like_self(self.points.iter().map(|p| p.translate(dx, dy)).collect())
    }

    pub fn rotate(&self, angle: f64, pivot: Option<Point>) -> Poly {
        self.like_self(self.points.iter().map(|p| p.rotate(angle, pivot)).collect())
    }

    pub fn scale(&self, factor: f64, pivot: Option<Point>) -> Poly {
        self.like_self(self.points.iter().map(|p| p.scale(factor, pivot)).collect())
    }

    pub fn transform(&self, m: &AffineMatrix2D) -> Poly {
        self.like_self(self.points.iter().map(|p| p.transform(m)).collect())
    }
}

fn douglas_peucker(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let first = 0;
    let mut last = points.len() - 1;
    let mut keep = vec![first, points.len() - 1];

    // Trailing points equal to the first carry no chord information.
    while last >= first && points[first] == points[last] {
        if last == 0 {
            break;
        }
        last -= 1;
    }

    if last > first {
        reduce(points, first, last, tolerance, &mut keep);
    }

    keep.sort_unstable();
    keep.into_iter().map(|i| points[i]).collect()
}

fn reduce(points: &[Point], first: usize, last: usize, tolerance: f64, keep: &mut Vec<usize>) {
    let mut max_distance = 0.0;
    let mut farthest = 0;

    for index in first..last {
        let distance = perpendicular_distance(points[first], points[last], points[index]);
        if distance > max_distance {
            max_distance = distance;
            farthest = index;
        }
    }

    if max_distance > tolerance && farthest != 0 {
        keep.push(farthest);

        reduce(points, first, farthest, tolerance, keep);
        reduce(points, farthest, last, tolerance, keep);
    }
}

fn perpendicular_distance(p1: Point, p2: Point, p: Point) -> f64 {
    let area = (0.5
        * (p1.x * p2.y + p2.x * p.y + p.x * p1.y - p2.x * p1.y - p.x * p2.y - p1.x * p.y))
        .abs();
    let base = ((p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)).sqrt();

    area / base * 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Poly {
        Poly::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn segment_iteration_honors_the_closed_flag() {
        let square = unit_square();
        assert_eq!(square.segments().count(), 4);
        assert_eq!(square.length(), 40.0);

        let open = Poly::polyline(square.points().to_vec());
        assert_eq!(open.segments().count(), 3);
        assert_eq!(open.length(), 30.0);
    }

    #[test]
    fn even_odd_containment() {
        let square = unit_square();

        assert_eq!(square.is_point_inside(Point::new(5.0, 5.0)), Ok(true));
        assert_eq!(square.is_point_inside(Point::new(15.0, 5.0)), Ok(false));
        assert_eq!(square.is_point_inside(Point::new(-1.0, -1.0)), Ok(false));

        let open = Poly::polyline(square.points().to_vec());
        assert!(matches!(
            open.is_point_inside(Point::new(5.0, 5.0)),
            Err(GeometryError::NotClosed { .. })
        ));
    }

    #[test]
    fn concave_polygon_containment() {
        // A "U" shape; the notch between the arms is outside.
        let u = Poly::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(9.0, 0.0),
            Point::new(9.0, 9.0),
            Point::new(6.0, 9.0),
            Point::new(6.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 9.0),
            Point::new(0.0, 9.0),
        ]);

        assert_eq!(u.is_point_inside(Point::new(1.5, 6.0)), Ok(true));
        assert_eq!(u.is_point_inside(Point::new(4.5, 6.0)), Ok(false));
        assert_eq!(u.is_point_inside(Point::new(4.5, 1.5)), Ok(true));
    }

    #[test]
    fn shoelace_area() {
        assert_eq!(unit_square().area(), Ok(100.0));

        let triangle = Poly::polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(0.0, 3.0),
        ]);
        assert_eq!(triangle.area(), Ok(6.0));

        // Winding order must not affect the magnitude.
        let reversed = Poly::polygon(triangle.points().iter().rev().copied().collect());
        assert_eq!(reversed.area(), Ok(6.0));

        assert!(Poly::polyline(vec![Point::ZERO, Point::new(1.0, 0.0)])
            .area()
            .is_err());
    }

    #[test]
    fn simplify_collapses_coincident_points() {
        let p = Point::new(20.0, 10.0);
        let line = Poly::polyline(vec![p; 5]);

        let simplified = line.simplify(0.1);
        assert_eq!(simplified.points(), &[p, p]);
    }

    #[test]
    fn simplify_keeps_significant_points() {
        let line = Poly::polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 2.0),
            Point::new(2.0, -1.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 0.0),
        ]);

        let simplified = line.simplify(1e-9);
        assert_eq!(simplified.points(), line.points());
    }

    #[test]
    fn simplify_drops_near_collinear_points() {
        let line = Poly::polyline(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.001),
            Point::new(10.0, 0.0),
        ]);

        let simplified = line.simplify(0.1);
        assert_eq!(
            simplified.points(),
            &[Point::new(0.0, 0.0), Point::new(10.0, 0.0)]
        );
    }

    #[test]
    fn bounding_box_is_cached_and_stable() {
        let square = unit_square();
        let b1 = square.bounding_box();
        let b2 = square.bounding_box();

        assert_eq!(b1, b2);
        assert_eq!(b1, Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
    }

    #[test]
    fn poly_poly_intersection() {
        let square = unit_square();
        let crossing = Poly::polyline(vec![Point::new(-5.0, 5.0), Point::new(15.0, 5.0)]);
        let inner = Poly::polygon(vec![
            Point::new(4.0, 4.0),
            Point::new(6.0, 4.0),
            Point::new(6.0, 6.0),
            Point::new(4.0, 6.0),
        ]);
        let far = Poly::polyline(vec![Point::new(20.0, 20.0), Point::new(30.0, 20.0)]);

        assert!(square.intersects(&crossing));
        assert_eq!(square.intersections(&crossing).len(), 2);

        // Fully contained: no edge crossings, still an intersection.
        assert!(square.intersects(&inner));
        assert!(inner.intersects(&square));
        assert!(square.intersections(&inner).is_empty());

        assert!(!square.intersects(&far));
    }

    #[test]
    fn poly_segment_intersection() {
        let square = unit_square();

        let crossing = LineSegment::new(Point::new(5.0, -5.0), Point::new(5.0, 15.0));
        assert!(square.intersects_segment(&crossing));
        assert_eq!(square.intersections_with_segment(&crossing).len(), 2);

        let inside = LineSegment::new(Point::new(4.0, 4.0), Point::new(6.0, 6.0));
        assert!(square.intersects_segment(&inside));
        assert!(square.intersections_with_segment(&inside).is_empty());

        let outside = LineSegment::new(Point::new(20.0, 20.0), Point::new(30.0, 30.0));
        assert!(!square.intersects_segment(&outside));
    }

    #[test]
    fn closest_point_lies_on_the_boundary() {
        let square = unit_square();

        assert_eq!(square.closest_point(Point::new(5.0, 13.0)), Point::new(5.0, 10.0));
        assert_eq!(square.closest_point(Point::new(-3.0, -4.0)), Point::new(0.0, 0.0));
    }

    #[test]
    fn transforms_preserve_the_closed_flag() {
        let square = unit_square();
        let moved = square.translate(1.0, 1.0);

        assert!(moved.is_closed());
        assert_eq!(moved.points()[0], Point::new(1.0, 1.0));

        let spun = square.rotate(std::f64::consts::PI, Some(Point::new(5.0, 5.0)));
        assert!((spun.area().unwrap() - 100.0).abs() < 1e-9);
    }
}
