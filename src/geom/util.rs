//! Shared scalar helpers: angle normalization, arc arithmetic, and
//! reductions over point/segment sequences.

use std::f64::consts::{PI, TAU};

use super::point::Point;
use super::rect::Rect;

/// Normalizes an angle into `(-pi, pi]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    if a > PI { a - TAU } else { a }
}

/// Normalizes an angle into `[0, 2*pi)`.
pub fn normalize_angle_positive(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

pub fn arc_length(radius: f64, angle: f64) -> f64 {
    angle * radius
}

pub fn arc_angle(radius: f64, length: f64) -> f64 {
    length / radius
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Total polyline length over a point sequence, optionally closing the loop.
pub fn points_length(points: &[Point], closed: bool) -> f64 {
    let mut len: f64 = points.windows(2).map(|w| w[0].distance_to(w[1])).sum();

    if closed && points.len() > 1 {
        len += points[points.len() - 1].distance_to(points[0]);
    }

    len
}

/// Union of bounding boxes over an iterator of parts.
pub fn bounding_box_of<I>(boxes: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    boxes.into_iter().reduce(|acc, b| acc.union(&b))
}

/// Picks whichever candidate point lies nearest to `p`.
pub fn closest_of<I>(candidates: I, p: Point) -> Option<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut best: Option<(f64, Point)> = None;

    for candidate in candidates {
        let distance = candidate.distance_to(p);
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }

    best.map(|(_, pt)| pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_into_signed_range() {
        assert!((normalize_angle(PI + 1.0) - (-PI + 1.0)).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn normalize_into_positive_range() {
        assert!((normalize_angle_positive(-1.0) - (TAU - 1.0)).abs() < 1e-12);
        assert_eq!(normalize_angle_positive(0.0), 0.0);
        assert!(normalize_angle_positive(TAU).abs() < 1e-12);
    }

    #[test]
    fn arc_conversions_are_inverse() {
        let angle = arc_angle(4.0, arc_length(4.0, 1.3));
        assert!((angle - 1.3).abs() < 1e-12);
    }

    #[test]
    fn open_and_closed_path_length() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];

        assert_eq!(points_length(&square, false), 30.0);
        assert_eq!(points_length(&square, true), 40.0);
        assert_eq!(points_length(&square[..1], true), 0.0);
    }

    #[test]
    fn box_union_and_closest_reduction() {
        let boxes = [
            Rect::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)),
            Rect::new(Point::new(5.0, -2.0), Point::new(6.0, 0.5)),
        ];

        let union = bounding_box_of(boxes).unwrap();
        assert_eq!(union.p1, Point::new(0.0, -2.0));
        assert_eq!(union.p2, Point::new(6.0, 1.0));

        let closest = closest_of(
            [Point::new(10.0, 0.0), Point::new(2.0, 0.0), Point::new(-5.0, 0.0)],
            Point::ZERO,
        );
        assert_eq!(closest, Some(Point::new(2.0, 0.0)));
        assert_eq!(closest_of(std::iter::empty(), Point::ZERO), None);
    }
}
