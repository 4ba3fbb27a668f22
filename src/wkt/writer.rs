//! Canonical WKT output.

use std::fmt::Write as _;

use crate::dispatch::Geometry;
use crate::errors::WktError;
use crate::geom::{MultiPoint, MultiPolyline, Point, Poly};

/// Writes a geometry in canonical form: one space after the keyword, a
/// comma (no spaces) between coordinates, integral values without a
/// trailing `.0`.
pub fn write(geometry: &Geometry) -> Result<String, WktError> {
    match geometry {
        Geometry::Point(p) => Ok(format!("POINT ({})", coord(*p))),
        Geometry::Poly(poly) => Ok(format!("LINESTRING ({})", coords(poly.points()))),
        Geometry::MultiPoint(mp) => Ok(format!("MULTIPOINT ({})", coords(mp.points()))),
        Geometry::MultiPolyline(mpl) => Ok(format!("MULTILINESTRING ({})", groups(mpl))),
        other => Err(WktError::UnsupportedGeometry {
            kind: kind_name(other),
        }),
    }
}

fn coord(p: Point) -> String {
    format!("{} {}", p.x, p.y)
}

fn coords(points: &[Point]) -> String {
    let mut out = String::new();

    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", coord(*p));
    }

    out
}

fn groups(mpl: &MultiPolyline) -> String {
    let mut out = String::new();

    for (i, poly) in mpl.polys().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "({})", coords(poly.points()));
    }

    out
}

fn kind_name(geometry: &Geometry) -> &'static str {
    use crate::dispatch::GeometryOps;
    geometry.kind()
}
