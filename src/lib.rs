//! planar: a 2D geometry kernel.
//!
//! Immutable value types for points, vectors, affine transforms, Bezier
//! curves, polygons and aggregates, plus capability-based pairwise
//! intersection and overlap testing over the [`dispatch::Geometry`] enum.
//! Boundary collaborators: [`wkt`] for well-known text, [`geo`] for
//! geographic coordinates and geohashes, [`drawing`] for paint attributes.
//!
//! ```
//! use planar::dispatch::{self, Geometry};
//! use planar::geom::{Circle, Point};
//!
//! let a = Geometry::from(Circle::new(Point::ZERO, 10.0));
//! let b = Geometry::from(Circle::new(Point::new(15.0, 0.0), 5.0));
//!
//! assert_eq!(dispatch::intersects(&a, &b), Ok(true));
//! ```

pub mod dispatch;
pub mod drawing;
pub mod errors;
pub mod geo;
pub mod geom;
pub mod log;
pub mod wkt;

pub use dispatch::{Geometry, GeometryOps, Pairwise, intersections, intersects, overlaps};
pub use errors::{DispatchError, GeometryError, WktError};
pub use geom::{
    AffineMatrix2D, Arc, Bezier, Circle, Ellipse, LineSegment, MultiGeometry, MultiPoint,
    MultiPolyline, Point, Poly, Rect, Spline, Vector,
};
