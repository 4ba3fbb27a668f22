//! Geometric primitives and the operations between them.

pub mod circle;
pub mod curve;
pub mod ellipse;
pub mod matrix;
pub mod multi;
pub mod point;
pub mod poly;
pub mod rect;
pub mod segment;
pub mod spline;
pub mod util;

pub use circle::{Arc, Circle};
pub use curve::{Bezier, MAX_ORDER};
pub use ellipse::Ellipse;
pub use matrix::AffineMatrix2D;
pub use multi::{MultiGeometry, MultiPoint, MultiPolyline};
pub use point::{Point, Vector};
pub use poly::Poly;
pub use rect::Rect;
pub use segment::LineSegment;
pub use spline::Spline;
