//! Error types for the geometry kernel and its boundary collaborators.
//!
//! Kernel errors are plain thiserror enums; WKT parse errors additionally
//! carry source spans for miette diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Errors raised by geometric constructions and operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A curve was constructed with more control points than the kernel
    /// supports (orders 0 through 6).
    #[error("unsupported curve order {order} (supported: 0 to {max})")]
    UnsupportedOrder { order: usize, max: usize },

    /// A curve was constructed with no control points at all.
    #[error("a curve needs at least one control point")]
    EmptyCurve,

    /// Sampling a curve needs at least 3 points to be meaningful.
    #[error("need at least 3 sample points on a curve, got {wanted}")]
    TooFewSamples { wanted: usize },

    /// The operation is only defined for closed shapes.
    #[error("{op} requires a closed shape")]
    NotClosed { op: &'static str },

    /// The shape has no closed-form result for this transform; callers
    /// should convert to a general polygon first.
    #[error("{op} is not supported for {kind}; convert to a polygon first")]
    UnsupportedTransform {
        kind: &'static str,
        op: &'static str,
    },
}

/// Failure to resolve a pairwise operation between two shape kinds.
///
/// Fatal to the calling operation: there is nothing transient to retry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("no {op} rule known for {lhs} vs {rhs}")]
    NoRule {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
}

/// Errors from the WKT text format.
#[derive(Error, Diagnostic, Debug)]
pub enum WktError {
    #[error("malformed WKT")]
    #[diagnostic(code(planar::wkt::syntax))]
    Syntax {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
        message: String,
    },

    /// The writer only understands point, polyline and multi-* geometries.
    #[error("cannot write {kind} as WKT")]
    #[diagnostic(code(planar::wkt::unsupported_geometry))]
    UnsupportedGeometry { kind: &'static str },
}
