use thiserror::Error;

use crate::math::Coordinate;

/// Top-level error type for the conica kernel.
#[derive(Debug, Error)]
pub enum ConicaError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Intersection(#[from] IntersectionError),
}

/// Errors raised while constructing or querying a single curve.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("not supported: {0}")]
    NotSupported(&'static str),
}

/// Errors raised while assigning the limits of a curve range.
#[derive(Debug, Error)]
pub enum RangeError {
    #[error("{curve} does not support {capability} positions")]
    UnsupportedRepresentation {
        curve: &'static str,
        capability: &'static str,
    },

    #[error("no point of the curve at {parameter} = {value}")]
    OffCurve { parameter: &'static str, value: f64 },

    #[error("coordinate {0} does not lie on the curve")]
    CoordinateNotOnCurve(Coordinate),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Topological conflicts between two curves.
///
/// An empty intersection is not an error; these variants are only raised
/// when the question itself has no finite answer.
#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("curves overlap and share infinitely many points")]
    OverlappingCurves,

    #[error("a curve cannot be intersected with itself")]
    SelfIntersection,
}

/// Convenience type alias for results using [`ConicaError`].
pub type Result<T> = std::result::Result<T, ConicaError>;
