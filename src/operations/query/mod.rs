mod closest_point;
mod intersect;
mod length;

pub use closest_point::{PerpendicularProjection, Projection};
pub use intersect::{CurveCurveIntersect, IntersectionKind, IntersectionResult};
pub use length::Length;
