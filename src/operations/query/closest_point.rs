use crate::error::{GeometryError, Result};
use crate::geometry::curve::{CircularCurve, Curve, CurveShape, LinearCurve};
use crate::math::{Coordinate, Tolerance};

use super::intersect::intersect_line_conic;

/// Feet of the perpendiculars dropped from a point onto a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// The foot nearest to the query point.
    pub near: Coordinate,
    /// The foot farthest from the query point; equal to `near` for lines.
    pub far: Coordinate,
}

/// Projects a point perpendicularly onto a curve.
pub struct PerpendicularProjection<'a> {
    curve: &'a Curve,
    point: Coordinate,
}

impl<'a> PerpendicularProjection<'a> {
    /// Creates a new `PerpendicularProjection` query.
    #[must_use]
    pub fn new(curve: &'a Curve, point: Coordinate) -> Self {
        Self { curve, point }
    }

    /// Executes the query.
    ///
    /// A circle's own center has no defined direction: both feet come back
    /// as `(+∞, +∞)` and `(−∞, −∞)` instead of an error.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] for a point line, or
    /// [`GeometryError::NotSupported`] for non-circular conics.
    pub fn execute(&self) -> Result<Projection> {
        match self.curve {
            Curve::Line(line) => {
                let foot = line.coordinate_of_perpendicular_projection(&self.point)?;
                Ok(Projection { near: foot, far: foot })
            }
            Curve::Circle(circle) => project_onto_circle(circle, &self.point),
            Curve::Ellipse(_) | Curve::Parabola(_) | Curve::Hyperbola(_) => Err(
                GeometryError::NotSupported("perpendicular projection onto a non-circular conic").into(),
            ),
        }
    }
}

/// Intersects the ray from the center through `point` with the circle.
fn project_onto_circle(circle: &CircularCurve, point: &Coordinate) -> Result<Projection> {
    let tolerance = Tolerance::governing(circle.tolerance(), point.tolerance());
    let center = circle.center().with_tolerance(tolerance);
    if center == *point {
        return Ok(Projection {
            near: Coordinate::infinity().with_tolerance(tolerance),
            far: Coordinate::neg_infinity().with_tolerance(tolerance),
        });
    }

    let ray = LinearCurve::new(center, point.with_tolerance(tolerance));
    let mut feet = intersect_line_conic(&ray, circle, tolerance)?.coordinates;
    feet.sort_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)));
    match feet.as_slice() {
        [near, far] => Ok(Projection { near: *near, far: *far }),
        _ => Err(GeometryError::Degenerate(format!(
            "ray from {center} through {point} does not cross the circle twice"
        ))
        .into()),
    }
}
