use std::ptr;

use crate::error::{GeometryError, IntersectionError, Result};
use crate::geometry::curve::{CartesianCurve, CircularCurve, ConicSection, Curve, LinearCurve};
use crate::math::intersect_2d::{point_at, radical_line_2d, DEGENERATE_COEFFICIENT};
use crate::math::{Coordinate, Tolerance};

/// How two curves meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionKind {
    /// No shared point.
    None,
    /// Exactly one shared point where the curves touch.
    Tangent,
    /// The curves cross.
    Intersecting,
}

/// Result of a curve-curve intersection.
///
/// `coordinates` is empty for [`IntersectionKind::None`], holds one point for
/// a tangency, and one or two points for a crossing. Points are sorted by x,
/// then y, so the result does not depend on operand order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionResult {
    pub kind: IntersectionKind,
    pub coordinates: Vec<Coordinate>,
}

impl IntersectionResult {
    fn none() -> Self {
        Self {
            kind: IntersectionKind::None,
            coordinates: Vec::new(),
        }
    }
}

/// Computes the shared points of two curves.
///
/// Covers line-line, line-conic and circle-circle pairs. Other conic pairs
/// are reported as unsupported.
pub struct CurveCurveIntersect<'a> {
    first: &'a Curve,
    second: &'a Curve,
}

impl<'a> CurveCurveIntersect<'a> {
    /// Creates a new `CurveCurveIntersect` query.
    #[must_use]
    pub fn new(first: &'a Curve, second: &'a Curve) -> Self {
        Self { first, second }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// - [`IntersectionError::SelfIntersection`] if both operands are the same curve.
    /// - [`IntersectionError::OverlappingCurves`] if the curves share infinitely many points.
    /// - [`GeometryError::Degenerate`] if a line is a single point.
    /// - [`GeometryError::NotSupported`] for conic pairs other than two circles.
    pub fn execute(&self) -> Result<IntersectionResult> {
        if ptr::eq(self.first, self.second) {
            return Err(IntersectionError::SelfIntersection.into());
        }
        let tolerance = Tolerance::governing(self.first.tolerance(), self.second.tolerance());

        let mut result = match (self.first, self.second) {
            (Curve::Line(a), Curve::Line(b)) => intersect_lines(a, b, tolerance)?,
            (Curve::Line(line), other) | (other, Curve::Line(line)) => {
                let conic = other
                    .as_conic()
                    .ok_or(GeometryError::NotSupported("line paired with a non-conic curve"))?;
                intersect_line_conic(line, conic, tolerance)?
            }
            (Curve::Circle(a), Curve::Circle(b)) => intersect_circles(a, b, tolerance)?,
            (first, second) => {
                if first == second {
                    return Err(IntersectionError::OverlappingCurves.into());
                }
                return Err(GeometryError::NotSupported("intersection of non-circular conics").into());
            }
        };

        result
            .coordinates
            .sort_by(|a, b| a.x().total_cmp(&b.x()).then(a.y().total_cmp(&b.y())));
        tracing::debug!(
            kind = ?result.kind,
            count = result.coordinates.len(),
            "classified curve pair"
        );
        Ok(result)
    }

    /// Returns true if the curves touch at exactly one point.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn is_tangent(&self) -> Result<bool> {
        Ok(self.execute()?.kind == IntersectionKind::Tangent)
    }

    /// Returns true if the curves cross.
    ///
    /// # Errors
    ///
    /// See [`Self::execute`].
    pub fn is_intersecting(&self) -> Result<bool> {
        Ok(self.execute()?.kind == IntersectionKind::Intersecting)
    }
}

fn intersect_lines(a: &LinearCurve, b: &LinearCurve, tolerance: Tolerance) -> Result<IntersectionResult> {
    if a.is_point() || b.is_point() {
        return Err(GeometryError::Degenerate("intersection with a point line".into()).into());
    }
    if a.is_parallel(b) {
        if b.is_intersecting_coordinate(&a.i().with_tolerance(tolerance)) {
            return Err(IntersectionError::OverlappingCurves.into());
        }
        return Ok(IntersectionResult::none());
    }
    Ok(IntersectionResult {
        kind: IntersectionKind::Intersecting,
        coordinates: vec![a.intersection_coordinate(b).with_tolerance(tolerance)],
    })
}

/// Substitutes the line into the conic's global equation and solves for the
/// line parameter.
///
/// A collapsed double root is a tangency. A single root of a degenerate
/// (linear) equation is a crossing: the line runs along the parabola's axis
/// or parallel to a hyperbola's asymptote.
pub(crate) fn intersect_line_conic(
    line: &LinearCurve,
    conic: &dyn ConicSection,
    tolerance: Tolerance,
) -> Result<IntersectionResult> {
    let direction = line.tangent()?;
    let origin = line.i().point();
    let implicit = conic.conic().implicit();
    let [quadratic, _, _] = implicit.line_coefficients(&origin, &direction);

    let coordinates: Vec<Coordinate> = implicit
        .line_params(&origin, &direction, tolerance.value())
        .into_iter()
        .map(|t| Coordinate::from(point_at(&origin, &direction, t)).with_tolerance(tolerance))
        .collect();

    let kind = match coordinates.len() {
        0 => IntersectionKind::None,
        1 if quadratic.abs() >= DEGENERATE_COEFFICIENT => IntersectionKind::Tangent,
        _ => IntersectionKind::Intersecting,
    };
    Ok(IntersectionResult { kind, coordinates })
}

/// Classifies two circles by the distance between their centers, then
/// intersects the radical line with the first circle.
fn intersect_circles(
    a: &CircularCurve,
    b: &CircularCurve,
    tolerance: Tolerance,
) -> Result<IntersectionResult> {
    let (center_a, center_b) = (a.center(), b.center());
    let (radius_a, radius_b) = (a.radius(), b.radius());
    let distance = center_a.distance_to(&center_b);

    if tolerance.is_zero(distance) {
        if tolerance.equals(radius_a, radius_b) {
            return Err(IntersectionError::OverlappingCurves.into());
        }
        return Ok(IntersectionResult::none());
    }

    let outer = radius_a + radius_b;
    let inner = (radius_a - radius_b).abs();
    let tangent = tolerance.equals(distance, outer) || tolerance.equals(distance, inner);
    if !tangent && (distance > outer || distance < inner) {
        return Ok(IntersectionResult::none());
    }

    let Some((foot, direction)) = radical_line_2d(
        &center_a.point(),
        radius_a,
        &center_b.point(),
        radius_b,
        tolerance.value(),
    ) else {
        return Ok(IntersectionResult::none());
    };

    // At tangency the radical line touches both circles at its foot.
    if tangent {
        return Ok(IntersectionResult {
            kind: IntersectionKind::Tangent,
            coordinates: vec![Coordinate::from(foot).with_tolerance(tolerance)],
        });
    }

    let radical = LinearCurve::new(Coordinate::from(foot), Coordinate::from(foot + direction))
        .with_tolerance(tolerance);
    let mut result = intersect_line_conic(&radical, a, tolerance)?;
    if !result.coordinates.is_empty() {
        result.kind = IntersectionKind::Intersecting;
    }
    Ok(result)
}
