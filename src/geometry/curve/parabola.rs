use std::fmt;

use crate::error::{GeometryError, RangeError, Result};
use crate::math::{Angle, Coordinate, Tolerance};

use super::conic::{impl_conic_capabilities, Conic, ConicSection};
use super::range::CurveRange;
use super::{CartesianCurve, PolarCurve};

/// A parabola given by its vertex and focus.
///
/// The local origin is the vertex and the curve opens toward the focus.
/// In local coordinates it reads `t² = 4a·s` with `a` the focal length.
/// The range starts closed on the vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ParabolicCurve {
    conic: Conic,
    range: CurveRange,
}

impl ParabolicCurve {
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the focus coincides with the vertex.
    pub fn new(vertex: Coordinate, focus: Coordinate) -> Result<Self> {
        let tolerance = Tolerance::governing(vertex.tolerance(), focus.tolerance());
        let conic = Conic::parabola(vertex, focus, tolerance)?;
        let range = CurveRange::new(conic.local_origin(), conic.vertex_major(), tolerance);
        Ok(Self { conic, range })
    }

    /// Parabola with focal length `a` opening along `rotation` from `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `a` is not positive.
    pub fn from_focal_length(a: f64, vertex: Coordinate, rotation: &Angle) -> Result<Self> {
        if !vertex.tolerance().is_positive(a) {
            return Err(GeometryError::Degenerate(format!("parabola focal length {a} must be positive")).into());
        }
        Self::new(vertex, vertex.offset(a, rotation))
    }

    /// Rebinds the tolerance of the parabola, its invariants and its range.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        tracing::debug!(%tolerance, "rebinding parabolic curve tolerance");
        self.conic.set_tolerance(tolerance);
        self.range.set_tolerance(tolerance);
    }

    /// Returns the parabola rebound to `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Returns the focal length `a`, the vertex to focus distance.
    #[must_use]
    pub fn focal_length(&self) -> f64 {
        self.conic.semi_major()
    }
}

/// Antiderivative of `√(1 + t²)`, doubled: `t·√(1 + t²) + asinh t`.
fn arc_primitive(t: f64) -> f64 {
    t * t.hypot(1.0) + t.asinh()
}

impl_conic_capabilities!(ParabolicCurve, "parabolic curve");

impl ConicSection for ParabolicCurve {
    fn conic(&self) -> &Conic {
        &self.conic
    }

    /// Arc length between two points of the curve, `a·|F(t₂) − F(t₁)|`.
    fn length_between(&self, start: &Coordinate, end: &Coordinate) -> Result<f64> {
        let mut parameters = [0.0; 2];
        for (parameter, coordinate) in parameters.iter_mut().zip([start, end]) {
            if !self.is_intersecting_coordinate(coordinate) {
                return Err(RangeError::CoordinateNotOnCurve(*coordinate).into());
            }
            *parameter = self.conic.parameter_of(&self.conic.to_local(coordinate));
        }
        let [t1, t2] = parameters;
        Ok(self.focal_length() * (arc_primitive(t2) - arc_primitive(t1)).abs())
    }

    fn range(&self) -> &CurveRange {
        &self.range
    }

    fn range_mut(&mut self) -> &mut CurveRange {
        &mut self.range
    }
}

impl fmt::Display for ParabolicCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parabolic Curve - Vertex: {}, Focus: {}, Rotation: {}",
            self.conic.vertex_major(),
            self.conic.focus(),
            self.rotation()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ConicaError;
    use crate::geometry::curve::{AngularOrigin, CurveShape, LimitPosition, RangeEnd};
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    // Opens upward: x² = 8y shifted to the vertex (1, 1).
    fn fixture() -> ParabolicCurve {
        ParabolicCurve::new(Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 3.0)).unwrap()
    }

    #[test]
    fn dual_construction_is_equivalent() {
        let by_focus = fixture();
        let by_length = ParabolicCurve::from_focal_length(2.0, Coordinate::new(1.0, 1.0), &Angle::new(FRAC_PI_2)).unwrap();

        for parabola in [&by_focus, &by_length] {
            assert_eq!(parabola.local_origin(), Coordinate::new(1.0, 1.0));
            assert_eq!(parabola.focus(), Coordinate::new(1.0, 3.0));
            assert_relative_eq!(parabola.eccentricity(), 1.0);
            assert_relative_eq!(parabola.semilatus_rectum_distance(), 4.0);
            assert_relative_eq!(parabola.distance_from_directrix_to_local_origin(), -2.0);
            assert_relative_eq!(parabola.distance_from_vertex_minor_to_major_axis(), 0.0);
            let [first, second] = parabola.vertices_major();
            assert_eq!(first, second);
            assert_eq!(first, Coordinate::new(1.0, 1.0));
        }
        assert_eq!(by_focus, by_length);
        assert!(ParabolicCurve::from_focal_length(0.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).is_err());
    }

    #[test]
    fn directrix_lies_behind_the_vertex() {
        let directrix = fixture().directrix().unwrap();
        assert!(directrix.is_horizontal());
        assert_relative_eq!(directrix.i().y(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn positions_by_axis() {
        let parabola = fixture();
        assert_relative_eq!(parabola.y_at_x(5.0), 3.0, epsilon = 1e-9);
        let xs = parabola.xs_at_y(3.0);
        assert_eq!(xs.len(), 2);
        assert_relative_eq!(xs[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(xs[1], -3.0, epsilon = 1e-9);
        assert!(parabola.xs_at_y(0.0).is_empty());
        assert_eq!(parabola.x_at_y(0.0), f64::INFINITY);
    }

    #[test]
    fn focal_radii() {
        let parabola = fixture();
        // Back toward the vertex.
        assert_relative_eq!(parabola.radius_about_focus_right(&Angle::new(PI)), 2.0, epsilon = 1e-12);
        // Across the latus rectum.
        assert_relative_eq!(parabola.radius_about_focus_right(&Angle::new(FRAC_PI_2)), 4.0, epsilon = 1e-12);
        assert_eq!(
            parabola.coordinate_about(AngularOrigin::FocusRight, &Angle::new(FRAC_PI_2)),
            Coordinate::new(-3.0, 3.0)
        );
        // Along the axis the ray never returns.
        assert_eq!(parabola.radius_about_focus_right(&Angle::new(0.0)), f64::INFINITY);
    }

    #[test]
    fn reflection_invariant() {
        let parabola = fixture();
        for degrees in [-135.0, -30.0, 10.0, 90.0, 160.0] {
            let theta = Angle::from_degrees(degrees);
            assert_relative_eq!(
                parabola.radius_about_focus_left(&theta),
                parabola.radius_about_focus_right(&(Angle::new(PI) - theta)),
                epsilon = 1e-12
            );
        }
        // There is no second focus to measure from.
        assert!(parabola
            .coordinate_about(AngularOrigin::FocusLeft, &Angle::new(0.0))
            .is_infinite());
    }

    #[test]
    fn vertex_chord() {
        let parabola = fixture();
        assert_relative_eq!(
            parabola.radius_about_vertex_major_right(&Angle::new(FRAC_PI_4)),
            8.0 * 2.0_f64.sqrt(),
            epsilon = 1e-9
        );
        assert_relative_eq!(parabola.radius_about_vertex_major_right(&Angle::new(0.0)), 0.0);
    }

    #[test]
    fn radius_about_vertex_origin() {
        let parabola = fixture();
        assert_eq!(parabola.radius_about_local_origin(&Angle::new(0.0)), f64::INFINITY);
        let point = parabola.coordinate_about_local_origin(&Angle::new(FRAC_PI_4));
        assert!(parabola.is_intersecting_coordinate(&point));
    }

    #[test]
    fn slope_and_curvature() {
        let parabola = fixture();
        assert_relative_eq!(parabola.curvature_at_parameter(0.0), 0.25, epsilon = 1e-12);
        // At the latus rectum endpoint (5, 3), dy/dx = x/4 about the vertex.
        let slope = parabola.slope_about(AngularOrigin::FocusRight, &Angle::new(-FRAC_PI_2));
        assert_relative_eq!(slope, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn closed_form_arc_length() {
        let parabola = ParabolicCurve::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)).unwrap();
        let length = parabola
            .length_between(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 2.0))
            .unwrap();
        assert_relative_eq!(length, 2.0_f64.sqrt() + 1.0_f64.asinh(), epsilon = 1e-12);
        // Symmetric about the axis.
        let across = parabola
            .length_between(&Coordinate::new(1.0, -2.0), &Coordinate::new(1.0, 2.0))
            .unwrap();
        assert_relative_eq!(across, 2.0 * length, epsilon = 1e-12);
        assert!(matches!(
            parabola.length().unwrap_err(),
            ConicaError::Geometry(GeometryError::NotSupported(_))
        ));
        assert!(parabola
            .length_between(&Coordinate::new(0.0, 0.0), &Coordinate::new(3.0, 3.0))
            .is_err());
    }

    #[test]
    fn tolerance_cascades() {
        let tolerance = Tolerance::new(1e-3);
        let parabola = fixture().with_tolerance(tolerance);
        assert_eq!(parabola.tolerance(), tolerance);
        assert_eq!(parabola.focus().tolerance(), tolerance);
        assert_eq!(parabola.vertex_major().tolerance(), tolerance);
        assert_eq!(parabola.rotation().tolerance(), tolerance);
        assert_eq!(parabola.directrix().unwrap().tolerance(), tolerance);
        assert_eq!(parabola.range().start.limit().tolerance(), tolerance);
        assert_eq!(parabola.range().end.limit().tolerance(), tolerance);
    }

    #[test]
    fn range_starts_closed_on_the_vertex() {
        let mut parabola = fixture();
        assert!(parabola.range().is_closed());
        assert_eq!(parabola.range().start.limit(), Coordinate::new(1.0, 1.0));
        assert_relative_eq!(parabola.range_length().unwrap(), 0.0);

        parabola.set_range_limit(RangeEnd::End, LimitPosition::X(5.0)).unwrap();
        assert_eq!(parabola.range().end.limit(), Coordinate::new(5.0, 3.0));
        assert_relative_eq!(parabola.chord_length(), 20.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(
            parabola.range_length().unwrap(),
            2.0 * (2.0_f64.sqrt() + 1.0_f64.asinh()),
            epsilon = 1e-12
        );
    }

    #[test]
    fn display() {
        assert_eq!(
            fixture().to_string(),
            "Parabolic Curve - Vertex: (1, 1), Focus: (1, 3), Rotation: 90°"
        );
    }
}
