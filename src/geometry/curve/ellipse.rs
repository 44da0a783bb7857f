use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{format_number, Angle, Coordinate, Tolerance};

use super::conic::{impl_conic_capabilities, ClosedCurve, Conic, ConicSection, TwoFociCurve};
use super::range::CurveRange;
use super::{CurveShape, LinearCurve, PolarCurve};

/// An ellipse given by its primary major vertex, the focus nearer to it, and
/// the semi-major axis `a`.
///
/// The local origin is the center. Arc lengths have no closed form and are
/// reported as unsupported.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalCurve {
    conic: Conic,
    range: CurveRange,
}

impl EllipticalCurve {
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the focus coincides with the
    /// vertex, or [`GeometryError::InvalidShape`] if the focus lies farther
    /// than `a` from the vertex.
    pub fn new(vertex_major: Coordinate, focus: Coordinate, a: f64) -> Result<Self> {
        let tolerance = Tolerance::governing(vertex_major.tolerance(), focus.tolerance());
        let conic = Conic::ellipse(vertex_major, focus, a, tolerance)?;
        let range = CurveRange::new(conic.local_origin(), conic.vertex_major(), tolerance);
        Ok(Self { conic, range })
    }

    /// Ellipse from its semi-axes, centered on `center` with its major axis along `rotation`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if an axis is not positive, or
    /// [`GeometryError::InvalidShape`] if `b > a`.
    pub fn from_axes(a: f64, b: f64, center: Coordinate, rotation: &Angle) -> Result<Self> {
        let tolerance = center.tolerance();
        if !tolerance.is_positive(a) || !tolerance.is_positive(b) {
            return Err(GeometryError::Degenerate(format!("ellipse axes {a} and {b} must be positive")).into());
        }
        if tolerance.greater(b, a) {
            return Err(GeometryError::InvalidShape(format!(
                "ellipse semi-minor axis {b} exceeds semi-major axis {a}"
            ))
            .into());
        }
        let c = (a * a - b * b).max(0.0).sqrt();
        Self::new(center.offset(a, rotation), center.offset(c, rotation), a)
    }

    /// Rebinds the tolerance of the ellipse, its invariants and its range.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        tracing::debug!(%tolerance, "rebinding elliptical curve tolerance");
        self.conic.set_tolerance(tolerance);
        self.range.set_tolerance(tolerance);
    }

    /// Returns the ellipse rebound to `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Returns the center, midway between the two foci.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.conic.local_origin()
    }
}

impl_conic_capabilities!(EllipticalCurve, "elliptical curve");

impl ConicSection for EllipticalCurve {
    fn conic(&self) -> &Conic {
        &self.conic
    }

    fn range(&self) -> &CurveRange {
        &self.range
    }

    fn range_mut(&mut self) -> &mut CurveRange {
        &mut self.range
    }
}

impl ClosedCurve for EllipticalCurve {}

impl TwoFociCurve for EllipticalCurve {
    fn focus_left(&self) -> Coordinate {
        self.conic.to_global(-self.conic.focal_distance(), 0.0)
    }

    fn directrix_left(&self) -> Option<LinearCurve> {
        self.conic.directrix_left()
    }
}

impl fmt::Display for EllipticalCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tolerance = self.tolerance();
        write!(
            f,
            "Elliptical Curve - Center: {}, a: {}, b: {}, Rotation: {}, I: {}, J: {}",
            self.center(),
            format_number(self.conic.semi_major(), tolerance),
            format_number(self.conic.semi_minor(), tolerance),
            self.rotation(),
            self.range.start.limit(),
            self.range.end.limit()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ConicaError;
    use crate::geometry::curve::{AngularOrigin, CartesianCurve, LimitPosition, RangeEnd};
    use std::f64::consts::{FRAC_PI_2, PI};

    // a = 5, b = 4, c = 3
    fn fixture() -> EllipticalCurve {
        EllipticalCurve::new(Coordinate::new(5.0, 0.0), Coordinate::new(3.0, 0.0), 5.0).unwrap()
    }

    #[test]
    fn dual_construction_is_equivalent() {
        let by_focus = fixture();
        let by_axes = EllipticalCurve::from_axes(5.0, 4.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).unwrap();

        for ellipse in [&by_focus, &by_axes] {
            assert_eq!(ellipse.center(), Coordinate::new(0.0, 0.0));
            assert_eq!(ellipse.focus(), Coordinate::new(3.0, 0.0));
            assert_eq!(ellipse.focus_left(), Coordinate::new(-3.0, 0.0));
            assert_relative_eq!(ellipse.distance_from_vertex_minor_to_major_axis(), 4.0);
            assert_relative_eq!(ellipse.eccentricity(), 0.6);
            assert_relative_eq!(ellipse.semilatus_rectum_distance(), 3.2);
            assert_relative_eq!(ellipse.distance_from_directrix_to_local_origin(), 25.0 / 3.0);
            assert_eq!(
                ellipse.vertices_major(),
                [Coordinate::new(5.0, 0.0), Coordinate::new(-5.0, 0.0)]
            );
            assert_eq!(
                ellipse.vertices_minor(),
                [Coordinate::new(0.0, 4.0), Coordinate::new(0.0, -4.0)]
            );
        }
        assert_eq!(by_focus, by_axes);
    }

    #[test]
    fn invalid_axes_are_rejected() {
        let err = EllipticalCurve::from_axes(3.0, 4.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).unwrap_err();
        assert!(matches!(err, ConicaError::Geometry(GeometryError::InvalidShape(_))));
        assert!(EllipticalCurve::from_axes(3.0, 0.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).is_err());
        assert!(EllipticalCurve::new(Coordinate::new(5.0, 0.0), Coordinate::new(-6.0, 0.0), 5.0).is_err());
    }

    #[test]
    fn directrices_are_perpendicular_to_the_axis() {
        let ellipse = fixture();
        let right = ellipse.directrix().unwrap();
        let left = ellipse.directrix_left().unwrap();
        assert!(right.is_vertical());
        assert!(left.is_vertical());
        assert_relative_eq!(right.i().x(), 25.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(left.i().x(), -25.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn focal_radii() {
        let ellipse = fixture();
        assert_relative_eq!(ellipse.radius_about_focus_right(&Angle::new(0.0)), 2.0);
        assert_relative_eq!(ellipse.radius_about_focus_right(&Angle::new(PI)), 8.0);
        assert_relative_eq!(ellipse.radius_about_focus_left(&Angle::new(0.0)), 8.0);
        // Latus rectum endpoint straight above the focus.
        let above = ellipse.coordinate_about(AngularOrigin::FocusRight, &Angle::new(FRAC_PI_2));
        assert_eq!(above, Coordinate::new(3.0, 3.2));
    }

    #[test]
    fn reflection_invariant() {
        let ellipse = fixture();
        for degrees in [-150.0, -60.0, 0.0, 20.0, 90.0, 175.0] {
            let theta = Angle::from_degrees(degrees);
            assert_relative_eq!(
                ellipse.radius_about_focus_left(&theta),
                ellipse.radius_about_focus_right(&(Angle::new(PI) - theta)),
                epsilon = 1e-12
            );
            let point = ellipse.coordinate_about(AngularOrigin::FocusLeft, &theta);
            assert!(ellipse.is_intersecting_coordinate(&point));
        }
    }

    #[test]
    fn radius_about_center_and_vertex() {
        let ellipse = fixture();
        assert_relative_eq!(ellipse.radius_about_local_origin(&Angle::new(0.0)), 5.0);
        assert_relative_eq!(ellipse.radius_about_local_origin(&Angle::new(FRAC_PI_2)), 4.0);
        // The vertex ray along the axis spans the major axis.
        assert_relative_eq!(ellipse.radius_about_vertex_major_right(&Angle::new(0.0)), 10.0);
        assert_relative_eq!(ellipse.radius_about_vertex_major_right(&Angle::new(PI)), 0.0);
    }

    #[test]
    fn rotated_ellipse_positions() {
        let ellipse = EllipticalCurve::from_axes(5.0, 4.0, Coordinate::new(1.0, 2.0), &Angle::from_degrees(90.0)).unwrap();
        assert_eq!(ellipse.vertex_major(), Coordinate::new(1.0, 7.0));
        assert_eq!(ellipse.focus(), Coordinate::new(1.0, 5.0));
        assert_relative_eq!(ellipse.y_at_x(1.0), 7.0, epsilon = 1e-9);
        assert_relative_eq!(ellipse.x_at_y(2.0), 5.0, epsilon = 1e-9);
        assert!(ellipse.xs_at_y(8.0).is_empty());
        assert_eq!(ellipse.x_at_y(8.0), f64::INFINITY);
    }

    #[test]
    fn curvature_and_slope() {
        let ellipse = fixture();
        assert_relative_eq!(
            ellipse.curvature_about(AngularOrigin::LocalOrigin, &Angle::new(0.0)),
            5.0 / 16.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ellipse.curvature_about(AngularOrigin::LocalOrigin, &Angle::new(FRAC_PI_2)),
            4.0 / 25.0,
            epsilon = 1e-12
        );
        assert_eq!(ellipse.slope_about(AngularOrigin::LocalOrigin, &Angle::new(0.0)), f64::INFINITY);
        let normal = ellipse.normal_at_parameter(FRAC_PI_2);
        assert_relative_eq!(normal.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn large_ellipse_keeps_its_axis_crossings() {
        let ellipse = EllipticalCurve::from_axes(2e6, 1.5e6, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).unwrap();
        assert_relative_eq!(ellipse.x_at_y(0.0), 2e6, epsilon = 1e-6);
        assert_eq!(ellipse.xs_at_y(0.0).len(), 2);
        assert_relative_eq!(ellipse.y_at_x(0.0), 1.5e6, epsilon = 1e-6);
        assert!(ellipse.is_intersecting_coordinate(&Coordinate::new(2e6, 0.0)));
    }

    #[test]
    fn arc_length_is_not_supported() {
        let mut ellipse = fixture();
        assert!(matches!(
            ellipse.length().unwrap_err(),
            ConicaError::Geometry(GeometryError::NotSupported(_))
        ));
        ellipse.set_range_limit(RangeEnd::End, LimitPosition::X(0.0)).unwrap();
        assert_eq!(ellipse.range().end.limit(), Coordinate::new(0.0, 4.0));
        assert!(ellipse.range_length().is_err());
        assert_relative_eq!(ellipse.chord_length(), 41.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn tolerance_cascades() {
        let tolerance = Tolerance::new(1e-4);
        let ellipse = fixture().with_tolerance(tolerance);
        assert_eq!(ellipse.tolerance(), tolerance);
        assert_eq!(ellipse.focus().tolerance(), tolerance);
        assert_eq!(ellipse.focus_left().tolerance(), tolerance);
        assert_eq!(ellipse.rotation().tolerance(), tolerance);
        assert_eq!(ellipse.directrix().unwrap().tolerance(), tolerance);
        assert_eq!(ellipse.directrix_left().unwrap().tolerance(), tolerance);
        assert_eq!(ellipse.range().start.limit().tolerance(), tolerance);
        assert_eq!(ellipse.range().end.limit().tolerance(), tolerance);
    }

    #[test]
    fn closed_curve_symmetry() {
        let mut ellipse = fixture();
        assert!(ellipse.is_closed_curve());
        ellipse
            .set_range_limit(RangeEnd::Start, LimitPosition::Rotation(Angle::new(PI)))
            .unwrap();
        assert_eq!(ellipse.range().start.limit(), Coordinate::new(-5.0, 0.0));
        assert!(!ellipse.is_closed_curve());
    }

    #[test]
    fn display() {
        let ellipse = fixture();
        assert_eq!(
            ellipse.to_string(),
            "Elliptical Curve - Center: (0, 0), a: 5, b: 4, Rotation: 0°, I: (5, 0), J: (5, 0)"
        );
    }
}
