use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt;

use crate::error::{GeometryError, RangeError, Result};
use crate::math::{format_number, Angle, AngularOffset, Coordinate, Tolerance};

use super::conic::{impl_conic_capabilities, AngularOrigin, ClosedCurve, Conic, ConicSection};
use super::range::CurveRange;
use super::{CartesianCurve, CurveShape};

/// A circle: the conic of eccentricity zero.
///
/// The center doubles as focus and local origin, and the primary major
/// vertex fixes the rotation of the local frame. The range starts closed on
/// that vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularCurve {
    conic: Conic,
    range: CurveRange,
}

impl CircularCurve {
    /// Circle about `center` passing through `vertex_major`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the two points coincide.
    pub fn new(vertex_major: Coordinate, center: Coordinate) -> Result<Self> {
        let tolerance = Tolerance::governing(vertex_major.tolerance(), center.tolerance());
        Ok(Self::from_conic(Conic::circle(vertex_major, center, tolerance)?))
    }

    /// Circle of `radius` about `center`, with its vertex on the +x side.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the radius is not positive.
    pub fn from_radius(radius: f64, center: Coordinate) -> Result<Self> {
        Self::from_radius_rotated(radius, center, &Angle::new(0.0))
    }

    /// Circle of `radius` about `center`, with its vertex along `rotation`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the radius is not positive.
    pub fn from_radius_rotated(radius: f64, center: Coordinate, rotation: &Angle) -> Result<Self> {
        if !center.tolerance().is_positive(radius) {
            return Err(GeometryError::Degenerate(format!("circle radius {radius} must be positive")).into());
        }
        Self::new(center.offset(radius, rotation), center)
    }

    fn from_conic(conic: Conic) -> Self {
        let range = CurveRange::new(conic.local_origin(), conic.vertex_major(), conic.tolerance());
        Self { conic, range }
    }

    /// Rebinds the tolerance of the circle, its invariants and its range.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        tracing::debug!(%tolerance, "rebinding circular curve tolerance");
        self.conic.set_tolerance(tolerance);
        self.range.set_tolerance(tolerance);
    }

    /// Returns the circle rebound to `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Returns the center, which doubles as the focus.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.conic.local_origin()
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.conic.semi_major()
    }

    /// Returns the constant curvature `1/R`.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        1.0 / self.radius()
    }

    /// Arc length subtended by `offset`.
    #[must_use]
    pub fn length_between_offset(&self, offset: &AngularOffset) -> f64 {
        offset.length_arc(self.radius())
    }
}

impl_conic_capabilities!(CircularCurve, "circular curve");

impl ConicSection for CircularCurve {
    fn conic(&self) -> &Conic {
        &self.conic
    }

    fn radius_about_focus_right(&self, _angle: &Angle) -> f64 {
        self.radius()
    }

    /// Chord from the vertex: `2R·cos θ` inside `[−π/2, π/2]`, zero outside.
    fn radius_about_vertex_major_right(&self, angle: &Angle) -> f64 {
        let theta = angle.normalized_signed().radians();
        if theta.abs() > FRAC_PI_2 + self.conic.tolerance().value() {
            return 0.0;
        }
        (2.0 * self.radius() * theta.cos()).max(0.0)
    }

    fn curvature_about(&self, _origin: AngularOrigin, _angle: &Angle) -> f64 {
        self.curvature()
    }

    fn length(&self) -> Result<f64> {
        Ok(TAU * self.radius())
    }

    /// Counter-clockwise arc length from `start` to `end`.
    fn length_between(&self, start: &Coordinate, end: &Coordinate) -> Result<f64> {
        for coordinate in [start, end] {
            if !self.is_intersecting_coordinate(coordinate) {
                return Err(RangeError::CoordinateNotOnCurve(*coordinate).into());
            }
        }
        if start == end {
            return Ok(0.0);
        }
        let center = self.center();
        let sweep = center.angle_to(start).sweep_to(&center.angle_to(end));
        let offset = AngularOffset::new(Angle::new(0.0), sweep);
        Ok(self.length_between_offset(&offset))
    }

    fn range(&self) -> &CurveRange {
        &self.range
    }

    fn range_mut(&mut self) -> &mut CurveRange {
        &mut self.range
    }
}

impl ClosedCurve for CircularCurve {}

impl fmt::Display for CircularCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Circular Curve - Center: {}, Radius: {}, I: {}, J: {}",
            self.center(),
            format_number(self.radius(), self.tolerance()),
            self.range.start.limit(),
            self.range.end.limit()
        )
    }
}
