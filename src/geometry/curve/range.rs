use std::f64::consts::{PI, TAU};

use crate::error::{RangeError, Result};
use crate::math::{Angle, CartesianOffset, Coordinate, Tolerance};

use super::{CartesianCurve, CurveShape, LinearCurve};

/// Selects one of the two limits of a [`CurveRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    Start,
    End,
}

/// A way of naming a point on a curve when placing a range limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LimitPosition {
    /// The curve point at global abscissa `x` (positive branch).
    X(f64),
    /// The curve point at global ordinate `y` (positive branch).
    Y(f64),
    /// The curve point along a local angle about the curve's local origin.
    Rotation(Angle),
    /// An explicit coordinate, which must lie on the curve.
    Coordinate(Coordinate),
}

impl LimitPosition {
    /// Resolves the position to a coordinate on `curve`.
    ///
    /// # Errors
    ///
    /// - [`RangeError::UnsupportedRepresentation`] if the curve lacks the
    ///   cartesian (x, y, coordinate) or polar (rotation) capability.
    /// - [`RangeError::OffCurve`] if no point of the curve matches.
    /// - [`RangeError::CoordinateNotOnCurve`] if an explicit coordinate misses the curve.
    pub fn resolve(&self, curve: &dyn CurveShape) -> Result<Coordinate> {
        let tolerance = curve.tolerance();
        let coordinate = match *self {
            LimitPosition::X(x) => {
                let y = cartesian(curve)?.y_at_x(x);
                if y.is_infinite() {
                    return Err(RangeError::OffCurve { parameter: "x", value: x }.into());
                }
                Coordinate::new(x, y)
            }
            LimitPosition::Y(y) => {
                let x = cartesian(curve)?.x_at_y(y);
                if x.is_infinite() {
                    return Err(RangeError::OffCurve { parameter: "y", value: y }.into());
                }
                Coordinate::new(x, y)
            }
            LimitPosition::Rotation(angle) => {
                let polar = curve.as_polar().ok_or(RangeError::UnsupportedRepresentation {
                    curve: curve.name(),
                    capability: "polar",
                })?;
                let coordinate = polar.coordinate_about_local_origin(&angle);
                if coordinate.is_infinite() {
                    return Err(RangeError::OffCurve {
                        parameter: "rotation",
                        value: angle.radians(),
                    }
                    .into());
                }
                coordinate
            }
            LimitPosition::Coordinate(coordinate) => {
                if !cartesian(curve)?.is_intersecting_coordinate(&coordinate) {
                    return Err(RangeError::CoordinateNotOnCurve(coordinate).into());
                }
                coordinate
            }
        };
        let coordinate = coordinate.with_tolerance(tolerance);
        tracing::debug!(curve = curve.name(), %coordinate, "resolved range limit");
        Ok(coordinate)
    }
}

fn cartesian(curve: &dyn CurveShape) -> Result<&dyn CartesianCurve> {
    curve.as_cartesian().ok_or_else(|| {
        RangeError::UnsupportedRepresentation {
            curve: curve.name(),
            capability: "cartesian",
        }
        .into()
    })
}

/// One bounding coordinate of a [`CurveRange`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveLimit {
    coordinate: Coordinate,
}

impl CurveLimit {
    #[must_use]
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }

    #[must_use]
    pub fn limit(&self) -> Coordinate {
        self.coordinate
    }

    /// Replaces the limit without checking it against any curve.
    pub fn set_limit(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.coordinate.set_tolerance(tolerance);
    }

    /// # Errors
    ///
    /// See [`LimitPosition::resolve`].
    pub fn set_by_x(&mut self, curve: &dyn CurveShape, x: f64) -> Result<()> {
        self.set_by(curve, LimitPosition::X(x))
    }

    /// # Errors
    ///
    /// See [`LimitPosition::resolve`].
    pub fn set_by_y(&mut self, curve: &dyn CurveShape, y: f64) -> Result<()> {
        self.set_by(curve, LimitPosition::Y(y))
    }

    /// # Errors
    ///
    /// See [`LimitPosition::resolve`].
    pub fn set_by_rotation(&mut self, curve: &dyn CurveShape, rotation: Angle) -> Result<()> {
        self.set_by(curve, LimitPosition::Rotation(rotation))
    }

    /// # Errors
    ///
    /// See [`LimitPosition::resolve`].
    pub fn set_by_coordinate(&mut self, curve: &dyn CurveShape, coordinate: Coordinate) -> Result<()> {
        self.set_by(curve, LimitPosition::Coordinate(coordinate))
    }

    fn set_by(&mut self, curve: &dyn CurveShape, position: LimitPosition) -> Result<()> {
        self.coordinate = position.resolve(curve)?;
        Ok(())
    }
}

/// A start/end pair of limits bounding a curve to a finite arc.
///
/// The range remembers the local origin of the curve it was made for, so
/// radial and angular separations can be measured without borrowing the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRange {
    pub start: CurveLimit,
    pub end: CurveLimit,
    origin: Coordinate,
    tolerance: Tolerance,
}

impl CurveRange {
    /// Range with both limits on `default_limit`.
    #[must_use]
    pub fn new(origin: Coordinate, default_limit: Coordinate, tolerance: Tolerance) -> Self {
        let limit = CurveLimit::new(default_limit.with_tolerance(tolerance));
        Self {
            start: limit,
            end: limit,
            origin: origin.with_tolerance(tolerance),
            tolerance,
        }
    }

    /// Zero-sweep range at the curve's default limit.
    #[must_use]
    pub fn for_curve(curve: &dyn CurveShape) -> Self {
        Self::new(curve.local_origin(), curve.default_limit(), curve.tolerance())
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
        self.origin.set_tolerance(tolerance);
        self.start.set_tolerance(tolerance);
        self.end.set_tolerance(tolerance);
    }

    /// Point about which [`Self::length_rotation`] and [`Self::length_radius`] measure.
    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    #[must_use]
    pub fn limit(&self, end: RangeEnd) -> &CurveLimit {
        match end {
            RangeEnd::Start => &self.start,
            RangeEnd::End => &self.end,
        }
    }

    pub fn limit_mut(&mut self, end: RangeEnd) -> &mut CurveLimit {
        match end {
            RangeEnd::Start => &mut self.start,
            RangeEnd::End => &mut self.end,
        }
    }

    /// Resolves `position` on `curve` and moves the selected limit there.
    ///
    /// # Errors
    ///
    /// See [`LimitPosition::resolve`]. The range is unchanged on error.
    pub fn set_limit(&mut self, curve: &dyn CurveShape, end: RangeEnd, position: LimitPosition) -> Result<()> {
        let coordinate = position.resolve(curve)?;
        self.limit_mut(end).set_limit(coordinate);
        Ok(())
    }

    /// True while both limits sit on the same coordinate.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.start.limit() == self.end.limit()
    }

    /// Offset from the start limit to the end limit.
    #[must_use]
    pub fn offset(&self) -> CartesianOffset {
        CartesianOffset::new(self.start.limit(), self.end.limit())
    }

    /// Straight-line distance between the limits.
    #[must_use]
    pub fn length_linear(&self) -> f64 {
        self.offset().length()
    }

    #[must_use]
    pub fn length_x(&self) -> f64 {
        self.offset().x().abs()
    }

    #[must_use]
    pub fn length_y(&self) -> f64 {
        self.offset().y().abs()
    }

    /// Difference of the limits' distances from the origin.
    #[must_use]
    pub fn length_radius(&self) -> f64 {
        (self.origin.distance_to(&self.end.limit()) - self.origin.distance_to(&self.start.limit())).abs()
    }

    /// Counter-clockwise sweep about the origin from start to end, in `[0, 2π)`.
    #[must_use]
    pub fn length_rotation(&self) -> Angle {
        if self.is_closed() {
            return Angle::new(0.0).with_tolerance(self.tolerance);
        }
        let start = self.origin.angle_to(&self.start.limit());
        let end = self.origin.angle_to(&self.end.limit());
        start.sweep_to(&end).with_tolerance(self.tolerance)
    }

    /// Line through the two limits.
    #[must_use]
    pub fn chord(&self) -> LinearCurve {
        LinearCurve::new(self.start.limit(), self.end.limit()).with_tolerance(self.tolerance)
    }

    /// Guards a rotational limit of a half-turn range: `[−π, π]`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::ParameterOutOfRange`] outside the interval.
    pub fn validate_half_rotation(rotation: &Angle) -> Result<()> {
        validate_rotation(rotation, -PI, PI)
    }

    /// Guards a rotational limit of a full-turn range: `[0, 2π]`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::ParameterOutOfRange`] outside the interval.
    pub fn validate_full_rotation(rotation: &Angle) -> Result<()> {
        validate_rotation(rotation, 0.0, TAU)
    }
}

fn validate_rotation(rotation: &Angle, min: f64, max: f64) -> Result<()> {
    let value = rotation.radians();
    if rotation.tolerance().within(value, min, max) {
        return Ok(());
    }
    Err(RangeError::ParameterOutOfRange {
        parameter: "rotation",
        value,
        min,
        max,
    }
    .into())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::ConicaError;
    use crate::geometry::curve::CircularCurve;
    use std::f64::consts::FRAC_PI_2;

    fn circle() -> CircularCurve {
        CircularCurve::from_radius(3.0, Coordinate::new(0.0, 0.0)).unwrap()
    }

    #[test]
    fn fresh_range_is_closed() {
        let range = CurveRange::for_curve(&circle());
        assert!(range.is_closed());
        assert_eq!(range.start.limit(), Coordinate::new(3.0, 0.0));
        assert_relative_eq!(range.length_linear(), 0.0);
    }

    #[test]
    fn limits_by_x_y_and_rotation() {
        let curve = circle();
        let mut range = CurveRange::for_curve(&curve);
        range.set_limit(&curve, RangeEnd::End, LimitPosition::X(0.0)).unwrap();
        assert_eq!(range.end.limit(), Coordinate::new(0.0, 3.0));
        assert!(!range.is_closed());

        range.set_limit(&curve, RangeEnd::End, LimitPosition::Y(0.0)).unwrap();
        assert_eq!(range.end.limit(), Coordinate::new(3.0, 0.0));

        range
            .set_limit(&curve, RangeEnd::End, LimitPosition::Rotation(Angle::new(PI)))
            .unwrap();
        assert_eq!(range.end.limit(), Coordinate::new(-3.0, 0.0));
        assert_relative_eq!(range.length_linear(), 6.0);
        assert_relative_eq!(range.length_x(), 6.0);
        assert_relative_eq!(range.length_y(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(range.length_radius(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(range.length_rotation().radians(), PI, epsilon = 1e-12);
    }

    #[test]
    fn limit_by_ordinate() {
        let curve = circle();
        let mut limit = CurveLimit::new(Coordinate::new(0.0, 3.0));
        limit.set_by_y(&curve, 0.0).unwrap();
        assert_eq!(limit.limit(), Coordinate::new(3.0, 0.0));
        assert!(limit.set_by_y(&curve, 3.5).is_err());
        assert_eq!(limit.limit(), Coordinate::new(3.0, 0.0));
    }

    #[test]
    fn out_of_domain_limits_fail() {
        let curve = circle();
        let mut limit = CurveLimit::new(curve.default_limit());
        let err = limit.set_by_x(&curve, 4.0).unwrap_err();
        assert!(matches!(err, ConicaError::Range(RangeError::OffCurve { .. })));
        assert_eq!(limit.limit(), Coordinate::new(3.0, 0.0));
    }

    #[test]
    fn explicit_coordinate_must_lie_on_curve() {
        let curve = circle();
        let mut limit = CurveLimit::new(curve.default_limit());
        limit.set_by_coordinate(&curve, Coordinate::new(0.0, -3.0)).unwrap();
        assert_eq!(limit.limit(), Coordinate::new(0.0, -3.0));

        let err = limit.set_by_coordinate(&curve, Coordinate::new(1.0, 1.0)).unwrap_err();
        assert!(matches!(err, ConicaError::Range(RangeError::CoordinateNotOnCurve(_))));
    }

    #[test]
    fn rotation_needs_polar_capability() {
        let line = LinearCurve::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        let mut limit = CurveLimit::new(line.i());
        let err = limit.set_by_rotation(&line, Angle::new(FRAC_PI_2)).unwrap_err();
        assert!(matches!(
            err,
            ConicaError::Range(RangeError::UnsupportedRepresentation { capability: "polar", .. })
        ));
        limit.set_by_x(&line, 2.0).unwrap();
        assert_eq!(limit.limit(), Coordinate::new(2.0, 2.0));
    }

    #[test]
    fn quarter_sweep_and_chord() {
        let curve = circle();
        let mut range = CurveRange::for_curve(&curve);
        range.end.set_by_rotation(&curve, Angle::new(FRAC_PI_2)).unwrap();
        assert_relative_eq!(range.length_rotation().degrees(), 90.0, epsilon = 1e-9);
        let chord = range.chord();
        assert_relative_eq!(chord.length(), 3.0 * 2.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(chord.slope().unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn near_full_sweep_is_not_folded_to_zero() {
        let curve = circle();
        let mut range = CurveRange::for_curve(&curve);
        assert_relative_eq!(range.length_rotation().radians(), 0.0);

        range.end.set_by_rotation(&curve, Angle::new(-5e-7)).unwrap();
        assert!(!range.is_closed());
        assert_relative_eq!(range.length_rotation().radians(), TAU - 5e-7, epsilon = 1e-12);
    }

    #[test]
    fn rotation_guards() {
        assert!(CurveRange::validate_half_rotation(&Angle::new(-PI)).is_ok());
        assert!(CurveRange::validate_half_rotation(&Angle::new(3.5)).is_err());
        assert!(CurveRange::validate_full_rotation(&Angle::new(TAU)).is_ok());
        let err = CurveRange::validate_full_rotation(&Angle::new(-0.5)).unwrap_err();
        assert!(matches!(
            err,
            ConicaError::Range(RangeError::ParameterOutOfRange { parameter: "rotation", .. })
        ));
    }

    #[test]
    fn tolerance_cascades_to_limits() {
        let mut range = CurveRange::for_curve(&circle());
        let tolerance = Tolerance::new(1e-3);
        range.set_tolerance(tolerance);
        assert_eq!(range.start.limit().tolerance(), tolerance);
        assert_eq!(range.end.limit().tolerance(), tolerance);
        assert_eq!(range.origin().tolerance(), tolerance);
        assert_eq!(range.chord().tolerance(), tolerance);
    }
}
