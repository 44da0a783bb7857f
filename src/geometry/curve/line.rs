use std::fmt;

use nalgebra::Unit;

use crate::error::{GeometryError, Result};
use crate::math::{Angle, Coordinate, Tolerance, Vector2};

use super::{CartesianCurve, CurveShape};

/// An infinite straight line through two control points `I` and `J`.
///
/// The points may coincide; such a line is a degenerate point that is both
/// horizontal and vertical, and has no slope. Intercepts and positions use
/// `+∞` sentinels instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCurve {
    i: Coordinate,
    j: Coordinate,
    tolerance: Tolerance,
}

impl LinearCurve {
    /// Creates a line through `i` and `j`, governed by the looser of their tolerances.
    #[must_use]
    pub fn new(i: Coordinate, j: Coordinate) -> Self {
        let tolerance = Tolerance::governing(i.tolerance(), j.tolerance());
        Self {
            i: i.with_tolerance(tolerance),
            j: j.with_tolerance(tolerance),
            tolerance,
        }
    }

    /// Line through `point` running along `angle`.
    #[must_use]
    pub fn through(point: Coordinate, angle: &Angle) -> Self {
        Self::new(point, point.offset(1.0, angle))
    }

    /// Line `y = slope·x + intercept_y`. An infinite slope is not representable.
    #[must_use]
    pub fn from_slope_intercept(slope: f64, intercept_y: f64) -> Self {
        Self::new(
            Coordinate::new(0.0, intercept_y),
            Coordinate::new(1.0, slope + intercept_y),
        )
    }

    /// Returns the line with its tolerance and control points rebound to `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Rebinds the tolerance of the line and both control points.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
        self.i.set_tolerance(tolerance);
        self.j.set_tolerance(tolerance);
    }

    /// Returns the first control point.
    #[must_use]
    pub fn i(&self) -> Coordinate {
        self.i
    }

    /// Returns the second control point.
    #[must_use]
    pub fn j(&self) -> Coordinate {
        self.j
    }

    /// Distance between the two control points.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.i.distance_to(&self.j)
    }

    /// Returns true if both control points coincide.
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.i == self.j
    }

    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        Self::is_horizontal_between(&self.i, &self.j)
    }

    /// Static form of [`Self::is_horizontal`].
    #[must_use]
    pub fn is_horizontal_between(i: &Coordinate, j: &Coordinate) -> bool {
        Tolerance::governing(i.tolerance(), j.tolerance()).equals(i.y(), j.y())
    }

    #[must_use]
    pub fn is_vertical(&self) -> bool {
        Self::is_vertical_between(&self.i, &self.j)
    }

    /// Static form of [`Self::is_vertical`].
    #[must_use]
    pub fn is_vertical_between(i: &Coordinate, j: &Coordinate) -> bool {
        Tolerance::governing(i.tolerance(), j.tolerance()).equals(i.x(), j.x())
    }

    /// Slope `(y₂ − y₁) / (x₂ − x₁)`; `±∞` for vertical lines.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the control points coincide.
    pub fn slope(&self) -> Result<f64> {
        Self::slope_between(&self.i, &self.j)
    }

    /// Static form of [`Self::slope`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `i` and `j` coincide.
    pub fn slope_between(i: &Coordinate, j: &Coordinate) -> Result<f64> {
        if i == j {
            return Err(GeometryError::Degenerate(format!(
                "slope of coincident points {i} and {j}"
            ))
            .into());
        }
        let tolerance = Tolerance::governing(i.tolerance(), j.tolerance());
        let dy = j.y() - i.y();
        if tolerance.equals(i.x(), j.x()) {
            return Ok(if dy > 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            });
        }
        Ok(dy / (j.x() - i.x()))
    }

    /// Abscissa where the line crosses `y = 0`; `+∞` if it never does.
    #[must_use]
    pub fn intercept_x(&self) -> f64 {
        if self.is_horizontal() {
            return f64::INFINITY;
        }
        if self.is_vertical() {
            return self.i.x();
        }
        match self.slope() {
            Ok(slope) => Self::intercept_x_of(slope, &self.i),
            Err(_) => f64::INFINITY,
        }
    }

    /// Ordinate where the line crosses `x = 0`; `+∞` if it never does.
    #[must_use]
    pub fn intercept_y(&self) -> f64 {
        if self.is_vertical() {
            return f64::INFINITY;
        }
        match self.slope() {
            Ok(slope) => Self::intercept_y_of(slope, &self.i),
            Err(_) => f64::INFINITY,
        }
    }

    /// x-intercept of the line with `slope` through `point`.
    #[must_use]
    pub fn intercept_x_of(slope: f64, point: &Coordinate) -> f64 {
        if slope.is_infinite() {
            return point.x();
        }
        if point.tolerance().is_zero(slope) {
            return f64::INFINITY;
        }
        point.x() - point.y() / slope
    }

    /// y-intercept of the line with `slope` through `point`.
    #[must_use]
    pub fn intercept_y_of(slope: f64, point: &Coordinate) -> f64 {
        if slope.is_infinite() {
            return f64::INFINITY;
        }
        point.y() - slope * point.x()
    }

    /// Returns true if the lines have equal slopes, treating any two vertical
    /// lines as parallel regardless of the sign of their infinite slopes.
    #[must_use]
    pub fn is_parallel(&self, other: &LinearCurve) -> bool {
        let tolerance = Tolerance::governing(self.tolerance, other.tolerance);
        Self::are_parallel(self.axis_slope(), other.axis_slope(), tolerance)
    }

    /// Static form of [`Self::is_parallel`] over two slopes. Infinite slopes
    /// of either sign are parallel to each other.
    #[must_use]
    pub fn are_parallel(slope_1: f64, slope_2: f64, tolerance: Tolerance) -> bool {
        match (slope_1.is_infinite(), slope_2.is_infinite()) {
            (true, true) => true,
            (false, false) => tolerance.equals(slope_1, slope_2),
            _ => false,
        }
    }

    /// Returns true if the slope product is `−1`, or one line is vertical
    /// and the other horizontal.
    #[must_use]
    pub fn is_perpendicular(&self, other: &LinearCurve) -> bool {
        let tolerance = Tolerance::governing(self.tolerance, other.tolerance);
        Self::are_perpendicular(self.axis_slope(), other.axis_slope(), tolerance)
    }

    /// Static form of [`Self::is_perpendicular`] over two slopes.
    #[must_use]
    pub fn are_perpendicular(slope_1: f64, slope_2: f64, tolerance: Tolerance) -> bool {
        match (slope_1.is_infinite(), slope_2.is_infinite()) {
            (true, false) => tolerance.is_zero(slope_2),
            (false, true) => tolerance.is_zero(slope_1),
            (true, true) => false,
            (false, false) => tolerance.equals(slope_1 * slope_2, -1.0),
        }
    }

    /// Intersection with `other`, or `(+∞, +∞)` when the lines are parallel.
    #[must_use]
    pub fn intersection_coordinate(&self, other: &LinearCurve) -> Coordinate {
        let tolerance = Tolerance::governing(self.tolerance, other.tolerance);
        if self.is_parallel(other) {
            return Coordinate::infinity().with_tolerance(tolerance);
        }
        let coordinate = if self.is_vertical() {
            Coordinate::new(self.i.x(), other.y_at_x(self.i.x()))
        } else if other.is_vertical() {
            Coordinate::new(other.i.x(), self.y_at_x(other.i.x()))
        } else if self.is_horizontal() {
            Coordinate::new(other.x_at_y(self.i.y()), self.i.y())
        } else if other.is_horizontal() {
            Coordinate::new(self.x_at_y(other.i.y()), other.i.y())
        } else {
            Self::intersection_of(
                self.raw_slope(),
                self.intercept_y(),
                other.raw_slope(),
                other.intercept_y(),
            )
        };
        coordinate.with_tolerance(tolerance)
    }

    /// Intersection of `y = m₁x + b₁` and `y = m₂x + b₂`; `(+∞, +∞)` when parallel.
    #[must_use]
    pub fn intersection_of(slope_1: f64, intercept_1: f64, slope_2: f64, intercept_2: f64) -> Coordinate {
        #[allow(clippy::float_cmp)]
        let parallel = slope_1 == slope_2;
        if parallel || slope_1.is_infinite() || slope_2.is_infinite() {
            return Coordinate::infinity();
        }
        let x = (intercept_2 - intercept_1) / (slope_1 - slope_2);
        Coordinate::new(x, slope_1 * x + intercept_1)
    }

    /// Foot of the perpendicular dropped from `point` onto this line.
    ///
    /// Built by intersecting this line with the auxiliary line through
    /// `point` along this line's normal.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the line is a single point.
    pub fn coordinate_of_perpendicular_projection(&self, point: &Coordinate) -> Result<Coordinate> {
        let normal = self.normal()?;
        let perpendicular = LinearCurve::new(*point, point.translate(&normal));
        Ok(self.intersection_coordinate(&perpendicular))
    }

    /// Static form of [`Self::coordinate_of_perpendicular_projection`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `i` and `j` coincide.
    pub fn perpendicular_projection_between(
        i: &Coordinate,
        j: &Coordinate,
        point: &Coordinate,
    ) -> Result<Coordinate> {
        LinearCurve::new(*i, *j).coordinate_of_perpendicular_projection(point)
    }

    /// Unit direction from `I` to `J`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the line is a single point.
    pub fn tangent(&self) -> Result<Unit<Vector2>> {
        if self.is_point() {
            return Err(GeometryError::Degenerate(format!(
                "direction of the point line {self}"
            ))
            .into());
        }
        Ok(Unit::new_normalize(self.i.vector_to(&self.j)))
    }

    /// Unit normal, the direction turned a quarter turn counter-clockwise.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the line is a single point.
    pub fn normal(&self) -> Result<Unit<Vector2>> {
        let t = self.tangent()?;
        Ok(Unit::new_unchecked(Vector2::new(-t.y, t.x)))
    }

    /// Signed perpendicular distance from the line to `point`, positive on
    /// the normal side.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the line is a single point.
    pub fn signed_distance_to(&self, point: &Coordinate) -> Result<f64> {
        Ok(self.i.vector_to(point).dot(&self.normal()?.into_inner()))
    }

    /// Slope from raw components, for lines already known not to be vertical.
    fn raw_slope(&self) -> f64 {
        (self.j.y() - self.i.y()) / (self.j.x() - self.i.x())
    }

    /// Raw slope, with vertical and point lines mapped to `+∞`.
    fn axis_slope(&self) -> f64 {
        if self.is_vertical() {
            f64::INFINITY
        } else {
            self.raw_slope()
        }
    }
}

impl CurveShape for LinearCurve {
    fn name(&self) -> &'static str {
        "linear curve"
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn local_origin(&self) -> Coordinate {
        self.i
    }

    fn default_limit(&self) -> Coordinate {
        self.i
    }

    fn as_cartesian(&self) -> Option<&dyn CartesianCurve> {
        Some(self)
    }
}

impl CartesianCurve for LinearCurve {
    fn xs_at_y(&self, y: f64) -> Vec<f64> {
        let x = self.x_at_y(y);
        if x.is_infinite() {
            Vec::new()
        } else {
            vec![x]
        }
    }

    fn ys_at_x(&self, x: f64) -> Vec<f64> {
        let y = self.y_at_x(x);
        if y.is_infinite() {
            Vec::new()
        } else {
            vec![y]
        }
    }

    fn x_at_y(&self, y: f64) -> f64 {
        if self.is_horizontal() {
            return f64::INFINITY;
        }
        let t = (y - self.i.y()) / (self.j.y() - self.i.y());
        self.i.x() + t * (self.j.x() - self.i.x())
    }

    fn y_at_x(&self, x: f64) -> f64 {
        if self.is_vertical() {
            return f64::INFINITY;
        }
        let t = (x - self.i.x()) / (self.j.x() - self.i.x());
        self.i.y() + t * (self.j.y() - self.i.y())
    }

    fn is_intersecting_coordinate(&self, point: &Coordinate) -> bool {
        let tolerance = Tolerance::governing(self.tolerance, point.tolerance());
        if self.is_point() {
            return self.i == *point;
        }
        self.signed_distance_to(point)
            .is_ok_and(|distance| tolerance.is_zero(distance))
    }
}

impl fmt::Display for LinearCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Linear Curve - I: {}, J: {}", self.i, self.j)
    }
}
