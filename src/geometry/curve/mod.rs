mod circle;
mod conic;
mod ellipse;
mod hyperbola;
mod line;
mod parabola;
mod parametric;
mod range;

use std::fmt;

pub use circle::CircularCurve;
pub use conic::{AngularOrigin, ClosedCurve, Conic, ConicKind, ConicSection, TwoFociCurve};
pub use ellipse::EllipticalCurve;
pub use hyperbola::HyperbolicCurve;
pub use line::LinearCurve;
pub use parabola::ParabolicCurve;
pub use parametric::ParametricPoint;
pub use range::{CurveLimit, CurveRange, LimitPosition, RangeEnd};

use crate::math::{Angle, Coordinate, Tolerance};

/// Capabilities shared by every curve, queried dynamically by curve ranges.
pub trait CurveShape {
    /// Human-readable curve kind, used in error messages.
    fn name(&self) -> &'static str;

    fn tolerance(&self) -> Tolerance;

    /// Origin of the curve's own frame; angular range queries are measured about it.
    fn local_origin(&self) -> Coordinate;

    /// Coordinate a fresh range limit is placed at.
    fn default_limit(&self) -> Coordinate;

    /// Cartesian position capability, if the curve has one.
    fn as_cartesian(&self) -> Option<&dyn CartesianCurve> {
        None
    }

    /// Polar position capability, if the curve has one.
    fn as_polar(&self) -> Option<&dyn PolarCurve> {
        None
    }
}

/// Closed-form positions by global x or y.
///
/// Plural forms return every branch in descending order and are empty out of
/// domain. Singular forms return the positive (largest) branch, or `+∞` out
/// of domain.
pub trait CartesianCurve: CurveShape {
    fn xs_at_y(&self, y: f64) -> Vec<f64>;

    fn ys_at_x(&self, x: f64) -> Vec<f64>;

    fn x_at_y(&self, y: f64) -> f64 {
        self.xs_at_y(y).first().copied().unwrap_or(f64::INFINITY)
    }

    fn y_at_x(&self, x: f64) -> f64 {
        self.ys_at_x(x).first().copied().unwrap_or(f64::INFINITY)
    }

    /// Returns true if `point` lies on the curve under the governing tolerance.
    fn is_intersecting_coordinate(&self, point: &Coordinate) -> bool {
        if point.is_infinite() {
            return false;
        }
        let tolerance = Tolerance::governing(self.tolerance(), point.tolerance());
        tolerance.contains(&self.ys_at_x(point.x()), point.y())
            || tolerance.contains(&self.xs_at_y(point.y()), point.x())
    }
}

/// Positions by angle about the curve's local origin.
///
/// Angles are local: zero points along the curve's rotation.
pub trait PolarCurve: CurveShape {
    fn rotation(&self) -> Angle;

    /// Distance from the local origin to the curve along `angle`; `+∞` if the ray misses.
    fn radius_about_local_origin(&self, angle: &Angle) -> f64;

    /// Point of the curve along `angle`; `(+∞, +∞)` if the ray misses.
    fn coordinate_about_local_origin(&self, angle: &Angle) -> Coordinate {
        let radius = self.radius_about_local_origin(angle);
        if radius.is_infinite() {
            return Coordinate::infinity().with_tolerance(self.tolerance());
        }
        self.local_origin()
            .offset(radius, &(self.rotation() + *angle))
    }
}

/// Any curve the kernel knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(LinearCurve),
    Circle(CircularCurve),
    Ellipse(EllipticalCurve),
    Parabola(ParabolicCurve),
    Hyperbola(HyperbolicCurve),
}

impl Curve {
    /// Dynamic view of the curve's capabilities.
    #[must_use]
    pub fn shape(&self) -> &dyn CurveShape {
        match self {
            Curve::Line(curve) => curve,
            Curve::Circle(curve) => curve,
            Curve::Ellipse(curve) => curve,
            Curve::Parabola(curve) => curve,
            Curve::Hyperbola(curve) => curve,
        }
    }

    /// Conic view of the curve, `None` for lines.
    #[must_use]
    pub fn as_conic(&self) -> Option<&dyn ConicSection> {
        match self {
            Curve::Line(_) => None,
            Curve::Circle(curve) => Some(curve),
            Curve::Ellipse(curve) => Some(curve),
            Curve::Parabola(curve) => Some(curve),
            Curve::Hyperbola(curve) => Some(curve),
        }
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.shape().tolerance()
    }

    /// Rebinds the tolerance of the curve and everything it owns.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        match self {
            Curve::Line(curve) => curve.set_tolerance(tolerance),
            Curve::Circle(curve) => curve.set_tolerance(tolerance),
            Curve::Ellipse(curve) => curve.set_tolerance(tolerance),
            Curve::Parabola(curve) => curve.set_tolerance(tolerance),
            Curve::Hyperbola(curve) => curve.set_tolerance(tolerance),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }
}

impl From<LinearCurve> for Curve {
    fn from(curve: LinearCurve) -> Self {
        Curve::Line(curve)
    }
}

impl From<CircularCurve> for Curve {
    fn from(curve: CircularCurve) -> Self {
        Curve::Circle(curve)
    }
}

impl From<EllipticalCurve> for Curve {
    fn from(curve: EllipticalCurve) -> Self {
        Curve::Ellipse(curve)
    }
}

impl From<ParabolicCurve> for Curve {
    fn from(curve: ParabolicCurve) -> Self {
        Curve::Parabola(curve)
    }
}

impl From<HyperbolicCurve> for Curve {
    fn from(curve: HyperbolicCurve) -> Self {
        Curve::Hyperbola(curve)
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::Line(curve) => fmt::Display::fmt(curve, f),
            Curve::Circle(curve) => fmt::Display::fmt(curve, f),
            Curve::Ellipse(curve) => fmt::Display::fmt(curve, f),
            Curve::Parabola(curve) => fmt::Display::fmt(curve, f),
            Curve::Hyperbola(curve) => fmt::Display::fmt(curve, f),
        }
    }
}
