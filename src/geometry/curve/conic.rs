use std::f64::consts::PI;

use nalgebra::Unit;

use crate::error::{GeometryError, Result};
use crate::math::{Angle, Coordinate, ImplicitConic, Point2, Tolerance, Vector2};

use super::parametric::ParametricPoint;
use super::range::{CurveRange, LimitPosition, RangeEnd};
use super::{CartesianCurve, LinearCurve, PolarCurve};

/// The four conic kinds, ordered by eccentricity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConicKind {
    Circle,
    Ellipse,
    Parabola,
    Hyperbola,
}

/// Point about which angle-indexed conic queries are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularOrigin {
    LocalOrigin,
    FocusRight,
    FocusLeft,
}

/// Shared invariants of a conic section, derived once at construction.
///
/// The curve lives in a local frame whose origin is the center (the vertex
/// for a parabola) and whose +s axis points along `rotation`. The primary
/// focus and primary major vertex both lie on the +s side:
///
/// | kind      | vertex   | focus    | a              | c          | b           |
/// |-----------|----------|----------|----------------|------------|-------------|
/// | circle    | `(a, 0)` | `(0, 0)` | radius         | 0          | a           |
/// | ellipse   | `(a, 0)` | `(c, 0)` | semi-major     | `a − |FV|` | `√(a² − c²)` |
/// | hyperbola | `(a, 0)` | `(c, 0)` | semi-transverse| `a + |FV|` | `√(c² − a²)` |
/// | parabola  | `(0, 0)` | `(a, 0)` | focal length   | a          | 0           |
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conic {
    kind: ConicKind,
    rotation: Angle,
    focus: Coordinate,
    vertex_major: Coordinate,
    a: f64,
    b: f64,
    c: f64,
    tolerance: Tolerance,
}

impl Conic {
    /// Circle through `vertex_major` about `center`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the vertex coincides with the center.
    pub fn circle(vertex_major: Coordinate, center: Coordinate, tolerance: Tolerance) -> Result<Self> {
        let radius = center.distance_to(&vertex_major);
        if !tolerance.is_positive(radius) {
            return Err(GeometryError::Degenerate("circle radius must be positive".into()).into());
        }
        Ok(Self::from_parts(
            ConicKind::Circle,
            Angle::between(&center, &vertex_major),
            center,
            vertex_major,
            (radius, radius, 0.0),
            tolerance,
        ))
    }

    /// Ellipse with semi-major axis `a` whose right focus is `focus`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the focus coincides with the
    /// vertex, or [`GeometryError::InvalidShape`] if the focus lies farther
    /// than `a` from the vertex.
    pub fn ellipse(
        vertex_major: Coordinate,
        focus: Coordinate,
        a: f64,
        tolerance: Tolerance,
    ) -> Result<Self> {
        let separation = focus.distance_to(&vertex_major);
        if !tolerance.is_positive(separation) {
            return Err(GeometryError::Degenerate("ellipse focus coincides with its vertex".into()).into());
        }
        if !tolerance.at_most(separation, a) {
            return Err(GeometryError::InvalidShape(format!(
                "ellipse focus lies {separation} from its vertex, beyond the semi-major axis {a}"
            ))
            .into());
        }
        let c = (a - separation).max(0.0);
        Ok(Self::from_parts(
            ConicKind::Ellipse,
            Angle::between(&focus, &vertex_major),
            focus,
            vertex_major,
            (a, (a * a - c * c).sqrt(), c),
            tolerance,
        ))
    }

    /// Hyperbola with semi-transverse axis `a` whose right focus is `focus`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `a` is not positive or the
    /// focus coincides with the vertex.
    pub fn hyperbola(
        vertex_major: Coordinate,
        focus: Coordinate,
        a: f64,
        tolerance: Tolerance,
    ) -> Result<Self> {
        if !tolerance.is_positive(a) {
            return Err(GeometryError::Degenerate("hyperbola semi-transverse axis must be positive".into()).into());
        }
        let separation = focus.distance_to(&vertex_major);
        if !tolerance.is_positive(separation) {
            return Err(GeometryError::Degenerate("hyperbola focus coincides with its vertex".into()).into());
        }
        let c = a + separation;
        Ok(Self::from_parts(
            ConicKind::Hyperbola,
            Angle::between(&vertex_major, &focus),
            focus,
            vertex_major,
            (a, (c * c - a * a).sqrt(), c),
            tolerance,
        ))
    }

    /// Parabola with vertex `vertex_major` opening toward `focus`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if the focus coincides with the vertex.
    pub fn parabola(vertex_major: Coordinate, focus: Coordinate, tolerance: Tolerance) -> Result<Self> {
        let focal_length = focus.distance_to(&vertex_major);
        if !tolerance.is_positive(focal_length) {
            return Err(GeometryError::Degenerate("parabola focus coincides with its vertex".into()).into());
        }
        Ok(Self::from_parts(
            ConicKind::Parabola,
            Angle::between(&vertex_major, &focus),
            focus,
            vertex_major,
            (focal_length, 0.0, focal_length),
            tolerance,
        ))
    }

    fn from_parts(
        kind: ConicKind,
        rotation: Angle,
        focus: Coordinate,
        vertex_major: Coordinate,
        (a, b, c): (f64, f64, f64),
        tolerance: Tolerance,
    ) -> Self {
        Self {
            kind,
            rotation: rotation.with_tolerance(tolerance),
            focus: focus.with_tolerance(tolerance),
            vertex_major: vertex_major.with_tolerance(tolerance),
            a,
            b,
            c,
            tolerance,
        }
    }

    /// Rebinds the tolerance and the stored points and rotation with it.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
        self.rotation.set_tolerance(tolerance);
        self.focus.set_tolerance(tolerance);
        self.vertex_major.set_tolerance(tolerance);
    }

    /// Returns which of the four conics this record describes.
    #[must_use]
    pub fn kind(&self) -> ConicKind {
        self.kind
    }

    /// Returns the tolerance shared by every derived quantity.
    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Returns the direction of the local +s axis, center or vertex toward the primary focus.
    #[must_use]
    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    /// Returns the primary focus.
    #[must_use]
    pub fn focus(&self) -> Coordinate {
        self.focus
    }

    /// Returns the primary vertex, on the major axis next to the primary focus.
    #[must_use]
    pub fn vertex_major(&self) -> Coordinate {
        self.vertex_major
    }

    /// `a`: distance from the primary vertex to the local origin, or the
    /// focal length of a parabola.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.a
    }

    /// `b`: distance from a minor vertex to the major axis.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.b
    }

    /// `c`: distance from the primary focus to the local origin.
    #[must_use]
    pub fn focal_distance(&self) -> f64 {
        self.c
    }

    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        match self.kind {
            ConicKind::Circle => 0.0,
            ConicKind::Parabola => 1.0,
            ConicKind::Ellipse | ConicKind::Hyperbola => self.c / self.a,
        }
    }

    /// `p`: half the focal chord perpendicular to the major axis.
    #[must_use]
    pub fn semilatus_rectum(&self) -> f64 {
        let e = self.eccentricity();
        match self.kind {
            ConicKind::Circle => self.a,
            ConicKind::Ellipse => self.a * (1.0 - e * e),
            ConicKind::Parabola => 2.0 * self.a,
            ConicKind::Hyperbola => self.a * (e * e - 1.0),
        }
    }

    /// Signed distance from the local origin to the primary directrix, along the axis.
    #[must_use]
    pub fn directrix_distance(&self) -> f64 {
        match self.kind {
            ConicKind::Circle => f64::INFINITY,
            ConicKind::Parabola => -self.a,
            ConicKind::Ellipse | ConicKind::Hyperbola => {
                if self.tolerance.is_zero(self.c) {
                    f64::INFINITY
                } else {
                    self.a * self.a / self.c
                }
            }
        }
    }

    /// Center of the local frame: the primary focus moved `c` back along the axis.
    #[must_use]
    pub fn local_origin(&self) -> Coordinate {
        self.focus.offset(-self.c, &self.rotation)
    }

    /// Unit vector along the major axis.
    #[must_use]
    pub fn axis(&self) -> Vector2 {
        self.rotation.direction()
    }

    /// Maps local `(s, t)` into a global coordinate.
    #[must_use]
    pub fn to_global(&self, s: f64, t: f64) -> Coordinate {
        let u = self.axis();
        let v = Vector2::new(-u.y, u.x);
        self.local_origin().translate(&(u * s + v * t))
    }

    /// Maps a global coordinate into local `(s, t)`.
    #[must_use]
    pub fn to_local(&self, coordinate: &Coordinate) -> Point2 {
        let u = self.axis();
        let v = Vector2::new(-u.y, u.x);
        let d = self.local_origin().vector_to(coordinate);
        Point2::new(d.dot(&u), d.dot(&v))
    }

    /// The two major vertices, primary first. A parabola repeats its single vertex.
    #[must_use]
    pub fn vertices_major(&self) -> [Coordinate; 2] {
        match self.kind {
            ConicKind::Parabola => [self.vertex_major, self.vertex_major],
            _ => [self.to_global(self.a, 0.0), self.to_global(-self.a, 0.0)],
        }
    }

    /// The two minor vertices, on the +t side first.
    #[must_use]
    pub fn vertices_minor(&self) -> [Coordinate; 2] {
        [self.to_global(0.0, self.b), self.to_global(0.0, -self.b)]
    }

    /// Primary directrix, or `None` when it lies at infinity.
    #[must_use]
    pub fn directrix(&self) -> Option<LinearCurve> {
        self.directrix_at(self.directrix_distance())
    }

    /// The focus mirrored through the local origin. A parabola has none.
    #[must_use]
    pub fn focus_left(&self) -> Option<Coordinate> {
        match self.kind {
            ConicKind::Parabola => None,
            _ => Some(self.to_global(-self.c, 0.0)),
        }
    }

    /// The directrix mirrored through the local origin. Only ellipses and
    /// hyperbolas have one.
    #[must_use]
    pub fn directrix_left(&self) -> Option<LinearCurve> {
        match self.kind {
            ConicKind::Ellipse | ConicKind::Hyperbola => self.directrix_at(-self.directrix_distance()),
            ConicKind::Circle | ConicKind::Parabola => None,
        }
    }

    fn directrix_at(&self, distance: f64) -> Option<LinearCurve> {
        if !distance.is_finite() {
            return None;
        }
        Some(LinearCurve::new(
            self.to_global(distance, 0.0),
            self.to_global(distance, 1.0),
        ))
    }

    /// The curve's equation in its own frame, normalized so the largest
    /// second-degree coefficient is 1 whatever the size of the curve.
    #[must_use]
    pub fn local_implicit(&self) -> ImplicitConic {
        let (a2, b2) = (self.a * self.a, self.b * self.b);
        match self.kind {
            ConicKind::Circle => ImplicitConic::new(1.0, 0.0, 1.0, 0.0, 0.0, -a2),
            ConicKind::Ellipse => ImplicitConic::new(b2, 0.0, a2, 0.0, 0.0, -a2 * b2),
            ConicKind::Hyperbola => ImplicitConic::new(b2, 0.0, -a2, 0.0, 0.0, -a2 * b2),
            ConicKind::Parabola => ImplicitConic::new(0.0, 0.0, 1.0, -4.0 * self.a, 0.0, 0.0),
        }
        .normalized()
    }

    /// The curve's equation in global coordinates.
    #[must_use]
    pub fn implicit(&self) -> ImplicitConic {
        self.local_implicit()
            .to_global(&self.local_origin().point(), self.rotation.radians())
    }

    #[must_use]
    pub fn xs_at_y(&self, y: f64) -> Vec<f64> {
        self.implicit().xs_at_y(y, self.tolerance.value())
    }

    #[must_use]
    pub fn ys_at_x(&self, x: f64) -> Vec<f64> {
        self.implicit().ys_at_x(x, self.tolerance.value())
    }

    /// Focal radius `p / (1 + e·cos φ)` about the primary focus.
    ///
    /// `angle` is local. Ellipses keep their directrix on the +s side of the
    /// primary focus and use `φ = angle`; hyperbolas and parabolas keep it on
    /// the −s side and use `φ = π − angle`. Rays that miss return `+∞`.
    #[must_use]
    pub fn radius_about_focus_right(&self, angle: &Angle) -> f64 {
        let phi = match self.kind {
            ConicKind::Circle => return self.a,
            ConicKind::Ellipse => angle.radians(),
            ConicKind::Parabola | ConicKind::Hyperbola => PI - angle.radians(),
        };
        let denominator = 1.0 + self.eccentricity() * phi.cos();
        if !self.tolerance.is_positive(denominator) {
            return f64::INFINITY;
        }
        self.semilatus_rectum() / denominator
    }

    /// Distance from the local origin to the curve along local `angle`.
    #[must_use]
    pub fn radius_about_local_origin(&self, angle: &Angle) -> f64 {
        let (sin, cos) = angle.radians().sin_cos();
        let (a, b) = (self.a, self.b);
        match self.kind {
            ConicKind::Circle => a,
            ConicKind::Ellipse => a * b / ((b * cos).powi(2) + (a * sin).powi(2)).sqrt(),
            ConicKind::Hyperbola => {
                let denominator = (b * cos).powi(2) - (a * sin).powi(2);
                if denominator <= 0.0 {
                    f64::INFINITY
                } else {
                    a * b / denominator.sqrt()
                }
            }
            ConicKind::Parabola => {
                if self.tolerance.is_zero(sin) {
                    if cos > 0.0 {
                        f64::INFINITY
                    } else {
                        0.0
                    }
                } else {
                    (4.0 * a * cos / (sin * sin)).max(0.0)
                }
            }
        }
    }

    /// Chord length from the primary vertex along `angle`, measured from the
    /// vertex-to-focus direction. Zero when the ray leaves the curve at once.
    #[must_use]
    pub fn radius_about_vertex_major(&self, angle: &Angle) -> f64 {
        let vertex = self.to_local(&self.vertex_major);
        let base = match self.kind {
            ConicKind::Circle | ConicKind::Ellipse => PI,
            ConicKind::Parabola | ConicKind::Hyperbola => 0.0,
        };
        let direction = Angle::new(base + angle.radians()).direction();
        self.local_implicit()
            .line_params(&vertex, &direction, self.tolerance.value())
            .first()
            .copied()
            .filter(|&t| self.tolerance.is_positive(t))
            .unwrap_or(0.0)
    }

    /// Parameter of a local point already known to lie on the curve.
    #[must_use]
    pub fn parameter_of(&self, local: &Point2) -> f64 {
        let (a, b) = (self.a, self.b);
        match self.kind {
            ConicKind::Circle | ConicKind::Ellipse => (local.y / b).atan2(local.x / a),
            ConicKind::Hyperbola => {
                let cos = a / local.x;
                (local.y / b * cos).atan2(cos)
            }
            ConicKind::Parabola => local.y / (2.0 * a),
        }
    }

    /// Parametric sample at `t`, rotated into the global frame.
    ///
    /// The position is relative to the local origin.
    #[must_use]
    pub fn sample(&self, t: f64) -> ParametricPoint {
        let local = match self.kind {
            ConicKind::Circle | ConicKind::Ellipse => ParametricPoint::ellipse(self.a, self.b, t),
            ConicKind::Hyperbola => ParametricPoint::hyperbola(self.a, self.b, t),
            ConicKind::Parabola => ParametricPoint::parabola(self.a, t),
        };
        local.rotated(self.rotation.radians())
    }

    /// Global coordinate at parameter `t`.
    #[must_use]
    pub fn position_at(&self, t: f64) -> Coordinate {
        self.local_origin().translate(&self.sample(t).position)
    }
}

/// Shared query surface of every conic section.
///
/// Provided methods read the [`Conic`] invariants record; a kind with a
/// closed form of its own overrides the relevant method.
pub trait ConicSection: CartesianCurve + PolarCurve {
    fn conic(&self) -> &Conic;

    fn kind(&self) -> ConicKind {
        self.conic().kind()
    }

    fn focus(&self) -> Coordinate {
        self.conic().focus()
    }

    fn vertex_major(&self) -> Coordinate {
        self.conic().vertex_major()
    }

    fn distance_from_vertex_major_to_local_origin(&self) -> f64 {
        self.conic().semi_major()
    }

    fn distance_from_focus_to_local_origin(&self) -> f64 {
        self.conic().focal_distance()
    }

    fn distance_from_vertex_minor_to_major_axis(&self) -> f64 {
        self.conic().semi_minor()
    }

    fn distance_from_directrix_to_local_origin(&self) -> f64 {
        self.conic().directrix_distance()
    }

    fn eccentricity(&self) -> f64 {
        self.conic().eccentricity()
    }

    fn semilatus_rectum_distance(&self) -> f64 {
        self.conic().semilatus_rectum()
    }

    fn directrix(&self) -> Option<LinearCurve> {
        self.conic().directrix()
    }

    fn vertices_major(&self) -> [Coordinate; 2] {
        self.conic().vertices_major()
    }

    fn vertices_minor(&self) -> [Coordinate; 2] {
        self.conic().vertices_minor()
    }

    fn radius_about_focus_right(&self, angle: &Angle) -> f64 {
        self.conic().radius_about_focus_right(angle)
    }

    /// Mirror of [`Self::radius_about_focus_right`] through the minor axis.
    fn radius_about_focus_left(&self, angle: &Angle) -> f64 {
        self.radius_about_focus_right(&(Angle::new(PI) - *angle))
    }

    fn radius_about_vertex_major_right(&self, angle: &Angle) -> f64 {
        self.conic().radius_about_vertex_major(angle)
    }

    fn radius_about(&self, origin: AngularOrigin, angle: &Angle) -> f64 {
        match origin {
            AngularOrigin::LocalOrigin => self.radius_about_local_origin(angle),
            AngularOrigin::FocusRight => self.radius_about_focus_right(angle),
            AngularOrigin::FocusLeft => self.radius_about_focus_left(angle),
        }
    }

    /// Point about which `origin` angles are measured, if the curve has one.
    fn angular_origin(&self, origin: AngularOrigin) -> Option<Coordinate> {
        match origin {
            AngularOrigin::LocalOrigin => Some(self.local_origin()),
            AngularOrigin::FocusRight => Some(self.focus()),
            AngularOrigin::FocusLeft => self.conic().focus_left(),
        }
    }

    /// Curve point along local `angle` about `origin`; `(+∞, +∞)` if none.
    fn coordinate_about(&self, origin: AngularOrigin, angle: &Angle) -> Coordinate {
        let radius = self.radius_about(origin, angle);
        match self.angular_origin(origin) {
            Some(center) if radius.is_finite() => center.offset(radius, &(self.rotation() + *angle)),
            _ => Coordinate::infinity().with_tolerance(self.tolerance()),
        }
    }

    /// Parametric sample at the curve point along `angle` about `origin`.
    fn parametric_about(&self, origin: AngularOrigin, angle: &Angle) -> Option<ParametricPoint> {
        let coordinate = self.coordinate_about(origin, angle);
        if coordinate.is_infinite() {
            return None;
        }
        let conic = self.conic();
        Some(conic.sample(conic.parameter_of(&conic.to_local(&coordinate))))
    }

    /// Global slope `dy/dx` at the curve point along `angle` about `origin`.
    fn slope_about(&self, origin: AngularOrigin, angle: &Angle) -> f64 {
        self.parametric_about(origin, angle)
            .map_or(f64::INFINITY, |p| p.slope(self.tolerance().value()))
    }

    fn curvature_about(&self, origin: AngularOrigin, angle: &Angle) -> f64 {
        self.parametric_about(origin, angle)
            .map_or(f64::INFINITY, |p| p.curvature())
    }

    fn tangent_about(&self, origin: AngularOrigin, angle: &Angle) -> Option<Unit<Vector2>> {
        self.parametric_about(origin, angle).map(|p| p.tangent())
    }

    fn normal_about(&self, origin: AngularOrigin, angle: &Angle) -> Option<Unit<Vector2>> {
        self.parametric_about(origin, angle).map(|p| p.normal())
    }

    fn position_at_parameter(&self, t: f64) -> Coordinate {
        self.conic().position_at(t)
    }

    fn slope_at_parameter(&self, t: f64) -> f64 {
        self.conic().sample(t).slope(self.tolerance().value())
    }

    fn curvature_at_parameter(&self, t: f64) -> f64 {
        self.conic().sample(t).curvature()
    }

    fn tangent_at_parameter(&self, t: f64) -> Unit<Vector2> {
        self.conic().sample(t).tangent()
    }

    fn normal_at_parameter(&self, t: f64) -> Unit<Vector2> {
        self.conic().sample(t).normal()
    }

    /// Total length of the curve.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotSupported`] for kinds without a closed form.
    fn length(&self) -> Result<f64> {
        Err(GeometryError::NotSupported("length of a non-circular conic").into())
    }

    /// Arc length from `start` to `end`, both on the curve.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotSupported`] for kinds without a closed form.
    fn length_between(&self, start: &Coordinate, end: &Coordinate) -> Result<f64> {
        let _ = (start, end);
        Err(GeometryError::NotSupported("arc length of a non-circular conic").into())
    }

    /// The start/end limits bounding the curve, both on the primary vertex
    /// until moved.
    fn range(&self) -> &CurveRange;

    fn range_mut(&mut self) -> &mut CurveRange;

    /// Moves one range limit to the coordinate `position` resolves to.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::RangeError`] if the position cannot be
    /// resolved on this curve.
    fn set_range_limit(&mut self, end: RangeEnd, position: LimitPosition) -> Result<()>
    where
        Self: Sized,
    {
        let coordinate = position.resolve(self)?;
        self.range_mut().limit_mut(end).set_limit(coordinate);
        Ok(())
    }

    /// Straight line between the two range limits.
    fn chord(&self) -> LinearCurve {
        self.range().chord()
    }

    fn chord_length(&self) -> f64 {
        self.range().length_linear()
    }

    /// Arc length covered by the range.
    ///
    /// A closed range covers the whole of a circle or ellipse, and nothing of
    /// an open conic.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotSupported`] for kinds without a closed form.
    fn range_length(&self) -> Result<f64> {
        let range = self.range();
        if range.is_closed() {
            return match self.conic().kind() {
                ConicKind::Circle | ConicKind::Ellipse => self.length(),
                ConicKind::Parabola | ConicKind::Hyperbola => Ok(0.0),
            };
        }
        self.length_between(&range.start.limit(), &range.end.limit())
    }
}

/// Conics that close on themselves: circles and ellipses.
///
/// A closed range on such a curve covers the whole curve.
pub trait ClosedCurve: ConicSection {
    /// True while both range limits sit on the same coordinate.
    fn is_closed_curve(&self) -> bool {
        self.range().is_closed()
    }
}

/// Conics with a second focus and directrix: ellipses and hyperbolas.
pub trait TwoFociCurve: ConicSection {
    fn focus_left(&self) -> Coordinate;

    fn directrix_left(&self) -> Option<LinearCurve>;
}

/// Implements the dynamic capability traits for a type holding a `conic` field.
macro_rules! impl_conic_capabilities {
    ($ty:ty, $name:literal) => {
        impl $crate::geometry::curve::CurveShape for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn tolerance(&self) -> $crate::math::Tolerance {
                self.conic.tolerance()
            }

            fn local_origin(&self) -> $crate::math::Coordinate {
                self.conic.local_origin()
            }

            fn default_limit(&self) -> $crate::math::Coordinate {
                self.conic.vertex_major()
            }

            fn as_cartesian(&self) -> Option<&dyn $crate::geometry::curve::CartesianCurve> {
                Some(self)
            }

            fn as_polar(&self) -> Option<&dyn $crate::geometry::curve::PolarCurve> {
                Some(self)
            }
        }

        impl $crate::geometry::curve::CartesianCurve for $ty {
            fn xs_at_y(&self, y: f64) -> Vec<f64> {
                self.conic.xs_at_y(y)
            }

            fn ys_at_x(&self, x: f64) -> Vec<f64> {
                self.conic.ys_at_x(x)
            }
        }

        impl $crate::geometry::curve::PolarCurve for $ty {
            fn rotation(&self) -> $crate::math::Angle {
                self.conic.rotation()
            }

            fn radius_about_local_origin(&self, angle: &$crate::math::Angle) -> f64 {
                self.conic.radius_about_local_origin(angle)
            }
        }
    };
}

pub(crate) use impl_conic_capabilities;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    #[test]
    fn ellipse_invariants() {
        // a = 5, c = 3, b = 4
        let conic = Conic::ellipse(Coordinate::new(5.0, 0.0), Coordinate::new(3.0, 0.0), 5.0, tol()).unwrap();
        assert_relative_eq!(conic.focal_distance(), 3.0);
        assert_relative_eq!(conic.semi_minor(), 4.0);
        assert_relative_eq!(conic.eccentricity(), 0.6);
        assert_relative_eq!(conic.semilatus_rectum(), 16.0 / 5.0);
        assert_relative_eq!(conic.directrix_distance(), 25.0 / 3.0);
        assert_eq!(conic.local_origin(), Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn ellipse_focus_beyond_axis_is_rejected() {
        let r = Conic::ellipse(Coordinate::new(5.0, 0.0), Coordinate::new(-3.0, 0.0), 5.0, tol());
        assert!(r.is_err());
    }

    #[test]
    fn hyperbola_invariants() {
        // a = 3, c = 5, b = 4
        let conic = Conic::hyperbola(Coordinate::new(3.0, 0.0), Coordinate::new(5.0, 0.0), 3.0, tol()).unwrap();
        assert_relative_eq!(conic.semi_minor(), 4.0);
        assert_relative_eq!(conic.eccentricity(), 5.0 / 3.0);
        assert_relative_eq!(conic.semilatus_rectum(), 16.0 / 3.0);
        assert_relative_eq!(conic.directrix_distance(), 9.0 / 5.0);
    }

    #[test]
    fn parabola_invariants() {
        let conic = Conic::parabola(Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 3.0), tol()).unwrap();
        assert_relative_eq!(conic.eccentricity(), 1.0);
        assert_relative_eq!(conic.semilatus_rectum(), 4.0);
        assert_relative_eq!(conic.directrix_distance(), -2.0);
        assert_eq!(conic.local_origin(), Coordinate::new(1.0, 1.0));
        let directrix = conic.directrix().unwrap();
        assert!(directrix.is_horizontal());
        assert_relative_eq!(directrix.i().y(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn local_frame_round_trip() {
        let conic = Conic::ellipse(Coordinate::new(2.0, 7.0), Coordinate::new(2.0, 4.0), 5.0, tol()).unwrap();
        let global = conic.to_global(1.5, -2.0);
        let local = conic.to_local(&global);
        assert_relative_eq!(local.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(local.y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn parameter_recovers_sampled_points() {
        let conic = Conic::hyperbola(Coordinate::new(3.0, 0.0), Coordinate::new(5.0, 0.0), 3.0, tol()).unwrap();
        for t in [-1.2, -0.3, 0.0, 0.8, 2.5, 3.6] {
            let coordinate = conic.position_at(t);
            let recovered = conic.parameter_of(&conic.to_local(&coordinate));
            assert_eq!(conic.position_at(recovered), coordinate);
        }
    }

    #[test]
    fn sampled_points_satisfy_the_equation() {
        let conic = Conic::parabola(Coordinate::new(-2.0, 1.0), Coordinate::new(0.0, 3.0), tol()).unwrap();
        let implicit = conic.implicit();
        for t in [-2.0, -0.5, 0.0, 1.0, 3.0] {
            let p = conic.position_at(t);
            assert_relative_eq!(implicit.evaluate(p.x(), p.y()), 0.0, epsilon = 1e-9);
        }
    }
}
