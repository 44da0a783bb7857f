use nalgebra::{Rotation2, Unit};

use crate::math::Vector2;

/// Position and first two derivatives of a parametric curve at one parameter.
///
/// Vectors are expressed in whatever frame the producer used; [`Self::rotated`]
/// maps a local-frame sample into the global frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricPoint {
    pub position: Vector2,
    pub first: Vector2,
    pub second: Vector2,
}

impl ParametricPoint {
    /// `(a cos t, b sin t)`.
    #[must_use]
    pub fn ellipse(a: f64, b: f64, t: f64) -> Self {
        let (sin, cos) = t.sin_cos();
        Self {
            position: Vector2::new(a * cos, b * sin),
            first: Vector2::new(-a * sin, b * cos),
            second: Vector2::new(-a * cos, -b * sin),
        }
    }

    /// `(a sec t, b tan t)`; |t| < π/2 traces the right branch.
    #[must_use]
    pub fn hyperbola(a: f64, b: f64, t: f64) -> Self {
        let sec = 1.0 / t.cos();
        let tan = t.tan();
        Self {
            position: Vector2::new(a * sec, b * tan),
            first: Vector2::new(a * sec * tan, b * sec * sec),
            second: Vector2::new(
                a * sec * (tan * tan + sec * sec),
                2.0 * b * sec * sec * tan,
            ),
        }
    }

    /// `(a t², 2a t)`, a parabola of focal length `a` opening toward +x.
    #[must_use]
    pub fn parabola(a: f64, t: f64) -> Self {
        Self {
            position: Vector2::new(a * t * t, 2.0 * a * t),
            first: Vector2::new(2.0 * a * t, 2.0 * a),
            second: Vector2::new(2.0 * a, 0.0),
        }
    }

    /// Rotates every vector by `angle` radians.
    #[must_use]
    pub fn rotated(&self, angle: f64) -> Self {
        let rotation = Rotation2::new(angle);
        Self {
            position: rotation * self.position,
            first: rotation * self.first,
            second: rotation * self.second,
        }
    }

    /// `dy/dx`; vertical tangents report `±∞` by the sign of `dy/dt`.
    #[must_use]
    pub fn slope(&self, tolerance: f64) -> f64 {
        if self.first.x.abs() <= tolerance * self.first.norm() {
            return if self.first.y >= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        self.first.y / self.first.x
    }

    /// Unsigned curvature `|x'y'' − y'x''| / |r'|³`.
    #[must_use]
    pub fn curvature(&self) -> f64 {
        let speed = self.first.norm();
        self.first.perp(&self.second).abs() / (speed * speed * speed)
    }

    /// Unit tangent in the direction of increasing parameter.
    #[must_use]
    pub fn tangent(&self) -> Unit<Vector2> {
        Unit::new_normalize(self.first)
    }

    /// Unit normal, the tangent turned a quarter turn counter-clockwise.
    #[must_use]
    pub fn normal(&self) -> Unit<Vector2> {
        let t = self.tangent();
        Unit::new_unchecked(Vector2::new(-t.y, t.x))
    }
}
