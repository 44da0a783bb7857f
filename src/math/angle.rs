use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{Add, Neg, Sub};

use super::{format_number, Coordinate, Tolerance, Vector2};

/// A plane angle in radians carrying its own comparison tolerance.
///
/// Angles are not normalized on construction; [`Angle::normalized`] and
/// [`Angle::normalized_signed`] fold them into a canonical interval.
#[derive(Debug, Clone, Copy)]
pub struct Angle {
    radians: f64,
    tolerance: Tolerance,
}

impl Default for Angle {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Angle {
    /// Creates an angle from radians with the default tolerance.
    #[must_use]
    pub fn new(radians: f64) -> Self {
        Self {
            radians,
            tolerance: Tolerance::default(),
        }
    }

    /// Creates an angle from degrees with the default tolerance.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Angle of the vector pointing from `from` to `to`, in `(−π, π]`.
    #[must_use]
    pub fn between(from: &Coordinate, to: &Coordinate) -> Self {
        let tolerance = Tolerance::governing(from.tolerance(), to.tolerance());
        Self::new((to.y() - from.y()).atan2(to.x() - from.x())).with_tolerance(tolerance)
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    #[must_use]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    #[must_use]
    pub fn radians(&self) -> f64 {
        self.radians
    }

    #[must_use]
    pub fn degrees(&self) -> f64 {
        self.radians.to_degrees()
    }

    #[must_use]
    pub fn cos(&self) -> f64 {
        self.radians.cos()
    }

    #[must_use]
    pub fn sin(&self) -> f64 {
        self.radians.sin()
    }

    /// Unit vector pointing along this angle.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.cos(), self.sin())
    }

    /// Folds the angle into `[0, 2π)`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut radians = self.radians.rem_euclid(TAU);
        if self.tolerance.equals(radians, TAU) {
            radians = 0.0;
        }
        Self {
            radians,
            tolerance: self.tolerance,
        }
    }

    /// Counter-clockwise sweep from this angle to `other`, in `[0, 2π)`.
    ///
    /// Unlike [`Self::normalized`] a sweep just short of a full turn stays
    /// just short of it.
    #[must_use]
    pub fn sweep_to(&self, other: &Angle) -> Self {
        Self {
            radians: (other.radians - self.radians).rem_euclid(TAU),
            tolerance: Tolerance::governing(self.tolerance, other.tolerance),
        }
    }

    /// Folds the angle into `(−π, π]`.
    #[must_use]
    pub fn normalized_signed(&self) -> Self {
        let mut radians = self.normalized().radians;
        if radians > PI {
            radians -= TAU;
        }
        Self {
            radians,
            tolerance: self.tolerance,
        }
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        Tolerance::governing(self.tolerance, other.tolerance).equals(self.radians, other.radians)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Angle {
            radians: self.radians + rhs.radians,
            tolerance: Tolerance::governing(self.tolerance, rhs.tolerance),
        }
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self::Output {
        Angle {
            radians: self.radians - rhs.radians,
            tolerance: Tolerance::governing(self.tolerance, rhs.tolerance),
        }
    }
}

impl Neg for Angle {
    type Output = Angle;

    fn neg(self) -> Self::Output {
        Angle {
            radians: -self.radians,
            tolerance: self.tolerance,
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", format_number(self.degrees(), self.tolerance))
    }
}

/// The signed sweep between two angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularOffset {
    pub start: Angle,
    pub end: Angle,
}

impl AngularOffset {
    #[must_use]
    pub fn new(start: Angle, end: Angle) -> Self {
        Self { start, end }
    }

    /// Offset sweeping `delta` radians counter-clockwise from zero.
    #[must_use]
    pub fn from_radians(delta: f64) -> Self {
        Self::new(Angle::new(0.0), Angle::new(delta))
    }

    /// Signed sweep `end − start`.
    #[must_use]
    pub fn delta(&self) -> Angle {
        self.end - self.start
    }

    /// Length of the circular arc of `radius` subtended by this sweep.
    #[must_use]
    pub fn length_arc(&self, radius: f64) -> f64 {
        radius.abs() * self.delta().radians().abs()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn degrees_round_trip() {
        let a = Angle::from_degrees(90.0);
        assert_relative_eq!(a.radians(), FRAC_PI_2);
        assert_relative_eq!(a.degrees(), 90.0);
    }

    #[test]
    fn between_points() {
        let a = Angle::between(&Coordinate::new(1.0, 1.0), &Coordinate::new(1.0, 3.0));
        assert_relative_eq!(a.radians(), FRAC_PI_2);
    }

    #[test]
    fn normalization() {
        assert_relative_eq!(Angle::new(-FRAC_PI_2).normalized().radians(), 3.0 * FRAC_PI_2);
        assert_relative_eq!(Angle::new(3.0 * FRAC_PI_2).normalized_signed().radians(), -FRAC_PI_2);
        assert_relative_eq!(Angle::new(TAU).normalized().radians(), 0.0);
    }

    #[test]
    fn sweep_keeps_near_full_turns() {
        let start = Angle::new(0.0);
        assert_relative_eq!(start.sweep_to(&Angle::new(-5e-10)).radians(), TAU - 5e-10, epsilon = 1e-15);
        assert_relative_eq!(start.sweep_to(&Angle::new(-FRAC_PI_2)).radians(), 3.0 * FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(Angle::new(FRAC_PI_2).sweep_to(&Angle::new(PI)).radians(), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(start.sweep_to(&start).radians(), 0.0);
    }

    #[test]
    fn arc_length_of_quarter_turn() {
        let offset = AngularOffset::new(Angle::new(0.0), Angle::new(FRAC_PI_2));
        assert_relative_eq!(offset.length_arc(2.0), PI);
    }

    #[test]
    fn displays_degrees() {
        assert_eq!(Angle::from_degrees(30.0).to_string(), "30°");
    }
}
