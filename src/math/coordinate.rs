use std::fmt;

use super::{format_number, Angle, Point2, Tolerance, Vector2};

/// A point in the global Cartesian plane carrying its own tolerance.
///
/// Equality is tolerance-aware and uses the governing tolerance of the two
/// operands. Coordinates at infinity are used as out-of-domain sentinels.
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    point: Point2,
    tolerance: Tolerance,
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<Point2> for Coordinate {
    fn from(point: Point2) -> Self {
        Self {
            point,
            tolerance: Tolerance::default(),
        }
    }
}

impl Coordinate {
    /// Creates a coordinate with the default tolerance.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self::from(Point2::new(x, y))
    }

    /// `(+∞, +∞)`.
    #[must_use]
    pub fn infinity() -> Self {
        Self::new(f64::INFINITY, f64::INFINITY)
    }

    /// `(−∞, −∞)`.
    #[must_use]
    pub fn neg_infinity() -> Self {
        Self::new(f64::NEG_INFINITY, f64::NEG_INFINITY)
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
    pub fn x(&self) -> f64 {
        self.point.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.point.y
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        self.point
    }

    /// Returns true if either component is infinite.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        self.point.x.is_infinite() || self.point.y.is_infinite()
    }

    /// Moves `distance` along `angle`. The result keeps this tolerance.
    #[must_use]
    pub fn offset(&self, distance: f64, angle: &Angle) -> Self {
        self.translate(&(angle.direction() * distance))
    }

    #[must_use]
    pub fn translate(&self, delta: &Vector2) -> Self {
        Self {
            point: self.point + delta,
            tolerance: self.tolerance,
        }
    }

    /// Vector from this coordinate to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Coordinate) -> Vector2 {
        other.point - self.point
    }

    #[must_use]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        nalgebra::distance(&self.point, &other.point)
    }

    #[must_use]
    pub fn angle_to(&self, other: &Coordinate) -> Angle {
        Angle::between(self, other)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        let tolerance = Tolerance::governing(self.tolerance, other.tolerance);
        tolerance.equals(self.x(), other.x()) && tolerance.equals(self.y(), other.y())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})",
            format_number(self.x(), self.tolerance),
            format_number(self.y(), self.tolerance)
        )
    }
}

/// Straight-line offset from coordinate `i` to coordinate `j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartesianOffset {
    pub i: Coordinate,
    pub j: Coordinate,
}

impl CartesianOffset {
    #[must_use]
    pub fn new(i: Coordinate, j: Coordinate) -> Self {
        Self { i, j }
    }

    /// Signed x-separation `j.x − i.x`.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.j.x() - self.i.x()
    }

    /// Signed y-separation `j.y − i.y`.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.j.y() - self.i.y()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.i.distance_to(&self.j)
    }
}
