use std::fmt;

use super::DEFAULT_TOLERANCE;

/// Absolute tolerance used by every equality and sign predicate in the kernel.
///
/// Values of the same infinite sign always compare equal, so `+∞` sentinels
/// returned by out-of-domain queries can be asserted against directly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Tolerance(f64);

impl Default for Tolerance {
    fn default() -> Self {
        Self(DEFAULT_TOLERANCE)
    }
}

impl From<f64> for Tolerance {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Tolerance {
    /// Creates a tolerance. Negative inputs are folded to their magnitude.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value.abs())
    }

    /// Returns the raw tolerance value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns the tolerance that governs a comparison between two operands.
    #[must_use]
    pub fn governing(a: Self, b: Self) -> Self {
        if a.0 >= b.0 {
            a
        } else {
            b
        }
    }

    #[must_use]
    pub fn is_zero(self, value: f64) -> bool {
        value.abs() <= self.0
    }

    #[must_use]
    pub fn is_positive(self, value: f64) -> bool {
        value > self.0
    }

    #[must_use]
    pub fn is_negative(self, value: f64) -> bool {
        value < -self.0
    }

    /// Returns true if `a` and `b` are equal within this tolerance.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn equals(self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        if a.is_infinite() || b.is_infinite() {
            return false;
        }
        (a - b).abs() <= self.0
    }

    #[must_use]
    pub fn greater(self, a: f64, b: f64) -> bool {
        a > b && !self.equals(a, b)
    }

    #[must_use]
    pub fn less(self, a: f64, b: f64) -> bool {
        a < b && !self.equals(a, b)
    }

    #[must_use]
    pub fn at_least(self, a: f64, b: f64) -> bool {
        a > b || self.equals(a, b)
    }

    #[must_use]
    pub fn at_most(self, a: f64, b: f64) -> bool {
        a < b || self.equals(a, b)
    }

    /// Returns true if `value` lies in `[min, max]`, widened by the tolerance.
    #[must_use]
    pub fn within(self, value: f64, min: f64, max: f64) -> bool {
        self.at_least(value, min) && self.at_most(value, max)
    }

    /// Returns true if `value` matches any of `candidates`.
    #[must_use]
    pub fn contains(self, candidates: &[f64], value: f64) -> bool {
        candidates.iter().any(|&c| self.equals(c, value))
    }
}
