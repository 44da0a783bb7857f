use super::{Point2, Vector2};

/// Leading coefficients below this magnitude are treated as zero.
///
/// The bound is absolute, so callers feed it equations normalized to a
/// largest second-degree coefficient of 1 (see `ImplicitConic::normalized`).
pub const DEGENERATE_COEFFICIENT: f64 = 1e-12;

/// Real roots of `a·t² + b·t + c = 0`, sorted in descending order.
///
/// A root pair whose half-spread `√|Δ| / 2|a|` is within `tolerance`
/// collapses to the single double root, including slightly negative
/// discriminants. Degenerates to the linear solution when `a` vanishes.
#[must_use]
pub fn quadratic_roots(a: f64, b: f64, c: f64, tolerance: f64) -> Vec<f64> {
    if a.abs() < DEGENERATE_COEFFICIENT {
        if b.abs() < DEGENERATE_COEFFICIENT {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    let half_spread = discriminant.abs().sqrt() / (2.0 * a.abs());
    tracing::trace!(discriminant, half_spread, "quadratic roots");

    if half_spread <= tolerance {
        return vec![-b / (2.0 * a)];
    }
    if discriminant < 0.0 {
        return Vec::new();
    }

    let vertex = -b / (2.0 * a);
    vec![vertex + half_spread, vertex - half_spread]
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}

/// Radical line of two circles.
///
/// Returns the foot of the radical line on the center-to-center line and the
/// unit direction of the radical line, or `None` for concentric circles.
/// The foot lies at `(d² + r1² − r2²) / 2d` from `c1`.
#[must_use]
pub fn radical_line_2d(
    c1: &Point2,
    r1: f64,
    c2: &Point2,
    r2: f64,
    tolerance: f64,
) -> Option<(Point2, Vector2)> {
    let axis = c2 - c1;
    let dist = axis.norm();
    if dist < tolerance {
        return None;
    }
    let unit = axis / dist;
    let foot = (dist * dist + r1 * r1 - r2 * r2) / (2.0 * dist);
    Some((c1 + unit * foot, Vector2::new(-unit.y, unit.x)))
}
