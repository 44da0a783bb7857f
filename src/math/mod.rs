pub mod angle;
pub mod coordinate;
pub mod implicit_2d;
pub mod intersect_2d;
pub mod tolerance;

pub use angle::{Angle, AngularOffset};
pub use coordinate::{CartesianOffset, Coordinate};
pub use implicit_2d::ImplicitConic;
pub use tolerance::Tolerance;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default tolerance carried by coordinates, angles and curves.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Formats `value` with as many decimals as `tolerance` resolves, trimming
/// trailing zeros. Infinities print as `inf` / `-inf`.
#[must_use]
pub fn format_number(value: f64, tolerance: Tolerance) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let decimals = decimal_places(tolerance);
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn decimal_places(tolerance: Tolerance) -> usize {
    let value = tolerance.value();
    if value <= 0.0 || !value.is_finite() {
        return 12;
    }
    (-value.log10()).ceil().clamp(0.0, 12.0) as usize
}
