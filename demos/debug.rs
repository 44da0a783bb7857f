//! Conica debug run: builds a few conics and logs their queries.
//!
//! Usage:
//! ```text
//! cargo run --example debug
//! RUST_LOG=conica=trace cargo run --example debug
//! ```

use conica::geometry::curve::{ConicSection, LimitPosition, RangeEnd};
use conica::geometry::{CircularCurve, Curve, EllipticalCurve, LinearCurve, ParabolicCurve};
use conica::math::{Angle, Coordinate};
use conica::operations::query::{CurveCurveIntersect, Length, PerpendicularProjection};
use conica::ConicaError;

fn main() -> Result<(), ConicaError> {
    // Default: WARN for everything, DEBUG for conica.
    // Override with RUST_LOG env var (e.g. RUST_LOG=conica=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("debug=info".parse().unwrap_or_default())
        .add_directive("conica=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Case 1: two crossing circles
    let first = Curve::from(CircularCurve::from_radius(6.0, Coordinate::new(4.0, 5.0))?);
    let second = Curve::from(CircularCurve::from_radius(5.0, Coordinate::new(12.0, 9.0))?);
    let crossing = CurveCurveIntersect::new(&first, &second).execute()?;
    tracing::info!(kind = ?crossing.kind, count = crossing.coordinates.len(), "{first} x {second}");
    for coordinate in &crossing.coordinates {
        tracing::info!("  at {coordinate}");
    }

    // Case 2: a line tangent to an ellipse
    let ellipse = Curve::from(EllipticalCurve::from_axes(5.0, 4.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0))?);
    let line = Curve::from(LinearCurve::new(Coordinate::new(-1.0, 4.0), Coordinate::new(1.0, 4.0)));
    let touch = CurveCurveIntersect::new(&line, &ellipse).execute()?;
    tracing::info!(kind = ?touch.kind, "{line} x {ellipse}");

    // Case 3: quarter arc of a circle
    let mut quarter = CircularCurve::from_radius(2.0, Coordinate::new(0.0, 0.0))?;
    quarter.set_range_limit(RangeEnd::End, LimitPosition::Rotation(Angle::from_degrees(90.0)))?;
    let quarter = Curve::from(quarter);
    tracing::info!(length = Length::new(&quarter).execute()?, "{quarter}");

    // Case 4: projection onto a circle
    let projection = PerpendicularProjection::new(&first, Coordinate::new(20.0, 5.0)).execute()?;
    tracing::info!("near {} far {}", projection.near, projection.far);

    // Case 5: parabola focal radii
    let parabola = ParabolicCurve::new(Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 3.0))?;
    for degrees in [90.0, 135.0, 180.0] {
        let angle = Angle::from_degrees(degrees);
        tracing::info!(
            radius = parabola.radius_about_focus_right(&angle),
            "{parabola} at {angle}"
        );
    }

    Ok(())
}
