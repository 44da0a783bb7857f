use crate::error::{GeometryError, RangeError, Result};
use crate::geometry::curve::{CartesianCurve, Curve};
use crate::math::Coordinate;

/// Computes the length of a curve, or of the arc between two of its points.
pub struct Length<'a> {
    curve: &'a Curve,
    between: Option<(Coordinate, Coordinate)>,
}

impl<'a> Length<'a> {
    /// Length of the whole curve: the control segment of a line, the range
    /// of a conic. A closed range is the full perimeter of a circle or
    /// ellipse and zero on a parabola or hyperbola.
    #[must_use]
    pub fn new(curve: &'a Curve) -> Self {
        Self { curve, between: None }
    }

    /// Length of the arc from `start` to `end`, both on the curve.
    #[must_use]
    pub fn between(curve: &'a Curve, start: Coordinate, end: Coordinate) -> Self {
        Self {
            curve,
            between: Some((start, end)),
        }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::CoordinateNotOnCurve`] if an end point misses the
    /// curve, or [`GeometryError::NotSupported`] where no closed form exists.
    pub fn execute(&self) -> Result<f64> {
        match (self.curve, self.between) {
            (Curve::Line(line), None) => Ok(line.length()),
            (Curve::Line(line), Some((start, end))) => {
                for coordinate in [start, end] {
                    if !line.is_intersecting_coordinate(&coordinate) {
                        return Err(RangeError::CoordinateNotOnCurve(coordinate).into());
                    }
                }
                Ok(start.distance_to(&end))
            }
            (curve, between) => {
                let conic = curve
                    .as_conic()
                    .ok_or(GeometryError::NotSupported("length of a non-conic curve"))?;
                match between {
                    Some((start, end)) => conic.length_between(&start, &end),
                    None => conic.range_length(),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::geometry::curve::{
        CircularCurve, ConicSection, EllipticalCurve, HyperbolicCurve, LimitPosition, LinearCurve, ParabolicCurve,
        RangeEnd,
    };
    use crate::math::Angle;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn line_length_3_4_5() {
        let line = Curve::from(LinearCurve::new(Coordinate::new(0.0, 0.0), Coordinate::new(3.0, 4.0)));
        assert_relative_eq!(Length::new(&line).execute().unwrap(), 5.0);
        let along = Length::between(&line, Coordinate::new(3.0, 4.0), Coordinate::new(6.0, 8.0));
        assert_relative_eq!(along.execute().unwrap(), 5.0);
        let off = Length::between(&line, Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!(off.execute().is_err());
    }

    #[test]
    fn circle_range_length() {
        let mut circle = CircularCurve::from_radius(2.0, Coordinate::new(0.0, 0.0)).unwrap();
        assert_relative_eq!(Length::new(&Curve::from(circle.clone())).execute().unwrap(), 4.0 * PI);

        circle
            .set_range_limit(RangeEnd::End, LimitPosition::Rotation(Angle::new(FRAC_PI_2)))
            .unwrap();
        let curve = Curve::from(circle);
        assert_relative_eq!(Length::new(&curve).execute().unwrap(), PI, epsilon = 1e-9);
        let arc = Length::between(&curve, Coordinate::new(0.0, 2.0), Coordinate::new(2.0, 0.0));
        assert_relative_eq!(arc.execute().unwrap(), 3.0 * PI, epsilon = 1e-9);
    }

    #[test]
    fn parabola_arc_length() {
        let parabola = Curve::from(ParabolicCurve::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)).unwrap());
        let arc = Length::between(&parabola, Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 2.0));
        assert_relative_eq!(arc.execute().unwrap(), 2.0_f64.sqrt() + 1.0_f64.asinh(), epsilon = 1e-12);
    }

    #[test]
    fn parabola_range_length() {
        let mut parabola = ParabolicCurve::new(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)).unwrap();
        assert_relative_eq!(Length::new(&Curve::from(parabola.clone())).execute().unwrap(), 0.0);

        parabola
            .set_range_limit(RangeEnd::End, LimitPosition::Coordinate(Coordinate::new(1.0, 2.0)))
            .unwrap();
        let length = Length::new(&Curve::from(parabola)).execute().unwrap();
        assert_relative_eq!(length, 2.0_f64.sqrt() + 1.0_f64.asinh(), epsilon = 1e-12);
    }

    #[test]
    fn elliptic_and_hyperbolic_lengths_are_not_supported() {
        let ellipse = Curve::from(
            EllipticalCurve::from_axes(5.0, 4.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).unwrap(),
        );
        assert!(Length::new(&ellipse).execute().is_err());

        let mut hyperbola = HyperbolicCurve::from_axes(3.0, 4.0, Coordinate::new(0.0, 0.0), &Angle::new(0.0)).unwrap();
        assert_relative_eq!(Length::new(&Curve::from(hyperbola.clone())).execute().unwrap(), 0.0);
        hyperbola.set_range_limit(RangeEnd::End, LimitPosition::Y(4.0)).unwrap();
        assert!(Length::new(&Curve::from(hyperbola)).execute().is_err());
    }
}
