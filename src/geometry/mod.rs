pub mod curve;

pub use curve::{
    CircularCurve, Curve, CurveLimit, CurveRange, EllipticalCurve, HyperbolicCurve, LinearCurve, ParabolicCurve,
};
