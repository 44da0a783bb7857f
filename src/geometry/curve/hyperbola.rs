use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{format_number, Angle, Coordinate, Tolerance};

use super::conic::{impl_conic_capabilities, Conic, ConicSection, TwoFociCurve};
use super::range::CurveRange;
use super::{CurveShape, LinearCurve, PolarCurve};

/// A hyperbola given by the vertex of its primary branch, the focus inside
/// that branch, and the semi-transverse axis `a`.
///
/// Besides the shared invariants it keeps the mirrored focus, directrix and
/// minor vertices, plus the two asymptotes through the center. The range
/// starts closed on the primary vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperbolicCurve {
    conic: Conic,
    range: CurveRange,
    focus_left: Coordinate,
    directrix_left: Option<LinearCurve>,
    vertices_minor: [Coordinate; 2],
    asymptotes: [LinearCurve; 2],
}

impl HyperbolicCurve {
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `a` is not positive or the
    /// focus coincides with the vertex.
    pub fn new(vertex_major: Coordinate, focus: Coordinate, a: f64) -> Result<Self> {
        let tolerance = Tolerance::governing(vertex_major.tolerance(), focus.tolerance());
        let conic = Conic::hyperbola(vertex_major, focus, a, tolerance)?;
        let (a, b) = (conic.semi_major(), conic.semi_minor());
        let center = conic.local_origin();
        Ok(Self {
            range: CurveRange::new(center, conic.vertex_major(), tolerance),
            focus_left: conic.to_global(-conic.focal_distance(), 0.0),
            directrix_left: conic.directrix_left(),
            vertices_minor: conic.vertices_minor(),
            asymptotes: [
                LinearCurve::new(center, conic.to_global(a, b)),
                LinearCurve::new(center, conic.to_global(a, -b)),
            ],
            conic,
        })
    }

    /// Hyperbola from its semi-axes, centered on `center` with its transverse
    /// axis along `rotation`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if an axis is not positive.
    pub fn from_axes(a: f64, b: f64, center: Coordinate, rotation: &Angle) -> Result<Self> {
        let tolerance = center.tolerance();
        if !tolerance.is_positive(a) || !tolerance.is_positive(b) {
            return Err(GeometryError::Degenerate(format!("hyperbola axes {a} and {b} must be positive")).into());
        }
        let c = a.hypot(b);
        Self::new(center.offset(a, rotation), center.offset(c, rotation), a)
    }

    /// Rebinds the tolerance of the hyperbola and every stored part.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        tracing::debug!(%tolerance, "rebinding hyperbolic curve tolerance");
        self.conic.set_tolerance(tolerance);
        self.range.set_tolerance(tolerance);
        self.focus_left.set_tolerance(tolerance);
        if let Some(directrix) = self.directrix_left.as_mut() {
            directrix.set_tolerance(tolerance);
        }
        for vertex in &mut self.vertices_minor {
            vertex.set_tolerance(tolerance);
        }
        for asymptote in &mut self.asymptotes {
            asymptote.set_tolerance(tolerance);
        }
    }

    /// Returns the hyperbola rebound to `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.set_tolerance(tolerance);
        self
    }

    /// Returns the center, midway between the two foci.
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.conic.local_origin()
    }

    /// The asymptotes through the center, local slopes `+b/a` then `−b/a`.
    #[must_use]
    pub fn asymptotes(&self) -> [LinearCurve; 2] {
        self.asymptotes
    }
}

impl_conic_capabilities!(HyperbolicCurve, "hyperbolic curve");

impl ConicSection for HyperbolicCurve {
    fn conic(&self) -> &Conic {
        &self.conic
    }

    fn vertices_minor(&self) -> [Coordinate; 2] {
        self.vertices_minor
    }

    fn range(&self) -> &CurveRange {
        &self.range
    }

    fn range_mut(&mut self) -> &mut CurveRange {
        &mut self.range
    }
}

impl TwoFociCurve for HyperbolicCurve {
    fn focus_left(&self) -> Coordinate {
        self.focus_left
    }

    fn directrix_left(&self) -> Option<LinearCurve> {
        self.directrix_left
    }
}

impl fmt::Display for HyperbolicCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tolerance = self.tolerance();
        write!(
            f,
            "Hyperbolic Curve - Center: {}, a: {}, b: {}, Rotation: {}",
            self.center(),
            format_number(self.conic.semi_major(), tolerance),
            format_number(self.conic.semi_minor(), tolerance),
            self.rotation()
        )
    }
}
