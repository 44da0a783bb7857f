use super::intersect_2d::quadratic_roots;
use super::{Point2, Vector2};

/// General second-degree curve `A x² + B xy + C y² + D x + E y + F = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImplicitConic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl ImplicitConic {
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// The same curve scaled so its largest second-degree coefficient is 1.
    ///
    /// Leaves a curve without second-degree terms untouched.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let scale = self.a.abs().max(self.b.abs()).max(self.c.abs());
        if scale == 0.0 {
            return *self;
        }
        Self {
            a: self.a / scale,
            b: self.b / scale,
            c: self.c / scale,
            d: self.d / scale,
            e: self.e / scale,
            f: self.f / scale,
        }
    }

    /// Maps an equation written in a local frame into global coordinates.
    ///
    /// The local frame has its origin at `origin` and its +s axis rotated by
    /// `rotation` radians from the global +x axis.
    #[must_use]
    #[allow(clippy::similar_names)]
    pub fn to_global(&self, origin: &Point2, rotation: f64) -> Self {
        let (n, c) = rotation.sin_cos();
        let (ox, oy) = (origin.x, origin.y);

        // Rotate: s = c·X + n·Y, t = −n·X + c·Y
        let a = self.a * c * c - self.b * c * n + self.c * n * n;
        let b = 2.0 * self.a * c * n + self.b * (c * c - n * n) - 2.0 * self.c * c * n;
        let cc = self.a * n * n + self.b * c * n + self.c * c * c;
        let d = self.d * c - self.e * n;
        let e = self.d * n + self.e * c;

        // Translate: X = x − ox, Y = y − oy
        Self {
            a,
            b,
            c: cc,
            d: -2.0 * a * ox - b * oy + d,
            e: -b * ox - 2.0 * cc * oy + e,
            f: a * ox * ox + b * ox * oy + cc * oy * oy - d * ox - e * oy + self.f,
        }
    }

    /// Value of the implicit polynomial at `(x, y)`.
    #[must_use]
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        self.a * x * x + self.b * x * y + self.c * y * y + self.d * x + self.e * y + self.f
    }

    /// All `y` on the curve at abscissa `x`, descending.
    #[must_use]
    pub fn ys_at_x(&self, x: f64, tolerance: f64) -> Vec<f64> {
        quadratic_roots(
            self.c,
            self.b * x + self.e,
            self.a * x * x + self.d * x + self.f,
            tolerance,
        )
    }

    /// All `x` on the curve at ordinate `y`, descending.
    #[must_use]
    pub fn xs_at_y(&self, y: f64, tolerance: f64) -> Vec<f64> {
        quadratic_roots(
            self.a,
            self.b * y + self.d,
            self.c * y * y + self.e * y + self.f,
            tolerance,
        )
    }

    /// Parameters `t` where the line `p + t·dir` meets the curve, descending.
    ///
    /// With a unit `dir`, `tolerance` is a distance along the line.
    #[must_use]
    pub fn line_params(&self, p: &Point2, dir: &Vector2, tolerance: f64) -> Vec<f64> {
        let [quadratic, linear, constant] = self.line_coefficients(p, dir);
        quadratic_roots(quadratic, linear, constant, tolerance)
    }

    /// Coefficients `[t², t, 1]` of the polynomial restricted to `p + t·dir`.
    ///
    /// A vanishing `t²` coefficient means the line runs parallel to an
    /// asymptotic direction and can meet the curve at most once.
    #[must_use]
    pub fn line_coefficients(&self, p: &Point2, dir: &Vector2) -> [f64; 3] {
        let (px, py) = (p.x, p.y);
        let (dx, dy) = (dir.x, dir.y);
        [
            self.a * dx * dx + self.b * dx * dy + self.c * dy * dy,
            2.0 * self.a * px * dx
                + self.b * (px * dy + py * dx)
                + 2.0 * self.c * py * dy
                + self.d * dx
                + self.e * dy,
            self.evaluate(px, py),
        ]
    }
}
