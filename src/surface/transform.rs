//! 2D affine transforms with canvas composition rules.

use imageproc::geometric_transformations::Projection;

/// Affine matrix `[a c e; b d f; 0 0 1]`.
///
/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`. Every builder method
/// post-multiplies, so the most recently applied operation acts on points first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.e += self.a.mul_add(tx, self.c * ty);
        self.f += self.b.mul_add(tx, self.d * ty);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.a *= sx;
        self.b *= sx;
        self.c *= sy;
        self.d *= sy;
    }

    pub fn rotate(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let Self { a, b, c, d, .. } = *self;
        self.a = a.mul_add(cos, c * sin);
        self.b = b.mul_add(cos, d * sin);
        self.c = c.mul_add(cos, -(a * sin));
        self.d = d.mul_add(cos, -(b * sin));
    }

    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a.mul_add(x, self.c.mul_add(y, self.e)),
            self.b.mul_add(x, self.d.mul_add(y, self.f)),
        )
    }

    #[must_use]
    pub fn determinant(&self) -> f32 {
        self.a.mul_add(self.d, -(self.b * self.c))
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Inverse transform, `None` when the matrix collapses the plane.
    #[must_use]
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;
        Some(Self {
            a,
            b,
            c,
            d,
            e: -a.mul_add(self.e, c * self.f),
            f: -b.mul_add(self.e, d * self.f),
        })
    }

    /// Axis-aligned bounds of the transformed rectangle, as `(min_x, min_y, max_x, max_y)`.
    #[must_use]
    pub fn bounds(&self, x: f32, y: f32, width: f32, height: f32) -> (f32, f32, f32, f32) {
        let corners = [
            self.apply(x, y),
            self.apply(x + width, y),
            self.apply(x, y + height),
            self.apply(x + width, y + height),
        ];
        corners.iter().fold(
            (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
            |(min_x, min_y, max_x, max_y), &(cx, cy)| {
                (min_x.min(cx), min_y.min(cy), max_x.max(cx), max_y.max(cy))
            },
        )
    }

    /// Equivalent `imageproc` projection, `None` for degenerate matrices.
    #[must_use]
    pub fn to_projection(&self) -> Option<Projection> {
        Projection::from_matrix([self.a, self.c, self.e, self.b, self.d, self.f, 0.0, 0.0, 1.0])
    }
}
