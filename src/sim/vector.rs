//! 2D vector math
//!
//! Backed by `glam::DVec2` (f64). Arithmetic, `length` and `distance` come
//! from glam; [`VectorExt`] adds the steering helpers with explicit
//! zero-vector fallbacks.

pub type Vector2D = glam::DVec2;

pub trait VectorExt {
    /// Unit vector, or zero when the magnitude is zero (never NaN)
    fn normalized_or_zero(self) -> Self;
    /// Clamp magnitude to `max`, preserving direction
    fn limit(self, max: f64) -> Self;
    /// Heading angle (atan2), in (-π, π]
    fn angle(self) -> f64;
    fn is_zero(self) -> bool;
}

impl VectorExt for Vector2D {
    #[inline]
    fn normalized_or_zero(self) -> Self {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            self / len
        } else {
            Vector2D::ZERO
        }
    }

    #[inline]
    fn limit(self, max: f64) -> Self {
        let max = max.max(0.0);
        let len_sq = self.length_squared();
        if len_sq > max * max {
            self.normalized_or_zero() * max
        } else {
            self
        }
    }

    #[inline]
    fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
