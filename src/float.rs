//! Floating-point abstraction trait for generic numeric operations.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Trait abstracting floating-point operations needed by the cloth engine.
///
/// Implemented for `f32` and `f64`. `Send + Sync` so particle arenas can be
/// handed to the parallel backend.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + Send
    + Sync
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Positive infinity, used for unbreakable springs.
    fn infinity() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Largest integer not greater than `self`.
    fn floor(self) -> Self;
    /// `self` raised to the power `exp`.
    fn pow(self, exp: Self) -> Self;
    /// Convert from f32, for values declared as `f32`.
    fn from_f32(v: f32) -> Self;
    /// Convert from f64, for physical constants written as literals.
    fn from_f64(v: f64) -> Self;
    /// Neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }

    /// Convert a grid count or index.
    fn from_usize(v: usize) -> Self {
        Self::from_f64(v as f64)
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn infinity() -> Self { f32::INFINITY }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn floor(self) -> Self { libm::floorf(self) }
    fn pow(self, exp: Self) -> Self { libm::powf(self, exp) }
    fn from_f32(v: f32) -> Self { v }
    fn from_f64(v: f64) -> Self { v as f32 }
    fn is_finite(self) -> bool { f32::is_finite(self) }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn two() -> Self { 2.0 }
    fn infinity() -> Self { f64::INFINITY }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn floor(self) -> Self { libm::floor(self) }
    fn pow(self, exp: Self) -> Self { libm::pow(self, exp) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_f64(v: f64) -> Self { v }
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_is_not_finite() {
        assert!(!<f32 as Float>::infinity().is_finite());
        assert!(<f64 as Float>::from_usize(3).is_finite());
    }

    #[test]
    fn f64_constants_are_exact() {
        assert_eq!(<f64 as Float>::from_f64(0.98), 0.98);
        assert_eq!(<f64 as Float>::from_f64(9.8), 9.8);
        assert_ne!(<f64 as Float>::from_f32(0.98), 0.98);
    }

    #[test]
    fn floor_rounds_down() {
        assert_eq!(<f32 as Float>::floor(1.7), 1.0);
        assert_eq!(<f64 as Float>::floor(-0.5), -1.0);
    }
}
