//! Scalar trait shared by zone matrices and N-dimensional arrays.
//!
//! Storage is generic over the element precision so that a single
//! implementation serves both single-precision matrices (the usual on-disk
//! precision of skim and trip tables) and double-precision work arrays.
//! Accumulations are always carried out in `f64`.

use std::fmt::{Debug, Display};
use std::iter::Sum;

use num_traits::Float;

/// Real floating-point element type for matrices and arrays.
pub trait Scalar:
    Float + Copy + Debug + Display + Default + Sum + Send + Sync + 'static
{
    /// Convert from an `f64` accumulator.
    fn from_f64(val: f64) -> Self;

    /// Widen to `f64` for accumulation.
    fn as_f64(self) -> f64;

    /// Finite stand-in for an infinite scaling factor (half the type's max).
    fn large_finite() -> f64 {
        0.5 * Self::max_value().as_f64()
    }
}

impl Scalar for f64 {
    #[inline]
    fn from_f64(val: f64) -> Self {
        val
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self
    }
}

impl Scalar for f32 {
    #[inline]
    fn from_f64(val: f64) -> Self {
        val as f32
    }

    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}
