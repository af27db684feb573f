//! Coefficient ring for polynomial terms.

use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{One, Signed, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Values a polynomial term can carry.
///
/// Conversions between binary and spin divide by 2 and 4, so implementors
/// should be fields: floats, exact rationals, or symbolic expressions whose
/// division by a constant is exact. No ordering is required; only
/// [`Polynomial::normalize`](crate::Polynomial::normalize) compares
/// magnitudes.
pub trait Coefficient:
    Clone
    + Debug
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Absolute value, used by the default penalty weighting.
    fn magnitude(&self) -> Self;

    /// Small integer constant built from `one()`.
    fn small(n: i32) -> Self {
        let mut value = Self::zero();
        for _ in 0..n.unsigned_abs() {
            value = value + Self::one();
        }
        if n < 0 {
            -value
        } else {
            value
        }
    }
}

impl Coefficient for f64 {
    fn magnitude(&self) -> Self {
        self.abs()
    }

    fn small(n: i32) -> Self {
        f64::from(n)
    }
}

impl Coefficient for f32 {
    fn magnitude(&self) -> Self {
        self.abs()
    }
}

impl<T> Coefficient for Ratio<T>
where
    T: Clone + Debug + Integer + Signed,
{
    fn magnitude(&self) -> Self {
        Signed::abs(self)
    }
}
