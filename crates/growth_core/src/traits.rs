use crate::error::Result;
use num_traits::{One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A trait for types that can be used as scalars in the growth models.
/// Implemented for `f64` and for `Dual`, so a rule written once generically
/// can be evaluated plainly or differentiated exactly.
pub trait Scalar:
    Copy
    + Debug
    + PartialOrd
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Lifts a constant into the scalar type.
    fn from_f64(value: f64) -> Self;

    /// The real part of the scalar.
    fn value(self) -> f64;

    /// Raises the scalar to a constant real exponent.
    fn powf(self, exponent: f64) -> Self;

    fn ln(self) -> Self;

    fn exp(self) -> Self;
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(self) -> f64 {
        self
    }

    fn powf(self, exponent: f64) -> Self {
        f64::powf(self, exponent)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }
}

/// A one-dimensional update rule `k_{t+1} = g(k_t)`.
pub trait UpdateRule<T: Scalar> {
    /// Evaluates `g(k)`.
    fn apply(&self, k: T) -> T;

    /// Whether `g` is only defined for `k > 0`.
    /// True for every rule built on a fractional power of capital.
    fn requires_positive_state(&self) -> bool {
        true
    }
}

impl<T: Scalar, R: UpdateRule<T> + ?Sized> UpdateRule<T> for &R {
    fn apply(&self, k: T) -> T {
        (**self).apply(k)
    }

    fn requires_positive_state(&self) -> bool {
        (**self).requires_positive_state()
    }
}

/// A trait for steppers that advance the scalar state by one period.
/// Stochastic steppers consume exactly one shock draw per call.
pub trait Steppable {
    /// Returns `k_{t+1}` given `k_t`.
    fn step(&mut self, k: f64) -> Result<f64>;

    /// Whether every state visited by this stepper must stay positive.
    fn requires_positive_state(&self) -> bool {
        true
    }
}

impl<S: Steppable + ?Sized> Steppable for &mut S {
    fn step(&mut self, k: f64) -> Result<f64> {
        (**self).step(k)
    }

    fn requires_positive_state(&self) -> bool {
        (**self).requires_positive_state()
    }
}

impl<S: Steppable + ?Sized> Steppable for Box<S> {
    fn step(&mut self, k: f64) -> Result<f64> {
        (**self).step(k)
    }

    fn requires_positive_state(&self) -> bool {
        (**self).requires_positive_state()
    }
}
