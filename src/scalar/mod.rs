use std::fmt::Display;

pub trait Scalar: nalgebra::RealField + num_traits::Signed + Copy + From<f64> + Display {
    const INFINITY: Self;
}

pub type IndexType = usize;

impl Scalar for f64 {
    const INFINITY: Self = f64::INFINITY;
}

/// Returns true if `value` is neither infinite nor NaN.
#[inline]
pub fn is_finite<T: Scalar>(value: T) -> bool {
    num_traits::abs(value) < T::INFINITY
}
