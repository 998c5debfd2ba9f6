use crate::{scalar::is_finite, IndexType, Scalar};
use num_traits::Zero;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};

mod nalgebra_serial;

pub trait VectorCommon: Sized + Debug {
    type T: Scalar;
}

impl<'a, V> VectorCommon for &'a V
where
    V: VectorCommon,
{
    type T = V::T;
}

impl<'a, V> VectorCommon for &'a mut V
where
    V: VectorCommon,
{
    type T = V::T;
}

/// An owned, fixed-length state vector.
///
/// Integrators only ever index, copy and combine whole vectors, so this is a much smaller surface
/// than a general linear algebra vector.
pub trait Vector:
    VectorCommon
    + Index<IndexType, Output = Self::T>
    + IndexMut<IndexType, Output = Self::T>
    + Clone
{
    fn len(&self) -> IndexType;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn norm(&self) -> Self::T;
    fn from_element(nstates: usize, value: Self::T) -> Self;
    fn zeros(nstates: usize) -> Self {
        Self::from_element(nstates, Self::T::zero())
    }
    fn from_vec(vec: Vec<Self::T>) -> Self;
    fn fill(&mut self, value: Self::T);
    fn copy_from(&mut self, other: &Self);

    /// self = alpha * x + beta * self
    fn axpy(&mut self, alpha: Self::T, x: &Self, beta: Self::T);

    fn all_finite(&self) -> bool {
        (0..self.len()).all(|i| is_finite(self[i]))
    }

    fn assert_eq_st(&self, other: &Self, tol: Self::T) {
        let tol = Self::from_element(self.len(), tol);
        self.assert_eq(other, &tol);
    }
    fn assert_eq(&self, other: &Self, tol: &Self) {
        assert_eq!(
            self.len(),
            other.len(),
            "Vector length mismatch: {} != {}",
            self.len(),
            other.len()
        );
        for i in 0..self.len() {
            if num_traits::abs(self[i] - other[i]) > tol[i] {
                eprintln!("left: {:?}", self);
                eprintln!("right: {:?}", other);
                panic!(
                    "Vector element mismatch at index {}: {} != {}",
                    i, self[i], other[i]
                );
            }
        }
    }
}
