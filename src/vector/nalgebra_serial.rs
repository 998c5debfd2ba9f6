use nalgebra::DVector;

use crate::{IndexType, Scalar};

use super::{Vector, VectorCommon};

impl<T: Scalar> VectorCommon for DVector<T> {
    type T = T;
}

impl<T: Scalar> Vector for DVector<T> {
    fn len(&self) -> IndexType {
        self.len()
    }
    fn norm(&self) -> T {
        self.norm()
    }
    fn from_element(nstates: usize, value: T) -> Self {
        Self::from_element(nstates, value)
    }
    fn from_vec(vec: Vec<T>) -> Self {
        Self::from_vec(vec)
    }
    fn fill(&mut self, value: T) {
        self.fill(value)
    }
    fn copy_from(&mut self, other: &Self) {
        self.copy_from(other)
    }
    fn axpy(&mut self, alpha: T, x: &Self, beta: T) {
        self.axpy(alpha, x, beta);
    }
}
