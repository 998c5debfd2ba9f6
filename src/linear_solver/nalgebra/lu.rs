use nalgebra::{DMatrix, DVector, Dyn};

use crate::{
    error::BandsolError, linear_solver_error, matrix::BandedMatrix, IndexType, LinearSolver,
    Scalar, Vector,
};

/// A [LinearSolver] that expands the banded matrix to a dense one and uses the LU decomposition in
/// the [`nalgebra` library](https://nalgebra.org/). Costs O(N^3) per factorisation, so it is mostly
/// useful as a reference for the banded solver.
#[derive(Clone)]
pub struct LU<T: Scalar> {
    lu: Option<nalgebra::LU<T, Dyn, Dyn>>,
    nrows: IndexType,
    pivot_tolerance: T,
}

impl<T: Scalar> Default for LU<T> {
    fn default() -> Self {
        Self {
            lu: None,
            nrows: 0,
            pivot_tolerance: T::zero(),
        }
    }
}

impl<T: Scalar> LinearSolver<T> for LU<T> {
    fn set_problem(
        &mut self,
        nrows: IndexType,
        _upper_bandwidth: IndexType,
        _lower_bandwidth: IndexType,
    ) {
        self.nrows = nrows;
        self.lu = None;
    }

    fn set_pivot_tolerance(&mut self, tolerance: T) {
        self.pivot_tolerance = tolerance;
    }

    fn set_matrix(&mut self, matrix: &BandedMatrix<T>) -> Result<(), BandsolError> {
        if matrix.nrows() != self.nrows {
            return Err(linear_solver_error!(MatrixShapeMismatch {
                expected: self.nrows,
                found: matrix.nrows()
            }));
        }
        self.lu = None;
        let lu = matrix.to_dense().lu();
        let u: DMatrix<T> = lu.u();
        for i in 0..self.nrows {
            // written so that a NaN pivot is also rejected
            if !(num_traits::abs(u[(i, i)]) > self.pivot_tolerance) {
                return Err(linear_solver_error!(SingularMatrix { column: i }));
            }
        }
        self.lu = Some(lu);
        Ok(())
    }

    fn solve_in_place<V: Vector<T = T>>(&self, b: &mut V) -> Result<(), BandsolError> {
        let lu = match self.lu.as_ref() {
            Some(lu) => lu,
            None => return Err(linear_solver_error!(LuNotInitialized)),
        };
        if b.len() != self.nrows {
            return Err(linear_solver_error!(RhsLengthMismatch {
                expected: self.nrows,
                found: b.len()
            }));
        }
        let mut x = DVector::from_fn(self.nrows, |i, _| b[i]);
        if !lu.solve_mut(&mut x) {
            return Err(linear_solver_error!(LuSolveFailed));
        }
        for i in 0..self.nrows {
            b[i] = x[i];
        }
        Ok(())
    }

    fn clear_factorisation(&mut self) {
        self.lu = None;
    }

    fn is_factorised(&self) -> bool {
        self.lu.is_some()
    }

    fn nrows(&self) -> IndexType {
        self.nrows
    }

    fn npivots(&self) -> IndexType {
        self.nrows
    }
}
