use crate::{
    error::BandsolError, linear_solver_error, matrix::BandedMatrix, IndexType, LinearSolver,
    Scalar, Vector,
};

use super::factors::{factorize_into, solve_in_place, BandedLuFactors};

/// A [LinearSolver] that factorises the banded matrix directly, using partial pivoting within the
/// band. Factor and pivot storage is allocated by [LinearSolver::set_problem] and reused by every
/// subsequent factorisation.
#[derive(Clone, Debug)]
pub struct LU<T: Scalar> {
    factors: BandedLuFactors<T>,
    factorised: bool,
    pivot_tolerance: T,
}

impl<T: Scalar> Default for LU<T> {
    fn default() -> Self {
        Self {
            factors: BandedLuFactors::zeros(0, 0, 0),
            factorised: false,
            pivot_tolerance: T::zero(),
        }
    }
}

impl<T: Scalar> LU<T> {
    pub fn factors(&self) -> Option<&BandedLuFactors<T>> {
        self.factorised.then_some(&self.factors)
    }
}

impl<T: Scalar> LinearSolver<T> for LU<T> {
    fn set_problem(
        &mut self,
        nrows: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) {
        self.factors = BandedLuFactors::zeros(nrows, upper_bandwidth, lower_bandwidth);
        self.factorised = false;
    }

    fn set_pivot_tolerance(&mut self, tolerance: T) {
        self.pivot_tolerance = tolerance;
    }

    fn set_matrix(&mut self, matrix: &BandedMatrix<T>) -> Result<(), BandsolError> {
        if matrix.nrows() != self.factors.nrows() {
            return Err(linear_solver_error!(MatrixShapeMismatch {
                expected: self.factors.nrows(),
                found: matrix.nrows()
            }));
        }
        self.factorised = false;
        factorize_into(matrix, self.pivot_tolerance, &mut self.factors)?;
        self.factorised = true;
        Ok(())
    }

    fn solve_in_place<V: Vector<T = T>>(&self, b: &mut V) -> Result<(), BandsolError> {
        if !self.factorised {
            return Err(linear_solver_error!(LuNotInitialized));
        }
        solve_in_place(&self.factors, b)
    }

    fn clear_factorisation(&mut self) {
        self.factorised = false;
    }

    fn is_factorised(&self) -> bool {
        self.factorised
    }

    fn nrows(&self) -> IndexType {
        self.factors.nrows()
    }

    fn npivots(&self) -> IndexType {
        self.factors.pivots().len()
    }
}
