use crate::{error::BandsolError, matrix::BandedMatrix, IndexType, Scalar, Vector};

pub mod banded;
pub mod nalgebra;

pub use self::banded::lu::LU as BandedLU;
pub use self::nalgebra::lu::LU as NalgebraLU;

/// A solver for the linear problem `Mx = b`, where `M` is a square banded matrix that is
/// factorised once and then reused for many right hand sides.
pub trait LinearSolver<T: Scalar>: Default {
    /// Allocate storage for an `nrows` x `nrows` system with the given bandwidths.
    /// Any previous factorisation is discarded.
    fn set_problem(
        &mut self,
        nrows: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    );

    /// Pivots with a magnitude at or below `tolerance` are treated as zero. Defaults to exact zero.
    fn set_pivot_tolerance(&mut self, _tolerance: T) {}

    /// Factorise `matrix`, replacing any previous factorisation.
    /// Fails with `SingularMatrix` if a zero pivot is encountered, in which case the solver is
    /// left without a factorisation.
    fn set_matrix(&mut self, matrix: &BandedMatrix<T>) -> Result<(), BandsolError>;

    /// Solve the problem `Mx = b` and return the solution `x`.
    fn solve<V: Vector<T = T>>(&self, b: &V) -> Result<V, BandsolError> {
        let mut b = b.clone();
        self.solve_in_place(&mut b)?;
        Ok(b)
    }

    /// Solve the problem `Mx = b`, overwriting `b` with `x`.
    fn solve_in_place<V: Vector<T = T>>(&self, b: &mut V) -> Result<(), BandsolError>;

    fn clear_factorisation(&mut self);

    fn is_factorised(&self) -> bool;

    fn nrows(&self) -> IndexType;

    /// Length of the pivot sequence produced by the last factorisation.
    fn npivots(&self) -> IndexType;
}
