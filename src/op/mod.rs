use serde::Serialize;

use crate::{error::BandsolError, matrix::BandedMatrix, IndexType, Scalar, Vector};

pub mod closure;
pub mod linear_closure;
pub mod tridiagonal;

pub trait Op {
    type T: Scalar;
    type V: Vector<T = Self::T>;

    /// Number of states (and equations) of the system.
    fn nstates(&self) -> usize;

    fn statistics(&self) -> OpStatistics {
        OpStatistics::default()
    }
}

// NonLinearOde is the capability needed by the explicit integrators: evaluate the right hand side
// `f(t, y)` of `dy/dt = f(t, y)` into a caller owned buffer.
pub trait NonLinearOde: Op {
    /// Compute `ydot = f(t, y)`.
    fn rhs_inplace(&self, t: Self::T, y: &Self::V, ydot: &mut Self::V);

    fn rhs(&self, t: Self::T, y: &Self::V) -> Self::V {
        let mut ydot = Self::V::zeros(self.nstates());
        self.rhs_inplace(t, y, &mut ydot);
        ydot
    }
}

/// An ODE of the form `dy/dt = A y + c`, where the matrix `A` is banded.
///
/// The implicit integrators query `A` and `c` once, at the first step after a reset, and assume
/// both stay constant until the next reset.
pub trait LinearOde: Op {
    /// Write `A` into `a`, which has been sized to `nstates()` and [LinearOde::bandwidths].
    fn matrix_inplace(&self, a: &mut BandedMatrix<Self::T>) -> Result<(), BandsolError>;

    /// Write the offset `c` into `c`.
    fn offset_inplace(&self, c: &mut Self::V);

    /// Upper and lower bandwidth of `A`. Defaults to a full matrix.
    fn bandwidths(&self) -> (IndexType, IndexType) {
        let n = self.nstates().saturating_sub(1);
        (n, n)
    }

    fn matrix(&self) -> Result<BandedMatrix<Self::T>, BandsolError> {
        let (upper, lower) = self.bandwidths();
        let mut a = BandedMatrix::zeros(self.nstates(), upper, lower);
        self.matrix_inplace(&mut a)?;
        Ok(a)
    }

    fn offset(&self) -> Self::V {
        let mut c = Self::V::zeros(self.nstates());
        self.offset_inplace(&mut c);
        c
    }
}

/// A linear ODE with a tridiagonal matrix, described by its three diagonals and a constant term:
/// `dy_i/dt = a_i y_{i-1} + b_i y_i + c_i y_{i+1} + k_i`. The entries `a_0` and `c_{n-1}` are
/// never read.
pub trait TridiagonalOde: Op {
    fn diagonals_inplace(&self, a: &mut Self::V, b: &mut Self::V, c: &mut Self::V);
    fn constant_inplace(&self, k: &mut Self::V);

    /// Change the number of states, called before the integrator reallocates its storage.
    fn resize(&mut self, nstates: usize);
}

#[derive(Default, Clone, Debug, Serialize)]
pub struct OpStatistics {
    pub number_of_calls: usize,
    pub number_of_matrix_evals: usize,
}

impl OpStatistics {
    pub fn new() -> Self {
        Self {
            number_of_calls: 0,
            number_of_matrix_evals: 0,
        }
    }

    pub fn increment_call(&mut self) {
        self.number_of_calls += 1;
    }

    pub fn increment_matrix(&mut self) {
        self.number_of_matrix_evals += 1;
    }
}
