//! # Bandsol
//!
//! Bandsol is a library of fixed step integrators for ordinary differential equations (ODEs).
//!
//! The main integrator, [Bdf], solves linear systems `dy/dt = A y + c` with a banded matrix `A`
//! using a Backward Difference Formula. It starts with one first order step and continues with
//! the second order formula, factorising the system matrix once for each. The factorisation
//! itself is done by a [LinearSolver]: the default [BandedLU] works directly on the band, while
//! [NalgebraLU] expands the matrix to dense storage.
//!
//! [TridiagonalIntegrator] wraps [Bdf] for systems given by three diagonals and a constant term,
//! and [ExplicitEuler] integrates general (nonlinear) right hand sides with the forward Euler
//! method.
//!
//! Equations are described through the [Op] family of traits: [NonLinearOde], [LinearOde] and
//! [TridiagonalOde]. Closures can be wrapped with [Closure] and [LinearClosure], and constant
//! tridiagonal systems with [ConstantTridiagonal].
//!
//! Use [IntegratorBuilder] to assemble an integrator from a step size, initial time and initial
//! state, or construct the integrators directly and use the [Integrator] trait to set them up.

pub mod error;
pub mod linear_solver;
pub mod matrix;
pub mod ode_solver;
pub mod op;
pub mod scalar;
pub mod vector;

pub use linear_solver::{BandedLU, LinearSolver, NalgebraLU};
pub use matrix::BandedMatrix;
pub use ode_solver::{
    bdf::{Bdf, BdfPhase, BdfStatistics},
    builder::IntegratorBuilder,
    config::BdfConfig,
    explicit::{ExplicitEuler, ExplicitStatistics},
    method::Integrator,
    solution::OdeSolverSolution,
    state::IntegratorState,
    tridiagonal::TridiagonalIntegrator,
};
pub use op::{
    closure::Closure,
    linear_closure::LinearClosure,
    tridiagonal::{ConstantTridiagonal, TridiagonalLinearOde},
    LinearOde, NonLinearOde, Op, OpStatistics, TridiagonalOde,
};
pub use scalar::{IndexType, Scalar};
pub use vector::Vector;

#[cfg(test)]
mod tests {
    use crate::{
        matrix::BandedMatrix, ConstantTridiagonal, Integrator, IntegratorBuilder, LinearClosure,
        Vector,
    };

    type V = nalgebra::DVector<f64>;

    #[test]
    fn test_crate_docs_example() {
        // dy/dt = -k y + s on three uncoupled states, steady state s/k
        let eqn = LinearClosure::new(
            |p: &V, a: &mut BandedMatrix<f64>| a.add_diagonal(-p[0]),
            |p: &V, c: &mut V| c.fill(p[1]),
            3,
            0,
            0,
            V::from_vec(vec![2.0, 1.0]),
        );
        let mut solver = IntegratorBuilder::new()
            .h(0.05)
            .y0([0.0, 1.0, 2.0])
            .build_bdf(eqn)
            .unwrap();
        while solver.t() < 20.0 {
            solver.step().unwrap();
        }
        solver
            .y()
            .unwrap()
            .assert_eq_st(&V::from_element(3, 0.5), 1e-8);

        // the same steady state from the tridiagonal wrapper with zero off diagonals
        let eqn = ConstantTridiagonal::new(
            V::zeros(3),
            V::from_element(3, -2.0),
            V::zeros(3),
            V::from_element(3, 1.0),
        )
        .unwrap();
        let mut solver = IntegratorBuilder::new()
            .h(0.05)
            .y0([0.0, 1.0, 2.0])
            .build_tridiagonal(eqn)
            .unwrap();
        while solver.t() < 20.0 {
            solver.step().unwrap();
        }
        solver
            .y_new()
            .unwrap()
            .assert_eq_st(&V::from_element(3, 0.5), 1e-8);
    }
}
