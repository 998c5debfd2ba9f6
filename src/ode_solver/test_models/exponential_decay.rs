use num_traits::Zero;

use crate::{
    matrix::BandedMatrix, ode_solver::solution::OdeSolverSolution, Closure, LinearClosure,
    LinearOde, NonLinearOde, Vector,
};

// exponential decay problem
// dy/dt = -ay (p = [a])
fn exponential_decay<V: Vector>(x: &V, p: &V, _t: V::T, y: &mut V) {
    for i in 0..x.len() {
        y[i] = -p[0] * x[i];
    }
}

fn exponential_decay_matrix<V: Vector>(p: &V, a: &mut BandedMatrix<V::T>) {
    a.add_diagonal(-p[0]);
}

fn zero_offset<V: Vector>(_p: &V, c: &mut V) {
    c.fill(V::T::zero());
}

/// `nstates` decoupled copies of `dy/dt = -a y` with `y(0) = 1`, plus the exact solution at
/// `t = 0.1, 0.2, ..., 1.0`.
pub fn exponential_decay_problem<V: Vector>(
    a: f64,
    nstates: usize,
) -> (
    impl NonLinearOde<T = V::T, V = V>,
    OdeSolverSolution<V>,
) {
    let p = V::from_vec(vec![V::T::from(a)]);
    let rhs = Closure::new(exponential_decay::<V>, nstates, p);
    let mut soln = OdeSolverSolution::default();
    for i in 1..=10 {
        let t = i as f64 / 10.0;
        let y = V::from_element(nstates, V::T::from((-a * t).exp()));
        soln.push(y, V::T::from(t));
    }
    (rhs, soln)
}

/// The same problem written as the linear ODE `dy/dt = A y` with the diagonal matrix `A = -a I`,
/// returned with the initial state `y(0) = 1`.
pub fn exponential_decay_linear_problem<V: Vector>(
    a: f64,
    nstates: usize,
) -> (impl LinearOde<T = V::T, V = V>, V) {
    let p = V::from_vec(vec![V::T::from(a)]);
    let eqn = LinearClosure::new(
        exponential_decay_matrix::<V>,
        zero_offset::<V>,
        nstates,
        0,
        0,
        p,
    );
    (eqn, V::from_element(nstates, V::T::from(1.0)))
}
