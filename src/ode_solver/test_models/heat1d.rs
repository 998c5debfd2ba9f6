use num_traits::Zero;

use crate::{
    matrix::BandedMatrix, ode_solver::solution::OdeSolverSolution, LinearClosure, LinearOde,
    Vector,
};

// second order finite differences of D u_xx on (0, 1) with u = 0 at both ends
// p = [D, dx]
fn heat1d_matrix<V: Vector>(p: &V, a: &mut BandedMatrix<V::T>) {
    let n = a.nrows();
    let d = p[0] / (p[1] * p[1]);
    for i in 0..n {
        a[(i, i)] = V::T::from(-2.0) * d;
        if i > 0 {
            a[(i, i - 1)] = d;
        }
        if i + 1 < n {
            a[(i, i + 1)] = d;
        }
    }
}

fn heat1d_offset<V: Vector>(_p: &V, c: &mut V) {
    c.fill(V::T::zero());
}

/// The 1D heat equation `u_t = D u_xx` discretised on `nstates` interior points, with the lowest
/// Fourier mode `u(x, 0) = sin(pi x)` as initial state. This is an eigenvector of the discrete
/// operator, so the exact solution of the semi-discrete system is `exp(lambda t) u(x, 0)`. The
/// solution is returned at four equally spaced times ending at `t_end`.
pub fn heat1d_problem<V: Vector>(
    nstates: usize,
    diffusivity: f64,
    t_end: f64,
) -> (impl LinearOde<T = V::T, V = V>, V, OdeSolverSolution<V>) {
    const PI: f64 = std::f64::consts::PI;
    let dx = 1.0 / (nstates + 1) as f64;
    let lambda = -4.0 * diffusivity / (dx * dx) * (PI * dx / 2.0).sin().powi(2);
    let mode = |scale: f64| {
        V::from_vec(
            (0..nstates)
                .map(|i| V::T::from(scale * (PI * (i + 1) as f64 * dx).sin()))
                .collect(),
        )
    };
    let p = V::from_vec(vec![V::T::from(diffusivity), V::T::from(dx)]);
    let eqn = LinearClosure::new(
        heat1d_matrix::<V>,
        heat1d_offset::<V>,
        nstates,
        1,
        1,
        p,
    );
    let mut soln = OdeSolverSolution::default();
    for i in 1..=4 {
        let t = t_end * i as f64 / 4.0;
        soln.push(mode((lambda * t).exp()), V::T::from(t));
    }
    (eqn, mode(1.0), soln)
}
