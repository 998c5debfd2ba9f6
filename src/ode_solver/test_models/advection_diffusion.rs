use crate::{matrix::BandedMatrix, LinearClosure, LinearOde, Vector};

// u_t + v u_x = D u_xx + s on (0, 1) with u = 0 at both ends, second order upwind differences
// for the advection term, so each row couples two points behind and one point ahead.
// p = [v, D, s, dx]
fn advection_diffusion_matrix<V: Vector>(p: &V, a: &mut BandedMatrix<V::T>) {
    let n = a.nrows();
    let (v, d, dx) = (p[0], p[1], p[3]);
    let two = V::T::from(2.0);
    let diffusion = d / (dx * dx);
    let advection = v / (two * dx);
    for i in 0..n {
        a[(i, i)] = -two * diffusion - V::T::from(3.0) * advection;
        if i > 0 {
            a[(i, i - 1)] = diffusion + V::T::from(4.0) * advection;
        }
        if i > 1 {
            a[(i, i - 2)] = -advection;
        }
        if i + 1 < n {
            a[(i, i + 1)] = diffusion;
        }
    }
}

fn advection_diffusion_offset<V: Vector>(p: &V, c: &mut V) {
    c.fill(p[2]);
}

/// Advection-diffusion with a uniform source on `nstates` interior points. The matrix has
/// upper bandwidth 1 and lower bandwidth 2 and is not symmetric, so factorising it exercises
/// row interchanges inside the band.
pub fn advection_diffusion_problem<V: Vector>(
    nstates: usize,
) -> (impl LinearOde<T = V::T, V = V>, V) {
    let dx = 1.0 / (nstates + 1) as f64;
    let p = V::from_vec(
        [20.0, 0.05, 1.0, dx]
            .iter()
            .map(|x| V::T::from(*x))
            .collect(),
    );
    let eqn = LinearClosure::new(
        advection_diffusion_matrix::<V>,
        advection_diffusion_offset::<V>,
        nstates,
        1,
        2,
        p,
    );
    let y0 = V::from_vec(
        (0..nstates)
            .map(|i| {
                let x = (i + 1) as f64 * dx;
                V::T::from((-100.0 * (x - 0.3) * (x - 0.3)).exp())
            })
            .collect(),
    );
    (eqn, y0)
}
