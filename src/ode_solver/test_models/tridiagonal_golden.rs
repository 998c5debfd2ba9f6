use crate::{ode_solver::solution::OdeSolverSolution, ConstantTridiagonal, Vector};

/// Step size of [golden_problem].
pub const GOLDEN_H: f64 = 0.2;

// BDF1 then BDF2 states at steps 0..=5 (t = 0, 0.2, ..., 1.0), computed independently with a
// dense solve of each step's linear system
const GOLDEN_TRACE: [[f64; 5]; 6] = [
    [0.0, 0.5, 2.0, 1.0, 0.0],
    [
        0.08665243271221533,
        0.6065670289855073,
        1.6593167701863354,
        1.0086503623188405,
        0.20123576604554866,
    ],
    [
        0.1618414727689742,
        0.6709696641831018,
        1.3967000471154214,
        1.0045130815500485,
        0.35967060442163523,
    ],
    [
        0.22096821368680852,
        0.6974143841154771,
        1.211189366042974,
        0.9901760476044019,
        0.4719781764954613,
    ],
    [
        0.2636204161141266,
        0.699315498138553,
        1.08315713550511,
        0.9705337465188076,
        0.5464356842546666,
    ],
    [
        0.2917570162528027,
        0.6879080274773814,
        0.9937502236854849,
        0.9491211575910623,
        0.5930034272525343,
    ],
];

/// A five state constant tridiagonal system
///
/// a = [0, 1, 1, 1, 1], b = [-2; 5], c = [1, 1, 1, 1, 0], k = [0, 0, 0, 0.2, 0.4]
///
/// with `y(0) = [0, 0.5, 2, 1, 0]`, returned with the state after each of the first five steps
/// of size [GOLDEN_H].
pub fn golden_problem<V: Vector>() -> (ConstantTridiagonal<V>, V, OdeSolverSolution<V>) {
    let from = |v: &[f64]| V::from_vec(v.iter().map(|x| V::T::from(*x)).collect());
    let eqn = ConstantTridiagonal {
        a: from(&[0.0, 1.0, 1.0, 1.0, 1.0]),
        b: from(&[-2.0; 5]),
        c: from(&[1.0, 1.0, 1.0, 1.0, 0.0]),
        k: from(&[0.0, 0.0, 0.0, 0.2, 0.4]),
    };
    let y0 = from(&GOLDEN_TRACE[0]);
    let mut soln = OdeSolverSolution::default();
    for (i, y) in GOLDEN_TRACE.iter().enumerate() {
        soln.push(from(y), V::T::from(i as f64 * GOLDEN_H));
    }
    (eqn, y0, soln)
}
