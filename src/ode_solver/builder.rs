use crate::{
    error::BandsolError, integrator_error, linear_solver::BandedLU, Bdf, BdfConfig,
    ExplicitEuler, IndexType, Integrator, LinearOde, LinearSolver, NonLinearOde, Op, Scalar,
    TridiagonalIntegrator, TridiagonalOde, Vector,
};

/// Builder for integrators. Use methods to set parameters and then call one of the build methods
/// when done.
///
/// # Example
///
/// ```rust
/// use bandsol::{IntegratorBuilder, Integrator, LinearClosure, matrix::BandedMatrix};
/// type V = nalgebra::DVector<f64>;
///
/// // dy/dt = -a y + 1
/// let eqn = LinearClosure::new(
///     |p: &V, a: &mut BandedMatrix<f64>| a.add_diagonal(-p[0]),
///     |_p: &V, c: &mut V| c.fill(1.0),
///     2,
///     0,
///     0,
///     V::from_vec(vec![0.5]),
/// );
/// let mut solver = IntegratorBuilder::new()
///     .h(0.1)
///     .y0([1.0, 2.0])
///     .build_bdf(eqn)
///     .unwrap();
/// while solver.t() < 1.0 {
///     solver.step().unwrap();
/// }
/// ```
pub struct IntegratorBuilder {
    t0: f64,
    h: f64,
    y0: Option<Vec<f64>>,
    bandwidths: Option<(IndexType, IndexType)>,
    pivot_tolerance: f64,
    check_finite: bool,
}

impl Default for IntegratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegratorBuilder {
    /// Create a new builder with default parameters:
    /// - t0 = 0.0
    /// - h = 1.0
    /// - no initial state
    /// - bandwidths taken from the equations
    /// - pivot_tolerance = 0.0
    /// - check_finite = true
    pub fn new() -> Self {
        Self {
            t0: 0.0,
            h: 1.0,
            y0: None,
            bandwidths: None,
            pivot_tolerance: 0.0,
            check_finite: true,
        }
    }

    /// Set the initial time.
    pub fn t0(mut self, t0: f64) -> Self {
        self.t0 = t0;
        self
    }

    /// Set the (fixed) step size.
    pub fn h(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Set the initial state, which also fixes the number of states.
    pub fn y0<V, T>(mut self, y0: V) -> Self
    where
        V: IntoIterator<Item = T>,
        f64: From<T>,
    {
        self.y0 = Some(y0.into_iter().map(|x| f64::from(x)).collect());
        self
    }

    /// Override the upper and lower bandwidths reported by the equations.
    pub fn bandwidths(mut self, upper: IndexType, lower: IndexType) -> Self {
        self.bandwidths = Some((upper, lower));
        self
    }

    pub fn pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }

    pub fn check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    fn config<T: Scalar>(&self) -> BdfConfig<T> {
        BdfConfig {
            pivot_tolerance: T::from(self.pivot_tolerance),
            check_finite: self.check_finite,
        }
    }

    fn build_y0<V: Vector>(&self) -> Result<V, BandsolError> {
        let y0 = self.y0.as_ref().ok_or(integrator_error!(
            InvalidConfiguration,
            "initial state not set".to_string()
        ))?;
        Ok(V::from_vec(y0.iter().map(|x| V::T::from(*x)).collect()))
    }

    /// Set up `solver` from the builder's time, step size and initial state.
    fn initialise<Eqn, S>(&self, solver: &mut S, y0: &Eqn::V) -> Result<(), BandsolError>
    where
        Eqn: Op,
        S: Integrator<Eqn>,
    {
        solver.set_y0(y0)?;
        solver.set_t0(Eqn::T::from(self.t0))?;
        solver.set_h(Eqn::T::from(self.h))
    }

    /// Build a forward Euler integrator.
    pub fn build_explicit<Eqn: NonLinearOde>(
        self,
        eqn: Eqn,
    ) -> Result<ExplicitEuler<Eqn>, BandsolError> {
        let y0 = self.build_y0::<Eqn::V>()?;
        let mut solver = ExplicitEuler::new(eqn);
        self.initialise::<Eqn, _>(&mut solver, &y0)?;
        Ok(solver)
    }

    /// Build a BDF integrator using the banded LU solver.
    pub fn build_bdf<Eqn: LinearOde>(self, eqn: Eqn) -> Result<Bdf<Eqn>, BandsolError> {
        self.build_bdf_with_solver(eqn, BandedLU::default())
    }

    /// Build a BDF integrator using the given linear solver.
    pub fn build_bdf_with_solver<Eqn, LS>(
        self,
        eqn: Eqn,
        linear_solver: LS,
    ) -> Result<Bdf<Eqn, LS>, BandsolError>
    where
        Eqn: LinearOde,
        LS: LinearSolver<Eqn::T>,
    {
        let y0 = self.build_y0::<Eqn::V>()?;
        let (upper, lower) = self.bandwidths.unwrap_or_else(|| eqn.bandwidths());
        let mut solver = Bdf::new_with_solver(eqn, linear_solver, self.config());
        solver.set_size(y0.len(), upper, lower)?;
        self.initialise::<Eqn, _>(&mut solver, &y0)?;
        Ok(solver)
    }

    /// Build a tridiagonal integrator sized to the initial state. The equations are used as
    /// given and are not resized.
    pub fn build_tridiagonal<Eqn: TridiagonalOde>(
        self,
        eqn: Eqn,
    ) -> Result<TridiagonalIntegrator<Eqn>, BandsolError> {
        let y0 = self.build_y0::<Eqn::V>()?;
        let mut solver =
            TridiagonalIntegrator::new_with_solver(eqn, BandedLU::default(), self.config());
        solver.set_size(y0.len())?;
        self.initialise::<Eqn, _>(&mut solver, &y0)?;
        Ok(solver)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::{
        error::IntegratorError,
        linear_solver::NalgebraLU,
        ode_solver::test_models::{
            exponential_decay::{exponential_decay_linear_problem, exponential_decay_problem},
            tridiagonal_golden::{golden_problem, GOLDEN_H},
        },
        BdfPhase,
    };

    type V = DVector<f64>;

    #[test]
    fn test_build_explicit() {
        let (eqn, _soln) = exponential_decay_problem::<V>(1.0, 2);
        let mut s = IntegratorBuilder::new()
            .t0(1.0)
            .h(0.1)
            .y0([1.0, 2.0])
            .build_explicit(eqn)
            .unwrap();
        assert_eq!(s.t(), 1.0);
        assert_eq!(s.h(), Some(0.1));
        s.step().unwrap();
        s.y()
            .unwrap()
            .assert_eq_st(&V::from_vec(vec![0.9, 1.8]), 1e-15);
    }

    #[test]
    fn test_build_bdf() {
        let (eqn, _y0) = exponential_decay_linear_problem::<V>(1.0, 3);
        let s = IntegratorBuilder::new()
            .h(0.01)
            .y0(vec![1.0; 3])
            .pivot_tolerance(1e-12)
            .check_finite(false)
            .build_bdf(eqn)
            .unwrap();
        assert_eq!(s.nstates(), Some(3));
        assert_eq!(s.phase(), BdfPhase::Uninitialized);
        assert_eq!(s.config().pivot_tolerance, 1e-12);
        assert!(!s.config().check_finite);
        assert_eq!(s.matrix().upper_bandwidth(), 0);
    }

    #[test]
    fn test_build_bdf_bandwidth_override() {
        let (eqn, _y0) = exponential_decay_linear_problem::<V>(1.0, 4);
        let mut s = IntegratorBuilder::new()
            .h(0.1)
            .y0([1.0; 4])
            .bandwidths(2, 1)
            .build_bdf_with_solver(eqn, NalgebraLU::default())
            .unwrap();
        assert_eq!(s.matrix().upper_bandwidth(), 2);
        assert_eq!(s.matrix().lower_bandwidth(), 1);
        s.step().unwrap();
        s.y()
            .unwrap()
            .assert_eq_st(&V::from_element(4, 1.0 / 1.1), 1e-14);
    }

    #[test]
    fn test_build_tridiagonal() {
        let (eqn, y0, soln) = golden_problem::<V>();
        let mut s = IntegratorBuilder::new()
            .h(GOLDEN_H)
            .y0(y0.iter().copied())
            .build_tridiagonal(eqn)
            .unwrap();
        for point in soln.solution_points.iter() {
            s.y_new().unwrap().assert_eq_st(&point.state, 1e-10);
            s.step().unwrap();
        }
    }

    #[test]
    fn test_build_errors() {
        let (eqn, _soln) = exponential_decay_problem::<V>(1.0, 2);
        let err = IntegratorBuilder::new().build_explicit(eqn).err().unwrap();
        assert!(matches!(
            err,
            BandsolError::IntegratorError(IntegratorError::InvalidConfiguration(_))
        ));

        let (eqn, _soln) = exponential_decay_problem::<V>(1.0, 2);
        let err = IntegratorBuilder::new()
            .h(-1.0)
            .y0([1.0, 1.0])
            .build_explicit(eqn)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            BandsolError::IntegratorError(IntegratorError::InvalidConfiguration(_))
        ));

        let (eqn, _y0) = exponential_decay_linear_problem::<V>(1.0, 2);
        let err = IntegratorBuilder::new()
            .y0([1.0, 1.0, 1.0])
            .build_bdf(eqn)
            .err()
            .unwrap();
        assert_eq!(
            err,
            BandsolError::IntegratorError(IntegratorError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
