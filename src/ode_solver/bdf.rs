use log::{debug, trace, warn};
use num_traits::One;
use serde::Serialize;

use crate::{
    error::BandsolError, integrator_error, linear_solver::BandedLU, linear_solver_error,
    matrix::BandedMatrix, IndexType, Integrator, LinearOde, LinearSolver, Op, Vector,
};

use super::{config::BdfConfig, state::IntegratorState};

/// Where the integrator is in its BDF1 -> BDF2 start-up sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum BdfPhase {
    /// No step taken since the last reset. The next step queries the system, factorises
    /// `A - (1/h) I` and takes a first order (implicit Euler) step.
    Uninitialized,
    /// One step taken. The next step refactorises `A - (3/(2h)) I` and takes the first second
    /// order step.
    FirstStep,
    /// Two or more steps taken, every step reuses the second order factorisation.
    SteadyState,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct BdfStatistics {
    pub number_of_steps: usize,
    pub number_of_factorisations: usize,
    pub number_of_linear_solves: usize,
}

/// Fixed step Backward Difference Formula (BDF) integrator for the linear ODE `dy/dt = A y + c`,
/// with `A` banded.
///
/// The first step after a reset uses the first order formula (implicit Euler)
///
/// `(A - I/h) y_{n+1} = -y_n/h - c`
///
/// and every later step the second order formula
///
/// `(A - 3I/(2h)) y_{n+1} = -2 y_n/h + y_{n-1}/(2h) - c`.
///
/// `A` and `c` are read from the equations once, at the first step after a reset, and the
/// system matrix is factorised exactly twice per session: once for each formula. Setting the
/// initial state, initial time or step size resets the session.
///
/// # Example
///
/// ```
/// use bandsol::{Bdf, ConstantTridiagonal, Integrator, TridiagonalLinearOde};
/// type V = nalgebra::DVector<f64>;
///
/// let eqn = ConstantTridiagonal::new(
///     V::from_vec(vec![0.0, 1.0, 1.0]),
///     V::from_vec(vec![-2.0, -2.0, -2.0]),
///     V::from_vec(vec![1.0, 1.0, 0.0]),
///     V::zeros(3),
/// )
/// .unwrap();
/// let mut solver = Bdf::new(TridiagonalLinearOde::new(eqn));
/// solver.set_size(3, 1, 1).unwrap();
/// solver.set_y0(&V::from_vec(vec![0.0, 1.0, 0.0])).unwrap();
/// solver.set_dt(0.1).unwrap();
/// for _ in 0..10 {
///     solver.step().unwrap();
/// }
/// assert!((solver.t() - 1.0).abs() < 1e-12);
/// ```
pub struct Bdf<Eqn: LinearOde, LS = BandedLU<<Eqn as Op>::T>> {
    eqn: Eqn,
    linear_solver: LS,
    config: BdfConfig<Eqn::T>,
    state: IntegratorState<Eqn::V>,
    size: Option<IndexType>,
    a: BandedMatrix<Eqn::T>,
    m: BandedMatrix<Eqn::T>,
    c: Eqn::V,
    rhs: Eqn::V,
    yprev: Option<Eqn::V>,
    phase: BdfPhase,
    statistics: BdfStatistics,
}

impl<Eqn: LinearOde> Bdf<Eqn> {
    /// Create an integrator using the banded LU solver and the default configuration.
    pub fn new(eqn: Eqn) -> Self {
        Self::new_with_solver(eqn, BandedLU::default(), BdfConfig::default())
    }
}

impl<Eqn, LS> Bdf<Eqn, LS>
where
    Eqn: LinearOde,
    LS: LinearSolver<Eqn::T>,
{
    pub fn new_with_solver(eqn: Eqn, linear_solver: LS, config: BdfConfig<Eqn::T>) -> Self {
        Self {
            eqn,
            linear_solver,
            config,
            state: IntegratorState::default(),
            size: None,
            a: BandedMatrix::zeros(0, 0, 0),
            m: BandedMatrix::zeros(0, 0, 0),
            c: Eqn::V::zeros(0),
            rhs: Eqn::V::zeros(0),
            yprev: None,
            phase: BdfPhase::Uninitialized,
            statistics: BdfStatistics::default(),
        }
    }

    /// Allocate the system for `nstates` equations with the given bandwidths. This discards any
    /// factorisation and resets the session.
    ///
    /// The bandwidths may be wider than [LinearOde::bandwidths] but not narrower. A state that
    /// is already set must have `nstates` entries.
    pub fn set_size(
        &mut self,
        nstates: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) -> Result<(), BandsolError> {
        if nstates == 0 {
            return Err(integrator_error!(
                InvalidConfiguration,
                "system size must be positive".to_string()
            ));
        }
        if self.eqn.nstates() != nstates {
            return Err(integrator_error!(DimensionMismatch {
                expected: nstates,
                found: self.eqn.nstates()
            }));
        }
        if let Some(n) = self.state.nstates() {
            if n != nstates {
                return Err(integrator_error!(DimensionMismatch {
                    expected: nstates,
                    found: n
                }));
            }
        }
        // the system must hold every entry the equations write
        let (eqn_upper, eqn_lower) = self.eqn.bandwidths();
        if upper_bandwidth < eqn_upper {
            return Err(integrator_error!(DimensionMismatch {
                expected: eqn_upper,
                found: upper_bandwidth
            }));
        }
        if lower_bandwidth < eqn_lower {
            return Err(integrator_error!(DimensionMismatch {
                expected: eqn_lower,
                found: lower_bandwidth
            }));
        }
        self.a = BandedMatrix::zeros(nstates, upper_bandwidth, lower_bandwidth);
        self.m = BandedMatrix::zeros(nstates, upper_bandwidth, lower_bandwidth);
        self.c = Eqn::V::zeros(nstates);
        self.rhs = Eqn::V::zeros(nstates);
        self.yprev = None;
        self.linear_solver
            .set_problem(nstates, upper_bandwidth, lower_bandwidth);
        self.linear_solver
            .set_pivot_tolerance(self.config.pivot_tolerance);
        self.size = Some(nstates);
        self.reset("set_size");
        Ok(())
    }

    /// Set the step size and reset the session.
    pub fn set_dt(&mut self, h: Eqn::T) -> Result<(), BandsolError> {
        self.state.set_h(h)?;
        self.reset("set_dt");
        Ok(())
    }

    pub fn set_config(&mut self, config: BdfConfig<Eqn::T>) {
        self.linear_solver
            .set_pivot_tolerance(config.pivot_tolerance);
        self.config = config;
        self.reset("set_config");
    }

    pub fn config(&self) -> &BdfConfig<Eqn::T> {
        &self.config
    }

    pub fn statistics(&self) -> &BdfStatistics {
        &self.statistics
    }

    pub fn phase(&self) -> BdfPhase {
        self.phase
    }

    pub fn nstates(&self) -> Option<IndexType> {
        self.size
    }

    /// The state before the most recent step.
    pub fn yprev(&self) -> Option<&Eqn::V> {
        self.yprev.as_ref()
    }

    /// The system matrix `A` as last read from the equations.
    pub fn matrix(&self) -> &BandedMatrix<Eqn::T> {
        &self.a
    }

    /// The offset `c` as last read from the equations.
    pub fn offset(&self) -> &Eqn::V {
        &self.c
    }

    pub fn linear_solver(&self) -> &LS {
        &self.linear_solver
    }

    /// Mutable access to the equations. Changes to `A` or `c` are only picked up after the next
    /// reset.
    pub fn eqn_mut(&mut self) -> &mut Eqn {
        &mut self.eqn
    }

    fn reset(&mut self, reason: &str) {
        if self.phase != BdfPhase::Uninitialized {
            debug!("bdf session reset by {}", reason);
        }
        self.phase = BdfPhase::Uninitialized;
        self.linear_solver.clear_factorisation();
    }

    /// Read `A` and `c` from the equations into the cached copies.
    fn query_system(&mut self, nstates: IndexType) -> Result<(), BandsolError> {
        if self.eqn.nstates() != nstates {
            return Err(integrator_error!(DimensionMismatch {
                expected: nstates,
                found: self.eqn.nstates()
            }));
        }
        self.eqn.matrix_inplace(&mut self.a)?;
        self.eqn.offset_inplace(&mut self.c);
        if self.c.len() != nstates {
            let found = self.c.len();
            self.c = Eqn::V::zeros(nstates);
            return Err(integrator_error!(DimensionMismatch {
                expected: nstates,
                found
            }));
        }
        Ok(())
    }

    /// Factorise `A - coefficient * I`.
    fn factorise(&mut self, coefficient: Eqn::T) -> Result<(), BandsolError> {
        self.m.copy_from(&self.a)?;
        self.m.add_diagonal(-coefficient);
        if let Err(err) = self.linear_solver.set_matrix(&self.m) {
            warn!(
                "bdf factorisation failed at t = {} with diagonal shift {}: {}",
                self.state.t(),
                coefficient,
                err
            );
            return Err(err);
        }
        self.statistics.number_of_factorisations += 1;
        debug!(
            "bdf factorised system at t = {} with diagonal shift {}",
            self.state.t(),
            coefficient
        );
        Ok(())
    }
}

impl<Eqn, LS> Integrator<Eqn> for Bdf<Eqn, LS>
where
    Eqn: LinearOde,
    LS: LinearSolver<Eqn::T>,
{
    fn eqn(&self) -> &Eqn {
        &self.eqn
    }

    fn set_h(&mut self, h: Eqn::T) -> Result<(), BandsolError> {
        self.set_dt(h)
    }

    /// Set the initial state and reset the session. Once the size is set, `y0` must have
    /// `nstates` entries.
    fn set_y0(&mut self, y0: &Eqn::V) -> Result<(), BandsolError> {
        if let Some(n) = self.size {
            if !y0.is_empty() && y0.len() != n {
                return Err(integrator_error!(DimensionMismatch {
                    expected: n,
                    found: y0.len()
                }));
            }
        }
        self.state.set_y0(y0)?;
        self.reset("set_y0");
        Ok(())
    }

    fn set_t0(&mut self, t0: Eqn::T) -> Result<(), BandsolError> {
        self.state.set_t0(t0)?;
        self.reset("set_t0");
        Ok(())
    }

    fn h(&self) -> Option<Eqn::T> {
        self.state.h()
    }

    fn t(&self) -> Eqn::T {
        self.state.t()
    }

    fn y(&self) -> Option<&Eqn::V> {
        self.state.y()
    }

    fn step(&mut self) -> Result<(), BandsolError> {
        let (n, h) = match (self.size, self.state.h(), self.state.y()) {
            (Some(n), Some(h), Some(_)) => (n, h),
            _ => return Err(integrator_error!(NotInitialized)),
        };
        let one = Eqn::T::one();
        let two = Eqn::T::from(2.0);

        // build the right hand side in scratch space, nothing is committed until the solve
        // has succeeded
        let next_phase = match self.phase {
            BdfPhase::Uninitialized => {
                self.query_system(n)?;
                self.factorise(one / h)?;
                let y = self.state.y().ok_or(integrator_error!(NotInitialized))?;
                // rhs = -y/h - c
                self.rhs.copy_from(&self.c);
                self.rhs.axpy(-one / h, y, -one);
                BdfPhase::FirstStep
            }
            BdfPhase::FirstStep | BdfPhase::SteadyState => {
                if self.phase == BdfPhase::FirstStep {
                    self.factorise(Eqn::T::from(1.5) / h)?;
                }
                let y = self.state.y().ok_or(integrator_error!(NotInitialized))?;
                let yprev = self
                    .yprev
                    .as_ref()
                    .ok_or(integrator_error!(NotInitialized))?;
                // rhs = -2y/h + yprev/(2h) - c
                self.rhs.copy_from(&self.c);
                self.rhs.axpy(-two / h, y, -one);
                self.rhs.axpy(one / (two * h), yprev, one);
                BdfPhase::SteadyState
            }
        };

        self.linear_solver.solve_in_place(&mut self.rhs)?;
        self.statistics.number_of_linear_solves += 1;
        if self.config.check_finite && !self.rhs.all_finite() {
            warn!(
                "bdf step from t = {} produced a non-finite solution",
                self.state.t()
            );
            return Err(linear_solver_error!(LuSolveFailed));
        }

        // commit: yprev <- y, y <- solution
        let y = self
            .state
            .y_mut()
            .ok_or(integrator_error!(NotInitialized))?;
        match self.yprev.as_mut() {
            Some(yprev) => yprev.copy_from(y),
            None => self.yprev = Some(y.clone()),
        }
        std::mem::swap(y, &mut self.rhs);
        self.state.advance(h);
        self.phase = next_phase;
        self.statistics.number_of_steps += 1;
        trace!("bdf step to t = {} ({:?})", self.state.t(), self.phase);
        Ok(())
    }
}
