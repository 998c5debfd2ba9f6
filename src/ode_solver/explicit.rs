use log::trace;
use num_traits::One;
use serde::Serialize;

use crate::{
    error::BandsolError, integrator_error, scalar::is_finite, Integrator, NonLinearOde, Vector,
};

use super::state::IntegratorState;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ExplicitStatistics {
    pub number_of_steps: usize,
    pub number_of_rhs_evals: usize,
}

/// Forward Euler integrator for `dy/dt = f(t, y)`: `y_{n+1} = y_n + h f(t_n, y_n)`.
pub struct ExplicitEuler<Eqn: NonLinearOde> {
    eqn: Eqn,
    state: IntegratorState<Eqn::V>,
    ydot: Option<Eqn::V>,
    statistics: ExplicitStatistics,
}

impl<Eqn: NonLinearOde> ExplicitEuler<Eqn> {
    pub fn new(eqn: Eqn) -> Self {
        Self {
            eqn,
            state: IntegratorState::default(),
            ydot: None,
            statistics: ExplicitStatistics::default(),
        }
    }

    /// The derivative evaluated by the most recent step, zeros before the first step.
    pub fn ydot(&self) -> Option<&Eqn::V> {
        self.ydot.as_ref()
    }

    pub fn statistics(&self) -> &ExplicitStatistics {
        &self.statistics
    }

    pub fn eqn_mut(&mut self) -> &mut Eqn {
        &mut self.eqn
    }

    /// Take whole steps until `t >= t_end`. The final time may overshoot `t_end` by less than one
    /// step; no fractional step is taken. Does nothing if `t` is already at or past `t_end`.
    pub fn step_to_time(&mut self, t_end: Eqn::T) -> Result<(), BandsolError> {
        if !is_finite(t_end) {
            return Err(integrator_error!(
                InvalidConfiguration,
                format!("end time must be finite, got {}", t_end)
            ));
        }
        while self.state.t() < t_end {
            let h = self.state.h().ok_or(integrator_error!(NotInitialized))?;
            let t = self.state.t();
            if t + h == t {
                return Err(integrator_error!(
                    InvalidConfiguration,
                    format!("step size {} is too small to advance from t = {}", h, t)
                ));
            }
            self.step()?;
        }
        Ok(())
    }
}

impl<Eqn: NonLinearOde> Integrator<Eqn> for ExplicitEuler<Eqn> {
    fn eqn(&self) -> &Eqn {
        &self.eqn
    }

    fn set_h(&mut self, h: Eqn::T) -> Result<(), BandsolError> {
        self.state.set_h(h)
    }

    fn set_y0(&mut self, y0: &Eqn::V) -> Result<(), BandsolError> {
        let n = self.eqn.nstates();
        if !y0.is_empty() && y0.len() != n {
            return Err(integrator_error!(DimensionMismatch {
                expected: n,
                found: y0.len()
            }));
        }
        self.state.set_y0(y0)?;
        self.ydot = Some(Eqn::V::zeros(n));
        Ok(())
    }

    fn set_t0(&mut self, t0: Eqn::T) -> Result<(), BandsolError> {
        self.state.set_t0(t0)
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
        let h = self.state.h().ok_or(integrator_error!(NotInitialized))?;
        let t = self.state.t();
        let (y, ydot) = match (self.state.y_mut(), self.ydot.as_mut()) {
            (Some(y), Some(ydot)) => (y, ydot),
            _ => return Err(integrator_error!(NotInitialized)),
        };
        self.eqn.rhs_inplace(t, y, ydot);
        self.statistics.number_of_rhs_evals += 1;
        if ydot.len() != y.len() {
            let found = ydot.len();
            *ydot = Eqn::V::zeros(y.len());
            return Err(integrator_error!(DimensionMismatch {
                expected: y.len(),
                found
            }));
        }
        y.axpy(h, ydot, Eqn::T::one());
        self.state.advance(h);
        self.statistics.number_of_steps += 1;
        trace!("explicit euler step to t = {}", self.state.t());
        Ok(())
    }
}
