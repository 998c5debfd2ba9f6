use crate::{
    error::BandsolError, integrator_error, linear_solver::BandedLU,
    op::tridiagonal::TridiagonalLinearOde, Integrator, LinearSolver, Op, TridiagonalOde, Vector,
};

use super::{
    bdf::{Bdf, BdfPhase, BdfStatistics},
    config::BdfConfig,
};

/// A [Bdf] integrator for tridiagonal systems, sized through [TridiagonalIntegrator::resize]
/// instead of explicit bandwidths.
pub struct TridiagonalIntegrator<Eqn: TridiagonalOde, LS = BandedLU<<Eqn as Op>::T>> {
    bdf: Bdf<TridiagonalLinearOde<Eqn>, LS>,
}

impl<Eqn: TridiagonalOde> TridiagonalIntegrator<Eqn> {
    pub fn new(eqn: Eqn) -> Self {
        Self {
            bdf: Bdf::new(TridiagonalLinearOde::new(eqn)),
        }
    }
}

impl<Eqn, LS> TridiagonalIntegrator<Eqn, LS>
where
    Eqn: TridiagonalOde,
    LS: LinearSolver<Eqn::T>,
{
    pub fn new_with_solver(eqn: Eqn, linear_solver: LS, config: BdfConfig<Eqn::T>) -> Self {
        Self {
            bdf: Bdf::new_with_solver(TridiagonalLinearOde::new(eqn), linear_solver, config),
        }
    }

    /// Resize the equations to `nstates` and reallocate the system with unit bandwidths.
    pub fn resize(&mut self, nstates: usize) -> Result<(), BandsolError> {
        if let Some(y) = self.bdf.y() {
            if y.len() != nstates {
                return Err(integrator_error!(DimensionMismatch {
                    expected: nstates,
                    found: y.len()
                }));
            }
        }
        self.bdf.eqn_mut().eqn_mut().resize(nstates);
        self.set_size(nstates)
    }

    /// Reallocate the system without touching the equations.
    pub(crate) fn set_size(&mut self, nstates: usize) -> Result<(), BandsolError> {
        self.bdf.set_size(nstates, 1, 1)
    }

    /// Set the initial time and the step size.
    pub fn initialize(&mut self, t0: Eqn::T, h: Eqn::T) -> Result<(), BandsolError> {
        self.bdf.set_t0(t0)?;
        self.bdf.set_dt(h)
    }

    pub fn set_dt(&mut self, h: Eqn::T) -> Result<(), BandsolError> {
        self.bdf.set_dt(h)
    }

    /// The state produced by the most recent step, or the initial state before the first step.
    pub fn y_new(&self) -> Option<&Eqn::V> {
        self.bdf.y()
    }

    pub fn statistics(&self) -> &BdfStatistics {
        self.bdf.statistics()
    }

    pub fn phase(&self) -> BdfPhase {
        self.bdf.phase()
    }

    pub fn eqn_mut(&mut self) -> &mut Eqn {
        self.bdf.eqn_mut().eqn_mut()
    }

    pub fn bdf(&self) -> &Bdf<TridiagonalLinearOde<Eqn>, LS> {
        &self.bdf
    }
}

impl<Eqn, LS> Integrator<Eqn> for TridiagonalIntegrator<Eqn, LS>
where
    Eqn: TridiagonalOde,
    LS: LinearSolver<Eqn::T>,
{
    fn eqn(&self) -> &Eqn {
        self.bdf.eqn().eqn()
    }

    fn set_h(&mut self, h: Eqn::T) -> Result<(), BandsolError> {
        self.bdf.set_dt(h)
    }

    fn set_y0(&mut self, y0: &Eqn::V) -> Result<(), BandsolError> {
        self.bdf.set_y0(y0)
    }

    fn set_t0(&mut self, t0: Eqn::T) -> Result<(), BandsolError> {
        self.bdf.set_t0(t0)
    }

    fn h(&self) -> Option<Eqn::T> {
        self.bdf.h()
    }

    fn t(&self) -> Eqn::T {
        self.bdf.t()
    }

    fn y(&self) -> Option<&Eqn::V> {
        self.bdf.y()
    }

    fn step(&mut self) -> Result<(), BandsolError> {
        self.bdf.step()
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::{
        error::IntegratorError,
        linear_solver::NalgebraLU,
        ode_solver::test_models::tridiagonal_golden::{golden_problem, GOLDEN_H},
        ConstantTridiagonal,
    };

    type V = DVector<f64>;

    fn check_golden<LS: LinearSolver<f64>>(
        mut s: TridiagonalIntegrator<ConstantTridiagonal<V>, LS>,
    ) {
        let (eqn, y0, soln) = golden_problem::<V>();
        // resize clears the coefficients, so set them afterwards
        s.resize(5).unwrap();
        *s.eqn_mut() = eqn;
        s.set_y0(&y0).unwrap();
        s.initialize(0.0, GOLDEN_H).unwrap();
        for point in soln.solution_points.iter() {
            assert!((s.t() - point.t).abs() < 1e-12);
            s.y_new().unwrap().assert_eq_st(&point.state, 1e-10);
            s.step().unwrap();
        }
        assert_eq!(s.statistics().number_of_factorisations, 2);
    }

    #[test]
    fn test_tridiagonal_golden_banded() {
        check_golden(TridiagonalIntegrator::new(ConstantTridiagonal::default()));
    }

    #[test]
    fn test_tridiagonal_golden_nalgebra() {
        check_golden(TridiagonalIntegrator::new_with_solver(
            ConstantTridiagonal::default(),
            NalgebraLU::default(),
            BdfConfig::default(),
        ));
    }

    #[test]
    fn test_resize_mismatch() {
        let (eqn, y0, _soln) = golden_problem::<V>();
        let mut s = TridiagonalIntegrator::new(eqn);
        s.set_y0(&y0).unwrap();
        // the state has 5 entries, so the system cannot shrink to 3
        let err = s.resize(3).unwrap_err();
        assert_eq!(
            err,
            BandsolError::IntegratorError(IntegratorError::DimensionMismatch {
                expected: 3,
                found: 5
            })
        );
        assert_eq!(s.eqn().nstates(), 5);
    }

    #[test]
    fn test_initialize_resets() {
        let (eqn, y0, _soln) = golden_problem::<V>();
        let mut s = TridiagonalIntegrator::new(ConstantTridiagonal::default());
        s.resize(5).unwrap();
        *s.eqn_mut() = eqn;
        s.set_y0(&y0).unwrap();
        assert!(s.step().is_err());
        s.initialize(1.0, GOLDEN_H).unwrap();
        s.step().unwrap();
        s.step().unwrap();
        assert_eq!(s.phase(), BdfPhase::SteadyState);
        assert!((s.t() - 1.4).abs() < 1e-12);
        assert_eq!(s.h(), Some(GOLDEN_H));
        assert_eq!(s.eqn().nstates(), 5);
        assert_eq!(s.bdf().matrix().upper_bandwidth(), 1);
        s.initialize(0.0, GOLDEN_H).unwrap();
        assert_eq!(s.phase(), BdfPhase::Uninitialized);
        assert!(s.y_new().unwrap().all_finite());
    }
}
