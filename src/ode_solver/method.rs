use crate::{error::BandsolError, Op};

/// Trait for fixed-step integrators. This is the main user interface for stepping an ODE.
///
/// The integrator owns its state: set the step size, initial time and initial state, then call
/// [Integrator::step] repeatedly. Each successful call advances `t` by exactly `h` and replaces
/// `y`; a failed call leaves both untouched.
///
/// # Example
///
/// ```
/// use bandsol::{Integrator, Op};
///
/// fn advance<Eqn: Op>(
///     solver: &mut impl Integrator<Eqn>,
///     nsteps: usize,
/// ) -> Result<Eqn::V, bandsol::error::BandsolError> {
///     for _ in 0..nsteps {
///         solver.step()?;
///     }
///     Ok(solver.y().unwrap().clone())
/// }
/// ```
pub trait Integrator<Eqn: Op> {
    /// The equations being integrated.
    fn eqn(&self) -> &Eqn;

    /// Set the step size. Fails with `InvalidConfiguration` unless `h` is positive and finite.
    fn set_h(&mut self, h: Eqn::T) -> Result<(), BandsolError>;

    /// Set the initial state, copying `y0`.
    fn set_y0(&mut self, y0: &Eqn::V) -> Result<(), BandsolError>;

    /// Set the current time. Fails with `InvalidConfiguration` if `t0` is not finite.
    fn set_t0(&mut self, t0: Eqn::T) -> Result<(), BandsolError>;

    fn h(&self) -> Option<Eqn::T>;

    fn t(&self) -> Eqn::T;

    fn y(&self) -> Option<&Eqn::V>;

    /// Advance the solution by one step of size `h`.
    fn step(&mut self) -> Result<(), BandsolError>;
}
