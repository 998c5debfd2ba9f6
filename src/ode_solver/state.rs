use num_traits::Zero;

use crate::{error::BandsolError, integrator_error, scalar::is_finite, Vector};

/// State common to every integrator:
/// - the current time `t`, zero until set
/// - the step size `h`, unset until [IntegratorState::set_h] succeeds
/// - the current solution `y`, unset until [IntegratorState::set_y0] succeeds
///
/// Every setter validates its input and leaves the state untouched on error.
#[derive(Clone, Debug)]
pub struct IntegratorState<V: Vector> {
    t: V::T,
    h: Option<V::T>,
    y: Option<V>,
}

impl<V: Vector> Default for IntegratorState<V> {
    fn default() -> Self {
        Self {
            t: V::T::zero(),
            h: None,
            y: None,
        }
    }
}

impl<V: Vector> IntegratorState<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_h(&mut self, h: V::T) -> Result<(), BandsolError> {
        if !(h > V::T::zero()) || !is_finite(h) {
            return Err(integrator_error!(
                InvalidConfiguration,
                format!("step size must be positive and finite, got {}", h)
            ));
        }
        self.h = Some(h);
        Ok(())
    }

    pub fn set_t0(&mut self, t0: V::T) -> Result<(), BandsolError> {
        if !is_finite(t0) {
            return Err(integrator_error!(
                InvalidConfiguration,
                format!("initial time must be finite, got {}", t0)
            ));
        }
        self.t = t0;
        Ok(())
    }

    /// Copy `y0` into the state, defining the number of states.
    pub fn set_y0(&mut self, y0: &V) -> Result<(), BandsolError> {
        if y0.is_empty() {
            return Err(integrator_error!(
                InvalidConfiguration,
                "initial state must not be empty".to_string()
            ));
        }
        match self.y.as_mut() {
            Some(y) if y.len() == y0.len() => y.copy_from(y0),
            _ => self.y = Some(y0.clone()),
        }
        Ok(())
    }

    pub fn t(&self) -> V::T {
        self.t
    }

    pub fn h(&self) -> Option<V::T> {
        self.h
    }

    pub fn y(&self) -> Option<&V> {
        self.y.as_ref()
    }

    pub fn y_mut(&mut self) -> Option<&mut V> {
        self.y.as_mut()
    }

    pub fn nstates(&self) -> Option<usize> {
        self.y.as_ref().map(|y| y.len())
    }

    /// Move the current time forward by one step of size `h`.
    pub(crate) fn advance(&mut self, h: V::T) {
        self.t += h;
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::error::IntegratorError;

    type State = IntegratorState<DVector<f64>>;

    fn is_invalid(err: BandsolError) -> bool {
        matches!(
            err,
            BandsolError::IntegratorError(IntegratorError::InvalidConfiguration(_))
        )
    }

    #[test]
    fn test_defaults() {
        let s = State::new();
        assert_eq!(s.t(), 0.0);
        assert!(s.h().is_none());
        assert!(s.y().is_none());
        assert!(s.nstates().is_none());
    }

    #[test]
    fn test_set_h_rejects_bad_values() {
        let mut s = State::new();
        s.set_h(0.1).unwrap();
        for bad in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(is_invalid(s.set_h(bad).unwrap_err()));
            assert_eq!(s.h(), Some(0.1));
        }
    }

    #[test]
    fn test_set_t0_and_y0() {
        let mut s = State::new();
        s.set_t0(-2.5).unwrap();
        assert_eq!(s.t(), -2.5);
        assert!(is_invalid(s.set_t0(f64::NAN).unwrap_err()));
        assert_eq!(s.t(), -2.5);

        assert!(is_invalid(s.set_y0(&DVector::zeros(0)).unwrap_err()));
        assert!(s.y().is_none());
        s.set_y0(&DVector::from_vec(vec![1.0, 2.0])).unwrap();
        assert_eq!(s.nstates(), Some(2));
        s.set_y0(&DVector::from_vec(vec![3.0])).unwrap();
        assert_eq!(s.y().unwrap()[0], 3.0);
        assert_eq!(s.nstates(), Some(1));
    }
}
