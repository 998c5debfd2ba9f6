use std::cell::RefCell;

use crate::Vector;

use super::{NonLinearOde, Op, OpStatistics};

/// A [NonLinearOde] defined by a closure `f(y, p, t, ydot)` and a parameter vector `p`.
pub struct Closure<V, F>
where
    V: Vector,
    F: Fn(&V, &V, V::T, &mut V),
{
    func: F,
    nstates: usize,
    nparams: usize,
    p: V,
    statistics: RefCell<OpStatistics>,
}

impl<V, F> Closure<V, F>
where
    V: Vector,
    F: Fn(&V, &V, V::T, &mut V),
{
    pub fn new(func: F, nstates: usize, p: V) -> Self {
        let nparams = p.len();
        Self {
            func,
            nstates,
            nparams,
            p,
            statistics: RefCell::new(OpStatistics::default()),
        }
    }

    pub fn nparams(&self) -> usize {
        self.nparams
    }

    pub fn params(&self) -> &V {
        &self.p
    }

    pub fn set_params(&mut self, p: V) {
        assert_eq!(p.len(), self.nparams);
        self.p = p;
    }
}

impl<V, F> Op for Closure<V, F>
where
    V: Vector,
    F: Fn(&V, &V, V::T, &mut V),
{
    type V = V;
    type T = V::T;
    fn nstates(&self) -> usize {
        self.nstates
    }
    fn statistics(&self) -> OpStatistics {
        self.statistics.borrow().clone()
    }
}

impl<V, F> NonLinearOde for Closure<V, F>
where
    V: Vector,
    F: Fn(&V, &V, V::T, &mut V),
{
    fn rhs_inplace(&self, t: V::T, y: &V, ydot: &mut V) {
        self.statistics.borrow_mut().increment_call();
        (self.func)(y, &self.p, t, ydot)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;

    #[test]
    fn test_closure_rhs() {
        let op = Closure::new(
            |y: &DVector<f64>, p: &DVector<f64>, t: f64, ydot: &mut DVector<f64>| {
                for i in 0..y.len() {
                    ydot[i] = -p[0] * y[i] + t;
                }
            },
            2,
            DVector::from_vec(vec![2.0]),
        );
        let y = DVector::from_vec(vec![1.0, 3.0]);
        let ydot = op.rhs(0.5, &y);
        ydot.assert_eq_st(&DVector::from_vec(vec![-1.5, -5.5]), 1e-15);
        assert_eq!(op.nstates(), 2);
        assert_eq!(op.nparams(), 1);
        assert_eq!(op.statistics().number_of_calls, 1);
    }
}
