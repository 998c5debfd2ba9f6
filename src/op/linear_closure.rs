use std::cell::RefCell;

use num_traits::Zero;

use crate::{error::BandsolError, matrix::BandedMatrix, IndexType, Vector};

use super::{LinearOde, Op, OpStatistics};

/// A [LinearOde] `dy/dt = A y + c` defined by two closures: one filling the banded matrix `A`
/// and one filling the offset `c`, both given the parameter vector `p`.
pub struct LinearClosure<V, F, G>
where
    V: Vector,
    F: Fn(&V, &mut BandedMatrix<V::T>),
    G: Fn(&V, &mut V),
{
    matrix_func: F,
    offset_func: G,
    nstates: usize,
    upper_bandwidth: IndexType,
    lower_bandwidth: IndexType,
    p: V,
    statistics: RefCell<OpStatistics>,
}

impl<V, F, G> LinearClosure<V, F, G>
where
    V: Vector,
    F: Fn(&V, &mut BandedMatrix<V::T>),
    G: Fn(&V, &mut V),
{
    pub fn new(
        matrix_func: F,
        offset_func: G,
        nstates: usize,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
        p: V,
    ) -> Self {
        Self {
            matrix_func,
            offset_func,
            nstates,
            upper_bandwidth,
            lower_bandwidth,
            p,
            statistics: RefCell::new(OpStatistics::default()),
        }
    }

    pub fn params(&self) -> &V {
        &self.p
    }

    /// Replace the parameters. Integrators only see the change after their next reset.
    pub fn set_params(&mut self, p: V) {
        assert_eq!(p.len(), self.p.len());
        self.p = p;
    }
}

impl<V, F, G> Op for LinearClosure<V, F, G>
where
    V: Vector,
    F: Fn(&V, &mut BandedMatrix<V::T>),
    G: Fn(&V, &mut V),
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

impl<V, F, G> LinearOde for LinearClosure<V, F, G>
where
    V: Vector,
    F: Fn(&V, &mut BandedMatrix<V::T>),
    G: Fn(&V, &mut V),
{
    fn matrix_inplace(&self, a: &mut BandedMatrix<V::T>) -> Result<(), BandsolError> {
        self.statistics.borrow_mut().increment_matrix();
        a.fill(V::T::zero());
        (self.matrix_func)(&self.p, a);
        Ok(())
    }

    fn offset_inplace(&self, c: &mut V) {
        self.statistics.borrow_mut().increment_call();
        (self.offset_func)(&self.p, c)
    }

    fn bandwidths(&self) -> (IndexType, IndexType) {
        (self.upper_bandwidth, self.lower_bandwidth)
    }
}
