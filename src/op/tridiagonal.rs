use num_traits::Zero;

use crate::{error::BandsolError, integrator_error, matrix::BandedMatrix, IndexType, Vector};

use super::{LinearOde, Op, OpStatistics, TridiagonalOde};

/// A [TridiagonalOde] whose diagonals and constant term are plain vectors set by the caller.
#[derive(Clone, Debug)]
pub struct ConstantTridiagonal<V: Vector> {
    pub a: V,
    pub b: V,
    pub c: V,
    pub k: V,
}

impl<V: Vector> ConstantTridiagonal<V> {
    pub fn new(a: V, b: V, c: V, k: V) -> Result<Self, BandsolError> {
        let n = b.len();
        for v in [&a, &c, &k] {
            if v.len() != n {
                return Err(integrator_error!(DimensionMismatch {
                    expected: n,
                    found: v.len()
                }));
            }
        }
        Ok(Self { a, b, c, k })
    }
}

impl<V: Vector> Default for ConstantTridiagonal<V> {
    fn default() -> Self {
        Self {
            a: V::zeros(0),
            b: V::zeros(0),
            c: V::zeros(0),
            k: V::zeros(0),
        }
    }
}

impl<V: Vector> Op for ConstantTridiagonal<V> {
    type T = V::T;
    type V = V;
    fn nstates(&self) -> usize {
        self.b.len()
    }
}

impl<V: Vector> TridiagonalOde for ConstantTridiagonal<V> {
    fn diagonals_inplace(&self, a: &mut V, b: &mut V, c: &mut V) {
        a.clone_from(&self.a);
        b.clone_from(&self.b);
        c.clone_from(&self.c);
    }

    fn constant_inplace(&self, k: &mut V) {
        k.clone_from(&self.k);
    }

    /// All four vectors are replaced by zeros of the new length.
    fn resize(&mut self, nstates: usize) {
        self.a = V::zeros(nstates);
        self.b = V::zeros(nstates);
        self.c = V::zeros(nstates);
        self.k = V::zeros(nstates);
    }
}

/// Presents a [TridiagonalOde] as a [LinearOde] with unit upper and lower bandwidth.
pub struct TridiagonalLinearOde<Eqn: TridiagonalOde> {
    eqn: Eqn,
}

impl<Eqn: TridiagonalOde> TridiagonalLinearOde<Eqn> {
    pub fn new(eqn: Eqn) -> Self {
        Self { eqn }
    }

    pub fn eqn(&self) -> &Eqn {
        &self.eqn
    }

    pub fn eqn_mut(&mut self) -> &mut Eqn {
        &mut self.eqn
    }

    pub fn into_inner(self) -> Eqn {
        self.eqn
    }
}

impl<Eqn: TridiagonalOde> Op for TridiagonalLinearOde<Eqn> {
    type T = Eqn::T;
    type V = Eqn::V;
    fn nstates(&self) -> usize {
        self.eqn.nstates()
    }
    fn statistics(&self) -> OpStatistics {
        self.eqn.statistics()
    }
}

impl<Eqn: TridiagonalOde> LinearOde for TridiagonalLinearOde<Eqn> {
    fn matrix_inplace(&self, m: &mut BandedMatrix<Eqn::T>) -> Result<(), BandsolError> {
        let n = m.nrows();
        let mut a = Eqn::V::zeros(n);
        let mut b = Eqn::V::zeros(n);
        let mut c = Eqn::V::zeros(n);
        self.eqn.diagonals_inplace(&mut a, &mut b, &mut c);
        for v in [&a, &b, &c] {
            if v.len() != n {
                return Err(integrator_error!(DimensionMismatch {
                    expected: n,
                    found: v.len()
                }));
            }
        }
        let tri = BandedMatrix::from_diagonals(&a, &b, &c)?;
        if m.upper_bandwidth() == 1 && m.lower_bandwidth() == 1 {
            return m.copy_from(&tri);
        }
        m.fill(Eqn::T::zero());
        for i in 0..n {
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(n - 1);
            for j in lo..=hi {
                m.set(i, j, tri.get(i, j))?;
            }
        }
        Ok(())
    }

    fn offset_inplace(&self, k: &mut Eqn::V) {
        self.eqn.constant_inplace(k);
    }

    fn bandwidths(&self) -> (IndexType, IndexType) {
        (1, 1)
    }
}
