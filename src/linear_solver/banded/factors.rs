use crate::{
    error::BandsolError, linear_solver_error, matrix::BandedMatrix, IndexType, Scalar, Vector,
};

/// LU factors of a banded matrix computed with partial (row) pivoting.
///
/// The layout follows LAPACK's `gbtrf`: a column-major buffer with `2 * kl + ku + 1` rows per
/// column, entry `(i, j)` of the factored matrix living at buffer row `kl + ku + i - j`. The
/// extra `kl` rows at the top of each column hold the fill-in that row interchanges push into
/// `U`, whose bandwidth grows to `kl + ku`. The multipliers of `L` sit below the diagonal.
#[derive(Clone, Debug)]
pub struct BandedLuFactors<T: Scalar> {
    nrows: IndexType,
    upper_bandwidth: IndexType,
    lower_bandwidth: IndexType,
    ab: Vec<T>,
    pivots: Vec<IndexType>,
}

impl<T: Scalar> BandedLuFactors<T> {
    pub fn zeros(
        nrows: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) -> Self {
        let ldab = 2 * lower_bandwidth + upper_bandwidth + 1;
        Self {
            nrows,
            upper_bandwidth,
            lower_bandwidth,
            ab: vec![T::zero(); ldab * nrows],
            pivots: (0..nrows).collect(),
        }
    }

    pub fn nrows(&self) -> IndexType {
        self.nrows
    }

    pub fn upper_bandwidth(&self) -> IndexType {
        self.upper_bandwidth
    }

    pub fn lower_bandwidth(&self) -> IndexType {
        self.lower_bandwidth
    }

    /// Row interchanges: row `i` was swapped with row `pivots()[i]` at stage `i`.
    pub fn pivots(&self) -> &[IndexType] {
        &self.pivots
    }

    fn ldab(&self) -> usize {
        2 * self.lower_bandwidth + self.upper_bandwidth + 1
    }

    fn fits(&self, matrix: &BandedMatrix<T>) -> bool {
        self.nrows == matrix.nrows()
            && self.upper_bandwidth == matrix.upper_bandwidth()
            && self.lower_bandwidth == matrix.lower_bandwidth()
    }

    pub fn solve_in_place<V: Vector<T = T>>(&self, b: &mut V) -> Result<(), BandsolError> {
        solve_in_place(self, b)
    }
}

/// Factorise `matrix` into a freshly allocated [BandedLuFactors].
pub fn factorize<T: Scalar>(
    matrix: &BandedMatrix<T>,
    pivot_tolerance: T,
) -> Result<BandedLuFactors<T>, BandsolError> {
    let mut factors = BandedLuFactors::zeros(
        matrix.nrows(),
        matrix.upper_bandwidth(),
        matrix.lower_bandwidth(),
    );
    factorize_into(matrix, pivot_tolerance, &mut factors)?;
    Ok(factors)
}

/// Factorise `matrix` into `factors`, reusing its storage when the shapes agree.
///
/// A pivot whose magnitude is not greater than `pivot_tolerance` makes the matrix singular; the
/// contents of `factors` are unspecified after an error.
pub fn factorize_into<T: Scalar>(
    matrix: &BandedMatrix<T>,
    pivot_tolerance: T,
    factors: &mut BandedLuFactors<T>,
) -> Result<(), BandsolError> {
    if !factors.fits(matrix) {
        *factors = BandedLuFactors::zeros(
            matrix.nrows(),
            matrix.upper_bandwidth(),
            matrix.lower_bandwidth(),
        );
    }
    let n = factors.nrows;
    let kl = factors.lower_bandwidth;
    let ku = factors.upper_bandwidth;
    let kv = kl + ku;
    let ldab = factors.ldab();
    let ab = &mut factors.ab;
    let pivots = &mut factors.pivots;

    ab.fill(T::zero());
    for i in 0..n {
        for j in i.saturating_sub(kl)..=(i + ku).min(n - 1) {
            ab[j * ldab + kv + i - j] = matrix.get(i, j);
        }
    }

    // index of the last column touched by the row interchanges so far
    let mut ju = 0;
    for j in 0..n {
        let col = j * ldab;
        let km = kl.min(n - 1 - j);

        let mut jp = 0;
        let mut max = num_traits::abs(ab[col + kv]);
        for r in 1..=km {
            let value = num_traits::abs(ab[col + kv + r]);
            if value > max {
                max = value;
                jp = r;
            }
        }
        // written so that a NaN pivot is also rejected
        if !(max > pivot_tolerance) {
            return Err(linear_solver_error!(SingularMatrix { column: j }));
        }
        pivots[j] = j + jp;
        ju = ju.max((j + ku + jp).min(n - 1));

        if jp != 0 {
            for k in 0..=(ju - j) {
                let c = (j + k) * ldab;
                ab.swap(c + kv + jp - k, c + kv - k);
            }
        }

        if km > 0 {
            let inv = T::one() / ab[col + kv];
            for i in 1..=km {
                ab[col + kv + i] *= inv;
            }
            for k in 1..=(ju - j) {
                let c = (j + k) * ldab;
                let u = ab[c + kv - k];
                if u != T::zero() {
                    for i in 1..=km {
                        let l = ab[col + kv + i];
                        ab[c + kv + i - k] -= l * u;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Solve `A x = b` in place using the factors of `A`.
pub fn solve_in_place<T: Scalar, V: Vector<T = T>>(
    factors: &BandedLuFactors<T>,
    b: &mut V,
) -> Result<(), BandsolError> {
    let n = factors.nrows;
    if b.len() != n {
        return Err(linear_solver_error!(RhsLengthMismatch {
            expected: n,
            found: b.len()
        }));
    }
    let kl = factors.lower_bandwidth;
    let kv = kl + factors.upper_bandwidth;
    let ldab = factors.ldab();
    let ab = &factors.ab;

    // L y = P b
    for j in 0..n.saturating_sub(1) {
        let col = j * ldab;
        let l = factors.pivots[j];
        if l != j {
            let tmp = b[l];
            b[l] = b[j];
            b[j] = tmp;
        }
        let bj = b[j];
        if bj != T::zero() {
            for i in 1..=kl.min(n - 1 - j) {
                b[j + i] -= ab[col + kv + i] * bj;
            }
        }
    }

    // U x = y
    for j in (0..n).rev() {
        let col = j * ldab;
        b[j] /= ab[col + kv];
        let bj = b[j];
        if bj != T::zero() {
            for i in j.saturating_sub(kv)..j {
                b[i] -= ab[col + kv + i - j] * bj;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use super::*;
    use crate::error::LinearSolverError;

    fn check_solve(dense: DMatrix<f64>, upper: usize, lower: usize) {
        let n = dense.nrows();
        let banded = BandedMatrix::from_dense(&dense, upper, lower).unwrap();
        let x = DVector::from_fn(n, |i, _| 1.0 + 0.5 * i as f64 - 0.1 * (i * i) as f64);
        let b = &dense * &x;
        let factors = factorize(&banded, 0.0).unwrap();
        assert_eq!(factors.pivots().len(), n);
        let mut sol = b.clone();
        factors.solve_in_place(&mut sol).unwrap();
        sol.assert_eq_st(&x, 1e-10);
        let dense_sol = dense.lu().solve(&b).unwrap();
        sol.assert_eq_st(&dense_sol, 1e-10);
    }

    #[test]
    fn test_tridiagonal_no_pivoting() {
        let dense = DMatrix::from_row_slice(
            4,
            4,
            &[
                -4.0, 1.0, 0.0, 0.0, //
                1.0, -4.0, 1.0, 0.0, //
                0.0, 1.0, -4.0, 1.0, //
                0.0, 0.0, 1.0, -4.0,
            ],
        );
        let banded = BandedMatrix::from_dense(&dense, 1, 1).unwrap();
        let factors = factorize(&banded, 0.0).unwrap();
        assert_eq!(factors.pivots(), &[0, 1, 2, 3]);
        check_solve(dense, 1, 1);
    }

    #[test]
    fn test_zero_diagonal_needs_pivoting() {
        let dense = DMatrix::from_row_slice(
            4,
            4,
            &[
                0.0, 2.0, 0.0, 0.0, //
                1.0, 0.0, 3.0, 0.0, //
                0.0, 4.0, 0.0, 5.0, //
                0.0, 0.0, 6.0, 1.0,
            ],
        );
        let banded = BandedMatrix::from_dense(&dense, 1, 1).unwrap();
        let factors = factorize(&banded, 0.0).unwrap();
        assert_eq!(factors.pivots()[0], 1);
        check_solve(dense, 1, 1);
    }

    #[test]
    fn test_asymmetric_bands() {
        // lower bandwidth 2, upper bandwidth 1, small diagonal forces interchanges
        let n = 7;
        let dense = DMatrix::from_fn(n, n, |i, j| {
            if j + 2 >= i && j <= i + 1 {
                if i == j {
                    0.01 * (i + 1) as f64
                } else {
                    1.0 + ((3 * i + 5 * j) % 7) as f64
                }
            } else {
                0.0
            }
        });
        check_solve(dense.clone(), 1, 2);
        check_solve(dense.transpose(), 2, 1);
    }

    #[test]
    fn test_diagonal_and_scalar() {
        check_solve(DMatrix::from_diagonal(&DVector::from_vec(vec![2.0, -3.0, 0.5])), 0, 0);
        check_solve(DMatrix::from_element(1, 1, -7.0), 0, 0);
        // bandwidth wider than the matrix
        check_solve(
            DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]),
            3,
            3,
        );
    }

    #[test]
    fn test_singular() {
        let dense = DMatrix::from_row_slice(
            3,
            3,
            &[
                1.0, 0.0, 0.0, //
                0.0, 0.0, 0.0, //
                0.0, 0.0, 1.0,
            ],
        );
        let banded = BandedMatrix::from_dense(&dense, 1, 1).unwrap();
        let err = factorize(&banded, 0.0).unwrap_err();
        assert_eq!(
            err,
            BandsolError::LinearSolverError(LinearSolverError::SingularMatrix { column: 1 })
        );
    }

    #[test]
    fn test_pivot_tolerance() {
        let dense = DMatrix::from_diagonal(&DVector::from_vec(vec![1.0, 1e-14, 1.0]));
        let banded = BandedMatrix::from_dense(&dense, 1, 1).unwrap();
        assert!(factorize(&banded, 0.0).is_ok());
        let err = factorize(&banded, 1e-12).unwrap_err();
        assert_eq!(
            err,
            BandsolError::LinearSolverError(LinearSolverError::SingularMatrix { column: 1 })
        );
    }

    #[test]
    fn test_rhs_length_mismatch() {
        let banded = BandedMatrix::<f64>::identity(3, 1, 1);
        let factors = factorize(&banded, 0.0).unwrap();
        let mut b = DVector::from_element(2, 1.0);
        let err = factors.solve_in_place(&mut b).unwrap_err();
        assert_eq!(
            err,
            BandsolError::LinearSolverError(LinearSolverError::RhsLengthMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn test_factorize_into_reshapes() {
        let a = BandedMatrix::<f64>::identity(4, 2, 1);
        let mut factors = BandedLuFactors::zeros(2, 0, 0);
        factorize_into(&a, 0.0, &mut factors).unwrap();
        assert_eq!(factors.nrows(), 4);
        assert_eq!(factors.upper_bandwidth(), 2);
        assert_eq!(factors.lower_bandwidth(), 1);
    }
}
