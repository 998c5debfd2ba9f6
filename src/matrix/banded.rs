use std::ops::{Index, IndexMut};

use crate::{error::BandsolError, matrix_error, IndexType, Scalar, Vector};

/// A square banded matrix.
///
/// Entries are stored in a single contiguous buffer addressed by `(row, diagonal offset)`: row
/// `i` owns `lower_bandwidth + upper_bandwidth + 1` consecutive slots, slot `d` holding the entry
/// at column `i + d - lower_bandwidth`. Slots that would fall outside the matrix (the top-left
/// and bottom-right corners of the band) are kept at zero and never read.
#[derive(Clone, Debug, PartialEq)]
pub struct BandedMatrix<T: Scalar> {
    nrows: IndexType,
    upper_bandwidth: IndexType,
    lower_bandwidth: IndexType,
    data: Vec<T>,
}

impl<T: Scalar> BandedMatrix<T> {
    /// Create a zero matrix with `nrows` rows and columns and the given bandwidths.
    pub fn zeros(
        nrows: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) -> Self {
        let width = upper_bandwidth + lower_bandwidth + 1;
        Self {
            nrows,
            upper_bandwidth,
            lower_bandwidth,
            data: vec![T::zero(); nrows * width],
        }
    }

    /// Create a tridiagonal matrix from its sub, main and super diagonals.
    ///
    /// Row `i` is `sub[i] * x[i-1] + diag[i] * x[i] + sup[i] * x[i+1]`, so `sub[0]` and
    /// `sup[n-1]` are ignored.
    pub fn from_diagonals<V: Vector<T = T>>(
        sub: &V,
        diag: &V,
        sup: &V,
    ) -> Result<Self, BandsolError> {
        let n = diag.len();
        if sub.len() != n || sup.len() != n {
            return Err(matrix_error!(ShapeMismatch));
        }
        let mut m = Self::zeros(n, 1, 1);
        for i in 0..n {
            m[(i, i)] = diag[i];
            if i > 0 {
                m[(i, i - 1)] = sub[i];
            }
            if i + 1 < n {
                m[(i, i + 1)] = sup[i];
            }
        }
        Ok(m)
    }

    pub fn nrows(&self) -> IndexType {
        self.nrows
    }

    pub fn ncols(&self) -> IndexType {
        self.nrows
    }

    pub fn upper_bandwidth(&self) -> IndexType {
        self.upper_bandwidth
    }

    pub fn lower_bandwidth(&self) -> IndexType {
        self.lower_bandwidth
    }

    fn width(&self) -> IndexType {
        self.upper_bandwidth + self.lower_bandwidth + 1
    }

    /// Returns true if `(i, j)` is inside the matrix and inside the band.
    pub fn in_band(&self, i: IndexType, j: IndexType) -> bool {
        i < self.nrows
            && j < self.nrows
            && j + self.lower_bandwidth >= i
            && j <= i + self.upper_bandwidth
    }

    #[inline]
    fn offset(&self, i: IndexType, j: IndexType) -> usize {
        i * self.width() + self.lower_bandwidth + j - i
    }

    /// The entry at `(i, j)`, zero if it lies outside the band.
    pub fn get(&self, i: IndexType, j: IndexType) -> T {
        if self.in_band(i, j) {
            self.data[self.offset(i, j)]
        } else {
            T::zero()
        }
    }

    /// Set the entry at `(i, j)`, which must lie inside the band.
    pub fn set(&mut self, i: IndexType, j: IndexType, value: T) -> Result<(), BandsolError> {
        if !self.in_band(i, j) {
            return Err(matrix_error!(BandOutOfRange { row: i, col: j }));
        }
        let offset = self.offset(i, j);
        self.data[offset] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        for i in 0..self.nrows {
            let lo = i.saturating_sub(self.lower_bandwidth);
            let hi = (i + self.upper_bandwidth).min(self.nrows - 1);
            for j in lo..=hi {
                let offset = self.offset(i, j);
                self.data[offset] = value;
            }
        }
    }

    /// Add `alpha` to every entry on the main diagonal.
    pub fn add_diagonal(&mut self, alpha: T) {
        for i in 0..self.nrows {
            let offset = self.offset(i, i);
            self.data[offset] += alpha;
        }
    }

    pub fn copy_from(&mut self, other: &Self) -> Result<(), BandsolError> {
        if self.nrows != other.nrows
            || self.upper_bandwidth != other.upper_bandwidth
            || self.lower_bandwidth != other.lower_bandwidth
        {
            return Err(matrix_error!(ShapeMismatch));
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Identity matrix with the given bandwidths.
    pub fn identity(
        nrows: IndexType,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) -> Self {
        let mut m = Self::zeros(nrows, upper_bandwidth, lower_bandwidth);
        m.add_diagonal(T::one());
        m
    }
}

impl<T: Scalar> Index<(IndexType, IndexType)> for BandedMatrix<T> {
    type Output = T;

    fn index(&self, (i, j): (IndexType, IndexType)) -> &T {
        assert!(self.in_band(i, j), "entry ({}, {}) outside band", i, j);
        &self.data[self.offset(i, j)]
    }
}

impl<T: Scalar> IndexMut<(IndexType, IndexType)> for BandedMatrix<T> {
    fn index_mut(&mut self, (i, j): (IndexType, IndexType)) -> &mut T {
        assert!(self.in_band(i, j), "entry ({}, {}) outside band", i, j);
        let offset = self.offset(i, j);
        &mut self.data[offset]
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::DVector;

    use super::*;
    use crate::error::MatrixError;

    fn pentadiagonal() -> BandedMatrix<f64> {
        let mut m = BandedMatrix::zeros(5, 1, 2);
        for i in 0..5usize {
            for j in i.saturating_sub(2)..=(i + 1).min(4) {
                m[(i, j)] = (10 * i + j) as f64;
            }
        }
        m
    }

    #[test]
    fn test_get_set() {
        let mut m = pentadiagonal();
        assert_eq!(m.get(3, 1), 31.0);
        assert_eq!(m.get(3, 4), 34.0);
        assert_eq!(m.get(0, 3), 0.0);
        assert_eq!(m.get(4, 0), 0.0);
        m.set(2, 0, -1.0).unwrap();
        assert_eq!(m[(2, 0)], -1.0);
        let err = m.set(0, 2, 1.0).unwrap_err();
        assert_eq!(
            err,
            BandsolError::MatrixError(MatrixError::BandOutOfRange { row: 0, col: 2 })
        );
        assert!(m.set(5, 5, 1.0).is_err());
    }

    #[test]
    fn test_add_diagonal_and_copy() {
        let a = pentadiagonal();
        let mut m = BandedMatrix::zeros(5, 1, 2);
        m.copy_from(&a).unwrap();
        m.add_diagonal(-1.5);
        for i in 0..5 {
            assert_eq!(m[(i, i)], a[(i, i)] - 1.5);
        }
        let mut wrong = BandedMatrix::<f64>::zeros(5, 1, 1);
        assert!(wrong.copy_from(&a).is_err());
    }

    #[test]
    fn test_from_diagonals() {
        let sub = DVector::from_vec(vec![9.0, 1.0, 2.0]);
        let diag = DVector::from_vec(vec![-2.0, -2.0, -2.0]);
        let sup = DVector::from_vec(vec![3.0, 4.0, 9.0]);
        let m = BandedMatrix::from_diagonals(&sub, &diag, &sup).unwrap();
        let dense = m.to_dense();
        let expect = nalgebra::DMatrix::from_row_slice(
            3,
            3,
            &[-2.0, 3.0, 0.0, 1.0, -2.0, 4.0, 0.0, 2.0, -2.0],
        );
        assert_eq!(dense, expect);
        let short = DVector::from_vec(vec![1.0]);
        assert!(BandedMatrix::from_diagonals(&short, &diag, &sup).is_err());
    }

    #[test]
    fn test_fill_leaves_padding_untouched() {
        let mut m = BandedMatrix::<f64>::zeros(3, 2, 2);
        m.fill(1.0);
        let dense = m.to_dense();
        assert_eq!(dense, nalgebra::DMatrix::from_element(3, 3, 1.0));
        assert_eq!(m.data.iter().filter(|x| **x == 1.0).count(), 9);
    }
}
