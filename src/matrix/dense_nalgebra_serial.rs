use nalgebra::DMatrix;

use crate::{error::BandsolError, matrix_error, IndexType, Scalar};

use super::banded::BandedMatrix;

impl<T: Scalar> BandedMatrix<T> {
    /// Expand into a dense [nalgebra::DMatrix], zeros outside the band.
    pub fn to_dense(&self) -> DMatrix<T> {
        let n = self.nrows();
        DMatrix::from_fn(n, n, |i, j| self.get(i, j))
    }

    /// Compress a square dense matrix into banded storage. Fails if a non-zero entry lies outside
    /// the requested band.
    pub fn from_dense(
        dense: &DMatrix<T>,
        upper_bandwidth: IndexType,
        lower_bandwidth: IndexType,
    ) -> Result<Self, BandsolError> {
        if dense.nrows() != dense.ncols() {
            return Err(matrix_error!(ShapeMismatch));
        }
        let mut m = Self::zeros(dense.nrows(), upper_bandwidth, lower_bandwidth);
        for j in 0..dense.ncols() {
            for i in 0..dense.nrows() {
                let value = dense[(i, j)];
                if m.in_band(i, j) {
                    m[(i, j)] = value;
                } else if value != T::zero() {
                    return Err(matrix_error!(BandOutOfRange { row: i, col: j }));
                }
            }
        }
        Ok(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_round_trip() {
        let dense = DMatrix::from_row_slice(
            4,
            4,
            &[
                4.0, 1.0, 0.0, 0.0, //
                2.0, 5.0, 1.0, 0.0, //
                7.0, 3.0, 6.0, 1.0, //
                0.0, 8.0, 4.0, 7.0,
            ],
        );
        let banded = BandedMatrix::from_dense(&dense, 1, 2).unwrap();
        assert_eq!(banded.get(2, 0), 7.0);
        assert_eq!(banded.to_dense(), dense);
        assert!(BandedMatrix::from_dense(&dense, 1, 1).is_err());
        let rect = DMatrix::<f64>::zeros(2, 3);
        assert!(BandedMatrix::from_dense(&rect, 1, 1).is_err());
    }
}
