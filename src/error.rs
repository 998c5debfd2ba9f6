use thiserror::Error;

/// Custom error type for Bandsol
///
/// This error type is used to wrap all possible errors that can occur when using Bandsol
#[derive(Error, Debug, PartialEq)]
pub enum BandsolError {
    #[error("Linear solver error: {0}")]
    LinearSolverError(#[from] LinearSolverError),
    #[error("Integrator error: {0}")]
    IntegratorError(#[from] IntegratorError),
    #[error("Matrix error: {0}")]
    MatrixError(#[from] MatrixError),
}

/// Possible errors that can occur when factorising or solving a linear system
#[derive(Error, Debug, PartialEq)]
pub enum LinearSolverError {
    #[error("Matrix is singular: zero pivot in column {column}")]
    SingularMatrix { column: usize },
    #[error("LU not initialized")]
    LuNotInitialized,
    #[error("LU solve failed")]
    LuSolveFailed,
    #[error("Right hand side has wrong length: expected {expected}, got {found}")]
    RhsLengthMismatch { expected: usize, found: usize },
    #[error("Matrix has wrong number of rows: expected {expected}, got {found}")]
    MatrixShapeMismatch { expected: usize, found: usize },
}

/// Possible errors that can occur when configuring or stepping an integrator
#[derive(Error, Debug, PartialEq)]
pub enum IntegratorError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Integrator not initialized, set the size, step size and initial state before stepping")]
    NotInitialized,
}

/// Possible errors for banded matrix operations
#[derive(Error, Debug, PartialEq)]
pub enum MatrixError {
    #[error("Entry ({row}, {col}) lies outside the band")]
    BandOutOfRange { row: usize, col: usize },
    #[error("Cannot combine banded matrices with different shapes")]
    ShapeMismatch,
}

#[macro_export]
macro_rules! linear_solver_error {
    ($variant:ident) => {
        $crate::error::BandsolError::from($crate::error::LinearSolverError::$variant)
    };
    ($variant:ident { $($field:ident $(: $value:expr)?),* $(,)? }) => {
        $crate::error::BandsolError::from($crate::error::LinearSolverError::$variant { $($field $(: $value)?),* })
    };
}

#[macro_export]
macro_rules! integrator_error {
    ($variant:ident) => {
        $crate::error::BandsolError::from($crate::error::IntegratorError::$variant)
    };
    ($variant:ident { $($field:ident $(: $value:expr)?),* $(,)? }) => {
        $crate::error::BandsolError::from($crate::error::IntegratorError::$variant { $($field $(: $value)?),* })
    };
    ($variant:ident, $($arg:tt)*) => {
        $crate::error::BandsolError::from($crate::error::IntegratorError::$variant($($arg)*))
    };
}

#[macro_export]
macro_rules! matrix_error {
    ($variant:ident) => {
        $crate::error::BandsolError::from($crate::error::MatrixError::$variant)
    };
    ($variant:ident { $($field:ident $(: $value:expr)?),* $(,)? }) => {
        $crate::error::BandsolError::from($crate::error::MatrixError::$variant { $($field $(: $value)?),* })
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_macros() {
        let found = 4;
        let err = integrator_error!(DimensionMismatch {
            expected: 2,
            found
        });
        assert_eq!(
            err,
            BandsolError::IntegratorError(IntegratorError::DimensionMismatch {
                expected: 2,
                found: 4
            })
        );
        let column = 1;
        assert_eq!(
            linear_solver_error!(SingularMatrix { column }),
            BandsolError::LinearSolverError(LinearSolverError::SingularMatrix { column: 1 })
        );
        assert_eq!(
            matrix_error!(BandOutOfRange { row: 0, col: 3 }).to_string(),
            "Matrix error: Entry (0, 3) lies outside the band"
        );
        assert_eq!(
            integrator_error!(InvalidConfiguration, "bad".to_string()),
            BandsolError::IntegratorError(IntegratorError::InvalidConfiguration(
                "bad".to_string()
            ))
        );
    }
}
