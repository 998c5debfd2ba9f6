use serde::{Deserialize, Serialize};

use crate::Scalar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BdfConfig<T> {
    /// Pivots with a magnitude at or below this value are treated as zero during factorisation.
    pub pivot_tolerance: T,
    /// Reject a step whose solution contains a NaN or infinite value.
    pub check_finite: bool,
}

impl<T: Scalar> Default for BdfConfig<T> {
    fn default() -> Self {
        Self {
            pivot_tolerance: T::from(0.0),
            check_finite: true,
        }
    }
}
