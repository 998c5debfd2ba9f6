pub mod banded;
mod dense_nalgebra_serial;

pub use banded::BandedMatrix;
