pub mod factors;
pub mod lu;

pub use factors::{factorize, factorize_into, solve_in_place, BandedLuFactors};
