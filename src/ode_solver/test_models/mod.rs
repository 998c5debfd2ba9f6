pub mod advection_diffusion;
pub mod exponential_decay;
pub mod heat1d;
pub mod tridiagonal_golden;
