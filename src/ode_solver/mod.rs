pub mod bdf;
pub mod builder;
pub mod config;
pub mod explicit;
pub mod method;
pub mod solution;
pub mod state;
pub mod test_models;
pub mod tridiagonal;
