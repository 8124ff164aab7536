//! NIM-Simulation: synthetic test signals
//!
//! Deterministic signal generation for tests, benchmarks and demos.

pub mod signal_patterns;
pub mod signal_generator;

pub use signal_generator::*;
pub use signal_patterns::*;
