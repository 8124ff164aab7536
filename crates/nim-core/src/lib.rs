//! NIM-Core: Foundation types for neural interface matrices
//!
//! Signal container, interface matrix and the shared error type.

pub mod signal_entity;
pub mod matrix;
pub mod error;

pub use signal_entity::*;
pub use matrix::{InterfaceMatrix, outer_product};
pub use error::{NimError, NimResult};
