//! Error handling for the NIM Framework
//!
//! One error type shared by filter design, filtering and matrix construction.

use thiserror::Error;

/// Result type alias for NIM Framework operations
pub type NimResult<T> = Result<T, NimError>;

/// Error type for all NIM Framework operations
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum NimError {
    /// Band edges outside the open interval (0, 1) or out of order
    #[error("Invalid filter band [{low}, {high}] (normalised to Nyquist): {reason}")]
    InvalidFilterBand {
        /// Normalised low edge
        low: f64,
        /// Normalised high edge
        high: f64,
        /// Description of the violated constraint
        reason: &'static str,
    },

    /// Sampling rate that is zero, negative or not finite
    #[error("Invalid sampling rate: {rate}Hz, must be positive and finite")]
    InvalidSamplingRate {
        /// Provided sampling rate
        rate: f64,
    },

    /// Filter order of zero
    #[error("Invalid filter order: {order}, must be at least 1")]
    InvalidFilterOrder {
        /// Requested order
        order: usize,
    },

    /// Filter design or evaluation produced unusable numbers
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Description of the numerical failure
        reason: String,
    },

    /// Signal data inconsistent with the requested operation
    #[error("Invalid signal data: {reason}")]
    InvalidSignalData {
        /// Description of the data issue
        reason: String,
    },

    /// Configuration rejected by validation
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration issue
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError {
        /// Serialization error description
        reason: String,
    },
}

/// Convenience macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)+) => {
        $crate::error::NimError::ConfigurationError {
            message: format!($($arg)+),
        }
    };
}
