//! NIM-Processing: bandpass filtering and interface matrix construction
//!
//! Butterworth bandpass design, IIR filtering and the outer-product builder.

pub mod filters;
pub mod interface;
pub mod processor;
pub mod config;

pub use processor::{SignalProcessor, ProcessingMetrics};
pub use filters::{
    ButterworthBandpass, BiquadSection, FilterCoefficients, FilterSpec,
    butter_bandpass_filter, DEFAULT_ORDER,
};
pub use interface::{InterfaceMatrixBuilder, create_nim};
pub use config::{NimConfig, BandProfile};
