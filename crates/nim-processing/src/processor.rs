//! Core signal processor trait and timing helpers

use nim_core::{NimResult, Signal};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Core trait for stateless signal processors
pub trait SignalProcessor: Send + Sync {
    /// Process a signal and return the processed result
    fn process(&self, input: &Signal) -> NimResult<Signal>;

    /// Get processor name/identifier
    fn name(&self) -> &str;

    /// Check if processor can handle the given signal
    fn can_process(&self, signal: &Signal) -> bool {
        signal.sampling_rate > 0.0
    }
}

/// Performance metrics for processing operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingMetrics {
    /// Actual processing time in microseconds
    pub processing_time_us: u64,
    /// Number of input samples processed
    pub samples_processed: usize,
    /// Number of output values produced
    pub values_produced: usize,
}

impl ProcessingMetrics {
    /// Start timing a processing operation
    pub fn start_timing() -> ProcessingTimer {
        ProcessingTimer {
            start_time: Instant::now(),
            samples_processed: 0,
            values_produced: 0,
        }
    }
}

/// Helper for timing processing operations
pub struct ProcessingTimer {
    start_time: Instant,
    samples_processed: usize,
    values_produced: usize,
}

impl ProcessingTimer {
    pub fn set_samples_processed(&mut self, samples: usize) {
        self.samples_processed = samples;
    }

    pub fn set_values_produced(&mut self, values: usize) {
        self.values_produced = values;
    }

    /// Finish timing and return metrics
    pub fn finish(self) -> ProcessingMetrics {
        ProcessingMetrics {
            processing_time_us: self.start_time.elapsed().as_micros() as u64,
            samples_processed: self.samples_processed,
            values_produced: self.values_produced,
        }
    }
}
