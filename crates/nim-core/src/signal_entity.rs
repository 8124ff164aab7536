//! Signal: container for a sampled 1D signal

use crate::error::{NimError, NimResult};
use serde::{Deserialize, Serialize};

/// Single-channel sampled signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Samples in time order
    pub samples: Vec<f64>,
    /// Sampling rate in Hz
    pub sampling_rate: f64,
}

impl Signal {
    /// Create new signal with samples and sampling rate
    pub fn new(samples: Vec<f64>, sampling_rate: f64) -> NimResult<Self> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(NimError::InvalidSamplingRate { rate: sampling_rate });
        }

        Ok(Signal {
            samples,
            sampling_rate,
        })
    }

    /// Get number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if signal is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get sample slice
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Get signal duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sampling_rate
    }

    /// Get time vector for plotting
    pub fn time_vector(&self) -> Vec<f64> {
        let dt = 1.0 / self.sampling_rate;

        (0..self.samples.len())
            .map(|i| i as f64 * dt)
            .collect()
    }

    /// Replace the samples, keeping the sampling rate
    pub fn with_samples(&self, samples: Vec<f64>) -> Self {
        Signal {
            samples,
            sampling_rate: self.sampling_rate,
        }
    }

    /// Calculate basic statistics
    pub fn stats(&self) -> SignalStats {
        SignalStats::calculate(&self.samples)
    }
}

/// Basic statistics for a sample sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub mean: f64,
    pub rms: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub peak_to_peak: f64,
}

impl SignalStats {
    pub fn calculate(data: &[f64]) -> Self {
        if data.is_empty() {
            return Self {
                mean: 0.0,
                rms: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
                peak_to_peak: 0.0,
            };
        }

        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;

        let sum_sq: f64 = data.iter().map(|x| x * x).sum();
        let rms = (sum_sq / n).sqrt();

        let variance: f64 = data.iter()
            .map(|x| (x - mean).powi(2))
            .sum::<f64>() / n;
        let std_dev = variance.sqrt();

        let min = data.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = data.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Self {
            mean,
            rms,
            std_dev,
            min,
            max,
            peak_to_peak: max - min,
        }
    }
}
