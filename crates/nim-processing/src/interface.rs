//! Interface matrix construction: bandpass filter, then outer product

use crate::config::NimConfig;
use crate::filters::ButterworthBandpass;
use crate::processor::ProcessingMetrics;
use nim_core::{outer_product, InterfaceMatrix, NimError, NimResult, Signal};
use tracing::debug;

/// Builds interface matrices for a fixed filter configuration
///
/// The filter is designed once in [`InterfaceMatrixBuilder::new`] and reused
/// for every [`build`](InterfaceMatrixBuilder::build); each call still starts
/// from zero filter state.
#[derive(Debug, Clone)]
pub struct InterfaceMatrixBuilder {
    config: NimConfig,
    filter: ButterworthBandpass,
}

impl InterfaceMatrixBuilder {
    pub fn new(config: NimConfig) -> NimResult<Self> {
        config.validate()?;
        let filter = ButterworthBandpass::new(config.filter)?;
        Ok(Self { config, filter })
    }

    pub fn config(&self) -> &NimConfig {
        &self.config
    }

    pub fn filter(&self) -> &ButterworthBandpass {
        &self.filter
    }

    /// Filter `signal`, then take its outer product with `weights`
    ///
    /// Result has shape `(signal.len(), weights.len())`.
    pub fn build(&self, signal: &[f64], weights: &[f64]) -> NimResult<InterfaceMatrix> {
        let mut timer = ProcessingMetrics::start_timing();

        let filtered = self.filter.filter(signal);
        let matrix = outer_product(&filtered, weights);

        timer.set_samples_processed(signal.len());
        timer.set_values_produced(matrix.rows() * matrix.cols());
        let metrics = timer.finish();

        debug!(
            config = %self.config.name,
            rows = matrix.rows(),
            cols = matrix.cols(),
            elapsed_us = metrics.processing_time_us,
            "built interface matrix"
        );

        Ok(matrix)
    }

    /// Build from a [`Signal`], checking its sampling rate against the filter
    pub fn build_from_signal(&self, signal: &Signal, weights: &[f64]) -> NimResult<InterfaceMatrix> {
        if signal.sampling_rate != self.config.filter.sampling_rate {
            return Err(NimError::InvalidSignalData {
                reason: format!(
                    "Signal sampled at {}Hz but configuration expects {}Hz",
                    signal.sampling_rate, self.config.filter.sampling_rate
                ),
            });
        }

        self.build(signal.as_slice(), weights)
    }
}

/// Interface matrix with the standard 0.5-50 Hz band at 1000 Hz, order 5
pub fn create_nim(signal: &[f64], weights: &[f64]) -> NimResult<InterfaceMatrix> {
    InterfaceMatrixBuilder::new(NimConfig::standard())?.build(signal, weights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{butter_bandpass_filter, DEFAULT_ORDER};

    fn ramp(len: usize) -> Vec<f64> {
        (0..len).map(|i| (i as f64 * 0.37).sin() + 0.01 * i as f64).collect()
    }

    #[test]
    fn test_shape() {
        let matrix = create_nim(&ramp(64), &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(matrix.shape(), (64, 4));
    }

    #[test]
    fn test_entries_are_filtered_times_weight() {
        let signal = ramp(200);
        let weights = [0.5, -1.0, 3.0];

        let filtered = butter_bandpass_filter(&signal, 0.5, 50.0, 1000.0, DEFAULT_ORDER).unwrap();
        let matrix = create_nim(&signal, &weights).unwrap();

        for (i, f) in filtered.iter().enumerate() {
            for (j, w) in weights.iter().enumerate() {
                assert_eq!(matrix.get(i, j), Some(f * w));
            }
        }
    }

    #[test]
    fn test_empty_inputs() {
        let no_rows = create_nim(&[], &[1.0, 2.0]).unwrap();
        assert_eq!(no_rows.shape(), (0, 2));

        let no_cols = create_nim(&ramp(10), &[]).unwrap();
        assert_eq!(no_cols.shape(), (10, 0));

        let nothing = create_nim(&[], &[]).unwrap();
        assert_eq!(nothing.shape(), (0, 0));
    }

    #[test]
    fn test_builder_rejects_invalid_config() {
        let config = NimConfig::standard().with_band(60.0, 600.0);
        assert!(matches!(
            InterfaceMatrixBuilder::new(config),
            Err(NimError::InvalidFilterBand { .. })
        ));
    }

    #[test]
    fn test_custom_band_matches_direct_filter() {
        let config = NimConfig::custom("mu", 8.0, 12.0).with_sampling_rate(250.0).with_order(2);
        let builder = InterfaceMatrixBuilder::new(config).unwrap();

        let signal = ramp(100);
        let filtered = butter_bandpass_filter(&signal, 8.0, 12.0, 250.0, 2).unwrap();
        let matrix = builder.build(&signal, &[1.0]).unwrap();

        assert_eq!(matrix.column(0).unwrap().to_vec(), filtered);
    }

    #[test]
    fn test_build_from_signal_checks_rate() {
        let builder = InterfaceMatrixBuilder::new(NimConfig::standard()).unwrap();

        let signal = Signal::new(ramp(50), 1000.0).unwrap();
        assert_eq!(builder.build_from_signal(&signal, &[1.0, 2.0]).unwrap().shape(), (50, 2));

        let wrong_rate = Signal::new(ramp(50), 500.0).unwrap();
        assert!(matches!(
            builder.build_from_signal(&wrong_rate, &[1.0]),
            Err(NimError::InvalidSignalData { .. })
        ));
    }

    #[test]
    fn test_calls_are_independent() {
        let builder = InterfaceMatrixBuilder::new(NimConfig::default()).unwrap();
        let signal = ramp(300);

        let first = builder.build(&signal, &[1.0, 2.0]).unwrap();
        let _other = builder.build(&ramp(17), &[5.0]).unwrap();
        let second = builder.build(&signal, &[1.0, 2.0]).unwrap();

        assert_eq!(first, second);
    }
}
