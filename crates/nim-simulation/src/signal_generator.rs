//! Synthetic signal generator with optional noise and powerline interference

use crate::signal_patterns::SignalPattern;
use nim_core::{NimError, NimResult, Signal};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// Longest signal a generator will produce (about 28 hours at 1 kHz)
pub const MAX_SAMPLES: usize = 100_000_000;

/// Noise configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoiseConfig {
    /// Gaussian noise standard deviation (0.0 = no noise)
    pub gaussian_std: f64,
    /// Power line interference frequency (50/60Hz)
    pub powerline_freq: Option<f64>,
    /// Power line interference amplitude
    pub powerline_amp: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            gaussian_std: 0.0,
            powerline_freq: None,
            powerline_amp: 0.05,
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Sampling rate in Hz
    pub sampling_rate: f64,
    /// Noise configuration
    pub noise: NoiseConfig,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 1000.0,
            noise: NoiseConfig::default(),
            seed: None,
        }
    }
}

/// Synthetic signal generator
pub struct SignalGenerator {
    config: GeneratorConfig,
    rng: rand::rngs::StdRng,
    normal_dist: Option<Normal<f64>>,
}

impl SignalGenerator {
    /// Create new generator with configuration
    pub fn new(config: GeneratorConfig) -> NimResult<Self> {
        if !(config.sampling_rate.is_finite() && config.sampling_rate > 0.0) {
            return Err(NimError::InvalidSamplingRate { rate: config.sampling_rate });
        }

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or_default()
        });

        let normal_dist = if config.noise.gaussian_std > 0.0 {
            let dist = Normal::new(0.0, config.noise.gaussian_std)
                .map_err(|e| nim_core::config_error!("Failed to create normal distribution: {}", e))?;
            Some(dist)
        } else {
            None
        };

        Ok(SignalGenerator {
            config,
            rng: rand::rngs::StdRng::seed_from_u64(seed),
            normal_dist,
        })
    }

    /// Noise-free generator at `sampling_rate`
    pub fn clean(sampling_rate: f64) -> NimResult<Self> {
        Self::new(GeneratorConfig {
            sampling_rate,
            seed: Some(0),
            ..GeneratorConfig::default()
        })
    }

    pub fn sampling_rate(&self) -> f64 {
        self.config.sampling_rate
    }

    /// Generate `sample_count` samples of `pattern`
    ///
    /// Fails for counts above [`MAX_SAMPLES`].
    pub fn generate(&mut self, pattern: &SignalPattern, sample_count: usize) -> NimResult<Signal> {
        if sample_count > MAX_SAMPLES {
            return Err(NimError::InvalidSignalData {
                reason: format!(
                    "Requested {} samples, at most {} can be generated",
                    sample_count, MAX_SAMPLES
                ),
            });
        }

        let fs = self.config.sampling_rate;
        let mut samples = Vec::with_capacity(sample_count);

        for index in 0..sample_count {
            let mut value = pattern.value_at(index, fs);

            if let Some(dist) = &self.normal_dist {
                value += dist.sample(&mut self.rng);
            }

            if let Some(powerline_freq) = self.config.noise.powerline_freq {
                let time = index as f64 / fs;
                value += self.config.noise.powerline_amp
                    * (2.0 * std::f64::consts::PI * powerline_freq * time).sin();
            }

            samples.push(value);
        }

        Signal::new(samples, fs)
    }

    /// Generate `duration` seconds of `pattern`
    pub fn generate_duration(&mut self, pattern: &SignalPattern, duration: f64) -> NimResult<Signal> {
        let sample_count = (duration * self.config.sampling_rate).round();

        // Negated so NaN counts are rejected too
        if !(sample_count >= 0.0 && sample_count <= MAX_SAMPLES as f64) {
            return Err(NimError::InvalidSignalData {
                reason: format!(
                    "Duration {}s at {}Hz is outside 0..={} samples",
                    duration, self.config.sampling_rate, MAX_SAMPLES
                ),
            });
        }

        self.generate(pattern, sample_count as usize)
    }
}
