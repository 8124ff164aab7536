//! Configuration management for interface matrix construction

use crate::filters::{FilterSpec, DEFAULT_ORDER};
use nim_core::{config_error, NimError, NimResult};
use serde::{Deserialize, Serialize};

/// Default low cutoff (Hz)
pub const DEFAULT_LOW_CUTOFF: f64 = 0.5;
/// Default high cutoff (Hz)
pub const DEFAULT_HIGH_CUTOFF: f64 = 50.0;
/// Default sampling rate (Hz)
pub const DEFAULT_SAMPLING_RATE: f64 = 1000.0;

/// Interface matrix configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NimConfig {
    /// Configuration name
    pub name: String,
    /// Frequency band profile
    pub profile: BandProfile,
    /// Bandpass applied before the outer product
    pub filter: FilterSpec,
}

/// Frequency band profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandProfile {
    /// Broadband 0.5-50 Hz
    Standard,
    /// Alpha rhythm 8-13 Hz
    Alpha,
    /// Beta rhythm 13-30 Hz
    Beta,
    /// Low gamma 30-45 Hz
    Gamma,
    /// User-defined band
    Custom,
}

/// Preset configurations
impl NimConfig {
    /// Broadband 0.5-50 Hz at 1000 Hz, order 5
    pub fn standard() -> Self {
        Self::preset(
            "Standard",
            BandProfile::Standard,
            DEFAULT_LOW_CUTOFF,
            DEFAULT_HIGH_CUTOFF,
        )
    }

    pub fn alpha_band() -> Self {
        Self::preset("Alpha", BandProfile::Alpha, 8.0, 13.0)
    }

    pub fn beta_band() -> Self {
        Self::preset("Beta", BandProfile::Beta, 13.0, 30.0)
    }

    pub fn gamma_band() -> Self {
        Self::preset("Gamma", BandProfile::Gamma, 30.0, 45.0)
    }

    /// User-defined band at the default sampling rate and order
    pub fn custom(name: &str, low_cutoff: f64, high_cutoff: f64) -> Self {
        Self::preset(name, BandProfile::Custom, low_cutoff, high_cutoff)
    }

    fn preset(name: &str, profile: BandProfile, low_cutoff: f64, high_cutoff: f64) -> Self {
        NimConfig {
            name: name.to_string(),
            profile,
            filter: FilterSpec {
                low_cutoff,
                high_cutoff,
                sampling_rate: DEFAULT_SAMPLING_RATE,
                order: DEFAULT_ORDER,
            },
        }
    }

    /// Create configuration suitable for given profile
    pub fn for_profile(profile: BandProfile) -> Self {
        match profile {
            BandProfile::Standard => Self::standard(),
            BandProfile::Alpha => Self::alpha_band(),
            BandProfile::Beta => Self::beta_band(),
            BandProfile::Gamma => Self::gamma_band(),
            BandProfile::Custom => Self::custom("Custom", DEFAULT_LOW_CUTOFF, DEFAULT_HIGH_CUTOFF),
        }
    }

    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.filter.sampling_rate = sampling_rate;
        self
    }

    pub fn with_order(mut self, order: usize) -> Self {
        self.filter.order = order;
        self
    }

    /// Replace the band; the profile becomes `Custom`
    pub fn with_band(mut self, low_cutoff: f64, high_cutoff: f64) -> Self {
        self.filter.low_cutoff = low_cutoff;
        self.filter.high_cutoff = high_cutoff;
        self.profile = BandProfile::Custom;
        self
    }

    /// Validate entire configuration
    pub fn validate(&self) -> NimResult<()> {
        if self.name.is_empty() {
            return Err(config_error!("Configuration name cannot be empty"));
        }

        self.filter.validate()
    }

    /// Export configuration to JSON
    pub fn to_json(&self) -> NimResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| NimError::SerializationError {
            reason: format!("Failed to serialize configuration: {}", e),
        })
    }

    /// Import configuration from JSON
    pub fn from_json(json: &str) -> NimResult<Self> {
        serde_json::from_str(json).map_err(|e| NimError::SerializationError {
            reason: format!("Failed to deserialize configuration: {}", e),
        })
    }
}

impl Default for NimConfig {
    fn default() -> Self {
        Self::standard()
    }
}
