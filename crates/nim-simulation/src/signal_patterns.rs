//! Pre-defined waveform patterns

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Deterministic waveform patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SignalPattern {
    /// Constant offset
    Constant { level: f64 },
    /// Pure tone
    Sine {
        frequency: f64,
        amplitude: f64,
        phase: f64,
    },
    /// Sum of tones given as `(frequency, amplitude)` pairs
    MultiTone { tones: Vec<(f64, f64)> },
    /// Linear frequency sweep over `duration` seconds
    Chirp {
        start_freq: f64,
        end_freq: f64,
        duration: f64,
        amplitude: f64,
    },
    /// Single-sample spike of `amplitude` at `time`
    Impulse { time: f64, amplitude: f64 },
}

impl SignalPattern {
    /// Pure unit-amplitude sine at `frequency` Hz
    pub fn sine(frequency: f64) -> Self {
        SignalPattern::Sine {
            frequency,
            amplitude: 1.0,
            phase: 0.0,
        }
    }

    /// Value of the pattern at sample `index` for the given sampling rate
    pub fn value_at(&self, index: usize, sampling_rate: f64) -> f64 {
        let time = index as f64 / sampling_rate;

        match self {
            SignalPattern::Constant { level } => *level,

            SignalPattern::Sine { frequency, amplitude, phase } => {
                amplitude * (2.0 * PI * frequency * time + phase).sin()
            },

            SignalPattern::MultiTone { tones } => tones
                .iter()
                .map(|(frequency, amplitude)| amplitude * (2.0 * PI * frequency * time).sin())
                .sum(),

            SignalPattern::Chirp { start_freq, end_freq, duration, amplitude } => {
                // Phase is the integral of the instantaneous frequency
                let rate = if *duration > 0.0 { (end_freq - start_freq) / duration } else { 0.0 };
                let phase = 2.0 * PI * (start_freq * time + 0.5 * rate * time * time);
                amplitude * phase.sin()
            },

            SignalPattern::Impulse { time: at, amplitude } => {
                let impulse_index = (at * sampling_rate).round() as usize;
                if index == impulse_index { *amplitude } else { 0.0 }
            },
        }
    }

    /// Get pattern description
    pub fn description(&self) -> &'static str {
        match self {
            SignalPattern::Constant { .. } => "Constant offset",
            SignalPattern::Sine { .. } => "Pure tone",
            SignalPattern::MultiTone { .. } => "Sum of tones",
            SignalPattern::Chirp { .. } => "Linear chirp",
            SignalPattern::Impulse { .. } => "Single-sample spike",
        }
    }

    /// Create common preset patterns
    pub fn presets() -> Vec<(&'static str, SignalPattern)> {
        vec![
            ("Alpha Rhythm", SignalPattern::sine(10.0)),
            ("Beta Rhythm", SignalPattern::sine(20.0)),
            ("Out Of Band", SignalPattern::sine(200.0)),
            ("Slow Drift", SignalPattern::sine(0.1)),
            ("DC Offset", SignalPattern::Constant { level: 1.0 }),
            ("Mixed Rhythms", SignalPattern::MultiTone {
                tones: vec![(10.0, 1.0), (20.0, 0.5), (200.0, 0.5)],
            }),
            ("Sweep", SignalPattern::Chirp {
                start_freq: 1.0, end_freq: 100.0, duration: 2.0, amplitude: 1.0,
            }),
            ("Impulse", SignalPattern::Impulse { time: 0.0, amplitude: 1.0 }),
        ]
    }

    /// Look up a preset by case-insensitive name
    pub fn preset(name: &str) -> Option<SignalPattern> {
        Self::presets()
            .into_iter()
            .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
            .map(|(_, pattern)| pattern)
    }
}
