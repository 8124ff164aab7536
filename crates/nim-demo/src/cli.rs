//! Command-line arguments

use clap::{Parser, ValueEnum};
use nim_processing::BandProfile;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "nim-demo", version, about = "Build a neural interface matrix from a synthetic signal")]
pub struct Args {
    /// Signal preset (see --list-patterns)
    #[arg(long, default_value = "Alpha Rhythm")]
    pub pattern: String,

    /// Use a pure sine at this frequency (Hz) instead of a preset
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Signal duration in seconds
    #[arg(long, default_value_t = 1.0)]
    pub duration: f64,

    /// Comma-separated interface weights
    #[arg(long, value_delimiter = ',', default_value = "1.0,2.0,3.0")]
    pub weights: Vec<f64>,

    /// Band profile used when no config file is given
    #[arg(long, value_enum, default_value_t = ProfileArg::Standard)]
    pub profile: ProfileArg,

    /// JSON configuration file, overrides --profile
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Gaussian noise standard deviation
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Powerline interference frequency (Hz)
    #[arg(long)]
    pub powerline: Option<f64>,

    /// Random seed for the noise generator
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Print the active configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,

    /// List signal presets and exit
    #[arg(long)]
    pub list_patterns: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    Standard,
    Alpha,
    Beta,
    Gamma,
}

impl From<ProfileArg> for BandProfile {
    fn from(profile: ProfileArg) -> Self {
        match profile {
            ProfileArg::Standard => BandProfile::Standard,
            ProfileArg::Alpha => BandProfile::Alpha,
            ProfileArg::Beta => BandProfile::Beta,
            ProfileArg::Gamma => BandProfile::Gamma,
        }
    }
}
