//! NIM Demo - synthetic signal → bandpass filter → interface matrix

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::Args;
use nim_core::SignalStats;
use nim_processing::{InterfaceMatrixBuilder, NimConfig};
use nim_simulation::{GeneratorConfig, NoiseConfig, SignalGenerator, SignalPattern};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.list_patterns {
        for (name, pattern) in SignalPattern::presets() {
            println!("{:<16} {}", name, pattern.description());
        }
        return Ok(());
    }

    let config = load_config(&args)?;
    config.validate().context("invalid configuration")?;

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let pattern = match args.frequency {
        Some(frequency) => SignalPattern::sine(frequency),
        None => SignalPattern::preset(&args.pattern)
            .with_context(|| format!("unknown pattern '{}', try --list-patterns", args.pattern))?,
    };

    if !(args.duration.is_finite() && args.duration >= 0.0) {
        bail!("duration must be a non-negative number of seconds, got {}", args.duration);
    }

    let mut generator = SignalGenerator::new(GeneratorConfig {
        sampling_rate: config.filter.sampling_rate,
        noise: NoiseConfig {
            gaussian_std: args.noise,
            powerline_freq: args.powerline,
            ..NoiseConfig::default()
        },
        seed: Some(args.seed),
    })?;
    let signal = generator.generate_duration(&pattern, args.duration)?;

    info!(
        pattern = pattern.description(),
        samples = signal.len(),
        sampling_rate = signal.sampling_rate,
        "generated signal"
    );
    info!(
        config = %config.name,
        low_cutoff = config.filter.low_cutoff,
        high_cutoff = config.filter.high_cutoff,
        order = config.filter.order,
        "using bandpass"
    );

    let builder = InterfaceMatrixBuilder::new(config)?;
    let matrix = builder.build_from_signal(&signal, &args.weights)?;
    let (rows, cols) = matrix.shape();

    let input_rms = signal.stats().rms;
    debug!(input_rms, "input statistics");

    println!("Interface matrix: {} x {}", rows, cols);
    for (j, weight) in args.weights.iter().enumerate() {
        let column = matrix
            .column(j)
            .with_context(|| format!("missing column {}", j))?
            .to_vec();
        let stats = SignalStats::calculate(&column);
        println!(
            "  column {:>3} (weight {:>8.3}): rms {:>10.5}  min {:>10.5}  max {:>10.5}",
            j, weight, stats.rms, stats.min, stats.max
        );
    }

    if input_rms > 0.0 {
        if let Some(first) = matrix.column(0) {
            let weight = args.weights[0];
            if weight != 0.0 {
                let filtered_rms = SignalStats::calculate(&first.to_vec()).rms / weight.abs();
                println!("Band gain (rms out / rms in): {:.4}", filtered_rms / input_rms);
            }
        }
    }

    Ok(())
}

/// Configuration from `--config` when given, otherwise from `--profile`
fn load_config(args: &Args) -> Result<NimConfig> {
    match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let config = NimConfig::from_json(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            debug!(path = %path.display(), "loaded configuration file");
            Ok(config)
        }
        None => Ok(NimConfig::for_profile(args.profile.into())),
    }
}
