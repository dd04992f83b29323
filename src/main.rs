//! Concept Drift CLI Application
//!
//! Runs the DDM detector over synthetic or recorded error streams.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use concept_drift::drift::{DdmConfig, DDM};
use concept_drift::monitor::DriftMonitor;
use concept_drift::streaming::{MersenneBitStream, Observations, Regime, RegimeStream};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "concept_drift")]
#[command(about = "Concept drift detection for online classifier error streams")]
struct Cli {
    /// Log warning-zone entries as well as drifts
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print events and summary as JSON lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run on a Mersenne Twister bit stream with a forced error spike
    Simulate {
        /// Generator seed
        #[arg(long, default_value = "12345")]
        seed: u32,

        /// Number of observations
        #[arg(short, long, default_value = "2000")]
        length: usize,

        /// First index of the error spike
        #[arg(long, default_value = "999")]
        spike_start: usize,

        /// End (exclusive) of the error spike
        #[arg(long, default_value = "1500")]
        spike_end: usize,

        #[command(flatten)]
        detector: DetectorArgs,
    },

    /// Run on piecewise-stationary Bernoulli regimes
    Synthetic {
        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Regime as RATE:LENGTH, repeatable (e.g. 0.1:1000)
        #[arg(short, long = "regime", value_parser = parse_regime, required = true)]
        regimes: Vec<Regime>,

        #[command(flatten)]
        detector: DetectorArgs,
    },

    /// Replay recorded outcomes (one 0/1 per line, `-` for stdin)
    Replay {
        input: PathBuf,

        #[command(flatten)]
        detector: DetectorArgs,
    },
}

#[derive(Args)]
struct DetectorArgs {
    /// JSON file with detector configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum observations before detection starts
    #[arg(long)]
    min_instances: Option<u64>,

    /// Warning level multiplier
    #[arg(long)]
    warning_level: Option<f64>,

    /// Drift level multiplier
    #[arg(long)]
    out_control_level: Option<f64>,
}

impl DetectorArgs {
    /// Build the detector, letting flags override the config file
    fn build(&self) -> anyhow::Result<DDM> {
        let mut config = match &self.config {
            Some(path) => DdmConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => DdmConfig::default(),
        };

        if let Some(min_instances) = self.min_instances {
            config = config.with_min_num_instances(min_instances);
        }
        if let Some(level) = self.warning_level {
            config = config.with_warning_level(level);
        }
        if let Some(level) = self.out_control_level {
            config = config.with_out_control_level(level);
        }

        Ok(DDM::new(config)?)
    }
}

fn parse_regime(s: &str) -> Result<Regime, String> {
    let (rate, length) = s
        .split_once(':')
        .ok_or_else(|| format!("expected RATE:LENGTH, got {s:?}"))?;
    let error_rate = rate
        .parse::<f64>()
        .map_err(|e| format!("invalid rate {rate:?}: {e}"))?;
    let length = length
        .parse::<usize>()
        .map_err(|e| format!("invalid length {length:?}: {e}"))?;
    Ok(Regime::new(error_rate, length))
}

/// Feed observations to the monitor as they are read
fn replay<R: BufRead>(monitor: &mut DriftMonitor, reader: R) -> anyhow::Result<()> {
    for observation in Observations::new(reader) {
        monitor.observe(observation?);
    }
    Ok(())
}

fn report(monitor: &DriftMonitor, json: bool) -> anyhow::Result<()> {
    let summary = monitor.summary();

    if json {
        for event in monitor.events() {
            println!("{}", serde_json::to_string(event)?);
        }
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    info!("=== Drift Detection Summary ===");
    info!("Observations: {}", summary.observations);
    info!("Drifts: {}", summary.drifts);
    info!("Warning observations: {}", summary.warnings);
    match summary.first_drift {
        Some(index) => info!("First drift at index {}", index),
        None => info!("No drift detected"),
    }
    info!("Final statistics: {:?}", monitor.detector().statistics());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let monitor = match cli.command {
        Commands::Simulate {
            seed,
            length,
            spike_start,
            spike_end,
            detector,
        } => {
            info!(
                "Simulating {} observations (seed={}, spike={}..{})",
                length, seed, spike_start, spike_end
            );
            let stream =
                MersenneBitStream::new(seed, length).with_forced_errors(spike_start..spike_end);

            let mut monitor = DriftMonitor::new(detector.build()?);
            monitor.observe_all(stream);
            monitor
        }

        Commands::Synthetic {
            seed,
            regimes,
            detector,
        } => {
            let stream = RegimeStream::new(seed, regimes)?;
            info!(
                "Generating {} observations (seed={}), regime changes at {:?}",
                stream.total(),
                seed,
                stream.change_points()
            );

            let mut monitor = DriftMonitor::new(detector.build()?);
            monitor.observe_all(stream);
            monitor
        }

        Commands::Replay { input, detector } => {
            let reader: Box<dyn BufRead> = if input.as_os_str() == "-" {
                Box::new(io::stdin().lock())
            } else {
                let file = File::open(&input)
                    .with_context(|| format!("opening {}", input.display()))?;
                Box::new(BufReader::new(file))
            };
            info!("Replaying observations from {}", input.display());

            let mut monitor = DriftMonitor::new(detector.build()?);
            replay(&mut monitor, reader)?;
            monitor
        }
    };

    report(&monitor, cli.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regime() {
        assert_eq!(parse_regime("0.25:100").unwrap(), Regime::new(0.25, 100));
        assert!(parse_regime("0.25").is_err());
        assert!(parse_regime("x:100").is_err());
        assert!(parse_regime("0.1:-5").is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = DetectorArgs {
            config: None,
            min_instances: Some(10),
            warning_level: None,
            out_control_level: Some(4.0),
        };
        let ddm = args.build().unwrap();
        assert_eq!(ddm.config().min_num_instances, 10);
        assert_eq!(ddm.config().warning_level, 2.0);
        assert_eq!(ddm.config().out_control_level, 4.0);
    }

    #[test]
    fn test_invalid_flags_rejected() {
        let args = DetectorArgs {
            config: None,
            min_instances: None,
            warning_level: Some(3.5),
            out_control_level: None,
        };
        assert!(args.build().is_err());
    }

    #[test]
    fn test_replay_feeds_observations_in_order() {
        let mut input = String::new();
        for _ in 0..100 {
            input.push_str("0\n");
        }
        input.push_str("1\n0\n");

        let mut monitor = DriftMonitor::new(DDM::default());
        replay(&mut monitor, input.as_bytes()).unwrap();

        let summary = monitor.summary();
        assert_eq!(summary.observations, 102);
        assert_eq!(summary.first_drift, Some(100));
    }

    #[test]
    fn test_replay_stops_at_malformed_line() {
        let mut monitor = DriftMonitor::new(DDM::default());
        let err = replay(&mut monitor, "0\n1\nmaybe\n0\n".as_bytes()).unwrap_err();

        assert!(err.to_string().contains("line 3"));
        assert_eq!(monitor.summary().observations, 2);
    }

    #[test]
    fn test_cli_parses_repeated_regimes() {
        let cli = Cli::try_parse_from([
            "concept_drift",
            "synthetic",
            "--regime",
            "0.1:500",
            "--regime",
            "0.5:200",
        ])
        .unwrap();

        match cli.command {
            Commands::Synthetic { regimes, .. } => {
                assert_eq!(regimes, vec![Regime::new(0.1, 500), Regime::new(0.5, 200)]);
            }
            _ => panic!("expected synthetic subcommand"),
        }
    }
}
