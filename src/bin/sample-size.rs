//! Command-line sample-size calculator.
//!
//! # Usage
//!
//! ```bash
//! # Size an experiment described in a request file
//! cargo run --bin sample-size -- request.json
//!
//! # Three variants, fixed seed, JSON output
//! cargo run --bin sample-size -- request.json --variants 3 --seed 42 --json
//!
//! # Trace every search step
//! RUST_LOG=sample_size=debug cargo run --bin sample-size -- request.json
//! ```
//!
//! Configuration is layered: request file, then `SAMPLE_SIZE_*` environment
//! variables, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sample_size::output::{format_failure, format_report, to_json_pretty};
use sample_size::{Config, SampleSizeReport, SampleSizeRequest};

/// Per-cohort sample size for experiments with multiple metrics and variants
#[derive(Parser, Debug)]
#[command(name = "sample-size")]
#[command(about = "Compute the per-cohort sample size needed to reach a target power")]
#[command(version)]
struct Args {
    /// JSON request file: {"config": {...}, "metrics": [...]}
    request: PathBuf,

    /// Significance level, in (0, 0.3]
    #[arg(long)]
    alpha: Option<f64>,

    /// Target power, in (0, 1)
    #[arg(long)]
    power: Option<f64>,

    /// Number of variants including control
    #[arg(long)]
    variants: Option<usize>,

    /// Monte Carlo replications per count of true alternatives
    #[arg(long)]
    replication: Option<usize>,

    /// Accepted distance between simulated and target power
    #[arg(long)]
    epsilon: Option<f64>,

    /// Maximum number of search refinements
    #[arg(long)]
    max_depth: Option<usize>,

    /// Seed for the simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, mut config: Config) -> Config {
        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(power) = self.power {
            config.power = power;
        }
        if let Some(variants) = self.variants {
            config.variants = variants;
        }
        if let Some(replication) = self.replication {
            config.replication = replication;
        }
        if let Some(epsilon) = self.epsilon {
            config.epsilon = epsilon;
        }
        if let Some(depth) = self.max_depth {
            config.max_recursion_depth = depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
    }
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(report) => {
            if args.json {
                match to_json_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(err) => {
                        eprintln!("{}", format_failure(&err));
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", format_report(&report));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", format_failure(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<SampleSizeReport> {
    let mut request = load_request(&args.request)?;
    request.config = args.apply(request.config.from_env());
    tracing::debug!(config = ?request.config, metrics = request.metrics.len(), "loaded request");

    let calculator = request.into_calculator()?;
    let report = calculator.report()?;
    Ok(report)
}

fn load_request(path: &Path) -> anyhow::Result<SampleSizeRequest> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    SampleSizeRequest::from_json(&json)
        .with_context(|| format!("failed to parse request file {}", path.display()))
}
