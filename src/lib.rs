//! # sample-size
//!
//! Per-cohort sample sizes for online controlled experiments.
//!
//! Given one or more metrics, each with a baseline variance and a minimum
//! detectable effect, this crate computes how many units every cohort needs
//! for the experiment to reach a target power:
//! - One hypothesis (one metric, one treatment): closed-form power analysis
//! - Several hypotheses: the average power after Benjamini-Hochberg
//!   correction is simulated, and the sample size found by geometric
//!   bisection between the unadjusted and Bonferroni-adjusted sizes
//!
//! ## Quick Start
//!
//! ```
//! use sample_size::{BooleanMetric, SampleSizeCalculator};
//!
//! let mut calculator = SampleSizeCalculator::new();
//! calculator.register(BooleanMetric::new(0.05, 0.02)?);
//!
//! let n = calculator.get_sample_size()?;
//! println!("Sample size needed in each group: {}", n);
//! # Ok::<(), sample_size::Error>(())
//! ```
//!
//! ## Reproducibility
//!
//! Simulation draws from an explicit random source. Fix
//! [`Config::seed`] (or call
//! [`SampleSizeCalculator::get_sample_size_with_rng`]) to make results
//! repeatable. With the default `parallel` feature the replicates run on a
//! rayon pool; every replicate has its own counter-derived generator, so the
//! result does not depend on the thread count.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod calculator;
mod config;
mod constants;
mod error;
mod request;
mod result;
mod thread_pool;

// Functional modules
pub mod metrics;
pub mod multiple_testing;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use calculator::SampleSizeCalculator;
pub use config::Config;
pub use constants::{
    DEFAULT_ALPHA, DEFAULT_EPSILON, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_POWER,
    DEFAULT_REPLICATION, DEFAULT_VARIANTS, MAX_ALPHA, MIN_SAMPLE_SIZE,
};
pub use error::{Error, Result};
pub use metrics::{
    Alternative, BooleanMetric, Metric, MetricSpec, NumericMetric, PValueSampler, RatioMetric,
};
pub use request::SampleSizeRequest;
pub use result::{CalculationPath, Metadata, SampleSizeReport, SearchBounds};
pub use statistics::PowerFamily;

/// Convenience function: sample size for `metrics` with default configuration.
///
/// Equivalent to registering every metric on a default
/// [`SampleSizeCalculator`] and calling
/// [`get_sample_size`](SampleSizeCalculator::get_sample_size).
pub fn sample_size<I>(metrics: I) -> Result<u64>
where
    I: IntoIterator,
    I::Item: Into<Metric>,
{
    let mut calculator = SampleSizeCalculator::new();
    for metric in metrics {
        calculator.register(metric);
    }
    calculator.get_sample_size()
}
