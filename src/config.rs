//! Configuration for sample-size calculation.

use std::env;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_EPSILON, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_POWER,
    DEFAULT_REPLICATION, DEFAULT_VARIANTS, MAX_ALPHA,
};
use crate::error::{Error, Result};

/// Configuration options for [`SampleSizeCalculator`](crate::SampleSizeCalculator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Significance level, in (0, 0.3] (default: 0.05).
    pub alpha: f64,

    /// Target power (default: 0.8).
    ///
    /// Under multiple testing this is the average power: correct rejections
    /// divided by true alternative hypotheses.
    pub power: f64,

    /// Number of variants including control (default: 2).
    pub variants: usize,

    /// Monte Carlo replications per count of true alternatives (default: 100).
    pub replication: usize,

    /// Absolute tolerance between simulated and target power (default: 0.025).
    pub epsilon: f64,

    /// Maximum number of search refinements before giving up (default: 20).
    pub max_recursion_depth: usize,

    /// Optional deterministic seed for the simulation.
    ///
    /// When unset, a fresh seed is drawn from the thread RNG for every run
    /// and reported alongside the result.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            power: DEFAULT_POWER,
            variants: DEFAULT_VARIANTS,
            replication: DEFAULT_REPLICATION,
            epsilon: DEFAULT_EPSILON,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            seed: None,
        }
    }
}

impl Config {
    /// Merge configuration from `SAMPLE_SIZE_*` environment variables.
    ///
    /// Unset or unparsable variables leave the current value untouched.
    pub fn from_env(mut self) -> Self {
        if let Some(alpha) = parse_f64_env("SAMPLE_SIZE_ALPHA") {
            self.alpha = alpha;
        }
        if let Some(power) = parse_f64_env("SAMPLE_SIZE_POWER") {
            self.power = power;
        }
        if let Some(variants) = parse_usize_env("SAMPLE_SIZE_VARIANTS") {
            self.variants = variants;
        }
        if let Some(replication) = parse_usize_env("SAMPLE_SIZE_REPLICATION") {
            self.replication = replication;
        }
        if let Some(epsilon) = parse_f64_env("SAMPLE_SIZE_EPSILON") {
            self.epsilon = epsilon;
        }
        if let Some(depth) = parse_usize_env("SAMPLE_SIZE_MAX_DEPTH") {
            self.max_recursion_depth = depth;
        }
        if let Some(seed) = parse_u64_env("SAMPLE_SIZE_SEED") {
            self.seed = Some(seed);
        }
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= MAX_ALPHA) {
            return Err(Error::invalid(
                "alpha",
                format!("Error: Please provide a float between 0 and {} for alpha.", MAX_ALPHA),
            ));
        }
        if !(self.power > 0.0 && self.power < 1.0) {
            return Err(Error::invalid(
                "power",
                "Error: Please provide a float strictly between 0 and 1 for power.",
            ));
        }
        if self.variants < 2 {
            return Err(Error::invalid(
                "variants",
                "Error: An experiment must contain at least 2 variants.",
            ));
        }
        if self.replication == 0 {
            return Err(Error::not_positive("replication"));
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(Error::not_positive("epsilon"));
        }
        Ok(())
    }
}

fn parse_usize_env(key: &str) -> Option<usize> {
    env::var(key).ok()?.trim().parse().ok()
}

fn parse_u64_env(key: &str) -> Option<u64> {
    env::var(key).ok()?.trim().parse().ok()
}

fn parse_f64_env(key: &str) -> Option<f64> {
    env::var(key).ok()?.trim().parse().ok()
}
