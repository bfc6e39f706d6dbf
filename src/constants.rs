//! Default parameters for sample-size calculation.

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default target power.
pub const DEFAULT_POWER: f64 = 0.8;

/// Default number of variants (one control, one treatment).
pub const DEFAULT_VARIANTS: usize = 2;

/// Default Monte Carlo replications per count of true alternatives.
pub const DEFAULT_REPLICATION: usize = 100;

/// Default absolute tolerance between simulated and target power.
pub const DEFAULT_EPSILON: f64 = 0.025;

/// Default bound on sample-size search iterations.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 20;

/// Largest significance level the calculator accepts.
pub const MAX_ALPHA: f64 = 0.3;

/// Smallest per-cohort sample size for which the t-test family has positive
/// degrees of freedom.
pub const MIN_SAMPLE_SIZE: u64 = 2;
