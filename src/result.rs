//! Result types for sample-size calculation.

use serde::{Deserialize, Serialize};

/// Complete result of a sample-size calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeReport {
    /// Required units in each cohort (control and every treatment).
    pub sample_size: u64,

    /// Which calculation produced the size.
    pub path: CalculationPath,

    /// Number of simultaneously tested hypotheses.
    pub tests: usize,

    /// Search bracket (multiple-testing path only).
    pub bounds: Option<SearchBounds>,

    /// Simulated average power at `sample_size` (multiple-testing path only).
    pub estimated_power: Option<f64>,

    /// Number of power simulations run (0 on the single-test path).
    pub iterations: usize,

    /// Inputs and run details.
    pub metadata: Metadata,
}

/// How the sample size was obtained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalculationPath {
    /// One hypothesis: closed-form power analysis.
    SingleTest,
    /// Several hypotheses: simulated power under Benjamini-Hochberg.
    MultipleTesting,
}

/// Bracket searched on the multiple-testing path.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchBounds {
    /// Largest single-test size at the nominal alpha.
    pub lower: u64,
    /// Largest single-test size at the Bonferroni-adjusted alpha.
    pub upper: u64,
}

/// Inputs and run details for a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Significance level.
    pub alpha: f64,
    /// Target power.
    pub power: f64,
    /// Number of variants including control.
    pub variants: usize,
    /// Number of registered metrics.
    pub metrics: usize,
    /// Replications per count of true alternatives.
    pub replication: usize,
    /// Power tolerance.
    pub epsilon: f64,
    /// Seed the simulation was drawn from, when one was used.
    pub seed: Option<u64>,
    /// Wall-clock time of the calculation.
    pub runtime_secs: f64,
}
