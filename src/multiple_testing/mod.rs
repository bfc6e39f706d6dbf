//! Sample sizes for families of simultaneously tested hypotheses.
//!
//! With more than one hypothesis the Benjamini-Hochberg threshold depends on
//! the whole vector of p-values, so average power is estimated by simulation
//! and the sample size found by searching between the unadjusted and the
//! Bonferroni-adjusted single-test sizes.

mod search;
mod simulator;

pub use search::{search_sample_size, SearchOutcome, SearchParams};
pub use simulator::{PowerEstimator, PowerSimulator, PowerTally};
