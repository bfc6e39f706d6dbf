//! Geometric bisection for the smallest sample size reaching a target power.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::simulator::PowerEstimator;
use crate::error::{Error, Result};

/// Inputs to [`search_sample_size`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    /// Lower end of the bracket (single-test size at the nominal alpha).
    pub lower: u64,
    /// Upper end of the bracket (single-test size at the Bonferroni alpha).
    pub upper: u64,
    /// Power to reach.
    pub target_power: f64,
    /// Accepted absolute distance between estimated and target power.
    pub epsilon: f64,
    /// Refinements allowed after the first probe.
    pub max_depth: usize,
}

/// A converged search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Per-cohort sample size.
    pub sample_size: u64,
    /// Estimated power at `sample_size`.
    pub estimated_power: f64,
    /// Number of power estimates computed.
    pub iterations: usize,
}

/// Search `[lower, upper]` for a size whose estimated power is within
/// `epsilon` of the target.
///
/// Each step probes the geometric midpoint `floor(sqrt(lower · upper))` and
/// replaces the bound on the side the estimate falls. The search gives up
/// once the bracket has collapsed to a point or after `max_depth + 1`
/// probes; both surface as [`Error::PowerUnattainable`].
pub fn search_sample_size<E, R>(estimator: &E, params: &SearchParams, rng: &mut R) -> Result<SearchOutcome>
where
    E: PowerEstimator,
    R: Rng + ?Sized,
{
    let SearchParams {
        mut lower,
        mut upper,
        target_power,
        epsilon,
        max_depth,
    } = *params;
    let unattainable = Error::PowerUnattainable {
        power: target_power,
    };

    let mut depth = 0;
    loop {
        if depth > max_depth {
            warn!(max_depth, lower, upper, "sample-size search exceeded its depth limit");
            return Err(unattainable);
        }

        let candidate = ((lower as f64) * (upper as f64)).sqrt().floor() as u64;
        let power = estimator.expected_average_power(candidate, rng);
        debug!(lower, upper, candidate, power, depth, "sample-size search step");

        if (power - target_power).abs() <= epsilon {
            return Ok(SearchOutcome {
                sample_size: candidate,
                estimated_power: power,
                iterations: depth + 1,
            });
        }
        if lower == upper {
            warn!(lower, power, "sample-size search bracket collapsed");
            return Err(unattainable);
        }

        if power > target_power {
            upper = candidate;
        } else {
            lower = candidate;
        }
        depth += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::cell::RefCell;

    /// Returns scripted powers in order, repeating the last one.
    struct Scripted {
        powers: Vec<f64>,
        calls: RefCell<Vec<u64>>,
    }

    impl Scripted {
        fn new(powers: &[f64]) -> Self {
            Self {
                powers: powers.to_vec(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl PowerEstimator for Scripted {
        fn expected_average_power<R: Rng + ?Sized>(&self, sample_size: u64, _rng: &mut R) -> f64 {
            let mut calls = self.calls.borrow_mut();
            let idx = calls.len().min(self.powers.len() - 1);
            calls.push(sample_size);
            self.powers[idx]
        }
    }

    fn params(lower: u64, upper: u64) -> SearchParams {
        SearchParams {
            lower,
            upper,
            target_power: 0.8,
            epsilon: 0.025,
            max_depth: 20,
        }
    }

    #[test]
    fn test_converges_on_first_probe() {
        let stub = Scripted::new(&[0.81]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let outcome = search_sample_size(&stub, &params(100, 1000), &mut rng).unwrap();
        assert_eq!(outcome.sample_size, 316);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_overshoot_moves_upper_bound() {
        let stub = Scripted::new(&[0.95, 0.8]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let outcome = search_sample_size(&stub, &params(100, 1000), &mut rng).unwrap();
        assert_eq!(*stub.calls.borrow(), vec![316, 177]);
        assert_eq!(outcome.sample_size, 177);
    }

    #[test]
    fn test_collapsed_bracket_fails() {
        let stub = Scripted::new(&[0.1]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let err = search_sample_size(&stub, &params(50, 50), &mut rng).unwrap_err();
        assert_eq!(err, Error::PowerUnattainable { power: 0.8 });
        assert_eq!(stub.calls.borrow().len(), 1);
    }

    #[test]
    fn test_depth_limit_bounds_probes() {
        let stub = Scripted::new(&[0.0]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let p = SearchParams {
            max_depth: 3,
            ..params(10, 1_000_000)
        };
        assert!(search_sample_size(&stub, &p, &mut rng).is_err());
        assert_eq!(stub.calls.borrow().len(), 4);
    }
}
