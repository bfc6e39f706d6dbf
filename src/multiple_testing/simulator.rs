//! Monte Carlo estimate of expected average power under FDR correction.
//!
//! The family of `m = metrics × (variants − 1)` hypotheses is simulated for
//! every count `a ∈ {1, …, m}` of truly alternative hypotheses, `R` times
//! each. In every replicate a random subset of size `a` is marked
//! alternative, one p-value is drawn per hypothesis, and the FDR procedure
//! decides which hypotheses to reject. Power is the ratio of correct
//! rejections to true alternatives, pooled across all replicates.

use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constants::MIN_SAMPLE_SIZE;
use crate::error::{Error, Result};
use crate::metrics::Metric;
use crate::statistics::{task_rng, BenjaminiHochberg, FdrProcedure};

/// Anything that can estimate average power at a candidate sample size.
///
/// The search only depends on this trait, so it can be driven by a stub.
pub trait PowerEstimator {
    /// Estimated average power with `sample_size` units per cohort.
    fn expected_average_power<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64;
}

/// Pooled counts over simulation replicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerTally {
    /// Hypotheses that were truly alternative and rejected.
    pub true_discoveries: u64,
    /// Hypotheses that were truly alternative.
    pub true_alternatives: u64,
}

impl PowerTally {
    /// Combine two partial tallies.
    pub fn merge(self, other: Self) -> Self {
        Self {
            true_discoveries: self.true_discoveries + other.true_discoveries,
            true_alternatives: self.true_alternatives + other.true_alternatives,
        }
    }

    /// Ratio of correct rejections to true alternatives (0 when empty).
    pub fn power(&self) -> f64 {
        if self.true_alternatives == 0 {
            return 0.0;
        }
        self.true_discoveries as f64 / self.true_alternatives as f64
    }
}

/// Simulates a family of hypotheses built from registered metrics.
#[derive(Debug, Clone)]
pub struct PowerSimulator<'a, F = BenjaminiHochberg> {
    /// One entry per (metric, treatment variant) pair.
    hypotheses: Vec<&'a Metric>,
    alpha: f64,
    replication: usize,
    fdr: F,
}

impl<'a> PowerSimulator<'a, BenjaminiHochberg> {
    /// Build a simulator with Benjamini-Hochberg correction.
    ///
    /// # Errors
    ///
    /// Fails if there are no metrics, fewer than two variants, or zero
    /// replications.
    pub fn new(
        metrics: &'a [Metric],
        variants: usize,
        alpha: f64,
        replication: usize,
    ) -> Result<Self> {
        if metrics.is_empty() {
            return Err(Error::invalid(
                "metrics",
                "Error: Please register at least one metric.",
            ));
        }
        if variants < 2 {
            return Err(Error::invalid(
                "variants",
                "Error: An experiment must contain at least 2 variants.",
            ));
        }
        if replication == 0 {
            return Err(Error::not_positive("replication"));
        }

        let hypotheses = (0..variants - 1)
            .flat_map(|_| metrics.iter())
            .collect();

        Ok(Self {
            hypotheses,
            alpha,
            replication,
            fdr: BenjaminiHochberg,
        })
    }
}

impl<'a, F: FdrProcedure> PowerSimulator<'a, F> {
    /// Replace the FDR procedure.
    pub fn with_fdr<G: FdrProcedure>(self, fdr: G) -> PowerSimulator<'a, G> {
        PowerSimulator {
            hypotheses: self.hypotheses,
            alpha: self.alpha,
            replication: self.replication,
            fdr,
        }
    }

    /// Number of simultaneous hypotheses `m`.
    pub fn num_tests(&self) -> usize {
        self.hypotheses.len()
    }

    /// Replications per count of true alternatives.
    pub fn replication(&self) -> usize {
        self.replication
    }

    /// Run every replicate at `sample_size` and pool the counts.
    ///
    /// Replicate `t` uses its own generator derived from `base_seed` and `t`,
    /// so the tally is identical with and without the `parallel` feature.
    pub fn tally(&self, sample_size: u64, base_seed: u64) -> PowerTally {
        let sample_size = sample_size.max(MIN_SAMPLE_SIZE);
        let tasks = (self.num_tests() * self.replication) as u64;

        crate::thread_pool::install(|| {
            #[cfg(feature = "parallel")]
            let tally = (0..tasks)
                .into_par_iter()
                .fold_with(PowerTally::default(), |acc, task| {
                    acc.merge(self.replicate(task, sample_size, base_seed))
                })
                .reduce(PowerTally::default, PowerTally::merge);

            #[cfg(not(feature = "parallel"))]
            let tally = (0..tasks)
                .map(|task| self.replicate(task, sample_size, base_seed))
                .fold(PowerTally::default(), PowerTally::merge);

            tally
        })
    }

    /// One replicate: task `t` has `t / R + 1` true alternatives.
    fn replicate(&self, task: u64, sample_size: u64, base_seed: u64) -> PowerTally {
        let mut rng = task_rng(base_seed, task);
        let m = self.num_tests();
        let num_alternatives = (task / self.replication as u64) as usize + 1;

        let mut order: Vec<usize> = (0..m).collect();
        order.shuffle(&mut rng);
        let mut true_alternative = vec![false; m];
        for &idx in &order[..num_alternatives] {
            true_alternative[idx] = true;
        }

        let p_values: Vec<f64> = self
            .hypotheses
            .iter()
            .zip(&true_alternative)
            .map(|(metric, &alt)| metric.p_value(alt, sample_size, &mut rng))
            .collect();

        let rejected = self.fdr.reject(&p_values, self.alpha);
        let true_discoveries = rejected
            .iter()
            .zip(&true_alternative)
            .filter(|&(&rej, &alt)| rej && alt)
            .count();

        PowerTally {
            true_discoveries: true_discoveries as u64,
            true_alternatives: num_alternatives as u64,
        }
    }
}

impl<F: FdrProcedure> PowerEstimator for PowerSimulator<'_, F> {
    /// Draws a base seed from `rng`, then pools every replicate.
    fn expected_average_power<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64 {
        let base_seed: u64 = rng.random();
        self.tally(sample_size, base_seed).power()
    }
}
