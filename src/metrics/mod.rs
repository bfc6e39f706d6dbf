//! Experiment metrics and their simulated p-values.
//!
//! A [`Metric`] describes the baseline behaviour of one outcome measure and
//! the minimum detectable effect (MDE) the experiment should be able to see.
//! Three kinds are supported:
//!
//! - [`BooleanMetric`]: a conversion-style proportion
//! - [`NumericMetric`]: a continuous per-unit measure
//! - [`RatioMetric`]: a ratio of two per-unit measures, linearised with the
//!   delta method
//!
//! Every metric can report its variance and single-test sample size, and can
//! draw p-values for one hypothesis under either the null or the alternative.

mod boolean;
mod numeric;
mod ratio;
mod spec;

pub use boolean::BooleanMetric;
pub use numeric::NumericMetric;
pub use ratio::RatioMetric;
pub use spec::MetricSpec;

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub use crate::statistics::Alternative;
use crate::error::{Error, Result};
use crate::statistics::{normal_sf, PowerFamily};

/// Draws the p-value of one hypothesis that is truly alternative.
pub trait PValueSampler {
    /// Simulate the test of control against a treatment that moved the metric
    /// by exactly its MDE, with `sample_size` units per cohort.
    fn alternative_p_value<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64;
}

/// One registered experiment metric.
#[derive(Debug, Clone, PartialEq)]
pub enum Metric {
    /// Proportion metric.
    Boolean(BooleanMetric),
    /// Continuous metric.
    Numeric(NumericMetric),
    /// Ratio metric.
    Ratio(RatioMetric),
}

impl Metric {
    /// Short lowercase name of the metric kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Numeric(_) => "numeric",
            Self::Ratio(_) => "ratio",
        }
    }

    /// Per-unit variance of the metric in the control cohort.
    pub fn variance(&self) -> f64 {
        match self {
            Self::Boolean(m) => m.variance(),
            Self::Numeric(m) => m.variance(),
            Self::Ratio(m) => m.variance(),
        }
    }

    /// Absolute minimum detectable effect.
    pub fn mde(&self) -> f64 {
        match self {
            Self::Boolean(m) => m.mde(),
            Self::Numeric(m) => m.mde(),
            Self::Ratio(m) => m.mde(),
        }
    }

    /// Direction of the alternative hypothesis.
    pub fn alternative(&self) -> Alternative {
        match self {
            Self::Boolean(m) => m.alternative(),
            Self::Numeric(m) => m.alternative(),
            Self::Ratio(m) => m.alternative(),
        }
    }

    /// Test family used for single-test power analysis.
    pub fn power_family(&self) -> PowerFamily {
        match self {
            Self::Boolean(_) | Self::Ratio(_) => PowerFamily::Normal,
            Self::Numeric(_) => PowerFamily::StudentT,
        }
    }

    /// MDE expressed in standard deviations: `mde / sqrt(variance)`.
    pub fn standardized_effect_size(&self) -> f64 {
        self.mde() / self.variance().sqrt()
    }

    /// Real-valued per-cohort sample size needed to test this metric alone at
    /// significance `alpha` with the given power.
    pub fn single_sample_size(&self, alpha: f64, power: f64) -> Result<f64> {
        self.power_family().solve_sample_size(
            self.standardized_effect_size(),
            alpha,
            power,
            1.0,
            self.alternative(),
        )
    }

    /// Draw one p-value at `sample_size` units per cohort.
    ///
    /// Null hypotheses give a uniform p-value; alternatives delegate to the
    /// metric's sampler.
    pub fn p_value<R: Rng + ?Sized>(
        &self,
        true_alternative: bool,
        sample_size: u64,
        rng: &mut R,
    ) -> f64 {
        if !true_alternative {
            return rng.random::<f64>();
        }
        match self {
            Self::Boolean(m) => m.alternative_p_value(sample_size, rng),
            Self::Numeric(m) => m.alternative_p_value(sample_size, rng),
            Self::Ratio(m) => m.alternative_p_value(sample_size, rng),
        }
    }

    /// One p-value per entry of `true_alternative`, in order.
    pub fn generate_p_values<R: Rng + ?Sized>(
        &self,
        true_alternative: &[bool],
        sample_size: u64,
        rng: &mut R,
    ) -> Vec<f64> {
        true_alternative
            .iter()
            .map(|&alt| self.p_value(alt, sample_size, rng))
            .collect()
    }
}

impl From<BooleanMetric> for Metric {
    fn from(metric: BooleanMetric) -> Self {
        Self::Boolean(metric)
    }
}

impl From<NumericMetric> for Metric {
    fn from(metric: NumericMetric) -> Self {
        Self::Numeric(metric)
    }
}

impl From<RatioMetric> for Metric {
    fn from(metric: RatioMetric) -> Self {
        Self::Ratio(metric)
    }
}

/// P-value of a z-test whose statistic is centred on the standardized MDE.
fn normal_alternative_p_value<R: Rng + ?Sized>(
    mde: f64,
    variance: f64,
    sample_size: u64,
    alternative: Alternative,
    rng: &mut R,
) -> f64 {
    let effect = mde / (2.0 * variance / sample_size as f64).sqrt();
    let noise: f64 = StandardNormal.sample(rng);
    let z = effect + noise;
    match alternative {
        Alternative::TwoSided => (2.0 * normal_sf(z.abs())).min(1.0),
        Alternative::OneSided => normal_sf(z),
    }
}

fn check_finite(value: f64, name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(
            name,
            format!("Error: Please provide a finite number for {}.", name),
        ))
    }
}

fn check_positive(value: f64, name: &str) -> Result<f64> {
    if check_finite(value, name)? > 0.0 {
        Ok(value)
    } else {
        Err(Error::not_positive(name))
    }
}

fn check_mde(mde: f64) -> Result<f64> {
    if check_finite(mde, "mde")? >= 0.0 {
        Ok(mde)
    } else {
        Err(Error::not_positive("mde"))
    }
}
