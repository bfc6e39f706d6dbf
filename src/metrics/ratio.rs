//! Ratio metrics linearised with the delta method.

use rand::Rng;

use super::{
    check_finite, check_mde, check_positive, normal_alternative_p_value, Alternative,
    PValueSampler,
};
use crate::error::{Error, Result};

/// A ratio of two per-unit measures, e.g. clicks per session.
#[derive(Debug, Clone, PartialEq)]
pub struct RatioMetric {
    numerator_mean: f64,
    numerator_variance: f64,
    denominator_mean: f64,
    denominator_variance: f64,
    covariance: f64,
    mde: f64,
    alternative: Alternative,
}

impl RatioMetric {
    /// Create a ratio metric from the moments of its numerator and denominator.
    ///
    /// # Errors
    ///
    /// Fails if either variance is not strictly positive, the denominator mean
    /// is zero, any parameter is not finite, `mde` is negative, or the
    /// delta-method variance of the ratio is not positive.
    pub fn new(
        numerator_mean: f64,
        numerator_variance: f64,
        denominator_mean: f64,
        denominator_variance: f64,
        covariance: f64,
        mde: f64,
    ) -> Result<Self> {
        let metric = Self {
            numerator_mean: check_finite(numerator_mean, "numerator_mean")?,
            numerator_variance: check_positive(numerator_variance, "numerator_variance")?,
            denominator_mean: check_finite(denominator_mean, "denominator_mean")?,
            denominator_variance: check_positive(denominator_variance, "denominator_variance")?,
            covariance: check_finite(covariance, "covariance")?,
            mde: check_mde(mde)?,
            alternative: Alternative::default(),
        };
        if metric.denominator_mean == 0.0 {
            return Err(Error::invalid(
                "denominator_mean",
                "Error: Please provide a non-zero number for denominator_mean.",
            ));
        }
        let variance = metric.variance();
        if !(variance.is_finite() && variance > 0.0) {
            return Err(Error::invalid(
                "variance",
                format!(
                    "Error: The ratio's delta-method variance must be positive, got {}. Please check the covariance.",
                    variance
                ),
            ));
        }
        Ok(metric)
    }

    /// Use a different alternative hypothesis.
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Mean of the numerator.
    pub fn numerator_mean(&self) -> f64 {
        self.numerator_mean
    }

    /// Variance of the numerator.
    pub fn numerator_variance(&self) -> f64 {
        self.numerator_variance
    }

    /// Mean of the denominator.
    pub fn denominator_mean(&self) -> f64 {
        self.denominator_mean
    }

    /// Variance of the denominator.
    pub fn denominator_variance(&self) -> f64 {
        self.denominator_variance
    }

    /// Covariance between numerator and denominator.
    pub fn covariance(&self) -> f64 {
        self.covariance
    }

    /// Absolute minimum detectable effect on the ratio.
    pub fn mde(&self) -> f64 {
        self.mde
    }

    /// Direction of the alternative hypothesis.
    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    /// Delta-method variance of the ratio:
    ///
    /// ```text
    /// σ²_N/μ_D² + σ²_D·μ_N²/μ_D⁴ − 2·cov·μ_N/μ_D³
    /// ```
    pub fn variance(&self) -> f64 {
        let mu_n = self.numerator_mean;
        let mu_d = self.denominator_mean;
        self.numerator_variance / mu_d.powi(2)
            + self.denominator_variance * mu_n.powi(2) / mu_d.powi(4)
            - 2.0 * self.covariance * mu_n / mu_d.powi(3)
    }
}

impl PValueSampler for RatioMetric {
    fn alternative_p_value<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64 {
        normal_alternative_p_value(self.mde, self.variance(), sample_size, self.alternative, rng)
    }
}
