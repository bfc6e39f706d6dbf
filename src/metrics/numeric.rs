//! Continuous metrics analysed with a two-sample t-test.

use rand::Rng;

use super::{check_mde, check_positive, Alternative, PValueSampler};
use crate::constants::MIN_SAMPLE_SIZE;
use crate::error::Result;
use crate::statistics::{sample_noncentral_t, student_t_sf};

/// A continuous per-unit measure such as revenue or session length.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericMetric {
    variance: f64,
    mde: f64,
    alternative: Alternative,
}

impl NumericMetric {
    /// Create a numeric metric from its baseline variance.
    ///
    /// # Errors
    ///
    /// Fails if `variance` is not strictly positive or `mde` is negative.
    pub fn new(variance: f64, mde: f64) -> Result<Self> {
        Ok(Self {
            variance: check_positive(variance, "variance")?,
            mde: check_mde(mde)?,
            alternative: Alternative::default(),
        })
    }

    /// Use a different alternative hypothesis.
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Baseline variance.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Absolute minimum detectable effect.
    pub fn mde(&self) -> f64 {
        self.mde
    }

    /// Direction of the alternative hypothesis.
    pub fn alternative(&self) -> Alternative {
        self.alternative
    }
}

impl PValueSampler for NumericMetric {
    /// The t statistic is drawn from the noncentral t distribution with
    /// `2(n − 1)` degrees of freedom. The two-sided p-value folds it with the
    /// central t survival function, ignoring the asymmetry of the noncentral
    /// distribution.
    fn alternative_p_value<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64 {
        let n = sample_size.max(MIN_SAMPLE_SIZE) as f64;
        let nc = (n / 2.0 / self.variance).sqrt() * self.mde;
        let df = 2.0 * (n - 1.0);
        let t = sample_noncentral_t(df, nc, rng);
        match self.alternative {
            Alternative::TwoSided => (2.0 * student_t_sf(t.abs(), df)).min(1.0),
            Alternative::OneSided => student_t_sf(t, df),
        }
    }
}
