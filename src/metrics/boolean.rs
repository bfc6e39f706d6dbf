//! Proportion metrics.

use rand::Rng;

use super::{check_finite, check_mde, normal_alternative_p_value, Alternative, PValueSampler};
use crate::error::{Error, Result};

/// A binary outcome such as conversion, with baseline rate `probability`.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanMetric {
    probability: f64,
    mde: f64,
    alternative: Alternative,
}

impl BooleanMetric {
    /// Create a proportion metric.
    ///
    /// # Errors
    ///
    /// Fails if `probability` is outside [0, 1], if it is exactly 0 or 1
    /// (zero variance), or if `mde` is negative or not finite.
    pub fn new(probability: f64, mde: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&check_finite(probability, "probability")?) {
            return Err(Error::invalid(
                "probability",
                "Error: Please provide a float between 0 and 1 for probability.",
            ));
        }
        if probability == 0.0 || probability == 1.0 {
            return Err(Error::invalid(
                "probability",
                "Error: A probability of 0 or 1 has no variance; please provide a float strictly between 0 and 1 for probability.",
            ));
        }
        Ok(Self {
            probability,
            mde: check_mde(mde)?,
            alternative: Alternative::default(),
        })
    }

    /// Use a different alternative hypothesis.
    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Baseline probability.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Absolute minimum detectable effect on the probability.
    pub fn mde(&self) -> f64 {
        self.mde
    }

    /// Direction of the alternative hypothesis.
    pub fn alternative(&self) -> Alternative {
        self.alternative
    }

    /// Bernoulli variance `p(1 − p)`.
    pub fn variance(&self) -> f64 {
        self.probability * (1.0 - self.probability)
    }
}

impl PValueSampler for BooleanMetric {
    fn alternative_p_value<R: Rng + ?Sized>(&self, sample_size: u64, rng: &mut R) -> f64 {
        normal_alternative_p_value(self.mde, self.variance(), sample_size, self.alternative, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance() {
        let metric = BooleanMetric::new(0.05, 0.02).unwrap();
        assert!((metric.variance() - 0.0475).abs() < 1e-12);
        assert_eq!(metric.alternative(), Alternative::TwoSided);
    }

    #[test]
    fn test_probability_out_of_range() {
        let err = BooleanMetric::new(1.5, 0.1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: Please provide a float between 0 and 1 for probability."
        );
        assert!(BooleanMetric::new(-0.1, 0.1).is_err());
        assert!(BooleanMetric::new(f64::NAN, 0.1).is_err());
    }

    #[test]
    fn test_degenerate_probability_rejected() {
        assert_eq!(BooleanMetric::new(0.0, 0.1).unwrap_err().parameter(), Some("probability"));
        assert_eq!(BooleanMetric::new(1.0, 0.1).unwrap_err().parameter(), Some("probability"));
    }

    #[test]
    fn test_negative_mde_rejected() {
        let err = BooleanMetric::new(0.3, -0.01).unwrap_err();
        assert_eq!(err.to_string(), "Error: Please provide a positive number for mde.");
    }

    #[test]
    fn test_with_alternative() {
        let metric = BooleanMetric::new(0.3, 0.01)
            .unwrap()
            .with_alternative(Alternative::OneSided);
        assert_eq!(metric.alternative(), Alternative::OneSided);
    }
}
