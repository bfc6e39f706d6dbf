//! Serializable metric descriptors.
//!
//! Descriptors use the registration format
//! `{"metric_type": "boolean", "metric_metadata": {"probability": 0.05, "mde": 0.02}}`
//! and are validated when converted into a [`Metric`].

use serde::{Deserialize, Serialize};

use super::{Alternative, BooleanMetric, Metric, NumericMetric, RatioMetric};
use crate::error::{Error, Result};

/// An unvalidated metric description, as read from a request document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric_type", content = "metric_metadata", rename_all = "lowercase")]
pub enum MetricSpec {
    /// Proportion metric parameters.
    Boolean {
        /// Baseline probability.
        probability: Option<f64>,
        /// Minimum detectable effect.
        mde: Option<f64>,
        /// Alternative hypothesis (default two-sided).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternative: Option<Alternative>,
    },
    /// Continuous metric parameters.
    Numeric {
        /// Baseline variance.
        variance: Option<f64>,
        /// Minimum detectable effect.
        mde: Option<f64>,
        /// Alternative hypothesis (default two-sided).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternative: Option<Alternative>,
    },
    /// Ratio metric parameters.
    Ratio {
        /// Mean of the numerator.
        numerator_mean: Option<f64>,
        /// Variance of the numerator.
        numerator_variance: Option<f64>,
        /// Mean of the denominator.
        denominator_mean: Option<f64>,
        /// Variance of the denominator.
        denominator_variance: Option<f64>,
        /// Covariance between numerator and denominator.
        covariance: Option<f64>,
        /// Minimum detectable effect.
        mde: Option<f64>,
        /// Alternative hypothesis (default two-sided).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alternative: Option<Alternative>,
    },
}

impl MetricSpec {
    /// Validate the descriptor and build the metric it describes.
    pub fn build(&self) -> Result<Metric> {
        let metric: Metric = match *self {
            Self::Boolean {
                probability,
                mde,
                alternative,
            } => BooleanMetric::new(required(probability, "probability")?, required(mde, "mde")?)?
                .with_alternative(alternative.unwrap_or_default())
                .into(),
            Self::Numeric {
                variance,
                mde,
                alternative,
            } => NumericMetric::new(required(variance, "variance")?, required(mde, "mde")?)?
                .with_alternative(alternative.unwrap_or_default())
                .into(),
            Self::Ratio {
                numerator_mean,
                numerator_variance,
                denominator_mean,
                denominator_variance,
                covariance,
                mde,
                alternative,
            } => RatioMetric::new(
                required(numerator_mean, "numerator_mean")?,
                required(numerator_variance, "numerator_variance")?,
                required(denominator_mean, "denominator_mean")?,
                required(denominator_variance, "denominator_variance")?,
                required(covariance, "covariance")?,
                required(mde, "mde")?,
            )?
            .with_alternative(alternative.unwrap_or_default())
            .into(),
        };
        Ok(metric)
    }
}

impl TryFrom<&MetricSpec> for Metric {
    type Error = Error;

    fn try_from(spec: &MetricSpec) -> Result<Self> {
        spec.build()
    }
}

impl From<&Metric> for MetricSpec {
    fn from(metric: &Metric) -> Self {
        let alternative = Some(metric.alternative());
        match metric {
            Metric::Boolean(m) => Self::Boolean {
                probability: Some(m.probability()),
                mde: Some(m.mde()),
                alternative,
            },
            Metric::Numeric(m) => Self::Numeric {
                variance: Some(m.variance()),
                mde: Some(m.mde()),
                alternative,
            },
            Metric::Ratio(m) => Self::Ratio {
                numerator_mean: Some(m.numerator_mean()),
                numerator_variance: Some(m.numerator_variance()),
                denominator_mean: Some(m.denominator_mean()),
                denominator_variance: Some(m.denominator_variance()),
                covariance: Some(m.covariance()),
                mde: Some(m.mde()),
                alternative,
            },
        }
    }
}

fn required(value: Option<f64>, name: &str) -> Result<f64> {
    value.ok_or_else(|| {
        Error::invalid(
            name,
            format!("Error: Missing {} in metric_metadata.", name),
        )
    })
}
