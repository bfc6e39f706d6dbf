//! Request documents read by the command-line tool.

use serde::{Deserialize, Serialize};

use crate::calculator::SampleSizeCalculator;
use crate::config::Config;
use crate::error::Result;
use crate::metrics::MetricSpec;

/// A calculation request: optional configuration plus metric descriptors.
///
/// ```json
/// {
///   "config": {"alpha": 0.05, "power": 0.8, "variants": 3},
///   "metrics": [
///     {"metric_type": "boolean", "metric_metadata": {"probability": 0.05, "mde": 0.02}}
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeRequest {
    /// Calculator configuration; missing fields take their defaults.
    #[serde(default)]
    pub config: Config,

    /// Metrics to size the experiment for.
    pub metrics: Vec<MetricSpec>,
}

impl SampleSizeRequest {
    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a calculator with every metric registered.
    pub fn into_calculator(self) -> Result<SampleSizeCalculator> {
        let mut calculator = SampleSizeCalculator::with_config(self.config);
        calculator.register_metrics(&self.metrics)?;
        Ok(calculator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_config_is_optional() {
        let request = SampleSizeRequest::from_json(
            r#"{"metrics": [{"metric_type": "numeric", "metric_metadata": {"variance": 1000, "mde": 5}}]}"#,
        )
        .unwrap();
        assert_eq!(request.config, Config::default());
        let calculator = request.into_calculator().unwrap();
        assert_eq!(calculator.metrics().len(), 1);
    }

    #[test]
    fn test_malformed_json_is_request_error() {
        let err = SampleSizeRequest::from_json("{not json").unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }

    #[test]
    fn test_invalid_metric_surfaces_on_build() {
        let request = SampleSizeRequest::from_json(
            r#"{"metrics": [{"metric_type": "boolean", "metric_metadata": {"probability": 1.5, "mde": 0.1}}]}"#,
        )
        .unwrap();
        let err = request.into_calculator().unwrap_err();
        assert_eq!(err.parameter(), Some("probability"));
    }
}
