//! Main `SampleSizeCalculator` entry point and builder.

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metrics::{Metric, MetricSpec};
use crate::multiple_testing::{search_sample_size, PowerEstimator, PowerSimulator, SearchParams};
use crate::result::{CalculationPath, Metadata, SampleSizeReport, SearchBounds};

/// Computes the per-cohort sample size for a set of metrics.
///
/// With a single hypothesis (one metric, one treatment) the size comes from
/// closed-form power analysis. Otherwise average power under
/// Benjamini-Hochberg correction is simulated and searched between the
/// unadjusted and Bonferroni-adjusted single-test sizes.
///
/// # Example
///
/// ```
/// use sample_size::{BooleanMetric, NumericMetric, SampleSizeCalculator};
///
/// let mut calculator = SampleSizeCalculator::new().alpha(0.05).power(0.8).seed(42);
/// calculator.register(BooleanMetric::new(0.05, 0.02)?);
/// calculator.register(NumericMetric::new(1000.0, 5.0)?);
///
/// match calculator.get_sample_size() {
///     Ok(n) => println!("{} per cohort", n),
///     Err(err) => println!("{}", err),
/// }
/// # Ok::<(), sample_size::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleSizeCalculator {
    config: Config,
    metrics: Vec<Metric>,
}

impl SampleSizeCalculator {
    /// Create a calculator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            metrics: Vec::new(),
        }
    }

    /// Set the significance level.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.config.alpha = alpha;
        self
    }

    /// Set the target power.
    pub fn power(mut self, power: f64) -> Self {
        self.config.power = power;
        self
    }

    /// Set the number of variants, control included.
    pub fn variants(mut self, variants: usize) -> Self {
        self.config.variants = variants;
        self
    }

    /// Set the replications per count of true alternatives.
    pub fn replication(mut self, replication: usize) -> Self {
        self.config.replication = replication;
        self
    }

    /// Set the accepted distance between simulated and target power.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Set the search depth limit.
    pub fn max_recursion_depth(mut self, depth: usize) -> Self {
        self.config.max_recursion_depth = depth;
        self
    }

    /// Fix the simulation seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registered metrics, in registration order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Add a validated metric.
    pub fn register(&mut self, metric: impl Into<Metric>) -> &mut Self {
        self.metrics.push(metric.into());
        self
    }

    /// Validate and add every descriptor.
    ///
    /// Nothing is registered unless all descriptors are valid.
    pub fn register_metrics(&mut self, specs: &[MetricSpec]) -> Result<()> {
        let metrics = specs
            .iter()
            .map(MetricSpec::build)
            .collect::<Result<Vec<_>>>()?;
        debug!(count = metrics.len(), "registered metrics");
        self.metrics.extend(metrics);
        Ok(())
    }

    /// Number of simultaneous hypotheses: metrics × treatment variants.
    pub fn num_tests(&self) -> usize {
        self.metrics.len() * self.config.variants.saturating_sub(1)
    }

    /// Truncated single-test sample size for `metric` at significance `alpha`
    /// and the configured power.
    pub fn single_sample_size(&self, metric: &Metric, alpha: f64) -> Result<u64> {
        let size = metric.single_sample_size(alpha, self.config.power)?;
        Ok(size as u64)
    }

    /// Bracket for the multiple-testing search.
    ///
    /// `lower` is the largest single-test size at `alpha`, `upper` the largest
    /// at `alpha / m`.
    pub fn search_bounds(&self) -> Result<SearchBounds> {
        self.check_ready()?;
        let m = self.num_tests() as f64;
        let mut bounds = SearchBounds { lower: 0, upper: 0 };
        for metric in &self.metrics {
            bounds.lower = bounds.lower.max(self.single_sample_size(metric, self.config.alpha)?);
            bounds.upper = bounds
                .upper
                .max(self.single_sample_size(metric, self.config.alpha / m)?);
        }
        Ok(bounds)
    }

    /// Simulated average power at `sample_size` for the registered metrics.
    pub fn expected_average_power<R: Rng + ?Sized>(
        &self,
        sample_size: u64,
        rng: &mut R,
    ) -> Result<f64> {
        self.check_ready()?;
        let simulator = self.simulator()?;
        Ok(simulator.expected_average_power(sample_size, rng))
    }

    /// Required per-cohort sample size.
    ///
    /// Uses the configured seed when present and a fresh one otherwise.
    pub fn get_sample_size(&self) -> Result<u64> {
        self.report().map(|report| report.sample_size)
    }

    /// Required per-cohort sample size, simulating with `rng`.
    pub fn get_sample_size_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<u64> {
        self.report_with_rng(rng).map(|report| report.sample_size)
    }

    /// Full calculation report.
    ///
    /// Uses the configured seed when present; otherwise one is drawn from the
    /// thread RNG and recorded in the report.
    pub fn report(&self) -> Result<SampleSizeReport> {
        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self.run(&mut rng, Some(seed))
    }

    /// Full calculation report, simulating with `rng`.
    pub fn report_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<SampleSizeReport> {
        self.run(rng, None)
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, seed: Option<u64>) -> Result<SampleSizeReport> {
        let start = Instant::now();
        self.check_ready()?;

        let tests = self.num_tests();
        let metadata = |runtime_secs: f64| Metadata {
            alpha: self.config.alpha,
            power: self.config.power,
            variants: self.config.variants,
            metrics: self.metrics.len(),
            replication: self.config.replication,
            epsilon: self.config.epsilon,
            seed,
            runtime_secs,
        };

        if tests == 1 {
            let sample_size = self.single_sample_size(&self.metrics[0], self.config.alpha)?;
            info!(sample_size, "single-test sample size");
            return Ok(SampleSizeReport {
                sample_size,
                path: CalculationPath::SingleTest,
                tests,
                bounds: None,
                estimated_power: None,
                iterations: 0,
                metadata: metadata(start.elapsed().as_secs_f64()),
            });
        }

        let bounds = self.search_bounds()?;
        debug!(lower = bounds.lower, upper = bounds.upper, tests, "searching sample size");

        let simulator = self.simulator()?;
        let params = SearchParams {
            lower: bounds.lower,
            upper: bounds.upper,
            target_power: self.config.power,
            epsilon: self.config.epsilon,
            max_depth: self.config.max_recursion_depth,
        };
        let outcome = search_sample_size(&simulator, &params, rng).inspect_err(|err| {
            warn!(error = %err, "multiple-testing search failed");
        })?;

        info!(
            sample_size = outcome.sample_size,
            estimated_power = outcome.estimated_power,
            iterations = outcome.iterations,
            "multiple-testing sample size"
        );

        Ok(SampleSizeReport {
            sample_size: outcome.sample_size,
            path: CalculationPath::MultipleTesting,
            tests,
            bounds: Some(bounds),
            estimated_power: Some(outcome.estimated_power),
            iterations: outcome.iterations,
            metadata: metadata(start.elapsed().as_secs_f64()),
        })
    }

    fn simulator(&self) -> Result<PowerSimulator<'_>> {
        PowerSimulator::new(
            &self.metrics,
            self.config.variants,
            self.config.alpha,
            self.config.replication,
        )
    }

    fn check_ready(&self) -> Result<()> {
        self.config.validate()?;
        if self.metrics.is_empty() {
            return Err(Error::invalid(
                "metrics",
                "Error: Please register at least one metric.",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BooleanMetric, NumericMetric};

    #[test]
    fn test_no_metrics_is_an_error() {
        let calculator = SampleSizeCalculator::new();
        let err = calculator.get_sample_size().unwrap_err();
        assert_eq!(err.parameter(), Some("metrics"));
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut calculator = SampleSizeCalculator::new().alpha(0.5);
        calculator.register(BooleanMetric::new(0.05, 0.02).unwrap());
        assert_eq!(calculator.get_sample_size().unwrap_err().parameter(), Some("alpha"));
    }

    #[test]
    fn test_num_tests() {
        let mut calculator = SampleSizeCalculator::new().variants(3);
        calculator
            .register(BooleanMetric::new(0.05, 0.02).unwrap())
            .register(NumericMetric::new(1000.0, 5.0).unwrap());
        assert_eq!(calculator.num_tests(), 4);
    }

    #[test]
    fn test_single_test_path() {
        let mut calculator = SampleSizeCalculator::new();
        calculator.register(BooleanMetric::new(0.05, 0.02).unwrap());
        let report = calculator.report().unwrap();
        assert_eq!(report.path, CalculationPath::SingleTest);
        assert_eq!(report.iterations, 0);
        assert!(report.bounds.is_none());
        assert!((report.sample_size as i64 - 1864).abs() <= 1, "{}", report.sample_size);
    }

    #[test]
    fn test_bounds_are_ordered() {
        let mut calculator = SampleSizeCalculator::new();
        calculator
            .register(BooleanMetric::new(0.05, 0.02).unwrap())
            .register(NumericMetric::new(1000.0, 5.0).unwrap());
        let bounds = calculator.search_bounds().unwrap();
        assert!(bounds.lower < bounds.upper);
    }

    #[test]
    fn test_register_metrics_is_atomic() {
        let specs: Vec<MetricSpec> = serde_json::from_str(
            r#"[
                {"metric_type": "boolean", "metric_metadata": {"probability": 0.05, "mde": 0.02}},
                {"metric_type": "numeric", "metric_metadata": {"variance": -1, "mde": 5}}
            ]"#,
        )
        .unwrap();
        let mut calculator = SampleSizeCalculator::new();
        assert!(calculator.register_metrics(&specs).is_err());
        assert!(calculator.metrics().is_empty());
        calculator.register_metrics(&specs[..1]).unwrap();
        assert_eq!(calculator.metrics().len(), 1);
    }
}
