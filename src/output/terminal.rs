//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{CalculationPath, SampleSizeReport};

/// Format a report for human-readable terminal output.
pub fn format_report(report: &SampleSizeReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);
    let meta = &report.metadata;

    output.push_str("sample-size\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Metrics: {}   Variants: {}   Tests: {}\n",
        meta.metrics, meta.variants, report.tests
    ));
    output.push_str(&format!(
        "  Alpha: {}   Target power: {}\n",
        meta.alpha, meta.power
    ));
    output.push_str(&format!("  Method: {}\n", format_path(report.path)));
    output.push('\n');

    output.push_str(&format!(
        "  {}\n\n",
        format!(
            "\u{2713} Sample size needed in each group: {}",
            report.sample_size
        )
        .green()
        .bold()
    ));

    if let Some(bounds) = report.bounds {
        output.push_str(&format!(
            "    Search bracket: {} \u{2013} {}\n",
            bounds.lower, bounds.upper
        ));
    }
    if let Some(power) = report.estimated_power {
        output.push_str(&format!(
            "    Simulated power: {} (tolerance \u{00B1}{})\n",
            format_power(power, meta.power, meta.epsilon),
            meta.epsilon
        ));
        output.push_str(&format!(
            "    Simulations: {} \u{00D7} {} replications per alternative count\n",
            report.iterations, meta.replication
        ));
    }
    if let Some(seed) = meta.seed {
        output.push_str(&format!("    Seed: {}\n", seed));
    }
    output.push_str(&format!("    Runtime: {:.2} s\n", meta.runtime_secs));
    output.push('\n');

    output.push_str(&sep);
    output.push('\n');

    if report.path == CalculationPath::MultipleTesting {
        output.push_str(
            "Note: Power is the average over true alternatives after Benjamini-Hochberg correction.\n",
        );
    }

    output
}

/// Format the error line printed when no size can be produced.
pub fn format_failure(error: &dyn std::fmt::Display) -> String {
    format!(
        "{}\n{}",
        "Error! The calculator isn't able to calculate sample size due to "
            .red()
            .bold(),
        error
    )
}

fn format_path(path: CalculationPath) -> &'static str {
    match path {
        CalculationPath::SingleTest => "single test (closed form)",
        CalculationPath::MultipleTesting => "multiple testing (simulated, Benjamini-Hochberg)",
    }
}

fn format_power(power: f64, target: f64, epsilon: f64) -> String {
    let text = format!("{:.3}", power);
    if (power - target).abs() <= epsilon {
        text.green().to_string()
    } else {
        text.yellow().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{Metadata, SearchBounds};

    fn make_report(path: CalculationPath) -> SampleSizeReport {
        let multiple = path == CalculationPath::MultipleTesting;
        SampleSizeReport {
            sample_size: 2367,
            path,
            tests: if multiple { 2 } else { 1 },
            bounds: multiple.then_some(SearchBounds {
                lower: 1864,
                upper: 2259,
            }),
            estimated_power: multiple.then_some(0.81),
            iterations: if multiple { 3 } else { 0 },
            metadata: Metadata {
                alpha: 0.05,
                power: 0.8,
                variants: 2,
                metrics: if multiple { 2 } else { 1 },
                replication: 100,
                epsilon: 0.025,
                seed: Some(42),
                runtime_secs: 0.25,
            },
        }
    }

    #[test]
    fn test_format_single_test_report() {
        let output = format_report(&make_report(CalculationPath::SingleTest));
        assert!(output.contains("sample-size"));
        assert!(output.contains("Sample size needed in each group: 2367"));
        assert!(!output.contains("Search bracket"));
    }

    #[test]
    fn test_format_multiple_testing_report() {
        let output = format_report(&make_report(CalculationPath::MultipleTesting));
        assert!(output.contains("Search bracket: 1864"));
        assert!(output.contains("0.810"));
        assert!(output.contains("Seed: 42"));
        assert!(output.contains("Benjamini-Hochberg"));
    }

    #[test]
    fn test_format_failure() {
        let output = format_failure(&"boom");
        assert!(output.contains("isn't able to calculate sample size"));
        assert!(output.ends_with("boom"));
    }
}
