//! JSON serialization for sample-size reports.

use crate::result::SampleSizeReport;

/// Serialize a report to a compact JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for reports).
pub fn to_json(report: &SampleSizeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Serialize a report to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if serialization fails (should not happen for reports).
pub fn to_json_pretty(report: &SampleSizeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{CalculationPath, Metadata, SearchBounds};

    fn make_report() -> SampleSizeReport {
        SampleSizeReport {
            sample_size: 2100,
            path: CalculationPath::MultipleTesting,
            tests: 2,
            bounds: Some(SearchBounds {
                lower: 1864,
                upper: 2259,
            }),
            estimated_power: Some(0.79),
            iterations: 2,
            metadata: Metadata {
                alpha: 0.05,
                power: 0.8,
                variants: 2,
                metrics: 2,
                replication: 100,
                epsilon: 0.025,
                seed: None,
                runtime_secs: 1.5,
            },
        }
    }

    #[test]
    fn test_to_json() {
        let json = to_json(&make_report()).unwrap();
        assert!(json.contains("\"sample_size\":2100"));
        assert!(json.contains("\"path\":\"MultipleTesting\""));
        assert!(json.contains("\"seed\":null"));
    }

    #[test]
    fn test_to_json_pretty_parses_back() {
        let report = make_report();
        let json = to_json_pretty(&report).unwrap();
        assert!(json.contains('\n'));
        let parsed: SampleSizeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }
}
