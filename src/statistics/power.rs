//! Closed-form power analysis for a single two-sample test.
//!
//! Two families are supported: the normal approximation (z-test) used for
//! proportions and ratio metrics, and the two-sample Student t-test used for
//! numeric metrics. Sample sizes are found by inverting the power function
//! numerically.

use serde::{Deserialize, Serialize};

use super::distributions::{
    noncentral_t_cdf, noncentral_t_sf, normal_cdf, normal_isf, student_t_isf,
};
use crate::constants::MIN_SAMPLE_SIZE;
use crate::error::{Error, Result};

/// Largest per-cohort sample size the solver will consider.
const MAX_SOLVER_SAMPLE_SIZE: f64 = 1e12;

/// Relative width at which bisection stops.
const SOLVER_REL_TOLERANCE: f64 = 1e-10;

/// Hard cap on bisection steps.
const SOLVER_MAX_ITERATIONS: usize = 200;

/// Direction of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// The treatment differs from control in either direction.
    #[default]
    TwoSided,
    /// The treatment exceeds control.
    OneSided,
}

impl Alternative {
    /// Significance level assigned to one tail of the rejection region.
    fn tail_alpha(self, alpha: f64) -> f64 {
        match self {
            Self::TwoSided => alpha / 2.0,
            Self::OneSided => alpha,
        }
    }
}

/// Test family used to compute single-test power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerFamily {
    /// Normal approximation (two-sample z-test).
    Normal,
    /// Two-sample Student t-test with pooled degrees of freedom.
    StudentT,
}

impl PowerFamily {
    /// Power of the test at `nobs1` observations in the first cohort.
    ///
    /// `ratio` is `nobs2 / nobs1`; the calculator always uses equal cohorts.
    pub fn power(
        self,
        effect_size: f64,
        nobs1: f64,
        alpha: f64,
        ratio: f64,
        alternative: Alternative,
    ) -> f64 {
        let lambda = effect_size * (nobs1 / (1.0 + 1.0 / ratio)).sqrt();
        let tail = alternative.tail_alpha(alpha);

        match self {
            Self::Normal => {
                let crit = normal_isf(tail);
                let upper = normal_cdf(lambda - crit);
                match alternative {
                    Alternative::TwoSided => upper + normal_cdf(-lambda - crit),
                    Alternative::OneSided => upper,
                }
            }
            Self::StudentT => {
                let df = nobs1 * (1.0 + ratio) - 2.0;
                let crit = student_t_isf(tail, df);
                let upper = noncentral_t_sf(crit, df, lambda);
                match alternative {
                    Alternative::TwoSided => upper + noncentral_t_cdf(-crit, df, lambda),
                    Alternative::OneSided => upper,
                }
            }
        }
    }

    /// Solve `power(n) = target` for the first-cohort size `n`.
    ///
    /// The upper end of the bracket grows geometrically from the minimum
    /// sample size until the target is reached, then the bracket is bisected.
    /// The returned size is real-valued; callers truncate it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] for a non-positive or non-finite effect
    /// size, or alpha, power or ratio out of range.
    /// [`Error::PowerUnattainable`] when no size up to 1e12 reaches `power`.
    pub fn solve_sample_size(
        self,
        effect_size: f64,
        alpha: f64,
        power: f64,
        ratio: f64,
        alternative: Alternative,
    ) -> Result<f64> {
        if !(effect_size.is_finite() && effect_size > 0.0) {
            return Err(Error::invalid(
                "effect_size",
                format!(
                    "Error: The standardized effect size must be a positive finite number, got {}.",
                    effect_size
                ),
            ));
        }
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(Error::invalid(
                "alpha",
                "Error: Please provide a float between 0 and 1 for alpha.",
            ));
        }
        if !(power > 0.0 && power < 1.0) {
            return Err(Error::invalid(
                "power",
                "Error: Please provide a float strictly between 0 and 1 for power.",
            ));
        }
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(Error::not_positive("ratio"));
        }

        let power_at = |n: f64| self.power(effect_size, n, alpha, ratio, alternative);

        let mut lo = MIN_SAMPLE_SIZE as f64;
        if power_at(lo) >= power {
            return Ok(lo);
        }

        let mut hi = lo * 2.0;
        while power_at(hi) < power {
            lo = hi;
            hi *= 2.0;
            if hi > MAX_SOLVER_SAMPLE_SIZE {
                tracing::debug!(effect_size, alpha, power, "no sample size below the solver cap");
                return Err(Error::PowerUnattainable { power });
            }
        }

        for _ in 0..SOLVER_MAX_ITERATIONS {
            if (hi - lo) <= SOLVER_REL_TOLERANCE * hi {
                break;
            }
            let mid = 0.5 * (lo + hi);
            if power_at(mid) < power {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Ok(0.5 * (lo + hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_form(effect_size: f64, alpha: f64, power: f64) -> f64 {
        let z_alpha = normal_isf(alpha / 2.0);
        let z_beta = normal_isf(1.0 - power);
        2.0 * ((z_alpha + z_beta) / effect_size).powi(2)
    }

    #[test]
    fn test_normal_matches_closed_form() {
        let d = 0.091_766_293_548_224_71;
        let n = PowerFamily::Normal
            .solve_sample_size(d, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        let expected = closed_form(d, 0.05, 0.8);
        // The closed form ignores the far tail, which is negligible here.
        assert!((n - expected).abs() / expected < 1e-3, "n={} expected={}", n, expected);
        assert!((n - 1864.0).abs() < 2.0, "n={}", n);
    }

    #[test]
    fn test_power_at_solution_hits_target() {
        for family in [PowerFamily::Normal, PowerFamily::StudentT] {
            for alternative in [Alternative::TwoSided, Alternative::OneSided] {
                let n = family
                    .solve_sample_size(0.2, 0.05, 0.9, 1.0, alternative)
                    .unwrap();
                let achieved = family.power(0.2, n, 0.05, 1.0, alternative);
                assert!((achieved - 0.9).abs() < 1e-6, "{:?} {:?}: {}", family, alternative, achieved);
            }
        }
    }

    #[test]
    fn test_student_t_needs_slightly_more() {
        let d = 0.158_113_883_008_418_97;
        let z = PowerFamily::Normal
            .solve_sample_size(d, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        let t = PowerFamily::StudentT
            .solve_sample_size(d, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        assert!(t > z, "t={} z={}", t, z);
        assert!(t - z < 5.0, "t={} z={}", t, z);
    }

    #[test]
    fn test_one_sided_needs_fewer() {
        let two = PowerFamily::Normal
            .solve_sample_size(0.1, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        let one = PowerFamily::Normal
            .solve_sample_size(0.1, 0.05, 0.8, 1.0, Alternative::OneSided)
            .unwrap();
        assert!(one < two);
    }

    #[test]
    fn test_smaller_alpha_needs_more() {
        let base = PowerFamily::Normal
            .solve_sample_size(0.1, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        let bonferroni = PowerFamily::Normal
            .solve_sample_size(0.1, 0.05 / 4.0, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        assert!(bonferroni > base);
    }

    #[test]
    fn test_huge_effect_returns_minimum() {
        let n = PowerFamily::Normal
            .solve_sample_size(50.0, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap();
        assert_eq!(n, MIN_SAMPLE_SIZE as f64);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        let family = PowerFamily::Normal;
        let two = Alternative::TwoSided;
        assert_eq!(
            family.solve_sample_size(0.0, 0.05, 0.8, 1.0, two).unwrap_err().parameter(),
            Some("effect_size")
        );
        assert_eq!(
            family.solve_sample_size(f64::NAN, 0.05, 0.8, 1.0, two).unwrap_err().parameter(),
            Some("effect_size")
        );
        assert_eq!(
            family.solve_sample_size(0.1, 1.0, 0.8, 1.0, two).unwrap_err().parameter(),
            Some("alpha")
        );
        assert_eq!(
            family.solve_sample_size(0.1, 0.05, 1.0, 1.0, two).unwrap_err().parameter(),
            Some("power")
        );
    }

    #[test]
    fn test_tiny_effect_is_unattainable() {
        // 1e-9 needs ~1.6e19 observations
        let err = PowerFamily::Normal
            .solve_sample_size(1e-9, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap_err();
        assert_eq!(err, Error::PowerUnattainable { power: 0.8 });
        let err = PowerFamily::StudentT
            .solve_sample_size(1e-9, 0.05, 0.8, 1.0, Alternative::TwoSided)
            .unwrap_err();
        assert_eq!(err, Error::PowerUnattainable { power: 0.8 });
    }
}
