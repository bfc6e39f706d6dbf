//! Distribution functions shared by the power solver and p-value simulation.
//!
//! Normal tail probabilities use the survival function directly rather than
//! `1 − cdf`, so tiny upper-tail probabilities keep their precision.

use rand::Rng;
use rand_distr::{ChiSquared, Distribution, StandardNormal};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Standard normal CDF Φ(x).
pub fn normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Standard normal survival function 1 − Φ(x).
pub fn normal_sf(x: f64) -> f64 {
    Normal::standard().sf(x)
}

/// Upper-tail quantile of the standard normal: the `z` with `1 − Φ(z) = p`.
///
/// Returns ±∞ at the edges of (0, 1) and NaN for NaN.
pub fn normal_isf(p: f64) -> f64 {
    if p.is_nan() {
        return f64::NAN;
    }
    if p <= 0.0 {
        return f64::INFINITY;
    }
    if p >= 1.0 {
        return f64::NEG_INFINITY;
    }
    // Symmetric about zero; negating the lower quantile keeps precision for small p.
    -Normal::standard().inverse_cdf(p)
}

/// Survival function of the central Student t distribution.
///
/// Falls back to the normal limit when `df` is not a valid degrees of freedom.
pub fn student_t_sf(x: f64, df: f64) -> f64 {
    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.sf(x),
        Err(_) => normal_sf(x),
    }
}

/// Upper-tail quantile of the central Student t distribution.
pub fn student_t_isf(p: f64, df: f64) -> f64 {
    if p <= 0.0 {
        return f64::INFINITY;
    }
    if p >= 1.0 {
        return f64::NEG_INFINITY;
    }
    match StudentsT::new(0.0, 1.0, df) {
        // Symmetric about zero: the upper quantile is minus the lower one.
        Ok(dist) => -dist.inverse_cdf(p),
        Err(_) => normal_isf(p),
    }
}

/// CDF of the noncentral t distribution, `P(T'(df, nc) ≤ x)`.
///
/// Uses the normal approximation of Abramowitz & Stegun 26.7.10:
/// ```text
/// P(T' ≤ t) ≈ Φ( (t·(1 − 1/(4f)) − δ) / sqrt(1 + t²/(2f)) )
/// ```
/// which is accurate to a few parts in a thousand once `df` exceeds a
/// handful, the regime every realistic experiment lives in.
pub fn noncentral_t_cdf(x: f64, df: f64, nc: f64) -> f64 {
    if !(df > 0.0) || df.is_infinite() {
        return normal_cdf(x - nc);
    }
    let numerator = x * (1.0 - 1.0 / (4.0 * df)) - nc;
    let denominator = (1.0 + x * x / (2.0 * df)).sqrt();
    normal_cdf(numerator / denominator)
}

/// Survival function of the noncentral t distribution.
pub fn noncentral_t_sf(x: f64, df: f64, nc: f64) -> f64 {
    1.0 - noncentral_t_cdf(x, df, nc)
}

/// Draw one variate from the noncentral t distribution.
///
/// Constructed as `(Z + nc) / sqrt(V / df)` with `Z ~ N(0, 1)` and
/// `V ~ χ²(df)` independent.
pub fn sample_noncentral_t<R: Rng + ?Sized>(df: f64, nc: f64, rng: &mut R) -> f64 {
    let z: f64 = StandardNormal.sample(rng);
    match ChiSquared::new(df) {
        Ok(chi) => {
            let v: f64 = chi.sample(rng);
            (z + nc) / (v / df).sqrt()
        }
        Err(_) => z + nc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_normal_known_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
        assert!((normal_sf(1.959_963_985) - 0.025).abs() < 1e-8);
        assert!((normal_isf(0.025) - 1.959_963_985).abs() < 1e-6);
        assert!((normal_isf(0.2) - 0.841_621_234).abs() < 1e-6);
        assert_eq!(normal_isf(0.0), f64::INFINITY);
        assert_eq!(normal_isf(1.0), f64::NEG_INFINITY);
        assert!(normal_isf(f64::NAN).is_nan());
    }

    #[test]
    fn test_normal_far_upper_tail() {
        // 1 − Φ(10) ≈ 7.62e-24, which `1 − cdf` would round to zero
        let sf = normal_sf(10.0);
        assert!((sf - 7.619_853_024_160_527e-24).abs() / 7.619_853_024_160_527e-24 < 1e-9, "{}", sf);
        assert_eq!(1.0 - normal_cdf(10.0), 0.0);

        for p in [1e-6, 1e-12, 1e-18] {
            let z = normal_isf(p);
            assert!(z.is_finite() && z > 4.0);
            assert!((normal_sf(z) - p).abs() / p < 1e-8, "p={} z={}", p, z);
        }
    }

    #[test]
    fn test_student_t_approaches_normal() {
        let t_small = student_t_isf(0.025, 5.0);
        let t_large = student_t_isf(0.025, 1e6);
        assert!((t_small - 2.570_582).abs() < 1e-3, "t_5 quantile: {}", t_small);
        assert!((t_large - 1.959_964).abs() < 1e-3, "t_inf quantile: {}", t_large);
        assert!((student_t_sf(0.0, 10.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_noncentral_t_cdf_reduces_to_shifted_normal() {
        // Large df: T'(df, δ) ≈ N(δ, 1)
        let p = noncentral_t_cdf(2.0, 1e7, 1.0);
        assert!((p - normal_cdf(1.0)).abs() < 1e-4);
        // Zero noncentrality: close to the central t
        let central = 1.0 - student_t_sf(1.5, 30.0);
        assert!((noncentral_t_cdf(1.5, 30.0, 0.0) - central).abs() < 5e-3);
    }

    #[test]
    fn test_noncentral_t_sample_mean() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        let n = 20_000;
        let mean = (0..n)
            .map(|_| sample_noncentral_t(200.0, 3.0, &mut rng))
            .sum::<f64>()
            / n as f64;
        // E[T'] = δ·sqrt(df/2)·Γ((df−1)/2)/Γ(df/2) ≈ 3.011 for df = 200
        assert!((mean - 3.01).abs() < 0.05, "sample mean {}", mean);
    }
}
