//! False-discovery-rate corrections for a family of p-values.

/// A multiple-testing correction that decides which hypotheses to reject.
///
/// Implementations must be shareable across worker threads.
pub trait FdrProcedure: Sync {
    /// Return one rejection flag per p-value, in input order.
    fn reject(&self, p_values: &[f64], alpha: f64) -> Vec<bool>;
}

/// The Benjamini-Hochberg step-up procedure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BenjaminiHochberg;

impl FdrProcedure for BenjaminiHochberg {
    fn reject(&self, p_values: &[f64], alpha: f64) -> Vec<bool> {
        benjamini_hochberg(p_values, alpha)
    }
}

/// Benjamini-Hochberg rejections at FDR level `alpha`.
///
/// With the p-values sorted ascending as `p(1) ≤ … ≤ p(m)`, finds the largest
/// `k` with `p(k) ≤ k·alpha/m` and rejects the `k` smallest.
pub fn benjamini_hochberg(p_values: &[f64], alpha: f64) -> Vec<bool> {
    let m = p_values.len();
    let mut rejected = vec![false; m];
    if m == 0 {
        return rejected;
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let cutoff = order
        .iter()
        .enumerate()
        .rev()
        .find(|&(rank, &idx)| p_values[idx] <= (rank + 1) as f64 * alpha / m as f64)
        .map(|(rank, _)| rank + 1)
        .unwrap_or(0);

    for &idx in &order[..cutoff] {
        rejected[idx] = true;
    }
    rejected
}
