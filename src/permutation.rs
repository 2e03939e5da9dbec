//! Shared utilities for the permutation-inference engines.
//!
//! Each engine draws full random permutations of the value-to-unit
//! assignment, collects the recomputed statistic into a distribution, and
//! summarizes it here. The observed statistic counts as one of its own null
//! draws, which is why every empirical p-value carries a `+ 1` in both the
//! numerator and the denominator; fixtures depend on that convention, so it
//! is preserved literally.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A deterministic generator for a reproducible permutation stream.
pub(crate) fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Mean and population standard deviation of a permutation distribution.
pub(crate) fn mean_std(draws: &[f64]) -> (f64, f64) {
    let n = draws.len() as f64;
    let mean = draws.iter().sum::<f64>() / n;
    let var = draws.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
    (mean, var.sqrt())
}

/// Empirical p-value with add-one smoothing: `(hits + 1) / (permutations + 1)`.
///
/// `hits` is the number of permuted draws at least as extreme as the observed
/// statistic, not counting the observed draw itself.
pub(crate) fn empirical_pvalue(hits: usize, permutations: usize) -> f64 {
    (hits as f64 + 1.0) / (permutations as f64 + 1.0)
}
