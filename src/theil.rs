//! Theil's *T* and its between/within-group decomposition inference.
//!
//! [`theil`] computes the global entropy-based measure. [`theil_decomposition`]
//! splits it against an exhaustive [`Partition`], and [`TheilSim`] tests the
//! between-group component against a permutation null, vectorized over any
//! number of attribute columns.

use crate::partition::Partition;
use crate::permutation::{empirical_pvalue, seeded_rng};
use crate::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Smallest positive normal double, substituted for exact zeros so that
/// share logarithms stay finite. The same policy applies to zero group
/// shares in the between-group component.
const SMALL: f64 = f64::MIN_POSITIVE;

/// Theil's *T* inequality measure:
/// `T = sum_i (y_i / sum(y)) * ln(n * y_i / sum(y))`.
///
/// Exact-zero values are replaced by a tiny positive epsilon before the
/// logarithm, so an all-positive vector is unaffected and a vector with
/// zeros yields the limit value rather than NaN.
///
/// ```
/// use inequality::theil;
///
/// assert!(theil(&[7.0, 7.0, 7.0, 7.0]).abs() < 1e-12);
/// // Half the units hold everything: T = ln(2).
/// let t = theil(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0]);
/// assert!((t - 2f64.ln()).abs() < 1e-12);
/// ```
pub fn theil(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let total: f64 = x.iter().map(|&v| ridz(v)).sum();
    x.iter()
        .map(|&v| {
            let share = ridz(v) / total;
            share * (n * share).ln()
        })
        .sum()
}

fn ridz(v: f64) -> f64 {
    if v == 0.0 {
        SMALL
    } else {
        v
    }
}

/// A between/within split of Theil's *T* for one value vector.
///
/// `bg + wg == t` by construction.
#[derive(Clone, Copy, Debug)]
pub struct TheilDecomposition {
    /// Global Theil's *T*.
    pub t: f64,
    /// Between-group component.
    pub bg: f64,
    /// Within-group component, `t - bg`.
    pub wg: f64,
}

/// Decomposes Theil's *T* over an exhaustive partition.
///
/// The between-group component is `sum_g s_g * ln(n * s_g / n_g)` where
/// `s_g` is group `g`'s share of the total value and `n_g` its unit count.
/// A group with zero total value has its share replaced by a tiny positive
/// epsilon before the logarithm, the same policy [`theil`] applies to
/// individual values.
///
/// ```
/// use inequality::{theil_decomposition, Partition};
///
/// let p = Partition::new(&[0, 0, 0, 1, 1, 1]).unwrap();
/// let d = theil_decomposition(&[0.0, 0.0, 0.0, 10.0, 10.0, 10.0], &p).unwrap();
/// assert!((d.t - 0.6931471805599453).abs() < 1e-12);
/// assert!((d.bg - 0.6931471805599453).abs() < 1e-12);
/// assert!(d.wg.abs() < 1e-12);
/// ```
pub fn theil_decomposition(x: &[f64], partition: &Partition) -> Result<TheilDecomposition> {
    if x.is_empty() {
        return Err(Error::Empty);
    }
    if x.len() != partition.units() {
        return Err(Error::LengthMismatch {
            expected: partition.units(),
            found: x.len(),
        });
    }

    let t = theil(x);
    let n = x.len() as f64;
    let total: f64 = x.iter().sum();

    let mut group_totals = vec![0.0; partition.groups()];
    for (unit, &v) in x.iter().enumerate() {
        group_totals[partition.group_of(unit)] += v;
    }

    let bg = group_totals
        .iter()
        .zip(partition.counts())
        .map(|(&g_total, &g_count)| {
            let share = ridz(g_total / total);
            share * (n * share / g_count as f64).ln()
        })
        .sum();

    Ok(TheilDecomposition { t, bg, wg: t - bg })
}

/// Group-permutation inference on the Theil decomposition, one result per
/// attribute column.
///
/// The partition stays fixed; each trial reshuffles the rows of every column
/// with a single shared permutation, recomputes the decomposition, and
/// collects it into the distribution. The observed decomposition is the
/// first draw of the distribution and counts as one of its own null draws
/// in the p-value.
///
/// ```
/// use inequality::{Partition, TheilSim};
///
/// let columns = vec![
///     vec![1.0, 2.0, 1.5, 20.0, 22.0, 21.0],
///     vec![5.0, 4.0, 6.0, 5.0, 6.0, 4.0],
/// ];
/// let p = Partition::new(&[0, 0, 0, 1, 1, 1]).unwrap();
/// let sim = TheilSim::new(&columns, &p, 99, 42).unwrap();
///
/// // One distribution row per draw, observed first; one entry per column.
/// assert_eq!(sim.bg.len(), 100);
/// assert_eq!(sim.bg[0].len(), 2);
/// let pvalues = sim.bg_pvalue.unwrap();
/// assert!(pvalues.iter().all(|&p| p >= 0.01 && p <= 1.0));
/// ```
#[derive(Clone, Debug)]
pub struct TheilSim {
    /// Observed global Theil's *T* per column.
    pub t: Vec<f64>,
    /// Between-group component per draw (observed draw first) and column.
    pub bg: Vec<Vec<f64>>,
    /// Within-group component per draw (observed draw first) and column.
    pub wg: Vec<Vec<f64>>,
    /// One-sided pseudo p-value for the between-group component, per
    /// column. Absent when the permutation count was zero.
    pub bg_pvalue: Option<Vec<f64>>,
}

impl TheilSim {
    /// Runs `permutations` trials with a generator seeded from `seed`.
    ///
    /// A zero permutation count disables inference; the observed
    /// decomposition is still returned as the only distribution row.
    pub fn new<C: AsRef<[f64]>>(
        columns: &[C],
        partition: &Partition,
        permutations: usize,
        seed: u64,
    ) -> Result<Self> {
        let mut rng = seeded_rng(seed);
        Self::with_rng(columns, partition, permutations, &mut rng)
    }

    /// Like [`TheilSim::new`], but drawing from a caller-supplied generator.
    pub fn with_rng<C: AsRef<[f64]>, R: Rng + ?Sized>(
        columns: &[C],
        partition: &Partition,
        permutations: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::Empty);
        }
        let n = partition.units();
        for column in columns {
            if column.as_ref().len() != n {
                return Err(Error::LengthMismatch {
                    expected: n,
                    found: column.as_ref().len(),
                });
            }
        }

        let observed = columns
            .iter()
            .map(|c| theil_decomposition(c.as_ref(), partition))
            .collect::<Result<Vec<_>>>()?;

        let mut bg = vec![observed.iter().map(|d| d.bg).collect::<Vec<_>>()];
        let mut wg = vec![observed.iter().map(|d| d.wg).collect::<Vec<_>>()];
        let mut exceedances = vec![0usize; columns.len()];

        if permutations > 0 {
            log::debug!(
                "Theil decomposition inference: {} permutations over {} units, {} columns",
                permutations,
                n,
                columns.len()
            );
            let mut ids: Vec<usize> = (0..n).collect();
            let mut shuffled = vec![0.0; n];
            for _ in 0..permutations {
                ids.shuffle(rng);
                let mut bg_row = Vec::with_capacity(columns.len());
                let mut wg_row = Vec::with_capacity(columns.len());
                for (c, column) in columns.iter().enumerate() {
                    let column = column.as_ref();
                    for (slot, &i) in shuffled.iter_mut().zip(&ids) {
                        *slot = column[i];
                    }
                    let d = theil_decomposition(&shuffled, partition)?;
                    if d.bg >= observed[c].bg {
                        exceedances[c] += 1;
                    }
                    bg_row.push(d.bg);
                    wg_row.push(d.wg);
                }
                bg.push(bg_row);
                wg.push(wg_row);
            }
        }

        let bg_pvalue = if permutations > 0 {
            Some(
                exceedances
                    .iter()
                    .map(|&hits| empirical_pvalue(hits, permutations))
                    .collect(),
            )
        } else {
            None
        };

        Ok(TheilSim {
            t: observed.iter().map(|d| d.t).collect(),
            bg,
            wg,
            bg_pvalue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theil_is_invariant_to_scale() {
        let x = [2.0, 5.0, 9.0, 1.0, 4.0];
        let scaled: Vec<f64> = x.iter().map(|v| v * 1000.0).collect();
        assert!((theil(&x) - theil(&scaled)).abs() < 1e-12);
    }

    #[test]
    fn decomposition_is_lossless() {
        let x = [3.0, 1.0, 8.0, 2.0, 9.0, 4.0, 6.0];
        let p = Partition::new(&['a', 'a', 'b', 'b', 'c', 'c', 'c']).unwrap();
        let d = theil_decomposition(&x, &p).unwrap();
        assert!((d.bg + d.wg - d.t).abs() < 1e-12);
    }

    #[test]
    fn single_group_has_no_between_component() {
        let x = [3.0, 1.0, 8.0, 2.0];
        let p = Partition::new(&[0, 0, 0, 0]).unwrap();
        let d = theil_decomposition(&x, &p).unwrap();
        assert!(d.bg.abs() < 1e-12);
        assert!((d.wg - d.t).abs() < 1e-12);
    }

    #[test]
    fn zero_valued_group_share_stays_finite() {
        let x = [0.0, 0.0, 5.0, 5.0];
        let p = Partition::new(&[0, 0, 1, 1]).unwrap();
        let d = theil_decomposition(&x, &p).unwrap();
        assert!(d.bg.is_finite());
        assert!((d.t - 2f64.ln()).abs() < 1e-9);
    }

    #[test]
    fn zero_permutations_disables_inference() {
        let columns = vec![vec![1.0, 2.0, 3.0, 4.0]];
        let p = Partition::new(&[0, 0, 1, 1]).unwrap();
        let sim = TheilSim::new(&columns, &p, 0, 7).unwrap();
        assert!(sim.bg_pvalue.is_none());
        assert_eq!(sim.bg.len(), 1);
    }

    #[test]
    fn column_length_mismatch_is_rejected() {
        let columns = vec![vec![1.0, 2.0, 3.0]];
        let p = Partition::new(&[0, 0, 1, 1]).unwrap();
        assert_eq!(
            TheilSim::new(&columns, &p, 9, 7).unwrap_err(),
            Error::LengthMismatch {
                expected: 4,
                found: 3
            }
        );
    }
}
