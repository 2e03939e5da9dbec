//! Diversity, segregation, and concentration indices over a units-by-groups
//! count matrix, as suggested in Nijkamp & Poot (2015).
//!
//! Every function here is a pure closed-form formula over a [`GroupCounts`]
//! matrix: one row per spatial unit (neighborhood, area), one column per
//! group (cultural group, industry). Aggregate indices return a scalar;
//! segregation/concentration indices return one value per group.
//!
//! Division and logarithm singularities caused by empty groups follow float
//! semantics and yield NaN or infinity, except where a formula documents an
//! epsilon substitution; callers can detect these per IEEE rules.

use crate::{Error, Result};

/// Smallest positive normal double, substituted for exact zeros where a
/// formula takes logarithms of cell values.
const SMALL: f64 = f64::MIN_POSITIVE;

/// A dense units-by-groups matrix of non-negative counts.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupCounts {
    data: Vec<f64>,
    units: usize,
    groups: usize,
}

impl GroupCounts {
    /// Builds a matrix from one row of group counts per unit.
    ///
    /// Fails on an empty row set or on rows of unequal length.
    ///
    /// ```
    /// use inequality::GroupCounts;
    ///
    /// let x = GroupCounts::from_rows(&[
    ///     vec![0.0, 1.0, 2.0],
    ///     vec![0.0, 2.0, 4.0],
    ///     vec![0.0, 0.0, 3.0],
    /// ]).unwrap();
    /// assert_eq!(x.units(), 3);
    /// assert_eq!(x.groups(), 3);
    /// assert_eq!(x.group_totals(), vec![0.0, 3.0, 9.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let first = rows.first().ok_or(Error::Empty)?;
        let groups = first.as_ref().len();
        let mut data = Vec::with_capacity(rows.len() * groups);
        for row in rows {
            let row = row.as_ref();
            if row.len() != groups {
                return Err(Error::RaggedMatrix {
                    expected: groups,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(GroupCounts {
            data,
            units: rows.len(),
            groups,
        })
    }

    /// The number of rows (spatial units).
    pub fn units(&self) -> usize {
        self.units
    }

    /// The number of columns (groups).
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// The count for `unit` and `group`.
    pub fn get(&self, unit: usize, group: usize) -> f64 {
        self.data[unit * self.groups + group]
    }

    /// Row sums: total count per unit.
    pub fn unit_totals(&self) -> Vec<f64> {
        (0..self.units)
            .map(|u| (0..self.groups).map(|g| self.get(u, g)).sum())
            .collect()
    }

    /// Column sums: total count per group.
    pub fn group_totals(&self) -> Vec<f64> {
        (0..self.groups)
            .map(|g| (0..self.units).map(|u| self.get(u, g)).sum())
            .collect()
    }

    /// Grand total over all cells.
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// A copy with exact zeros replaced by a tiny positive epsilon.
    fn ridz(&self) -> GroupCounts {
        let mut copy = self.clone();
        for cell in copy.data.iter_mut() {
            if *cell == 0.0 {
                *cell = SMALL;
            }
        }
        copy
    }
}

/// Rank-form Gini of a plain vector, shared by the Gini GI variants.
fn rank_gini(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
    let num: f64 = sorted
        .iter()
        .enumerate()
        .map(|(i, v)| 2.0 * (i as f64 + 1.0) * v)
        .sum();
    let den: f64 = n * sorted.iter().sum::<f64>();
    num / den - (n + 1.0) / n
}

/// Abundance: the number of groups with a positive total.
///
/// ```
/// use inequality::indices::abundance;
/// use inequality::GroupCounts;
///
/// let x = GroupCounts::from_rows(&[vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 4.0]]).unwrap();
/// assert_eq!(abundance(&x), 2);
/// ```
pub fn abundance(x: &GroupCounts) -> usize {
    x.group_totals().iter().filter(|&&total| total > 0.0).count()
}

/// Margalev MD index: `(abundance - 1) / ln(total)`.
pub fn margalev_md(x: &GroupCounts) -> f64 {
    (abundance(x) as f64 - 1.0) / x.total().ln()
}

/// Menhinick MI index: `(abundance - 1) / sqrt(total)`.
pub fn menhinick_mi(x: &GroupCounts) -> f64 {
    (abundance(x) as f64 - 1.0) / x.total().sqrt()
}

/// Simpson diversity index SO: the probability that two draws without
/// replacement come from the same group.
pub fn simpson_so(x: &GroupCounts) -> f64 {
    let total = x.total();
    let num: f64 = x.group_totals().iter().map(|&g| g * (g - 1.0)).sum();
    num / (total * (total - 1.0))
}

/// Simpson diversity index SD: `1 - simpson_so`.
pub fn simpson_sd(x: &GroupCounts) -> f64 {
    1.0 - simpson_so(x)
}

/// Herfindahl index HD: the sum of squared group shares.
pub fn herfindahl_hd(x: &GroupCounts) -> f64 {
    let total = x.total();
    x.group_totals()
        .iter()
        .map(|&g| (g / total) * (g / total))
        .sum()
}

/// Fractionalization (Gini-Simpson) index GS: `1 - herfindahl_hd`.
pub fn fractionalization_gs(x: &GroupCounts) -> f64 {
    1.0 - herfindahl_hd(x)
}

/// Shannon index SE: entropy of the group shares in nats.
///
/// A group with zero total contributes `0 * ln(0)`, which is NaN under
/// float semantics; use only with populated groups.
pub fn shannon_se(x: &GroupCounts) -> f64 {
    let total = x.total();
    -x.group_totals()
        .iter()
        .map(|&g| {
            let share = g / total;
            share * share.ln()
        })
        .sum::<f64>()
}

/// Theil index TH of group segregation across units, normalized by the
/// entropy of the group distribution.
///
/// Zero cells are replaced by a tiny positive epsilon before the
/// logarithms.
///
/// ```
/// use inequality::indices::theil_th;
/// use inequality::GroupCounts;
///
/// let x = GroupCounts::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![0.0, 2.0, 4.0],
///     vec![0.0, 0.0, 3.0],
/// ]).unwrap();
/// assert!((theil_th(&x) - 0.15106563978903298).abs() < 1e-10);
/// ```
pub fn theil_th(x: &GroupCounts) -> f64 {
    let x = x.ridz();
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total: f64 = unit_totals.iter().sum();

    let den: f64 = group_totals
        .iter()
        .map(|&pg| (pg / total) * (pg / total).ln())
        .sum();

    let mut th = 0.0;
    for g in 0..x.groups() {
        let pg = group_totals[g];
        for u in 0..x.units() {
            let pa = unit_totals[u];
            let cell_share = x.get(u, g) / pa;
            let num = cell_share * ((pg / total).ln() - cell_share.ln());
            th += (pa / total) * (num / den);
        }
    }
    th
}

/// Gini GI index of the group totals.
///
/// ```
/// use inequality::indices::gini_gi;
/// use inequality::GroupCounts;
///
/// let x = GroupCounts::from_rows(&[
///     vec![0.0, 1.0, 2.0],
///     vec![0.0, 2.0, 4.0],
///     vec![0.0, 0.0, 3.0],
/// ]).unwrap();
/// assert!((gini_gi(&x) - 0.5).abs() < 1e-12);
/// ```
pub fn gini_gi(x: &GroupCounts) -> f64 {
    rank_gini(&x.group_totals())
}

/// Per-group Gini GI index over each group's unit counts.
pub fn gini_gig(x: &GroupCounts) -> Vec<f64> {
    (0..x.groups())
        .map(|g| {
            let column: Vec<f64> = (0..x.units()).map(|u| x.get(u, g)).collect();
            rank_gini(&column)
        })
        .collect()
}

/// Gini GI index in mean-difference form; equivalent to [`gini_gi`].
pub fn gini_gi_m(x: &GroupCounts) -> f64 {
    let totals = x.group_totals();
    let k = totals.len() as f64;
    let mean = totals.iter().sum::<f64>() / k;
    let num: f64 = totals
        .iter()
        .flat_map(|&a| totals.iter().map(move |&b| (a - b).abs()))
        .sum();
    num / (2.0 * k * k * mean)
}

/// Hoover index HI: half the total deviation of group shares from a uniform
/// share.
pub fn hoover_hi(x: &GroupCounts) -> f64 {
    let total = x.total();
    let k = x.groups() as f64;
    let s: f64 = x
        .group_totals()
        .iter()
        .map(|&g| (g / total - 1.0 / k).abs())
        .sum();
    s / 2.0
}

/// Similarity-weighted diversity: `1 - sum_ij r_i r_j tau_ij` over group
/// shares `r` and a `k x k` dissimilarity matrix `tau` (zero diagonal).
pub fn similarity_w_wd<R: AsRef<[f64]>>(x: &GroupCounts, tau: &[R]) -> Result<f64> {
    let k = x.groups();
    if tau.len() != k {
        return Err(Error::LengthMismatch {
            expected: k,
            found: tau.len(),
        });
    }
    for row in tau {
        if row.as_ref().len() != k {
            return Err(Error::RaggedMatrix {
                expected: k,
                found: row.as_ref().len(),
            });
        }
    }

    let total = x.total();
    let shares: Vec<f64> = x.group_totals().iter().map(|&g| g / total).collect();
    let mut s = 0.0;
    for (i, row) in tau.iter().enumerate() {
        for (j, &t) in row.as_ref().iter().enumerate() {
            s += shares[i] * shares[j] * t;
        }
    }
    Ok(1.0 - s)
}

/// Duncan & Duncan segregation index GSg of each group against the rest
/// combined.
pub fn segregation_gsg(x: &GroupCounts) -> Vec<f64> {
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total = x.total();

    (0..x.groups())
        .map(|g| {
            let pg = group_totals[g];
            let rest = total - pg;
            0.5 * (0..x.units())
                .map(|u| {
                    let own = x.get(u, g) / pg;
                    let others = (unit_totals[u] - x.get(u, g)) / rest;
                    (own - others).abs()
                })
                .sum::<f64>()
        })
        .collect()
}

/// Modified segregation index MSg of Van Mourik et al. (1989):
/// GSg weighted by `2 p_g (1 - p_g)` with `p_g` the group share.
pub fn modified_segregation_msg(x: &GroupCounts) -> Vec<f64> {
    let total = x.total();
    let group_totals = x.group_totals();
    segregation_gsg(x)
        .into_iter()
        .enumerate()
        .map(|(g, gsg)| {
            let share = group_totals[g] / total;
            2.0 * share * (1.0 - share) * gsg
        })
        .collect()
}

/// Isolation index ISg: within-group exposure relative to the group's
/// overall share.
pub fn isolation_isg(x: &GroupCounts) -> Vec<f64> {
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total = x.total();

    (0..x.groups())
        .map(|g| {
            let share = group_totals[g] / total;
            (0..x.units())
                .map(|u| {
                    let w = x.get(u, g) / group_totals[g];
                    let local_share = x.get(u, g) / unit_totals[u];
                    w * local_share / share
                })
                .sum()
        })
        .collect()
}

/// Isolation index IIg: the excess of within-group exposure over the group
/// share, normalized to `[0, 1]`.
pub fn isolation_ii(x: &GroupCounts) -> Vec<f64> {
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total = x.total();

    (0..x.groups())
        .map(|g| {
            let pg = group_totals[g];
            let share = pg / total;
            let block: f64 = (0..x.units())
                .map(|u| (x.get(u, g) / pg) * (x.get(u, g) / unit_totals[u]))
                .sum();
            (block / share - share) / (1.0 - share)
        })
        .collect()
}

/// Ellison & Glaeser (1997) concentration index per industry, from
/// area-by-industry employment counts.
///
/// `plant_herfindahls` holds each industry's Herfindahl index of plant
/// sizes; when absent, every plant is assumed to employ exactly one worker,
/// giving `H_g = 1 / P_g`.
pub fn ellison_glaeser_egg(
    x: &GroupCounts,
    plant_herfindahls: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let group_totals = x.group_totals();
    if let Some(hs) = plant_herfindahls {
        if hs.len() != x.groups() {
            return Err(Error::LengthMismatch {
                expected: x.groups(),
                found: hs.len(),
            });
        }
    }

    let total = x.total();
    let area_shares: Vec<f64> = x.unit_totals().iter().map(|&pa| pa / total).collect();
    let part = 1.0 - area_shares.iter().map(|&s| s * s).sum::<f64>();

    Ok((0..x.groups())
        .map(|g| {
            let raw_concentration: f64 = (0..x.units())
                .map(|u| {
                    let s = x.get(u, g) / group_totals[g];
                    (s - area_shares[u]) * (s - area_shares[u])
                })
                .sum();
            let h = plant_herfindahls
                .map(|hs| hs[g])
                .unwrap_or(1.0 / group_totals[g]);
            (raw_concentration - part * h) / (part * (1.0 - h))
        })
        .collect())
}

/// Ellison & Glaeser (1997) concentration computed for population counts
/// rather than industry employment, following Mare et al. (2012).
pub fn ellison_glaeser_egg_pop(x: &GroupCounts) -> Vec<f64> {
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total = x.total();
    let area_shares: Vec<f64> = unit_totals.iter().map(|&pa| pa / total).collect();
    let dispersion = 1.0 - area_shares.iter().map(|&s| s * s).sum::<f64>();

    (0..x.groups())
        .map(|g| {
            let pg = group_totals[g];
            let spread: f64 = (0..x.units())
                .map(|u| {
                    let d = x.get(u, g) / pg - area_shares[u];
                    d * d
                })
                .sum();
            (spread / dispersion - 1.0 / pg) / (1.0 - 1.0 / pg)
        })
        .collect()
}

/// Maurel & Sédillot (1999) concentration index per industry.
///
/// `plant_herfindahls` has the same meaning as in [`ellison_glaeser_egg`].
pub fn maurel_sedillot_msg(
    x: &GroupCounts,
    plant_herfindahls: Option<&[f64]>,
) -> Result<Vec<f64>> {
    let group_totals = x.group_totals();
    if let Some(hs) = plant_herfindahls {
        if hs.len() != x.groups() {
            return Err(Error::LengthMismatch {
                expected: x.groups(),
                found: hs.len(),
            });
        }
    }

    let total = x.total();
    let squared_area_shares: f64 = x
        .unit_totals()
        .iter()
        .map(|&pa| (pa / total) * (pa / total))
        .sum();

    Ok((0..x.groups())
        .map(|g| {
            let squared_industry_shares: f64 = (0..x.units())
                .map(|u| {
                    let s = x.get(u, g) / group_totals[g];
                    s * s
                })
                .sum();
            let h = plant_herfindahls
                .map(|hs| hs[g])
                .unwrap_or(1.0 / group_totals[g]);
            let num = (squared_industry_shares - squared_area_shares)
                / (1.0 - squared_area_shares)
                - h;
            num / (1.0 - h)
        })
        .collect())
}

/// Maurel & Sédillot (1999) concentration computed for population counts,
/// following Mare et al. (2012).
pub fn maurel_sedillot_msg_pop(x: &GroupCounts) -> Vec<f64> {
    let unit_totals = x.unit_totals();
    let group_totals = x.group_totals();
    let total = x.total();
    let squared_area_shares: Vec<f64> = unit_totals
        .iter()
        .map(|&pa| (pa / total) * (pa / total))
        .collect();
    let dispersion = 1.0 - squared_area_shares.iter().sum::<f64>();

    (0..x.groups())
        .map(|g| {
            let pg = group_totals[g];
            let spread: f64 = (0..x.units())
                .map(|u| {
                    let s = x.get(u, g) / pg;
                    s * s - squared_area_shares[u]
                })
                .sum();
            (spread / dispersion - 1.0 / pg) / (1.0 - 1.0 / pg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> GroupCounts {
        GroupCounts::from_rows(&[
            vec![0.0, 1.0, 2.0],
            vec![0.0, 2.0, 4.0],
            vec![0.0, 0.0, 3.0],
        ])
        .unwrap()
    }

    /// Inefficient cell-by-cell Theil TH, kept for cross-checking the
    /// grouped computation.
    fn theil_th_brute(x: &GroupCounts) -> f64 {
        let x = x.ridz();
        let unit_totals = x.unit_totals();
        let group_totals = x.group_totals();
        let total: f64 = unit_totals.iter().sum();
        let den: f64 = group_totals
            .iter()
            .map(|&pg| (pg / total) * (pg / total).ln())
            .sum();

        let mut th = 0.0;
        for g in 0..x.groups() {
            for u in 0..x.units() {
                let pa = unit_totals[u];
                let pga = x.get(u, g);
                let num = (pga / pa) * ((group_totals[g] / total).ln() - (pga / pa).ln());
                th += (pa / total) * (num / den);
            }
        }
        th
    }

    #[test]
    fn documented_fixture_values() {
        let x = fixture();
        assert_eq!(abundance(&x), 2);
        assert!((margalev_md(&x) - 0.40242960438184466).abs() < 1e-12);
        assert!((menhinick_mi(&x) - 0.2886751345948129).abs() < 1e-12);
        assert!((simpson_so(&x) - 0.5909090909090909).abs() < 1e-12);
        assert!((simpson_sd(&x) - 0.40909090909090906).abs() < 1e-12);
        assert!((herfindahl_hd(&x) - 0.625).abs() < 1e-12);
        assert!((fractionalization_gs(&x) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn theil_th_matches_brute_force() {
        let x = fixture();
        assert!((theil_th(&x) - theil_th_brute(&x)).abs() < 1e-12);

        let y = GroupCounts::from_rows(&[
            vec![5.0, 3.0, 8.0, 1.0],
            vec![2.0, 9.0, 4.0, 6.0],
            vec![7.0, 1.0, 2.0, 8.0],
        ])
        .unwrap();
        assert!((theil_th(&y) - theil_th_brute(&y)).abs() < 1e-12);
    }

    #[test]
    fn gini_variants_agree() {
        let x = fixture();
        assert!((gini_gi(&x) - 0.5).abs() < 1e-12);
        assert!((gini_gi(&x) - gini_gi_m(&x)).abs() < 1e-12);
    }

    #[test]
    fn uniform_groups_have_maximal_diversity() {
        let x = GroupCounts::from_rows(&[vec![2.0, 2.0, 2.0], vec![3.0, 3.0, 3.0]]).unwrap();
        assert!((shannon_se(&x) - 3f64.ln()).abs() < 1e-12);
        assert!(gini_gi(&x).abs() < 1e-12);
        assert!(hoover_hi(&x).abs() < 1e-12);
    }

    #[test]
    fn similarity_reduces_to_herfindahl_for_unit_dissimilarity() {
        let x = fixture();
        // tau with ones off the diagonal: 1 - sum_{i != j} r_i r_j = sum r_i^2.
        let tau = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
        ];
        let swwd = similarity_w_wd(&x, &tau).unwrap();
        assert!((swwd - herfindahl_hd(&x)).abs() < 1e-12);

        let zero = vec![vec![0.0; 3]; 3];
        assert_eq!(similarity_w_wd(&x, &zero).unwrap(), 1.0);
    }

    #[test]
    fn evenly_spread_groups_are_unsegregated() {
        // Every unit holds the same composition, so each group's
        // distribution matches the complement's exactly.
        let x = GroupCounts::from_rows(&[vec![4.0, 8.0], vec![4.0, 8.0], vec![4.0, 8.0]]).unwrap();
        for gsg in segregation_gsg(&x) {
            assert!(gsg.abs() < 1e-12);
        }
        for msg in modified_segregation_msg(&x) {
            assert!(msg.abs() < 1e-12);
        }
        // Exposure equals the group share, so isolation IIg collapses to 0
        // and ISg to 1.
        for ii in isolation_ii(&x) {
            assert!(ii.abs() < 1e-12);
        }
        for isg in isolation_isg(&x) {
            assert!((isg - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn fully_separated_groups_are_maximally_segregated() {
        let x = GroupCounts::from_rows(&[vec![6.0, 0.0], vec![0.0, 9.0]]).unwrap();
        for gsg in segregation_gsg(&x) {
            assert!((gsg - 1.0).abs() < 1e-12);
        }
        for isg in isolation_isg(&x) {
            assert!(isg > 1.0);
        }
    }

    #[test]
    fn concentration_indices_share_plant_herfindahl_validation() {
        let x = fixture();
        let err = ellison_glaeser_egg(&x, Some(&[0.5])).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 1
            }
        );
        let err = maurel_sedillot_msg(&x, Some(&[0.5, 0.5])).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn population_concentration_is_zero_for_proportional_spread() {
        // Group counts proportional to area totals: spread equals the
        // area-share dispersion, so the numerator collapses.
        let x = GroupCounts::from_rows(&[vec![10.0, 20.0], vec![20.0, 40.0]]).unwrap();
        for eg in ellison_glaeser_egg_pop(&x) {
            assert!(eg.abs() < 1e-9);
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = GroupCounts::from_rows(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            Error::RaggedMatrix {
                expected: 2,
                found: 1
            }
        );
    }
}
