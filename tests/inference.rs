//! End-to-end permutation-inference runs on block-structured data.
//!
//! The datasets here have four clusters of values separated by large gaps
//! and placed on four matching spatial blocks or groups. A random relabeling
//! almost surely breaks the clusters apart, so the observed statistics sit
//! at the extreme of their null distributions and the empirical p-values
//! take their smallest possible value regardless of the generator stream.

use inequality::{Adjacency, Partition, SpatialGini, TheilSim};

/// 32 units in 4 clusters; unit `u` gets value `100 * (u / 8) + (u % 8)`.
fn clustered_values() -> Vec<f64> {
    (0..32).map(|u| (100 * (u / 8) + u % 8) as f64).collect()
}

fn block_labels() -> Vec<usize> {
    (0..32).map(|u| u / 8).collect()
}

#[test]
fn clustered_data_is_maximally_spatially_unequal() {
    let x = clustered_values();
    let w = Adjacency::block(&block_labels());
    let gs = SpatialGini::new(&x, &w, 99, 20130601).unwrap();

    assert!((gs.wg + gs.wcg - gs.total_deviation).abs() < 1e-6);
    // Neighbor pairs only differ by within-cluster offsets, so nearly all
    // inequality is carried by non-neighbor pairs.
    assert!(gs.wcg / gs.total_deviation > 0.95);
    assert!(gs.polarization > 1.0);

    let inference = gs.inference.unwrap();
    // No relabeling can concentrate the clusters more than the observed
    // one, so the observed wcg and polarization top their distributions.
    assert_eq!(inference.p_sim, 0.01);
    assert_eq!(inference.polarization_p_sim, 0.01);
    assert!(gs.wcg > inference.e_wcg);
    assert!(inference.z_wcg > 0.0);
    assert!(inference.p_z_sim < 0.5);
    assert_eq!(inference.wcg_sim.len(), 99);
    assert_eq!(inference.polarization_sim.len(), 99);
    for &wcg_p in &inference.wcg_sim {
        assert!(wcg_p <= gs.wcg);
    }
}

#[test]
fn spatial_inference_is_reproducible_per_seed() {
    let x = clustered_values();
    let w = Adjacency::block(&block_labels());
    let a = SpatialGini::new(&x, &w, 49, 7).unwrap();
    let b = SpatialGini::new(&x, &w, 49, 7).unwrap();

    let ia = a.inference.unwrap();
    let ib = b.inference.unwrap();
    assert_eq!(ia.wcg_sim, ib.wcg_sim);
    assert_eq!(ia.polarization_sim, ib.polarization_sim);
    assert_eq!(ia.p_sim, ib.p_sim);
    assert_eq!(ia.e_wcg, ib.e_wcg);
}

#[test]
fn observed_statistics_do_not_depend_on_permutation_count() {
    let x = clustered_values();
    let w = Adjacency::block(&block_labels());
    let bare = SpatialGini::observed(&x, &w).unwrap();
    let with_inference = SpatialGini::new(&x, &w, 19, 3).unwrap();

    assert_eq!(bare.g, with_inference.g);
    assert_eq!(bare.wg, with_inference.wg);
    assert_eq!(bare.wcg, with_inference.wcg);
    assert_eq!(bare.polarization, with_inference.polarization);
    assert!(bare.inference.is_none());
}

#[test]
fn clustered_data_maximizes_between_group_theil() {
    let x = clustered_values();
    let p = Partition::new(&block_labels()).unwrap();
    let sim = TheilSim::new(&[x], &p, 999, 20130601).unwrap();

    assert_eq!(sim.bg.len(), 1000);
    assert_eq!(sim.wg.len(), 1000);
    // The observed assignment sorts the largest cluster into one group, so
    // no reshuffle yields a strictly larger between-group component.
    let observed_bg = sim.bg[0][0];
    for row in &sim.bg {
        assert!(row[0] <= observed_bg + 1e-12);
    }
    let pvalues = sim.bg_pvalue.unwrap();
    assert!(pvalues[0] >= 0.001 && pvalues[0] <= 0.002);
}

#[test]
fn theil_draws_decompose_losslessly() {
    let columns = vec![
        clustered_values(),
        (0..32).map(|u| ((u * 7919) % 83) as f64 + 1.0).collect(),
    ];
    let p = Partition::new(&block_labels()).unwrap();
    let sim = TheilSim::new(&columns, &p, 99, 11).unwrap();

    // Every draw of every column splits T exactly into bg + wg. The global
    // T is permutation-invariant, so the observed value works for all draws.
    for (bg_row, wg_row) in sim.bg.iter().zip(&sim.wg) {
        for ((&bg, &wg), &t) in bg_row.iter().zip(wg_row).zip(&sim.t) {
            assert!((bg + wg - t).abs() < 1e-9);
        }
    }
}

#[test]
fn theil_inference_is_reproducible_per_seed() {
    let columns = vec![clustered_values()];
    let p = Partition::new(&block_labels()).unwrap();
    let a = TheilSim::new(&columns, &p, 49, 7).unwrap();
    let b = TheilSim::new(&columns, &p, 49, 7).unwrap();

    assert_eq!(a.bg, b.bg);
    assert_eq!(a.wg, b.wg);
    assert_eq!(a.bg_pvalue, b.bg_pvalue);
}

#[test]
fn unstructured_data_yields_unremarkable_pvalues() {
    // Values assigned with no regard to the blocks: the observed statistics
    // should fall inside the body of their null distributions.
    let x: Vec<f64> = (0..32).map(|u| ((u * 7919) % 83) as f64 + 1.0).collect();
    let w = Adjacency::block(&block_labels());
    let gs = SpatialGini::new(&x, &w, 199, 99).unwrap();
    let inference = gs.inference.unwrap();
    assert!(inference.p_sim >= 1.0 / 200.0 && inference.p_sim <= 1.0);
    // Two-sided folding keeps the p-value at or below one half plus the
    // self-inclusion correction.
    assert!(inference.p_sim <= 0.5 + 1.0 / 200.0);

    let p = Partition::new(&block_labels()).unwrap();
    let sim = TheilSim::new(&[x], &p, 199, 99).unwrap();
    let pvalue = sim.bg_pvalue.unwrap()[0];
    assert!(pvalue > 0.01 && pvalue <= 1.0);
}
