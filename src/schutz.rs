//! Schutz inequality measures.
//!
//! The Schutz distance is the maximum vertical gap between the line of
//! perfect equality and the Lorenz curve; the original Schutz coefficient
//! sums the scaled excess of above-average slopes. See Schutz (1951).

use crate::{Error, Result};

/// Schutz distance, intersection point, and coefficient for one value
/// vector.
///
/// ```
/// use inequality::Schutz;
///
/// let s = Schutz::new(&[1000.0, 2000.0, 1500.0, 3000.0, 2500.0]).unwrap();
/// assert!((s.distance - 0.15).abs() < 1e-9);
/// assert!((s.intersection_point - 0.6).abs() < 1e-9);
/// assert!((s.coefficient - 7.5).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Schutz {
    /// Maximum distance between the line of perfect equality and the Lorenz
    /// curve.
    pub distance: f64,
    /// Cumulative population share at which the maximum distance occurs
    /// (the x and y coordinate of the point on the equality line).
    pub intersection_point: f64,
    /// The original Schutz coefficient: the sum of `10 * (slope - 1)` over
    /// units whose Lorenz-curve slope exceeds 1.
    pub coefficient: f64,
}

impl Schutz {
    /// Computes the Schutz measures over the sorted distribution.
    pub fn new(y: &[f64]) -> Result<Self> {
        if y.is_empty() {
            return Err(Error::Empty);
        }

        let mut sorted = y.to_vec();
        sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
        let n = sorted.len() as f64;
        let total: f64 = sorted.iter().sum();

        let unit_share = 1.0 / n;
        let mut population_cumulative = 0.0;
        let mut value_cumulative = 0.0;
        let mut distance = f64::NEG_INFINITY;
        let mut intersection_point = 0.0;
        let mut coefficient = 0.0;

        for &v in &sorted {
            let value_share = v / total;
            population_cumulative += unit_share;
            value_cumulative += value_share;

            let gap = population_cumulative - value_cumulative;
            if gap > distance {
                distance = gap;
                intersection_point = population_cumulative;
            }

            let slope_excess = 10.0 * (value_share / unit_share - 1.0);
            if slope_excess > 0.0 {
                coefficient += slope_excess;
            }
        }

        Ok(Schutz {
            distance,
            intersection_point,
            coefficient,
        })
    }
}
