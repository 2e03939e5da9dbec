//! Wolfson bipolarization index and Lorenz-curve helpers.
//!
//! The Wolfson index measures polarization of a distribution around its
//! median, capturing the hollowing-out of the middle of the distribution
//! rather than overall spread. See Wolfson (1994).

use crate::{Error, Result};

/// Lorenz curve of a value vector.
///
/// Returns `(population, value)` coordinate vectors of `n + 1` points each,
/// starting at the origin: cumulative population share against cumulative
/// value share of the sorted distribution.
///
/// ```
/// use inequality::lorenz_curve;
///
/// let (population, value) = lorenz_curve(&[1.0, 1.0, 2.0]).unwrap();
/// assert_eq!(population, vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]);
/// assert_eq!(value, vec![0.0, 0.25, 0.5, 1.0]);
/// ```
pub fn lorenz_curve(y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if y.is_empty() {
        return Err(Error::Empty);
    }

    let mut sorted = y.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
    let n = sorted.len();

    let mut value = Vec::with_capacity(n + 1);
    value.push(0.0);
    let mut running = 0.0;
    for &v in &sorted {
        running += v;
        value.push(running);
    }
    for share in value.iter_mut() {
        *share /= running;
    }

    let population = (0..=n).map(|i| i as f64 / n as f64).collect();
    Ok((population, value))
}

/// Gini coefficient derived from a Lorenz curve by trapezoid integration:
/// `1 - 2 * area under the curve`.
pub fn lorenz_gini(population: &[f64], value: &[f64]) -> f64 {
    let mut area = 0.0;
    for i in 1..population.len() {
        area += (population[i] - population[i - 1]) * (value[i] + value[i - 1]) / 2.0;
    }
    1.0 - 2.0 * area
}

/// Wolfson bipolarization index.
///
/// Combines the gap between the equality line and the Lorenz curve at the
/// median with the Gini coefficient, scaled by the mean-to-median ratio. A
/// higher value indicates a more hollowed-out middle of the distribution.
///
/// ```
/// use inequality::wolfson;
///
/// let incomes = [
///     20000.0, 25000.0, 27000.0, 30000.0, 35000.0,
///     45000.0, 60000.0, 75000.0, 80000.0, 120000.0,
/// ];
/// assert!((wolfson(&incomes).unwrap() - 0.1213).abs() < 1e-4);
/// ```
pub fn wolfson(y: &[f64]) -> Result<f64> {
    let (population, value) = lorenz_curve(y)?;
    let g = lorenz_gini(&population, &value);

    let mut sorted = y.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    };
    let mean = sorted.iter().sum::<f64>() / n as f64;

    let median_lorenz = interpolate(0.5, &population, &value);
    let d50 = 0.5 - median_lorenz;
    Ok((2.0 * d50 - g) * (mean / median))
}

/// Piecewise-linear interpolation of `(xs, ys)` at `x`, with `xs` ascending.
fn interpolate(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert!(xs.len() == ys.len() && xs.len() >= 2);
    if x <= xs[0] {
        return ys[0];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let span = xs[i] - xs[i - 1];
            let weight = (x - xs[i - 1]) / span;
            return ys[i - 1] + weight * (ys[i] - ys[i - 1]);
        }
    }
    ys[ys.len() - 1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lorenz_gini_matches_rank_form() {
        let x = [4.0, 1.0, 9.0, 2.0, 7.0, 7.0, 3.0];
        let (population, value) = lorenz_curve(&x).unwrap();
        assert!((lorenz_gini(&population, &value) - crate::gini(&x)).abs() < 1e-12);
    }

    #[test]
    fn symmetric_distribution_is_unpolarized_relative_to_spread() {
        // A flat uniform spread keeps the Wolfson index small but positive.
        let y: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let w = wolfson(&y).unwrap();
        assert!(w > 0.0 && w < 0.2);
    }

    #[test]
    fn interpolation_hits_curve_vertices() {
        let xs = [0.0, 0.5, 1.0];
        let ys = [0.0, 0.2, 1.0];
        assert_eq!(interpolate(0.5, &xs, &ys), 0.2);
        assert_eq!(interpolate(0.25, &xs, &ys), 0.1);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(wolfson(&[]).unwrap_err(), Error::Empty);
    }
}
