//! Atkinson inequality index.
//!
//! The Atkinson index weights different parts of the distribution according
//! to an inequality-aversion parameter `epsilon`; higher values give more
//! weight to the lower tail. See Atkinson (1970).

use crate::{Error, Result};

/// Atkinson index of a positive value vector.
///
/// `epsilon == 0` yields 0 regardless of the distribution; `epsilon == 1`
/// uses the geometric mean. Values must be strictly positive and `epsilon`
/// non-negative; violations are rejected, not recovered.
///
/// ```
/// use inequality::atkinson::atkinson;
///
/// let incomes = [10.0, 20.0, 30.0, 40.0, 50.0];
/// assert!((atkinson(&incomes, 0.5).unwrap() - 0.06315).abs() < 1e-5);
/// assert!((atkinson(&incomes, 1.0).unwrap() - 0.13161).abs() < 1e-5);
/// assert!(atkinson(&[1.0, 0.0], 0.5).is_err());
/// ```
pub fn atkinson(y: &[f64], epsilon: f64) -> Result<f64> {
    if y.is_empty() {
        return Err(Error::Empty);
    }
    if let Some(&bad) = y.iter().find(|&&v| v <= 0.0) {
        return Err(Error::NonPositive(bad));
    }
    if epsilon < 0.0 {
        return Err(Error::NegativeAversion(epsilon));
    }

    let n = y.len() as f64;
    let mean = y.iter().sum::<f64>() / n;
    if epsilon == 1.0 {
        let geometric_mean = (y.iter().map(|v| v.ln()).sum::<f64>() / n).exp();
        Ok(1.0 - geometric_mean / mean)
    } else {
        let powered_mean = y.iter().map(|v| v.powf(1.0 - epsilon)).sum::<f64>() / n;
        Ok(1.0 - powered_mean.powf(1.0 / (1.0 - epsilon)) / mean)
    }
}

/// Atkinson index together with the equally distributed equivalent: the
/// income level that, if held by every unit, would yield the same social
/// welfare as the observed distribution.
///
/// ```
/// use inequality::Atkinson;
///
/// let a = Atkinson::new(&[10.0, 20.0, 30.0, 40.0, 50.0], 0.5).unwrap();
/// assert!((a.a - 0.06315).abs() < 1e-5);
/// assert!((a.ede - 28.1054).abs() < 1e-4);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Atkinson {
    /// The Atkinson index, in `[0, 1]`.
    pub a: f64,
    /// The equally distributed equivalent, `mean * (1 - a)`.
    pub ede: f64,
}

impl Atkinson {
    /// Computes the index and its EDE for a positive value vector.
    pub fn new(y: &[f64], epsilon: f64) -> Result<Self> {
        let a = atkinson(y, epsilon)?;
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        Ok(Atkinson {
            a,
            ede: mean * (1.0 - a),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_aversion_means_zero_index() {
        let a = atkinson(&[1.0, 5.0, 25.0], 0.0).unwrap();
        assert!(a.abs() < 1e-12);
    }

    #[test]
    fn equal_distribution_has_zero_index() {
        let a = atkinson(&[4.0, 4.0, 4.0, 4.0], 0.7).unwrap();
        assert!(a.abs() < 1e-12);
    }

    #[test]
    fn geometric_mean_ede() {
        let a = Atkinson::new(&[10.0, 20.0, 30.0, 40.0, 50.0], 1.0).unwrap();
        assert!((a.ede - 26.05171).abs() < 1e-4);
    }

    #[test]
    fn preconditions_are_rejected() {
        assert_eq!(
            atkinson(&[1.0, -2.0], 0.5).unwrap_err(),
            Error::NonPositive(-2.0)
        );
        assert_eq!(
            atkinson(&[1.0, 2.0], -0.5).unwrap_err(),
            Error::NegativeAversion(-0.5)
        );
        assert_eq!(atkinson(&[], 0.5).unwrap_err(), Error::Empty);
    }
}
