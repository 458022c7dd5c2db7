//! Sample covariance estimation across asset return series.

use crate::analytics::returns::ReturnsTable;
use crate::{Error, Result};

/// Dense symmetric covariance matrix over a set of assets.
///
/// Row and column `i` correspond to asset `i` of the returns table the
/// matrix was estimated from.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceMatrix {
    data: Vec<Vec<f64>>,
}

impl CovarianceMatrix {
    /// Build a matrix from row vectors, checking that it is square.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if any row's length differs
    /// from the number of rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(Error::DimensionMismatch(format!(
                    "covariance row {i} has {} columns for {n} assets",
                    row.len()
                )));
            }
        }
        Ok(Self { data: rows })
    }

    /// Entry at row `i`, column `j`. Panics if out of range.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    /// Variance of asset `i` (the diagonal entry).
    pub fn variance(&self, i: usize) -> f64 {
        self.data[i][i]
    }

    /// Number of assets (matrix dimension).
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix is zero-dimensional.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Matrix rows, outer index = asset.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.data
    }
}

/// Deviation from the mean, with NaN squashed to zero.
///
/// A NaN observation poisons its series mean, which would otherwise
/// turn the whole matrix into NaN. Zeroing the deviation drops the bad
/// observation from every product it appears in instead.
fn deviation(value: f64, mean: f64) -> f64 {
    let dev = value - mean;
    if dev.is_nan() {
        0.0
    } else {
        dev
    }
}

/// Estimate the unbiased sample covariance matrix of a returns table.
///
/// Uses the Bessel-corrected estimator: deviation products summed over
/// the observations and divided by `m - 1`. With one observation every
/// entry is NaN (a variance from a single point is undefined); with
/// zero observations entries are zero.
///
/// # Arguments
///
/// * `returns` - Aligned return series, one row per asset
///
/// # Returns
///
/// A `dim = num_assets` symmetric matrix in table order.
pub fn covariance_matrix(returns: &ReturnsTable) -> CovarianceMatrix {
    let n = returns.num_assets();
    let m = returns.observations();
    let series = returns.series();
    let means = returns.mean_returns();
    let denom = m as f64 - 1.0;

    let mut data = vec![vec![0.0; n]; n];
    for i in 0..n {
        // Upper triangle only; the mirror write fills the rest.
        for j in i..n {
            let sum: f64 = (0..m)
                .map(|k| deviation(series[i][k], means[i]) * deviation(series[j][k], means[j]))
                .sum();
            let value = sum / denom;
            data[i][j] = value;
            data[j][i] = value;
        }
    }

    CovarianceMatrix { data }
}
