//! Annualized portfolio metrics.
//!
//! Combines per-asset mean returns and the covariance matrix into the
//! three headline figures: annualized return, annualized volatility and
//! the Sharpe ratio.

use serde::{Deserialize, Serialize};

use crate::analytics::covariance::CovarianceMatrix;
use crate::analytics::returns::ReturnsTable;
use crate::types::PortfolioStats;
use crate::{Error, Result};

/// Annualization and risk-free settings for metric computation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Trading days per year used to scale daily figures
    pub trading_days_per_year: f64,
    /// Annual risk-free rate (e.g., 0.04 for 4%)
    pub risk_free_rate: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: 252.0,
            risk_free_rate: 0.04,
        }
    }
}

/// Compute annualized portfolio statistics from returns and covariance.
///
/// Daily figures scale linearly to annual: return by `trading_days`,
/// volatility by `sqrt(trading_days)`. The Sharpe ratio is the
/// annualized excess return over annualized volatility.
///
/// Weights pair positionally with the table's assets. Beyond the length
/// check they are the caller's contract: weights summing to `s` scale
/// the annual return and volatility by `s` (the variance quadratic form
/// scales by `s^2`), so normalize before calling if fractions of
/// capital are intended. Zero volatility yields a non-finite Sharpe
/// ratio rather than an error.
///
/// # Arguments
///
/// * `weights` - Portfolio weight per asset, in table order
/// * `returns` - Aligned daily return series
/// * `cov` - Covariance matrix estimated from `returns`
/// * `config` - Annualization and risk-free settings
///
/// # Errors
///
/// Returns [`Error::WeightMismatch`] if the weight count differs from
/// the asset count, and [`Error::DimensionMismatch`] if the covariance
/// dimension differs or the table holds no assets.
pub fn portfolio_stats(
    weights: &[f64],
    returns: &ReturnsTable,
    cov: &CovarianceMatrix,
    config: &MetricsConfig,
) -> Result<PortfolioStats> {
    let n = returns.num_assets();

    if weights.len() != n {
        return Err(Error::WeightMismatch {
            weights: weights.len(),
            assets: n,
        });
    }

    if cov.dim() != n {
        return Err(Error::DimensionMismatch(format!(
            "covariance matrix is {}x{} for {n} assets",
            cov.dim(),
            cov.dim()
        )));
    }

    if n == 0 {
        return Err(Error::DimensionMismatch(
            "no assets to analyze".to_string(),
        ));
    }

    // Weighted mean daily return
    let mean_returns = returns.mean_returns();
    let portfolio_return_daily: f64 = weights
        .iter()
        .zip(&mean_returns)
        .map(|(w, r)| w * r)
        .sum();

    let annual_return = portfolio_return_daily * config.trading_days_per_year;

    // Daily portfolio variance: w' * Cov * w
    let mut portfolio_variance_daily = 0.0;
    for i in 0..n {
        for j in 0..n {
            portfolio_variance_daily += weights[i] * weights[j] * cov.get(i, j);
        }
    }

    // Numerical noise can push a tiny variance negative; take the
    // magnitude so the square root stays real.
    let annual_volatility =
        portfolio_variance_daily.abs().sqrt() * config.trading_days_per_year.sqrt();

    let sharpe_ratio = (annual_return - config.risk_free_rate) / annual_volatility;

    Ok(PortfolioStats {
        annual_return,
        annual_volatility,
        sharpe_ratio,
    })
}
