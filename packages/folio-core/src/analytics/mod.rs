//! Portfolio analytics pipeline.
//!
//! Prices flow through three stages:
//!
//! - **Returns**: daily simple returns per asset
//! - **Covariance**: unbiased sample covariance across assets
//! - **Metrics**: annualized return, volatility and Sharpe ratio
//!
//! [`compute_portfolio_stats`] runs the whole pipeline; each stage is
//! also exported for callers that want the intermediate tables.

mod covariance;
mod metrics;
mod returns;

pub use covariance::{covariance_matrix, CovarianceMatrix};
pub use metrics::{portfolio_stats, MetricsConfig};
pub use returns::{simple_returns, ReturnsTable};

use crate::prices::PriceTable;
use crate::types::PortfolioStats;
use crate::Result;

/// Arithmetic mean of a slice. NaN for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute annualized portfolio statistics from raw prices.
///
/// Runs the full pipeline: returns per asset, sample covariance across
/// assets, then weighted annualized metrics. Weights pair with symbols
/// in table insertion order and are expected to sum to 1; scaled
/// weights scale the results rather than erroring.
///
/// # Arguments
///
/// * `weights` - Portfolio weight per asset, aligned with table order
/// * `prices` - Dense price series per symbol
/// * `config` - Annualization and risk-free settings
///
/// # Errors
///
/// Fails if the series are misaligned, the weight count does not match
/// the asset count, or the table is empty.
pub fn compute_portfolio_stats(
    weights: &[f64],
    prices: &PriceTable,
    config: &MetricsConfig,
) -> Result<PortfolioStats> {
    let returns = ReturnsTable::from_price_table(prices)?;
    let cov = covariance_matrix(&returns);
    portfolio_stats(weights, &returns, &cov, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> PriceTable {
        let mut prices = PriceTable::new();
        prices.insert("VTI", vec![100.0, 101.0, 100.5, 102.0]);
        prices.insert("BND", vec![72.0, 72.1, 72.0, 72.2]);
        prices
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let prices = sample_table();
        let stats =
            compute_portfolio_stats(&[0.6, 0.4], &prices, &MetricsConfig::default()).unwrap();

        assert!(stats.annual_return.is_finite());
        assert!(stats.annual_volatility >= 0.0);
        assert!(stats.sharpe_ratio.is_finite());
    }

    #[test]
    fn test_pipeline_matches_staged_calls() {
        let prices = sample_table();
        let config = MetricsConfig::default();
        let weights = [0.6, 0.4];

        let direct = compute_portfolio_stats(&weights, &prices, &config).unwrap();

        let returns = ReturnsTable::from_price_table(&prices).unwrap();
        let cov = covariance_matrix(&returns);
        let staged = portfolio_stats(&weights, &returns, &cov, &config).unwrap();

        // Bit-for-bit: the convenience wrapper adds no arithmetic of its own.
        assert_eq!(direct.annual_return.to_bits(), staged.annual_return.to_bits());
        assert_eq!(
            direct.annual_volatility.to_bits(),
            staged.annual_volatility.to_bits()
        );
        assert_eq!(direct.sharpe_ratio.to_bits(), staged.sharpe_ratio.to_bits());
    }

    #[test]
    fn test_pipeline_rejects_wrong_weight_count() {
        let prices = sample_table();
        let result = compute_portfolio_stats(&[1.0], &prices, &MetricsConfig::default());
        assert!(result.is_err());
    }
}
