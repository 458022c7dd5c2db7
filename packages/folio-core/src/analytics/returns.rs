//! Daily return series computation.
//!
//! Converts dense price series into simple (arithmetic) daily returns
//! and aligns them across assets for covariance estimation.

use crate::analytics::mean;
use crate::prices::PriceTable;
use crate::{Error, Result};

/// Calculate simple daily returns from a price series.
///
/// Each return is the fractional change between consecutive closes.
/// Fewer than two prices yield an empty series. A zero price produces
/// an infinite or NaN return, which is left to propagate; upstream
/// forward-filling from a leading gap is the usual cause.
///
/// # Arguments
///
/// * `prices` - Price series in chronological order
///
/// # Returns
///
/// Vector of daily returns (length = prices.len() - 1).
///
/// # Example
///
/// ```
/// use folio_core::simple_returns;
///
/// let returns = simple_returns(&[100.0, 110.0, 99.0]);
/// assert!((returns[0] - 0.10).abs() < 1e-12);
/// assert!((returns[1] + 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    if prices.len() < 2 {
        return Vec::new();
    }

    prices
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Aligned daily return series for a set of assets.
///
/// Rows keep the insertion order of the source table, so row `i` pairs
/// with weight `i` and with row/column `i` of the covariance matrix.
/// Construction fails unless every asset has the same number of
/// observations; covariance over ragged series would silently index
/// past the short ones.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnsTable {
    symbols: Vec<String>,
    series: Vec<Vec<f64>>,
}

impl ReturnsTable {
    /// Compute per-asset returns from a price table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataAlignment`] if any asset's return series
    /// differs in length from the first asset's.
    pub fn from_price_table(prices: &PriceTable) -> Result<Self> {
        let mut symbols = Vec::with_capacity(prices.len());
        let mut series = Vec::with_capacity(prices.len());

        for (symbol, closes) in prices.iter() {
            symbols.push(symbol.to_string());
            series.push(simple_returns(closes));
        }

        let table = Self { symbols, series };
        table.check_alignment()?;
        Ok(table)
    }

    /// Build a table from precomputed return series.
    ///
    /// Symbols are uppercased. Useful when returns come from a source
    /// other than daily closes (intraday bars, external feeds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataAlignment`] if the series differ in length.
    pub fn from_series(entries: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let mut symbols = Vec::with_capacity(entries.len());
        let mut series = Vec::with_capacity(entries.len());

        for (symbol, returns) in entries {
            symbols.push(symbol.to_uppercase());
            series.push(returns);
        }

        let table = Self { symbols, series };
        table.check_alignment()?;
        Ok(table)
    }

    fn check_alignment(&self) -> Result<()> {
        let expected = self.observations();
        for (symbol, returns) in self.symbols.iter().zip(&self.series) {
            if returns.len() != expected {
                return Err(Error::DataAlignment {
                    symbol: symbol.clone(),
                    expected,
                    actual: returns.len(),
                });
            }
        }
        Ok(())
    }

    /// Asset symbols in table order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Return series aligned with [`symbols`](Self::symbols).
    pub fn series(&self) -> &[Vec<f64>] {
        &self.series
    }

    /// Number of assets.
    pub fn num_assets(&self) -> usize {
        self.symbols.len()
    }

    /// Number of return observations per asset.
    pub fn observations(&self) -> usize {
        self.series.first().map_or(0, |s| s.len())
    }

    /// Mean daily return per asset, in table order.
    pub fn mean_returns(&self) -> Vec<f64> {
        self.series.iter().map(|s| mean(s)).collect()
    }
}
