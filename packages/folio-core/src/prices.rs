//! Price history preparation.
//!
//! Raw daily bars arrive with gaps: market holidays and feed hiccups
//! leave `close` missing. Analytics want a dense series per symbol, so
//! bars are forward-filled into plain `Vec<f64>` closes and collected
//! into a [`PriceTable`] keyed by symbol in insertion order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily price bar as it arrives from a data feed.
///
/// Both fields are optional: feeds emit bars with a date but no close on
/// non-trading days, and some omit fields entirely.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PriceBar {
    /// Trading date (`YYYY-MM-DD` on the wire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Closing price, if one was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
}

/// Daily price history for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Ticker symbol
    pub symbol: String,
    /// Daily bars in chronological order
    pub bars: Vec<PriceBar>,
}

/// Forward-fill missing closes into a dense price series.
///
/// Bars without a close repeat the most recent recorded close. Bars
/// before the first recorded close fill with `0.0`, so a leading gap
/// produces zero prices (and infinite returns downstream); callers
/// should trim histories to their listing date.
///
/// # Arguments
///
/// * `bars` - Daily bars in chronological order
///
/// # Example
///
/// ```
/// use folio_core::{forward_fill, PriceBar};
///
/// let bars = vec![
///     PriceBar { date: None, close: Some(100.0) },
///     PriceBar { date: None, close: None },
///     PriceBar { date: None, close: Some(102.0) },
/// ];
/// assert_eq!(forward_fill(&bars), vec![100.0, 100.0, 102.0]);
/// ```
pub fn forward_fill(bars: &[PriceBar]) -> Vec<f64> {
    let mut last_valid = 0.0;
    bars.iter()
        .map(|bar| {
            if let Some(close) = bar.close {
                last_valid = close;
            }
            last_valid
        })
        .collect()
}

/// Dense price series for a set of symbols, in insertion order.
///
/// Insertion order is load-bearing: it fixes the row/column ordering of
/// the covariance matrix and the index each weight pairs with. A plain
/// map would lose it, so the table keeps parallel vectors instead. On
/// the wire, price data travels as an ordered `Vec<PriceHistory>`.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    symbols: Vec<String>,
    series: Vec<Vec<f64>>,
}

impl PriceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table by forward-filling each history, preserving order.
    pub fn from_histories(histories: &[PriceHistory]) -> Self {
        let mut table = Self::new();
        for history in histories {
            table.insert(&history.symbol, forward_fill(&history.bars));
        }
        table
    }

    /// Insert a dense price series for a symbol.
    ///
    /// Symbols are uppercased. Inserting an existing symbol replaces its
    /// series in place without changing its position.
    pub fn insert(&mut self, symbol: &str, closes: Vec<f64>) {
        let symbol_upper = symbol.to_uppercase();
        if let Some(idx) = self.symbols.iter().position(|s| *s == symbol_upper) {
            self.series[idx] = closes;
        } else {
            self.symbols.push(symbol_upper);
            self.series.push(closes);
        }
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Price series aligned with [`symbols`](Self::symbols).
    pub fn series(&self) -> &[Vec<f64>] {
        &self.series
    }

    /// Look up the price series for a symbol (case insensitive).
    pub fn get(&self, symbol: &str) -> Option<&[f64]> {
        let symbol_upper = symbol.to_uppercase();
        self.symbols
            .iter()
            .position(|s| *s == symbol_upper)
            .map(|idx| self.series[idx].as_slice())
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over `(symbol, series)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.symbols
            .iter()
            .map(|s| s.as_str())
            .zip(self.series.iter().map(|v| v.as_slice()))
    }
}
