//! Core data types for the Folio portfolio analyzer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A holding in the portfolio: capital committed to one ticker symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Holding {
    /// Stock or ETF ticker symbol (uppercase)
    pub symbol: String,
    /// Invested amount in dollars
    pub amount: f64,
}

impl Holding {
    /// Create a new holding with the given symbol and invested amount.
    pub fn new(symbol: &str, amount: f64) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            amount,
        }
    }
}

/// A hypothetical portfolio: the set of holdings being analyzed.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Portfolio {
    /// List of holdings
    pub holdings: Vec<Holding>,
    /// When the portfolio was created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// When the portfolio was last updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Portfolio {
    /// Create a new empty portfolio.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total invested capital across all holdings.
    pub fn total_invested(&self) -> f64 {
        self.holdings.iter().map(|h| h.amount).sum()
    }

    /// Get the number of holdings.
    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }

    /// Find a holding by symbol (case insensitive).
    pub fn find(&self, symbol: &str) -> Option<&Holding> {
        let symbol_upper = symbol.to_uppercase();
        self.holdings.iter().find(|h| h.symbol == symbol_upper)
    }

    /// Fraction of total invested capital held in each asset.
    ///
    /// Returns `(symbol, weight)` pairs in holding order; the weights sum
    /// to 1. Empty when nothing is invested.
    pub fn weights(&self) -> Vec<(String, f64)> {
        let total = self.total_invested();
        if total <= 0.0 {
            return Vec::new();
        }

        self.holdings
            .iter()
            .map(|h| (h.symbol.clone(), h.amount / total))
            .collect()
    }

    /// Positional weights for an explicit symbol ordering.
    ///
    /// Normalizes over the listed symbols only, so the result sums to 1
    /// even when the portfolio holds assets outside the list. Useful
    /// when a price payload fixes the asset ordering.
    ///
    /// Holdings created through the tracker always have positive
    /// amounts. If hand-edited state zeroes every listed amount, the
    /// weights come out NaN (0/0) and flow through like the other
    /// degenerate numerics.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HoldingNotFound`] for a symbol with no holding.
    pub fn weights_for(&self, symbols: &[String]) -> Result<Vec<f64>> {
        let mut amounts = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let holding = self
                .find(symbol)
                .ok_or_else(|| Error::HoldingNotFound(symbol.to_uppercase()))?;
            amounts.push(holding.amount);
        }

        let total: f64 = amounts.iter().sum();
        Ok(amounts.into_iter().map(|a| a / total).collect())
    }
}

/// Risk/return profile of a portfolio over the analyzed price history.
///
/// All three figures are annualized, dimensionless fractions (0.05 = 5%).
/// Degenerate inputs (zero variance, no observations) surface as IEEE
/// special values in `sharpe_ratio` rather than errors; consumers decide
/// how to render them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioStats {
    /// Annualized portfolio return
    pub annual_return: f64,
    /// Annualized portfolio volatility
    pub annual_volatility: f64,
    /// Annualized Sharpe ratio (non-finite when volatility is zero)
    pub sharpe_ratio: f64,
}

impl PortfolioStats {
    /// Annualized return as a percentage. UIs render this to two decimals.
    pub fn annual_return_percent(&self) -> f64 {
        self.annual_return * 100.0
    }

    /// Annualized volatility as a percentage. UIs render this to two decimals.
    pub fn annual_volatility_percent(&self) -> f64 {
        self.annual_volatility * 100.0
    }
}

/// Flattened analysis result handed to UI layers over the JSON bridge.
///
/// Carries the computed stats next to their percent renderings plus an
/// echo of the inputs that produced them. Transient: printed, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Symbols in covariance ordering
    pub symbols: Vec<String>,
    /// Weights aligned with `symbols`
    pub weights: Vec<f64>,
    /// Number of return observations per asset
    pub observations: usize,
    /// Trading days used for annualization
    pub trading_days_per_year: f64,
    /// Annualized risk-free rate used for the Sharpe ratio
    pub risk_free_rate: f64,
    /// Annualized portfolio return
    pub annual_return: f64,
    /// Annualized portfolio return percentage
    pub annual_return_percent: f64,
    /// Annualized portfolio volatility
    pub annual_volatility: f64,
    /// Annualized portfolio volatility percentage
    pub annual_volatility_percent: f64,
    /// Annualized Sharpe ratio
    pub sharpe_ratio: f64,
    /// When the analysis was computed
    pub computed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Build a report from computed stats and the inputs that produced them.
    pub fn new(
        symbols: Vec<String>,
        weights: Vec<f64>,
        observations: usize,
        trading_days_per_year: f64,
        risk_free_rate: f64,
        stats: &PortfolioStats,
    ) -> Self {
        Self {
            symbols,
            weights,
            observations,
            trading_days_per_year,
            risk_free_rate,
            annual_return: stats.annual_return,
            annual_return_percent: stats.annual_return_percent(),
            annual_volatility: stats.annual_volatility,
            annual_volatility_percent: stats.annual_volatility_percent(),
            sharpe_ratio: stats.sharpe_ratio,
            computed_at: Utc::now(),
        }
    }
}

/// JSON envelope printed by the CLI for the UI bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holding_new() {
        let holding = Holding::new("vti", 5000.0);
        assert_eq!(holding.symbol, "VTI");
        assert_eq!(holding.amount, 5000.0);
    }

    #[test]
    fn test_portfolio_total_invested() {
        let mut portfolio = Portfolio::new();
        portfolio.holdings.push(Holding::new("VTI", 6000.0));
        portfolio.holdings.push(Holding::new("BND", 4000.0));

        assert_eq!(portfolio.total_invested(), 10000.0);
        assert_eq!(portfolio.holding_count(), 2);
    }

    #[test]
    fn test_portfolio_find_case_insensitive() {
        let mut portfolio = Portfolio::new();
        portfolio.holdings.push(Holding::new("VTI", 6000.0));

        assert!(portfolio.find("vti").is_some());
        assert!(portfolio.find("VTI").is_some());
        assert!(portfolio.find("BND").is_none());
    }

    #[test]
    fn test_portfolio_weights() {
        let mut portfolio = Portfolio::new();
        portfolio.holdings.push(Holding::new("VTI", 6000.0));
        portfolio.holdings.push(Holding::new("BND", 4000.0));

        let weights = portfolio.weights();
        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0], ("VTI".to_string(), 0.6));
        assert_eq!(weights[1], ("BND".to_string(), 0.4));

        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_portfolio_weights_empty() {
        let portfolio = Portfolio::new();
        assert!(portfolio.weights().is_empty());
    }

    #[test]
    fn test_portfolio_weights_for_ordering() {
        let mut portfolio = Portfolio::new();
        portfolio.holdings.push(Holding::new("VTI", 6000.0));
        portfolio.holdings.push(Holding::new("BND", 4000.0));
        portfolio.holdings.push(Holding::new("QQQ", 10000.0));

        // Caller's ordering wins, normalized over the listed subset.
        let weights = portfolio
            .weights_for(&["bnd".to_string(), "vti".to_string()])
            .unwrap();
        assert_eq!(weights, vec![0.4, 0.6]);

        let err = portfolio.weights_for(&["SPY".to_string()]).unwrap_err();
        assert!(matches!(err, Error::HoldingNotFound(_)));

        assert!(portfolio.weights_for(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_portfolio_weights_for_zero_amounts_are_nan() {
        // Zero amounts only enter through hand-edited state; the 0/0
        // division flows through as NaN rather than erroring or
        // shortening the vector.
        let mut portfolio = Portfolio::new();
        portfolio.holdings.push(Holding::new("VTI", 0.0));
        portfolio.holdings.push(Holding::new("BND", 0.0));

        let weights = portfolio
            .weights_for(&["VTI".to_string(), "BND".to_string()])
            .unwrap();
        assert_eq!(weights.len(), 2);
        assert!(weights.iter().all(|w| w.is_nan()));
    }

    #[test]
    fn test_stats_percent_accessors() {
        let stats = PortfolioStats {
            annual_return: 0.3528,
            annual_volatility: 0.1359,
            sharpe_ratio: 2.3,
        };

        assert!((stats.annual_return_percent() - 35.28).abs() < 1e-12);
        assert!((stats.annual_volatility_percent() - 13.59).abs() < 1e-12);
    }

    #[test]
    fn test_analysis_report_flattens_stats() {
        let stats = PortfolioStats {
            annual_return: 0.10,
            annual_volatility: 0.20,
            sharpe_ratio: 0.30,
        };
        let report = AnalysisReport::new(
            vec!["VTI".to_string()],
            vec![1.0],
            251,
            252.0,
            0.04,
            &stats,
        );

        assert_eq!(report.annual_return, 0.10);
        assert!((report.annual_return_percent - 10.0).abs() < 1e-12);
        assert!((report.annual_volatility_percent - 20.0).abs() < 1e-12);
        assert_eq!(report.observations, 251);
    }

    #[test]
    fn test_api_response() {
        let response: ApiResponse<String> = ApiResponse::ok("test".to_string());
        assert!(response.ok);
        assert_eq!(response.data, Some("test".to_string()));

        let err_response: ApiResponse<String> = ApiResponse::err("error");
        assert!(!err_response.ok);
        assert_eq!(err_response.error, Some("error".to_string()));
    }

    #[test]
    fn test_non_finite_stats_serialize_as_null() {
        // Degenerate portfolios produce non-finite figures; on the wire
        // they render as JSON null, never as a panic or a string.
        let stats = PortfolioStats {
            annual_return: f64::NAN,
            annual_volatility: f64::NAN,
            sharpe_ratio: f64::NAN,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"annual_return":null,"annual_volatility":null,"sharpe_ratio":null}"#
        );

        // Same through the envelope: zero volatility gives -Inf Sharpe.
        let stats = PortfolioStats {
            annual_return: 0.0,
            annual_volatility: 0.0,
            sharpe_ratio: f64::NEG_INFINITY,
        };
        let report = AnalysisReport::new(
            vec!["FLAT".to_string()],
            vec![1.0],
            2,
            252.0,
            0.04,
            &stats,
        );
        let json = serde_json::to_string(&ApiResponse::ok(report)).unwrap();
        assert!(json.contains(r#""ok":true"#));
        assert!(json.contains(r#""sharpe_ratio":null"#));
        assert!(json.contains(r#""annual_volatility":0.0"#));
    }
}
