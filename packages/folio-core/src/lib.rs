//! Folio Core - Portfolio risk and return analytics.
//!
//! This crate is the quantitative core of the Folio portfolio analyzer:
//!
//! - **Holdings book**: dollar-amount positions with JSON persistence
//! - **Price preparation**: forward-filling of gapped daily closes
//! - **Return series**: daily simple returns, aligned across assets
//! - **Covariance estimation**: unbiased sample covariance matrix
//! - **Portfolio metrics**: annualized return, volatility, Sharpe ratio
//!
//! The analytics pipeline is a pure function of an in-memory price
//! snapshot: price history in, [`PortfolioStats`] out. Nothing is cached
//! or mutated between calls; fetching and date-aligning the prices is
//! the caller's job.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{compute_portfolio_stats, MetricsConfig, PriceTable};
//!
//! let mut prices = PriceTable::new();
//! prices.insert("VTI", vec![220.0, 222.2, 221.1, 223.3]);
//! prices.insert("BND", vec![72.0, 72.1, 72.3, 72.2]);
//!
//! let stats = compute_portfolio_stats(&[0.7, 0.3], &prices, &MetricsConfig::default())?;
//! assert!(stats.annual_volatility >= 0.0);
//! # Ok::<(), folio_core::Error>(())
//! ```

pub mod analytics;
pub mod portfolio;
pub mod prices;
pub mod types;

// Re-export commonly used types
pub use types::{AnalysisReport, ApiResponse, Holding, Portfolio, PortfolioStats};

// Re-export main functionality
pub use analytics::{
    compute_portfolio_stats, covariance_matrix, portfolio_stats, simple_returns,
    CovarianceMatrix, MetricsConfig, ReturnsTable,
};
pub use portfolio::PortfolioTracker;
pub use prices::{forward_fill, PriceBar, PriceHistory, PriceTable};

/// Error types for folio-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Misaligned return series for {symbol}: expected {expected} observations, got {actual}")]
    DataAlignment {
        symbol: String,
        expected: usize,
        actual: usize,
    },

    #[error("Weight vector has {weights} entries for {assets} assets")]
    WeightMismatch { weights: usize, assets: usize },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),

    #[error("Amount invested must be greater than zero, got {0}")]
    InvalidAmount(f64),
}

/// Result type for folio-core operations.
pub type Result<T> = std::result::Result<T, Error>;
