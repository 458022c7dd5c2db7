//! Holdings book tracking and persistence.

use crate::types::{Holding, Portfolio};
use crate::{Error, Result};
use chrono::Utc;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Portfolio tracker that manages holdings and persists to JSON.
///
/// Only the portfolio composition is stored; computed analyses are
/// transient and never written.
#[derive(Debug)]
pub struct PortfolioTracker {
    /// Path to the portfolio JSON file
    path: PathBuf,
    /// In-memory portfolio state
    portfolio: Portfolio,
}

impl PortfolioTracker {
    /// Create a new portfolio tracker with the default path.
    ///
    /// Default path: `~/.folio/portfolio.json`
    /// Can be overridden with the `FOLIO_PORTFOLIO_FILE` environment variable.
    pub fn new() -> Self {
        let path = Self::default_path();
        let portfolio = Self::load_from_path(&path).unwrap_or_default();
        Self { path, portfolio }
    }

    /// Create a tracker with a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        let portfolio = Self::load_from_path(&path).unwrap_or_default();
        Self { path, portfolio }
    }

    /// Create an in-memory tracker (no persistence).
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::new(),
            portfolio: Portfolio::default(),
        }
    }

    /// Get the default portfolio file path.
    pub fn default_path() -> PathBuf {
        if let Ok(path) = env::var("FOLIO_PORTFOLIO_FILE") {
            return PathBuf::from(path);
        }

        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".folio/portfolio.json"))
            .unwrap_or_else(|| PathBuf::from("portfolio.json"))
    }

    /// Get the current path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load a portfolio from a specific path.
    fn load_from_path(path: &PathBuf) -> Result<Portfolio> {
        if !path.exists() {
            return Ok(Portfolio::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save the current portfolio to disk.
    pub fn save(&mut self) -> Result<()> {
        // Skip if in-memory only
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Update timestamps
        if self.portfolio.created_at.is_none() {
            self.portfolio.created_at = Some(Utc::now());
        }
        self.portfolio.updated_at = Some(Utc::now());

        let content = serde_json::to_string_pretty(&self.portfolio)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Reload the portfolio from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.portfolio = Self::load_from_path(&self.path)?;
        Ok(())
    }

    /// Get a reference to the current portfolio.
    pub fn get(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Get a mutable reference to the current portfolio.
    pub fn get_mut(&mut self) -> &mut Portfolio {
        &mut self.portfolio
    }

    /// Get all holdings.
    pub fn holdings(&self) -> &[Holding] {
        &self.portfolio.holdings
    }

    /// Find a holding by symbol.
    pub fn find_holding(&self, symbol: &str) -> Option<&Holding> {
        self.portfolio.find(symbol)
    }

    /// Add invested capital to a symbol.
    ///
    /// If a holding for the symbol already exists, the amount is added
    /// to it; otherwise a new holding is appended.
    ///
    /// Returns the resulting holding and whether an existing one was
    /// merged into (true) or a new one created (false).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAmount`] unless `amount > 0`.
    pub fn add_holding(&mut self, symbol: &str, amount: f64) -> Result<(Holding, bool)> {
        if amount.is_nan() || amount <= 0.0 {
            return Err(Error::InvalidAmount(amount));
        }

        let symbol_upper = symbol.to_uppercase();

        if let Some(idx) = self
            .portfolio
            .holdings
            .iter()
            .position(|h| h.symbol == symbol_upper)
        {
            self.portfolio.holdings[idx].amount += amount;
            Ok((self.portfolio.holdings[idx].clone(), true))
        } else {
            let holding = Holding::new(&symbol_upper, amount);
            self.portfolio.holdings.push(holding.clone());
            Ok((holding, false))
        }
    }

    /// Remove a holding from the portfolio.
    ///
    /// Returns the removed holding if found.
    pub fn remove_holding(&mut self, symbol: &str) -> Result<Holding> {
        let symbol_upper = symbol.to_uppercase();

        if let Some(idx) = self
            .portfolio
            .holdings
            .iter()
            .position(|h| h.symbol == symbol_upper)
        {
            Ok(self.portfolio.holdings.remove(idx))
        } else {
            Err(Error::HoldingNotFound(symbol_upper))
        }
    }

    /// Total invested capital across all holdings.
    pub fn total_invested(&self) -> f64 {
        self.portfolio.total_invested()
    }

    /// Clear all holdings.
    pub fn clear_holdings(&mut self) {
        self.portfolio.holdings.clear();
    }
}

impl Default for PortfolioTracker {
    fn default() -> Self {
        Self::new()
    }
}
