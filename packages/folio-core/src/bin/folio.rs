//! Folio CLI - command line interface for portfolio analytics.
//!
//! This binary provides JSON output for integration with the UI bridge.
//! Every command prints one `ApiResponse` envelope on stdout; log output
//! goes to stderr so stdout stays machine-readable.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::{
    covariance_matrix, portfolio_stats, AnalysisReport, ApiResponse, MetricsConfig,
    PortfolioTracker, PriceHistory, PriceTable, ReturnsTable,
};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Folio CLI - holdings management and portfolio analytics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio management commands
    Portfolio {
        #[command(subcommand)]
        action: PortfolioAction,
    },
    /// Analyze portfolio risk and return from a price history file
    Analyze {
        /// Path to a JSON array of per-symbol price histories
        #[arg(long)]
        prices: PathBuf,
        /// Trading days per year for annualization
        #[arg(long, default_value = "252")]
        trading_days: f64,
        /// Annual risk-free rate (0.04 = 4%)
        #[arg(long, default_value = "0.04")]
        risk_free: f64,
    },
}

#[derive(Subcommand)]
enum PortfolioAction {
    /// Get portfolio status
    Status,
    /// Add invested capital to a symbol
    Add {
        /// Stock symbol
        #[arg(short, long)]
        symbol: String,
        /// Amount invested in dollars
        #[arg(short, long)]
        amount: f64,
    },
    /// Remove a holding
    Remove {
        /// Stock symbol
        #[arg(short, long)]
        symbol: String,
    },
    /// Remove all holdings
    Clear,
}

fn main() {
    // Initialize logging to stderr; stdout carries only the envelope
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match cli.command {
        Commands::Portfolio { action } => handle_portfolio(action),
        Commands::Analyze {
            prices,
            trading_days,
            risk_free,
        } => handle_analyze(&prices, trading_days, risk_free),
    };

    println!("{}", output);
}

fn handle_portfolio(action: PortfolioAction) -> String {
    let mut tracker = PortfolioTracker::new();

    match action {
        PortfolioAction::Status => {
            let portfolio = tracker.get();
            serde_json::to_string_pretty(&ApiResponse::ok(json!({
                "holdings": portfolio.holdings,
                "holding_count": portfolio.holding_count(),
                "total_invested": portfolio.total_invested(),
                "weights": portfolio.weights(),
                "updated_at": portfolio.updated_at,
            })))
            .unwrap()
        }
        PortfolioAction::Add { symbol, amount } => match tracker.add_holding(&symbol, amount) {
            Ok((holding, merged)) => {
                if let Err(e) = tracker.save() {
                    return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))
                        .unwrap();
                }
                serde_json::to_string_pretty(&ApiResponse::ok(json!({
                    "holding": holding,
                    "action": if merged { "merged" } else { "added" },
                    "total_invested": tracker.total_invested(),
                })))
                .unwrap()
            }
            Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
        },
        PortfolioAction::Remove { symbol } => match tracker.remove_holding(&symbol) {
            Ok(removed) => {
                if let Err(e) = tracker.save() {
                    return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))
                        .unwrap();
                }
                serde_json::to_string_pretty(&ApiResponse::ok(json!({
                    "removed": removed,
                    "total_invested": tracker.total_invested(),
                })))
                .unwrap()
            }
            Err(e) => serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap(),
        },
        PortfolioAction::Clear => {
            tracker.clear_holdings();
            if let Err(e) = tracker.save() {
                return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string()))
                    .unwrap();
            }
            serde_json::to_string_pretty(&ApiResponse::ok(json!({
                "holdings": tracker.holdings(),
                "holding_count": 0,
            })))
            .unwrap()
        }
    }
}

fn handle_analyze(prices_path: &Path, trading_days: f64, risk_free: f64) -> String {
    let tracker = PortfolioTracker::new();

    let histories: Vec<PriceHistory> = match read_histories(prices_path) {
        Ok(histories) => histories,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    tracing::debug!(
        "loaded {} price histories from {}",
        histories.len(),
        prices_path.display()
    );

    // The payload's ordering fixes the asset ordering everywhere below
    let table = PriceTable::from_histories(&histories);

    let weights = match tracker.get().weights_for(table.symbols()) {
        Ok(weights) => weights,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    let config = MetricsConfig {
        trading_days_per_year: trading_days,
        risk_free_rate: risk_free,
    };

    let returns = match ReturnsTable::from_price_table(&table) {
        Ok(returns) => returns,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    let cov = covariance_matrix(&returns);

    let stats = match portfolio_stats(&weights, &returns, &cov, &config) {
        Ok(stats) => stats,
        Err(e) => {
            return serde_json::to_string_pretty(&ApiResponse::<()>::err(e.to_string())).unwrap()
        }
    };

    tracing::debug!(
        "analyzed {} assets over {} observations",
        returns.num_assets(),
        returns.observations()
    );

    let report = AnalysisReport::new(
        table.symbols().to_vec(),
        weights,
        returns.observations(),
        trading_days,
        risk_free,
        &stats,
    );

    // Non-finite stats serialize as null, matching the bridge contract
    serde_json::to_string_pretty(&ApiResponse::ok(report)).unwrap()
}

fn read_histories(path: &Path) -> folio_core::Result<Vec<PriceHistory>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
