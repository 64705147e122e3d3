//! CLI Arguments
//!
//! Every flag is optional; a bare invocation analyzes NIFTY 50 from Yahoo
//! Finance with the default 20% regime threshold.

use clap::Parser;
use std::path::PathBuf;

/// NIFTY 50 volatility, 5-year return and bull/bear regime report
#[derive(Parser, Debug)]
#[command(
    name = "nifty-regimes",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "NIFTY 50 volatility, 5-year return and bull/bear regime report",
    long_about = "Fetches the full daily close history of an index, scores its current \
                  annualized volatility, summarizes rolling 5-year returns and segments \
                  the history into bull and bear regimes by a drawdown/rally threshold."
)]
pub struct CliApp {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read history from a date,close CSV instead of Yahoo Finance
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Override report output path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Override regime threshold (fraction, 0.20 = 20%)
    #[arg(long, value_name = "FRACTION")]
    pub threshold: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}
