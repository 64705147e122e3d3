//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Yahoo: Finance chart API history provider
//! - CSV: offline history files
//! - CLI: Command-line interface arguments

pub mod yahoo;
pub mod csv_file;
pub mod cli;

pub use yahoo::{YahooConfig, YahooHistoryProvider};
pub use csv_file::CsvHistoryProvider;
pub use cli::CliApp;
