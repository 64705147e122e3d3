//! Yahoo Finance Adapter
//!
//! Implementation of the HistoryProvider port over the Yahoo Finance v8
//! chart API (`range=max`, daily bars).

mod client;
mod types;

pub use client::{YahooConfig, YahooHistoryProvider};
pub use types::ChartResponse;
