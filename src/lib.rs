//! NIFTY Regimes - Index History Analysis Library
//!
//! Descriptive statistics over the daily close history of one market index:
//! annualized volatility scored 0-1, rolling 5-year returns, and a bull/bear
//! regime segmentation by a 20% drawdown/rally threshold.
//!
//! # Modules
//!
//! - `domain`: Core types (Observation, History, Regime)
//! - `ports`: Trait abstractions (HistoryProvider)
//! - `analysis`: Volatility scorer, trailing-return analyzer, regime segmenter
//! - `report`: Text report rendering and output file
//! - `adapters`: External implementations (Yahoo Finance, CSV, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Orchestrator for one analysis run

pub mod domain;
pub mod ports;
pub mod analysis;
pub mod report;
pub mod adapters;
pub mod config;
pub mod application;
