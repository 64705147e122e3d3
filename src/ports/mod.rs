//! Ports Layer - Trait definitions for external dependencies
//!
//! Following hexagonal architecture, the analyses never talk to a data
//! vendor directly. The `HistoryProvider` port abstracts where the daily
//! close series comes from (Yahoo Finance, a CSV file, memory in tests).

pub mod history;
pub mod mocks;

pub use history::{normalize_observations, HistoryError, HistoryProvider};
pub use mocks::InMemoryHistory;

#[cfg(test)]
pub use history::MockHistoryProvider;
