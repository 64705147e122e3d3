//! Price Observations and History
//!
//! A `History` is the validated, immutable daily close series that every
//! analysis in the crate consumes. Construction is the only place the
//! ordering and positivity invariants are checked.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One trading day: the date and its closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub close: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }

    /// Check the close is usable for ratio and log arithmetic
    pub fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// History validation errors
#[derive(Debug, Error, PartialEq)]
pub enum HistoryValidationError {
    #[error("History is empty")]
    Empty,

    #[error("Invalid close {close} on {date}")]
    InvalidClose { date: NaiveDate, close: f64 },

    #[error("Dates not strictly ascending: {previous} followed by {next}")]
    OutOfOrder { previous: NaiveDate, next: NaiveDate },
}

/// Ordered, non-empty daily close history for one instrument
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    observations: Vec<Observation>,
}

impl History {
    /// Build a history, rejecting empty, unordered or non-positive data
    pub fn new(observations: Vec<Observation>) -> Result<Self, HistoryValidationError> {
        if observations.is_empty() {
            return Err(HistoryValidationError::Empty);
        }

        for obs in &observations {
            if !obs.is_valid() {
                return Err(HistoryValidationError::InvalidClose {
                    date: obs.date,
                    close: obs.close,
                });
            }
        }

        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(HistoryValidationError::OutOfOrder {
                    previous: pair[0].date,
                    next: pair[1].date,
                });
            }
        }

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Closing prices in chronological order
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.close).collect()
    }

    pub fn first(&self) -> &Observation {
        // Non-empty by construction
        &self.observations[0]
    }

    pub fn last(&self) -> &Observation {
        &self.observations[self.observations.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
