//! History Provider Port
//!
//! Source of the daily close series. Implementations return the maximal
//! available history for a symbol, ascending by date; an empty vector is a
//! valid answer and means "nothing to analyze".

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Observation;

/// History provider error type
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Upstream API error: {0}")]
    ApiError(String),

    #[error("Data parsing error: {0}")]
    ParseError(String),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Daily close history source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch the full daily close history for `symbol`
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<Observation>, HistoryError>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Sort ascending and keep the last entry for each date
///
/// Provider feeds occasionally repeat the final session (intraday snapshot
/// followed by the settled close).
pub fn normalize_observations(mut observations: Vec<Observation>) -> Vec<Observation> {
    observations.sort_by_key(|o| o.date);

    let mut normalized: Vec<Observation> = Vec::with_capacity(observations.len());
    for obs in observations {
        match normalized.last_mut() {
            Some(last) if last.date == obs.date => *last = obs,
            _ => normalized.push(obs),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn obs(day: u32, close: f64) -> Observation {
        Observation::new(NaiveDate::from_ymd_opt(2024, 5, day).unwrap(), close)
    }

    #[test]
    fn test_normalize_sorts_and_dedupes() {
        let normalized = normalize_observations(vec![
            obs(3, 30.0),
            obs(1, 10.0),
            obs(2, 20.0),
            obs(3, 31.0),
        ]);

        assert_eq!(normalized, vec![obs(1, 10.0), obs(2, 20.0), obs(3, 31.0)]);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize_observations(Vec::new()).is_empty());
    }
}
