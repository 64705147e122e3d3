//! Trailing-Return Analyzer
//!
//! Rolling N-period simple returns `close[i] / close[i - N] - 1`, summarized
//! into latest / average / best / worst. Anything the history is too short to
//! define is `None` rather than an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::params::AnalysisParams;
use crate::domain::History;

/// Extreme trailing return and the date its window ends on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowExtreme {
    pub value: f64,
    pub end_date: NaiveDate,
}

/// Summary of the trailing return series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStats {
    /// Return of the window ending on the last observation
    pub latest: Option<f64>,
    /// Mean of all defined windows
    pub average: Option<f64>,
    pub best: Option<WindowExtreme>,
    pub worst: Option<WindowExtreme>,
    /// Number of defined windows
    pub window_count: usize,
}

impl ReturnStats {
    pub fn is_defined(&self) -> bool {
        self.window_count > 0
    }
}

/// Trailing-N return analyzer
#[derive(Debug, Clone)]
pub struct TrailingReturnAnalyzer {
    window: usize,
}

impl TrailingReturnAnalyzer {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn from_params(params: &AnalysisParams) -> Self {
        Self::new(params.trailing_return_window)
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Trailing returns paired with their window end dates
    pub fn trailing_returns(&self, history: &History) -> Vec<(NaiveDate, f64)> {
        let observations = history.observations();
        if self.window == 0 || observations.len() <= self.window {
            return Vec::new();
        }
        observations
            .iter()
            .zip(&observations[self.window..])
            .map(|(start, end)| (end.date, end.close / start.close - 1.0))
            .collect()
    }

    pub fn analyze(&self, history: &History) -> ReturnStats {
        let returns = self.trailing_returns(history);
        if returns.is_empty() {
            tracing::info!(
                observations = history.len(),
                window = self.window,
                "Not enough history for trailing returns"
            );
            return ReturnStats {
                latest: None,
                average: None,
                best: None,
                worst: None,
                window_count: 0,
            };
        }

        let mut best = WindowExtreme { value: returns[0].1, end_date: returns[0].0 };
        let mut worst = best;
        let mut sum = 0.0;

        for &(end_date, value) in &returns {
            sum += value;
            // Strict comparisons keep the earliest window on ties
            if value > best.value {
                best = WindowExtreme { value, end_date };
            }
            if value < worst.value {
                worst = WindowExtreme { value, end_date };
            }
        }

        let stats = ReturnStats {
            latest: returns.last().map(|&(_, v)| v),
            average: Some(sum / returns.len() as f64),
            best: Some(best),
            worst: Some(worst),
            window_count: returns.len(),
        };

        tracing::debug!(
            windows = stats.window_count,
            best = best.value,
            worst = worst.value,
            "Trailing returns analyzed"
        );

        stats
    }
}

impl Default for TrailingReturnAnalyzer {
    fn default() -> Self {
        Self::from_params(&AnalysisParams::default())
    }
}
