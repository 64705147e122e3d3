//! Volatility Scorer
//!
//! Reduces the log-return series to one annualized volatility figure and a
//! 0-1 calmness score:
//!
//! - rolling vol  = std(log_returns[window]) * sqrt(trading_days)
//! - score        = 1 - (current - min) / (max - min), clamped to [0, 1]
//!
//! Low volatility relative to the series' own range scores high. When the
//! history is shorter than one window the whole-series volatility is used and
//! the bounds are synthesized at 0.5x and 1.5x of it.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use super::params::{AnalysisError, AnalysisParams};
use crate::domain::History;

/// Score above which the market is labelled stable
pub const STABLE_SCORE: f64 = 0.7;
/// Score below which the market is labelled risky
pub const RISKY_SCORE: f64 = 0.3;

/// Score returned when the normalization range collapses
const DEGENERATE_SCORE: f64 = 0.5;

/// Qualitative volatility band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolatilityLabel {
    Stable,
    Moderate,
    Risky,
}

impl VolatilityLabel {
    pub fn from_score(score: f64) -> Self {
        if score > STABLE_SCORE {
            Self::Stable
        } else if score < RISKY_SCORE {
            Self::Risky
        } else {
            Self::Moderate
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Stable => "(Market is relatively Stable/Calm)",
            Self::Moderate => "(Market volatility is Moderate)",
            Self::Risky => "(Market is Highly Volatile/Risky)",
        }
    }
}

/// Output of the volatility scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityResult {
    /// Current annualized volatility
    pub current: f64,
    /// Lower normalization bound
    pub min: f64,
    /// Upper normalization bound
    pub max: f64,
    /// Calmness score in [0, 1]
    pub score: f64,
    /// True when the history was too short for a full rolling window
    pub fallback: bool,
}

impl VolatilityResult {
    pub fn label(&self) -> VolatilityLabel {
        VolatilityLabel::from_score(self.score)
    }
}

/// Rolling-window volatility scorer
#[derive(Debug, Clone)]
pub struct VolatilityScorer {
    window: usize,
    annualization: f64,
}

impl VolatilityScorer {
    pub fn new(window: usize, trading_days_per_year: usize) -> Self {
        Self {
            window,
            annualization: (trading_days_per_year as f64).sqrt(),
        }
    }

    pub fn from_params(params: &AnalysisParams) -> Self {
        Self::new(params.volatility_window, params.trading_days_per_year)
    }

    /// Score the history's current volatility against its own range
    pub fn score(&self, history: &History) -> Result<VolatilityResult, AnalysisError> {
        if history.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                required: 2,
                actual: history.len(),
            });
        }

        let returns = log_returns(&history.closes());
        let rolling = self.rolling_volatility(&returns);

        let (current, min, max, fallback) = match rolling.last() {
            Some(&current) => {
                let min = rolling.iter().copied().fold(f64::INFINITY, f64::min);
                let max = rolling.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                (current, min, max, false)
            }
            None => {
                let current = sample_std(&returns) * self.annualization;
                (current, current * 0.5, current * 1.5, true)
            }
        };

        let score = normalized_score(current, min, max);

        tracing::debug!(
            current,
            min,
            max,
            score,
            fallback,
            rolling_points = rolling.len(),
            "Volatility scored"
        );

        Ok(VolatilityResult {
            current,
            min,
            max,
            score,
            fallback,
        })
    }

    /// Annualized volatility for every full window of returns
    ///
    /// Entry `k` covers `returns[k..k + window]`; empty when there are fewer
    /// returns than the window.
    pub fn rolling_volatility(&self, returns: &[f64]) -> Vec<f64> {
        if self.window == 0 || returns.len() < self.window {
            return Vec::new();
        }
        returns
            .windows(self.window)
            .map(|w| sample_std(w) * self.annualization)
            .collect()
    }
}

impl Default for VolatilityScorer {
    fn default() -> Self {
        Self::from_params(&AnalysisParams::default())
    }
}

/// Step log returns `ln(p_t / p_{t-1})`
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|p| (p[1] / p[0]).ln()).collect()
}

/// Sample standard deviation; zero below two samples
fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.std_dev()
}

/// Map `current` into [0, 1], inverted so low volatility scores high
fn normalized_score(current: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return DEGENERATE_SCORE;
    }
    let normalized = (current - min) / (max - min);
    (1.0 - normalized).clamp(0.0, 1.0)
}
