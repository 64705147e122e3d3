//! Analysis Parameters
//!
//! Window sizes and the regime threshold shared by every analysis.
//! The defaults reproduce the classic daily-index setup: one trading year of
//! 252 sessions, five of them for the trailing return, and a 20% move to
//! flip between bull and bear.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default regime drawdown/rally threshold (20%)
pub const DEFAULT_REGIME_THRESHOLD: f64 = 0.20;
/// Default rolling volatility window (one trading year)
pub const DEFAULT_VOLATILITY_WINDOW: usize = 252;
/// Trading days used to annualize daily volatility
pub const DEFAULT_TRADING_DAYS_PER_YEAR: usize = 252;
/// Default trailing return window (five trading years)
pub const DEFAULT_TRAILING_RETURN_WINDOW: usize = 1260;

/// Errors raised by the analyses
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Regime threshold must be in (0, 1), got {0}")]
    InvalidThreshold(f64),

    #[error("Window '{name}' must be > 0")]
    InvalidWindow { name: &'static str },

    #[error("Trailing return window of {window} days is shorter than one {trading_days_per_year}-day year")]
    TrailingWindowTooShort { window: usize, trading_days_per_year: usize },
}

/// Parameters for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub regime_threshold: f64,
    pub volatility_window: usize,
    pub trading_days_per_year: usize,
    pub trailing_return_window: usize,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            regime_threshold: DEFAULT_REGIME_THRESHOLD,
            volatility_window: DEFAULT_VOLATILITY_WINDOW,
            trading_days_per_year: DEFAULT_TRADING_DAYS_PER_YEAR,
            trailing_return_window: DEFAULT_TRAILING_RETURN_WINDOW,
        }
    }
}

impl AnalysisParams {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.regime_threshold = threshold;
        self
    }

    /// Trailing window length in whole years, used for report year ranges
    pub fn trailing_return_years(&self) -> i32 {
        (self.trailing_return_window / self.trading_days_per_year.max(1)) as i32
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.regime_threshold > 0.0 && self.regime_threshold < 1.0) {
            return Err(AnalysisError::InvalidThreshold(self.regime_threshold));
        }
        if self.volatility_window == 0 {
            return Err(AnalysisError::InvalidWindow { name: "volatility_window" });
        }
        if self.trading_days_per_year == 0 {
            return Err(AnalysisError::InvalidWindow { name: "trading_days_per_year" });
        }
        if self.trailing_return_window == 0 {
            return Err(AnalysisError::InvalidWindow { name: "trailing_return_window" });
        }
        // The report labels the window in whole years
        if self.trailing_return_window < self.trading_days_per_year {
            return Err(AnalysisError::TrailingWindowTooShort {
                window: self.trailing_return_window,
                trading_days_per_year: self.trading_days_per_year,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = AnalysisParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.trailing_return_years(), 5);
    }

    #[test]
    fn test_threshold_bounds() {
        for bad in [0.0, 1.0, -0.1, f64::NAN] {
            let params = AnalysisParams::default().with_threshold(bad);
            assert!(matches!(params.validate(), Err(AnalysisError::InvalidThreshold(_))));
        }
        assert!(AnalysisParams::default().with_threshold(0.1).validate().is_ok());
    }

    #[test]
    fn test_zero_window_rejected() {
        let params = AnalysisParams {
            volatility_window: 0,
            ..AnalysisParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(AnalysisError::InvalidWindow { name: "volatility_window" })
        );
    }

    #[test]
    fn test_trailing_window_shorter_than_a_year_rejected() {
        let params = AnalysisParams {
            trailing_return_window: 200,
            ..AnalysisParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(AnalysisError::TrailingWindowTooShort { window: 200, trading_days_per_year: 252 })
        );

        let one_year = AnalysisParams {
            trailing_return_window: 252,
            ..AnalysisParams::default()
        };
        assert!(one_year.validate().is_ok());
        assert_eq!(one_year.trailing_return_years(), 1);
    }
}
