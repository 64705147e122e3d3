//! Analysis Layer - Volatility, Trailing Returns and Regime Segmentation
//!
//! Three independent reductions over the same `History`:
//! - `VolatilityScorer`: annualized rolling volatility and a 0-1 calmness score
//! - `TrailingReturnAnalyzer`: rolling 5-year return statistics
//! - `RegimeSegmenter`: bull/bear partition by a drawdown/rally threshold
//!
//! None of them depends on another's output.

pub mod params;
pub mod volatility;
pub mod trailing_return;
pub mod regime;

pub use params::{
    AnalysisError, AnalysisParams, DEFAULT_REGIME_THRESHOLD, DEFAULT_TRADING_DAYS_PER_YEAR,
    DEFAULT_TRAILING_RETURN_WINDOW, DEFAULT_VOLATILITY_WINDOW,
};
pub use volatility::{log_returns, VolatilityLabel, VolatilityResult, VolatilityScorer};
pub use trailing_return::{ReturnStats, TrailingReturnAnalyzer, WindowExtreme};
pub use regime::{Anchor, RegimeSegmenter, RegimeSummary, SegmenterState};
