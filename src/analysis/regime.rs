//! Regime Segmenter
//!
//! Single-pass state machine that partitions a price history into
//! alternating Bull and Bear regimes.
//!
//! - A bull regime ends when price falls `threshold` below its running peak.
//!   The peak is the turning point and anchors the following bear regime.
//! - A bear regime ends when price rallies `threshold` above its running
//!   trough, which anchors the following bull regime.
//!
//! Before the first move of `threshold` in either direction the machine is in
//! `Unknown`, tracking both extremes. Whatever the state at the end of
//! history, one final ongoing regime is emitted up to the last observation.
//! `Unknown` at the end is reported as `BullOngoing`.

use chrono::NaiveDate;

use super::params::{AnalysisError, AnalysisParams};
use crate::domain::{History, Observation, Regime, RegimeKind};

/// A dated price the machine measures moves from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub date: NaiveDate,
    pub price: f64,
}

impl From<&Observation> for Anchor {
    fn from(obs: &Observation) -> Self {
        Self { date: obs.date, price: obs.close }
    }
}

/// Segmenter state with its working extremes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmenterState {
    /// No threshold move yet; `start` is the first observation
    Unknown { start: Anchor, peak: Anchor, trough: Anchor },
    /// Rising from `start`, highest close so far in `peak`
    Bull { start: Anchor, peak: Anchor },
    /// Falling from `start`, lowest close so far in `trough`
    Bear { start: Anchor, trough: Anchor },
}

impl SegmenterState {
    pub fn initial(first: &Observation) -> Self {
        let anchor = Anchor::from(first);
        Self::Unknown { start: anchor, peak: anchor, trough: anchor }
    }

    /// Anchor the current (not yet closed) regime started from
    pub fn start(&self) -> Anchor {
        match *self {
            Self::Unknown { start, .. } | Self::Bull { start, .. } | Self::Bear { start, .. } => start,
        }
    }

    /// Advance by one observation, returning any regime closed by it
    pub fn step(self, obs: &Observation, threshold: f64) -> (Self, Option<Regime>) {
        let here = Anchor::from(obs);
        let price = obs.close;

        match self {
            Self::Unknown { start, peak, trough } => {
                if price >= trough.price * (1.0 + threshold) {
                    tracing::debug!(date = %obs.date, from = %trough.date, "First regime: bull");
                    (Self::Bull { start: trough, peak: here }, None)
                } else if price <= peak.price * (1.0 - threshold) {
                    tracing::debug!(date = %obs.date, from = %peak.date, "First regime: bear");
                    (Self::Bear { start: peak, trough: here }, None)
                } else {
                    let peak = if price > peak.price { here } else { peak };
                    let trough = if price < trough.price { here } else { trough };
                    (Self::Unknown { start, peak, trough }, None)
                }
            }
            Self::Bull { start, peak } => {
                if price > peak.price {
                    (Self::Bull { start, peak: here }, None)
                } else if price <= peak.price * (1.0 - threshold) {
                    let closed = closed_regime(RegimeKind::Bull, start, peak);
                    tracing::debug!(
                        start = %closed.start,
                        end = %closed.end,
                        days = closed.span_days(),
                        return_pct = closed.return_pct,
                        "Bull regime closed"
                    );
                    (Self::Bear { start: peak, trough: here }, Some(closed))
                } else {
                    (self, None)
                }
            }
            Self::Bear { start, trough } => {
                if price < trough.price {
                    (Self::Bear { start, trough: here }, None)
                } else if price >= trough.price * (1.0 + threshold) {
                    let closed = closed_regime(RegimeKind::Bear, start, trough);
                    tracing::debug!(
                        start = %closed.start,
                        end = %closed.end,
                        days = closed.span_days(),
                        return_pct = closed.return_pct,
                        "Bear regime closed"
                    );
                    (Self::Bull { start: trough, peak: here }, Some(closed))
                } else {
                    (self, None)
                }
            }
        }
    }

    /// Close out the history with the ongoing regime ending at `last`
    pub fn finish(self, last: &Observation) -> Regime {
        let kind = match self {
            // History never moved `threshold` from its start
            Self::Unknown { .. } | Self::Bull { .. } => RegimeKind::BullOngoing,
            Self::Bear { .. } => RegimeKind::BearOngoing,
        };
        closed_regime(kind, self.start(), Anchor::from(last))
    }
}

fn closed_regime(kind: RegimeKind, start: Anchor, end: Anchor) -> Regime {
    Regime {
        kind,
        start: start.date,
        end: end.date,
        return_pct: end.price / start.price - 1.0,
    }
}

/// Counts by family, for logging and report footers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegimeSummary {
    pub bull: usize,
    pub bear: usize,
    pub ongoing: Option<RegimeKind>,
}

impl RegimeSummary {
    pub fn from_regimes(regimes: &[Regime]) -> Self {
        Self {
            bull: regimes.iter().filter(|r| r.kind.is_bull()).count(),
            bear: regimes.iter().filter(|r| r.kind.is_bear()).count(),
            ongoing: regimes.last().map(|r| r.kind),
        }
    }
}

/// Threshold-based bull/bear segmenter
#[derive(Debug, Clone)]
pub struct RegimeSegmenter {
    threshold: f64,
}

impl RegimeSegmenter {
    pub fn new(threshold: f64) -> Result<Self, AnalysisError> {
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(AnalysisError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    pub fn from_params(params: &AnalysisParams) -> Result<Self, AnalysisError> {
        Self::new(params.regime_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Partition the history into chronological regimes
    ///
    /// The result is never empty and always ends with an ongoing regime.
    pub fn segment(&self, history: &History) -> Vec<Regime> {
        let observations = history.observations();
        let initial = (SegmenterState::initial(history.first()), Vec::new());

        let (state, mut regimes) =
            observations[1..]
                .iter()
                .fold(initial, |(state, mut regimes), obs| {
                    let (next, closed) = state.step(obs, self.threshold);
                    regimes.extend(closed);
                    (next, regimes)
                });

        regimes.push(state.finish(history.last()));

        let summary = RegimeSummary::from_regimes(&regimes);
        tracing::info!(
            threshold = self.threshold,
            bull = summary.bull,
            bear = summary.bear,
            "Regimes segmented"
        );

        regimes
    }
}

impl Default for RegimeSegmenter {
    fn default() -> Self {
        Self { threshold: AnalysisParams::default().regime_threshold }
    }
}
