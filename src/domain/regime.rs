//! Market Regime Types
//!
//! A regime is a labelled interval of the price history. Closed regimes end
//! at a turning point; the final regime of any segmentation is ongoing and
//! ends on the last observation.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Regime classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeKind {
    /// Closed rally that ended with a drawdown past the threshold
    Bull,
    /// Closed decline that ended with a rally past the threshold
    Bear,
    /// Rally still in progress at the end of history
    BullOngoing,
    /// Decline still in progress at the end of history
    BearOngoing,
}

impl RegimeKind {
    /// Bull family, ongoing included
    pub fn is_bull(&self) -> bool {
        matches!(self, Self::Bull | Self::BullOngoing)
    }

    /// Bear family, ongoing included
    pub fn is_bear(&self) -> bool {
        matches!(self, Self::Bear | Self::BearOngoing)
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(self, Self::BullOngoing | Self::BearOngoing)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bull => "Bull",
            Self::Bear => "Bear",
            Self::BullOngoing => "Bull-Ongoing",
            Self::BearOngoing => "Bear-Ongoing",
        }
    }
}

impl fmt::Display for RegimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A labelled price interval between two anchor dates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    pub kind: RegimeKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Fractional change from the start anchor close to the end anchor close
    pub return_pct: f64,
}

impl Regime {
    /// Calendar days covered, seam dates included
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_families() {
        assert!(RegimeKind::Bull.is_bull());
        assert!(RegimeKind::BullOngoing.is_bull());
        assert!(!RegimeKind::Bear.is_bull());
        assert!(RegimeKind::BearOngoing.is_bear());
        assert!(!RegimeKind::BullOngoing.is_bear());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(RegimeKind::BullOngoing.to_string(), "Bull-Ongoing");
        assert_eq!(RegimeKind::Bear.to_string(), "Bear");
        assert!(RegimeKind::BearOngoing.is_ongoing());
        assert!(!RegimeKind::Bull.is_ongoing());
    }

    #[test]
    fn test_span_days() {
        let regime = Regime {
            kind: RegimeKind::Bull,
            start: NaiveDate::from_ymd_opt(2020, 3, 23).unwrap(),
            end: NaiveDate::from_ymd_opt(2020, 4, 2).unwrap(),
            return_pct: 0.25,
        };
        assert_eq!(regime.span_days(), 10);
    }
}
