//! Analysis Orchestrator
//!
//! Coordinates one batch run: fetch the history, run the three analyses,
//! render the report and write it out. The only suspension point is the
//! history fetch; everything after it is synchronous.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use crate::analysis::{
    AnalysisError, AnalysisParams, RegimeSegmenter, RegimeSummary, ReturnStats,
    TrailingReturnAnalyzer, VolatilityResult, VolatilityScorer,
};
use crate::domain::{History, HistoryValidationError, Regime};
use crate::ports::{HistoryError, HistoryProvider};
use crate::report::{render_report, write_report, ReportError, ReportInput};

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("History provider error: {0}")]
    HistoryError(#[from] HistoryError),
    #[error("Invalid history: {0}")]
    InvalidHistory(#[from] HistoryValidationError),
    #[error("Analysis error: {0}")]
    AnalysisError(#[from] AnalysisError),
    #[error("Report error: {0}")]
    ReportError(#[from] ReportError),
}

/// What the analyses produced for one history
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub history: History,
    pub volatility: VolatilityResult,
    pub returns: ReturnStats,
    pub regimes: Vec<Regime>,
    pub summary: RegimeSummary,
    /// Rendered report text, exactly as written to disk
    pub report: String,
    pub report_path: PathBuf,
}

/// Runs the provider -> analyses -> report pipeline
pub struct AnalysisOrchestrator<P: HistoryProvider> {
    provider: P,
    params: AnalysisParams,
    symbol: String,
    instrument_name: String,
    report_path: PathBuf,
}

impl<P: HistoryProvider> AnalysisOrchestrator<P> {
    /// Create new orchestrator; parameters are validated up front
    pub fn new(
        provider: P,
        params: AnalysisParams,
        symbol: impl Into<String>,
        instrument_name: impl Into<String>,
        report_path: impl AsRef<Path>,
    ) -> Result<Self, OrchestratorError> {
        params.validate()?;
        Ok(Self {
            provider,
            params,
            symbol: symbol.into(),
            instrument_name: instrument_name.into(),
            report_path: report_path.as_ref().to_path_buf(),
        })
    }

    pub fn params(&self) -> &AnalysisParams {
        &self.params
    }

    pub fn report_path(&self) -> &Path {
        &self.report_path
    }

    /// Run the analysis and write the report
    ///
    /// Returns `Ok(None)` when the provider has no history for the symbol;
    /// nothing is written in that case.
    pub async fn run(&self, as_of: NaiveDate) -> Result<Option<AnalysisOutcome>, OrchestratorError> {
        tracing::info!(
            symbol = %self.symbol,
            provider = self.provider.name(),
            "Fetching {} history...",
            self.instrument_name
        );

        let observations = self.provider.fetch_history(&self.symbol).await?;
        if observations.is_empty() {
            tracing::warn!(symbol = %self.symbol, "Provider returned no history; nothing to analyze");
            return Ok(None);
        }

        let history = History::new(observations)?;
        let outcome = self.analyze(history, as_of)?;
        write_report(&self.report_path, &outcome.report)?;
        Ok(Some(outcome))
    }

    /// Run the analyses and render the report without touching the disk
    pub fn analyze(&self, history: History, as_of: NaiveDate) -> Result<AnalysisOutcome, OrchestratorError> {
        tracing::info!(
            observations = history.len(),
            first = %history.first().date,
            last = %history.last().date,
            "History loaded"
        );

        let volatility = VolatilityScorer::from_params(&self.params).score(&history)?;
        tracing::info!(
            current = volatility.current,
            score = volatility.score,
            fallback = volatility.fallback,
            "Volatility"
        );

        let returns = TrailingReturnAnalyzer::from_params(&self.params).analyze(&history);
        if let Some(latest) = returns.latest {
            tracing::info!(latest, windows = returns.window_count, "Trailing returns");
        }

        let regimes = RegimeSegmenter::from_params(&self.params)?.segment(&history);
        let summary = RegimeSummary::from_regimes(&regimes);

        let report = render_report(&ReportInput {
            instrument: &self.instrument_name,
            as_of,
            history: &history,
            volatility: &volatility,
            returns: &returns,
            regimes: &regimes,
            trailing_years: self.params.trailing_return_years(),
        });

        Ok(AnalysisOutcome {
            history,
            volatility,
            returns,
            regimes,
            summary,
            report,
            report_path: self.report_path.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Observation, RegimeKind};
    use crate::ports::{InMemoryHistory, MockHistoryProvider};

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn series(closes: &[f64]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Observation::new(start + chrono::Days::new(i as u64), c))
            .collect()
    }

    #[tokio::test]
    async fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Output_Summary.txt");
        let provider = InMemoryHistory::new().with_series("^NSEI", series(&[100.0, 130.0, 95.0, 125.0]));

        let orchestrator = AnalysisOrchestrator::new(
            provider.clone(),
            AnalysisParams::default(),
            "^NSEI",
            "NIFTY 50",
            &path,
        )
        .unwrap();
        assert_eq!(orchestrator.params(), &AnalysisParams::default());
        assert_eq!(orchestrator.report_path(), path.as_path());

        let outcome = orchestrator.run(as_of()).await.unwrap().unwrap();

        assert_eq!(provider.get_calls(), vec!["^NSEI".to_string()]);
        assert_eq!(outcome.regimes.len(), 3);
        assert_eq!(outcome.summary.ongoing, Some(RegimeKind::BullOngoing));
        assert!(outcome.volatility.fallback);
        assert!(outcome.returns.latest.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), outcome.report);
    }

    #[tokio::test]
    async fn test_empty_history_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Output_Summary.txt");
        let orchestrator = AnalysisOrchestrator::new(
            InMemoryHistory::new(),
            AnalysisParams::default(),
            "^NSEI",
            "NIFTY 50",
            &path,
        )
        .unwrap();

        assert!(orchestrator.run(as_of()).await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_provider_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Output_Summary.txt");

        let mut provider = MockHistoryProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_history()
            .times(1)
            .returning(|_| Err(HistoryError::ApiError("503 Service Unavailable".into())));

        let orchestrator =
            AnalysisOrchestrator::new(provider, AnalysisParams::default(), "^NSEI", "NIFTY 50", &path)
                .unwrap();

        let result = orchestrator.run(as_of()).await;
        assert!(matches!(result, Err(OrchestratorError::HistoryError(_))));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unordered_history_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut observations = series(&[100.0, 101.0]);
        observations.swap(0, 1);

        let mut provider = MockHistoryProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_fetch_history()
            .returning(move |_| Ok(observations.clone()));

        let orchestrator = AnalysisOrchestrator::new(
            provider,
            AnalysisParams::default(),
            "^NSEI",
            "NIFTY 50",
            dir.path().join("out.txt"),
        )
        .unwrap();

        assert!(matches!(
            orchestrator.run(as_of()).await,
            Err(OrchestratorError::InvalidHistory(_))
        ));
    }

    #[tokio::test]
    async fn test_single_observation_is_insufficient() {
        let dir = tempfile::tempdir().unwrap();
        let provider = InMemoryHistory::new().with_series("^NSEI", series(&[100.0]));
        let orchestrator = AnalysisOrchestrator::new(
            provider,
            AnalysisParams::default(),
            "^NSEI",
            "NIFTY 50",
            dir.path().join("out.txt"),
        )
        .unwrap();

        assert!(matches!(
            orchestrator.run(as_of()).await,
            Err(OrchestratorError::AnalysisError(AnalysisError::InsufficientData { .. }))
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = AnalysisOrchestrator::new(
            InMemoryHistory::new(),
            AnalysisParams::default().with_threshold(1.5),
            "^NSEI",
            "NIFTY 50",
            "Output_Summary.txt",
        );
        assert!(matches!(
            result,
            Err(OrchestratorError::AnalysisError(AnalysisError::InvalidThreshold(_)))
        ));
    }
}
