//! CSV History Adapter
//!
//! Offline HistoryProvider reading a `date,close` file, e.g. a saved
//! Yahoo/NSE export. Columns are located by header name (case-insensitive);
//! any other columns are ignored. Dates may carry a time suffix
//! (`2007-09-17 00:00:00+05:30`); only the calendar date is used.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::Observation;
use crate::ports::{normalize_observations, HistoryError, HistoryProvider};

const DATE_COLUMN: &str = "date";
const CLOSE_COLUMN: &str = "close";

/// History provider reading a single-instrument CSV file
#[derive(Debug, Clone)]
pub struct CsvHistoryProvider {
    path: PathBuf,
}

impl CsvHistoryProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse every row with a usable close
    pub fn read_observations(&self) -> Result<Vec<Observation>, HistoryError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let date_idx = column_index(&headers, DATE_COLUMN)?;
        let close_idx = column_index(&headers, CLOSE_COLUMN)?;

        let mut observations = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // Line numbers are 1-based and the header is line 1
            let line = row + 2;

            let date_field = record.get(date_idx).unwrap_or_default();
            let close_field = record.get(close_idx).unwrap_or_default();

            let Some(close) = parse_close(close_field, line)? else {
                tracing::debug!(line, "Skipping row without close");
                continue;
            };
            let date = parse_date(date_field, line)?;
            observations.push(Observation::new(date, close));
        }

        Ok(normalize_observations(observations))
    }
}

#[async_trait]
impl HistoryProvider for CsvHistoryProvider {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<Observation>, HistoryError> {
        let observations = self.read_observations()?;
        tracing::info!(
            symbol,
            path = %self.path.display(),
            observations = observations.len(),
            "Loaded CSV history"
        );
        Ok(observations)
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, HistoryError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| HistoryError::ParseError(format!("Missing '{}' column", name)))
}

fn parse_date(field: &str, line: usize) -> Result<NaiveDate, HistoryError> {
    let day = field.get(..10).unwrap_or(field);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| HistoryError::ParseError(format!("Line {}: bad date '{}': {}", line, field, e)))
}

/// Blank and null-like closes are gaps, not errors
fn parse_close(field: &str, line: usize) -> Result<Option<f64>, HistoryError> {
    if field.is_empty() || field.eq_ignore_ascii_case("null") || field.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    let close: f64 = field
        .parse()
        .map_err(|e| HistoryError::ParseError(format!("Line {}: bad close '{}': {}", line, field, e)))?;
    if close.is_finite() && close > 0.0 {
        Ok(Some(close))
    } else {
        Err(HistoryError::ParseError(format!(
            "Line {}: close must be positive, got {}",
            line, close
        )))
    }
}
