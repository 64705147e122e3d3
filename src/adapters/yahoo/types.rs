//! Yahoo Finance chart API response types
//!
//! Only the fields needed for a daily close series are modelled. Closes are
//! nullable in the feed (holidays, halted sessions) and those rows are
//! skipped.

use chrono::DateTime;
use serde::Deserialize;

use crate::domain::Observation;
use crate::ports::{normalize_observations, HistoryError};

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    /// Session timestamps (UTC seconds); absent when there is no data
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartMeta {
    pub symbol: String,
    #[serde(default)]
    pub currency: Option<String>,
    /// Exchange offset from UTC in seconds
    #[serde(rename = "gmtoffset", default)]
    pub gmt_offset: i64,
    #[serde(rename = "exchangeTimezoneName", default)]
    pub exchange_timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Convert the first chart result into ascending, de-duplicated observations
    pub fn into_observations(self) -> Result<Vec<Observation>, HistoryError> {
        if let Some(error) = self.chart.error {
            return Err(HistoryError::ApiError(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let Some(result) = self.chart.result.and_then(|r| r.into_iter().next()) else {
            return Ok(Vec::new());
        };

        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        if closes.len() != result.timestamp.len() {
            return Err(HistoryError::ParseError(format!(
                "{} timestamps but {} closes for {}",
                result.timestamp.len(),
                closes.len(),
                result.meta.symbol
            )));
        }

        let offset = result.meta.gmt_offset;
        let mut observations = Vec::with_capacity(closes.len());
        for (&ts, close) in result.timestamp.iter().zip(closes) {
            let Some(close) = close else { continue };
            if !(close.is_finite() && close > 0.0) {
                continue;
            }
            // Exchange-local calendar date of the session
            let date = DateTime::from_timestamp(ts + offset, 0)
                .ok_or_else(|| HistoryError::ParseError(format!("Timestamp out of range: {}", ts)))?
                .date_naive();
            observations.push(Observation::new(date, close));
        }

        Ok(normalize_observations(observations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const NSEI_FIXTURE: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "INR",
                    "symbol": "^NSEI",
                    "exchangeName": "NSI",
                    "instrumentType": "INDEX",
                    "gmtoffset": 19800,
                    "timezone": "IST",
                    "exchangeTimezoneName": "Asia/Kolkata"
                },
                "timestamp": [1190001600, 1190088000, 1190174400, 1190260800],
                "indicators": {
                    "quote": [{
                        "open": [4518.45, 4494.1, null, 4550.25],
                        "close": [4494.65, 4546.2, null, 4732.35],
                        "volume": [0, 0, null, 0]
                    }],
                    "adjclose": [{ "adjclose": [4494.65, 4546.2, null, 4732.35] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart_response() {
        let response: ChartResponse = serde_json::from_str(NSEI_FIXTURE).unwrap();
        let observations = response.into_observations().unwrap();

        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].date, NaiveDate::from_ymd_opt(2007, 9, 17).unwrap());
        assert_eq!(observations[0].close, 4494.65);
        assert_eq!(observations[2].date, NaiveDate::from_ymd_opt(2007, 9, 20).unwrap());
    }

    #[test]
    fn test_null_closes_skipped() {
        let response: ChartResponse = serde_json::from_str(NSEI_FIXTURE).unwrap();
        let observations = response.into_observations().unwrap();
        assert!(observations.iter().all(|o| o.close > 0.0));
        assert!(!observations
            .iter()
            .any(|o| o.date == NaiveDate::from_ymd_opt(2007, 9, 19).unwrap()));
    }

    #[test]
    fn test_chart_error_is_api_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        let err = response.into_observations().unwrap_err();
        assert!(matches!(err, HistoryError::ApiError(ref msg) if msg.contains("delisted")));
    }

    #[test]
    fn test_empty_result_is_empty_history() {
        let body = r#"{"chart":{"result":[{"meta":{"symbol":"^NSEI","gmtoffset":19800},"indicators":{"quote":[{}]}}],"error":null}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_observations().unwrap().is_empty());
    }

    #[test]
    fn test_length_mismatch_is_parse_error() {
        let body = r#"{"chart":{"result":[{"meta":{"symbol":"^NSEI"},"timestamp":[1,2],"indicators":{"quote":[{"close":[1.0]}]}}],"error":null}}"#;
        let response: ChartResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(
            response.into_observations(),
            Err(HistoryError::ParseError(_))
        ));
    }
}
