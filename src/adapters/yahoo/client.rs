//! Yahoo Finance Chart Client
//!
//! Fetches the maximal daily history for one symbol from the v8 chart
//! endpoint. One request per run; failures are returned, not retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::ChartResponse;
use crate::domain::Observation;
use crate::ports::{HistoryError, HistoryProvider};

/// Longest error body echoed into an error message
const MAX_ERROR_BODY: usize = 200;

/// Yahoo chart client configuration
#[derive(Debug, Clone)]
pub struct YahooConfig {
    /// Base URL for the chart API
    pub api_base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// The endpoint rejects requests without a browser-like agent
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("Mozilla/5.0 (compatible; nifty-regimes/", env!("CARGO_PKG_VERSION"), ")")
                .to_string(),
        }
    }
}

/// History provider backed by the Yahoo Finance chart API
#[derive(Debug, Clone)]
pub struct YahooHistoryProvider {
    config: YahooConfig,
    http: Client,
}

impl YahooHistoryProvider {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self, HistoryError> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: YahooConfig) -> Result<Self, HistoryError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { config, http })
    }

    /// Chart endpoint URL for a symbol; `^` passes through as a path character
    pub fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.api_base_url.trim_end_matches('/'),
            symbol
        )
    }

    async fn fetch_chart(&self, symbol: &str) -> Result<ChartResponse, HistoryError> {
        let url = self.chart_url(symbol);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("range", "max"), ("interval", "1d"), ("events", "history")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Unknown symbols still come back as a chart error document
            if let Ok(parsed) = serde_json::from_str::<ChartResponse>(&body) {
                if let Some(error) = parsed.chart.error {
                    return Err(HistoryError::ApiError(format!(
                        "{} {}: {}",
                        status, error.code, error.description
                    )));
                }
            }
            let snippet: String = body.chars().take(MAX_ERROR_BODY).collect();
            return Err(HistoryError::ApiError(format!("API error {}: {}", status, snippet)));
        }

        serde_json::from_str(&body)
            .map_err(|e| HistoryError::ParseError(format!("Failed to parse chart response: {}", e)))
    }
}

#[async_trait]
impl HistoryProvider for YahooHistoryProvider {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<Observation>, HistoryError> {
        let chart = self.fetch_chart(symbol).await?;
        let observations = chart.into_observations()?;
        tracing::info!(symbol, observations = observations.len(), "Fetched Yahoo history");
        Ok(observations)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}
