use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::history::{HistoryError, HistoryProvider};
use crate::domain::Observation;

/// In-memory history provider that records requested symbols
///
/// Unknown symbols return an empty history, like a provider with no data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryHistory {
    calls: Arc<Mutex<Vec<String>>>,
    series: Arc<Mutex<HashMap<String, Vec<Observation>>>>,
}

impl InMemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the history served for a symbol
    pub fn with_series(self, symbol: &str, observations: Vec<Observation>) -> Self {
        self.series
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(symbol.to_string(), observations);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl HistoryProvider for InMemoryHistory {
    async fn fetch_history(&self, symbol: &str) -> Result<Vec<Observation>, HistoryError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(symbol.to_string());
        Ok(self
            .series
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(symbol)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}
