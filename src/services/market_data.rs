//! Market data provider interface consumed by the scanner.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::models::bar::Bar;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider error {code}: {description}")]
    Api { code: String, description: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("unknown instrument '{0}'")]
    UnknownInstrument(String),
}

/// How much history to request and at what bar size, e.g. `15d` of `30m` bars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarQuery {
    pub lookback: String,
    pub interval: String,
}

impl BarQuery {
    pub fn new(lookback: impl Into<String>, interval: impl Into<String>) -> Self {
        Self {
            lookback: lookback.into(),
            interval: interval.into(),
        }
    }
}

impl Default for BarQuery {
    fn default() -> Self {
        Self::new("15d", "30m")
    }
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get historical bars for a symbol, oldest first. May be empty.
    async fn get_bars(&self, symbol: &str, query: &BarQuery) -> Result<Vec<Bar>, ProviderError>;
}

/// Serves fixed bar sequences, keyed by symbol. Unknown symbols fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBarProvider {
    bars: HashMap<String, Vec<Bar>>,
}

impl InMemoryBarProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<Bar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }
}

#[async_trait]
impl MarketDataProvider for InMemoryBarProvider {
    async fn get_bars(&self, symbol: &str, _query: &BarQuery) -> Result<Vec<Bar>, ProviderError> {
        self.bars
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownInstrument(symbol.to_string()))
    }
}
