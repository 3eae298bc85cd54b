//! Yahoo Finance chart endpoint as a bar source.

use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::DEFAULT_YAHOO_BASE_URL;
use crate::models::bar::Bar;
use crate::services::market_data::{BarQuery, MarketDataProvider, ProviderError};

#[derive(Clone)]
pub struct YahooChartProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooChartProvider {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_base_url(DEFAULT_YAHOO_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent("Mozilla/5.0 (compatible; sentinel-scanner)")
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn get_bars(&self, symbol: &str, query: &BarQuery) -> Result<Vec<Bar>, ProviderError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("range", query.lookback.as_str()),
                ("interval", query.interval.as_str()),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        let envelope: Option<ChartEnvelope> = serde_json::from_str(&body).ok();

        if let Some(error) = envelope.as_ref().and_then(|e| e.chart.error.as_ref()) {
            return Err(ProviderError::Api {
                code: error.code.clone(),
                description: error.description.clone(),
            });
        }
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope = envelope
            .ok_or_else(|| ProviderError::Malformed("body is not a chart response".to_string()))?;
        let bars = envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(ChartResult::into_bars)
            .transpose()?
            .unwrap_or_default();

        debug!(symbol = %symbol, count = bars.len(), "YahooChartProvider: fetched {} bars", bars.len());
        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Default, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

impl ChartResult {
    /// Bars with a missing close or volume are dropped, like a row-wise dropna.
    fn into_bars(self) -> Result<Vec<Bar>, ProviderError> {
        let quote = self.indicators.quote.into_iter().next().unwrap_or_default();
        let at = |values: &[Option<f64>], i: usize| values.get(i).copied().flatten();

        let mut bars = Vec::with_capacity(self.timestamp.len());
        for (i, &ts) in self.timestamp.iter().enumerate() {
            let (Some(close), Some(volume)) = (at(&quote.close, i), at(&quote.volume, i)) else {
                continue;
            };
            let timestamp = DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| ProviderError::Malformed(format!("timestamp {} out of range", ts)))?;
            let mut bar = Bar::new(timestamp, close, volume);
            bar.open = at(&quote.open, i);
            bar.high = at(&quote.high, i);
            bar.low = at(&quote.low, i);
            bars.push(bar);
        }
        Ok(bars)
    }
}
