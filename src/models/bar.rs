use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV observation. Only `close` and `volume` feed the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(timestamp: DateTime<Utc>, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
            volume,
        }
    }
}

/// Extract close prices from a slice of bars.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Extract volumes from a slice of bars.
pub fn volumes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.volume).collect()
}

/// True when timestamps are strictly increasing (no duplicates, no reordering).
pub fn is_strictly_ordered(bars: &[Bar]) -> bool {
    bars.windows(2).all(|w| w[0].timestamp < w[1].timestamp)
}
