use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Indicator values aligned index-for-index with the source bars.
///
/// `None` marks an undefined value (warm-up, flat RSI, degenerate input).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSeries {
    pub sma: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    pub macd_line: Vec<Option<f64>>,
    pub macd_signal: Vec<Option<f64>>,
    pub macd_histogram: Vec<Option<f64>>,
    pub volume_avg: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.sma.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sma.is_empty()
    }
}

/// Scalar state of the latest bar with every indicator defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub sma: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub volume: f64,
    pub volume_avg: f64,
}

impl Snapshot {
    pub fn is_finite(&self) -> bool {
        [
            self.price,
            self.sma,
            self.rsi,
            self.macd,
            self.macd_signal,
            self.volume,
            self.volume_avg,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}
