//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::math;

/// MACD line, signal line and histogram aligned with the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

impl MacdSeries {
    fn undefined(len: usize) -> Self {
        Self {
            line: math::undefined(len),
            signal: math::undefined(len),
            histogram: math::undefined(len),
        }
    }
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Both EMAs are seeded at the first value and defined at every index.
pub fn calculate_macd(
    series: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    if fast_period == 0
        || signal_period == 0
        || !math::is_well_formed(series, slow_period.max(fast_period))
    {
        return MacdSeries::undefined(series.len());
    }

    let fast_ema = math::ema(series, fast_period);
    let slow_ema = math::ema(series, slow_period);
    let line: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let signal = math::ema(&line, signal_period);

    MacdSeries {
        histogram: line.iter().zip(&signal).map(|(m, s)| Some(m - s)).collect(),
        line: line.into_iter().map(Some).collect(),
        signal: signal.into_iter().map(Some).collect(),
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(series: &[f64]) -> MacdSeries {
    calculate_macd(series, 12, 26, 9)
}
