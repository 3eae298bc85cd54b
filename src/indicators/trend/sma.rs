//! SMA (Simple Moving Average) indicator

use crate::indicators::math;

/// Calculate the trailing simple moving average at every index.
///
/// Indices before `period - 1` are undefined. A zero period, a series shorter
/// than `period`, or any non-finite value yields an all-undefined series.
pub fn calculate_sma(series: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(series, period)
}

/// Calculate SMA with default period (20)
pub fn calculate_sma_default(series: &[f64]) -> Vec<Option<f64>> {
    calculate_sma(series, 20)
}
