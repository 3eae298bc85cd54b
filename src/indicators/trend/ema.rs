//! EMA (Exponential Moving Average) indicator

use crate::indicators::math;

/// Calculate EMA for a specific span.
///
/// Seeded at the first value with smoothing factor `2 / (span + 1)`, so every
/// index is defined. Early values are unstable; callers trim warm-up.
pub fn calculate_ema(series: &[f64], span: usize) -> Vec<Option<f64>> {
    if !math::is_well_formed(series, span) {
        return math::undefined(series.len());
    }
    math::ema(series, span).into_iter().map(Some).collect()
}
