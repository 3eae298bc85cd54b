//! RSI (Relative Strength Index) indicator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::indicators::math;

/// Smoothing family applied to average gain and average loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsiSmoothing {
    /// Center-of-mass `period - 1`, i.e. alpha = 1 / period.
    #[default]
    Wilder,
    /// Span-based, alpha = 2 / (period + 1).
    Span,
}

impl RsiSmoothing {
    pub fn alpha(self, period: usize) -> f64 {
        match self {
            RsiSmoothing::Wilder => 1.0 / period as f64,
            RsiSmoothing::Span => math::span_alpha(period),
        }
    }
}

impl FromStr for RsiSmoothing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wilder" | "com" => Ok(RsiSmoothing::Wilder),
            "span" | "ema" => Ok(RsiSmoothing::Span),
            other => Err(format!("unknown RSI smoothing '{}'", other)),
        }
    }
}

impl fmt::Display for RsiSmoothing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsiSmoothing::Wilder => f.write_str("wilder"),
            RsiSmoothing::Span => f.write_str("span"),
        }
    }
}

/// Calculate RSI at every index of `series`.
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are seeded with the simple mean of the first `period` deltas, so
/// the first defined value sits at index `period`. A flat stretch (both
/// averages zero) is undefined; zero loss with positive gain is 100.
pub fn calculate_rsi(series: &[f64], period: usize, smoothing: RsiSmoothing) -> Vec<Option<f64>> {
    let Some(needed) = period.checked_add(1) else {
        return math::undefined(series.len());
    };
    if period == 0 || !math::is_well_formed(series, needed) {
        return math::undefined(series.len());
    }

    let deltas: Vec<f64> = series.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|d| (-d).max(0.0)).collect();

    let (Some(seed_gain), Some(seed_loss)) =
        (math::mean(&gains[..period]), math::mean(&losses[..period]))
    else {
        return math::undefined(series.len());
    };

    let alpha = smoothing.alpha(period);
    let avg_gain = math::smooth_from(&gains[period..], alpha, seed_gain);
    let avg_loss = math::smooth_from(&losses[period..], alpha, seed_loss);

    let mut out = math::undefined(period);
    out.push(rsi_from_averages(seed_gain, seed_loss));
    out.extend(
        avg_gain
            .iter()
            .zip(&avg_loss)
            .map(|(&g, &l)| rsi_from_averages(g, l)),
    );
    out
}

/// Calculate RSI with default period (14) and Wilder smoothing
pub fn calculate_rsi_default(series: &[f64]) -> Vec<Option<f64>> {
    calculate_rsi(series, 14, RsiSmoothing::Wilder)
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { Some(100.0) } else { None };
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));
    rsi.is_finite().then_some(rsi)
}
