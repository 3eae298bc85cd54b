//! Bar preprocessing: indicator alignment, warm-up trim and snapshot extraction.

use crate::config::{IndicatorWindows, ScanConfig};
use crate::indicators::{calculate_macd, calculate_rsi, calculate_sma};
use crate::models::bar::{self, Bar};
use crate::models::indicators::{IndicatorSeries, Snapshot};
use crate::signals::error::EvaluationError;

/// Run every indicator over the full close/volume series. Input is not modified.
pub fn compute_indicators(bars: &[Bar], windows: &IndicatorWindows) -> IndicatorSeries {
    let closes = bar::closes(bars);
    let volumes = bar::volumes(bars);
    let macd = calculate_macd(
        &closes,
        windows.macd_fast,
        windows.macd_slow,
        windows.macd_signal,
    );

    IndicatorSeries {
        sma: calculate_sma(&closes, windows.sma),
        rsi: calculate_rsi(&closes, windows.rsi, windows.rsi_smoothing),
        macd_line: macd.line,
        macd_signal: macd.signal,
        macd_histogram: macd.histogram,
        volume_avg: calculate_sma(&volumes, windows.volume),
    }
}

/// Bars needed before a snapshot may be taken: the policy floor or the
/// warm-up plus one, whichever is larger.
pub fn required_bars(config: &ScanConfig) -> usize {
    config
        .min_bars
        .max(config.windows.warmup_index().saturating_add(2))
}

/// Extract the snapshot of the latest bar once warm-up bars are discarded.
pub fn latest_snapshot(bars: &[Bar], config: &ScanConfig) -> Result<Snapshot, EvaluationError> {
    let required = required_bars(config);
    if bars.len() < required {
        return Err(EvaluationError::InsufficientData {
            bars: bars.len(),
            required,
        });
    }

    let series = compute_indicators(bars, &config.windows);
    let warmup = config.windows.warmup_index();
    // Indices before `warmup` are never read; the final index is the only
    // candidate once they are dropped.
    let index = bars.len() - 1;
    if index < warmup {
        return Err(EvaluationError::InsufficientData {
            bars: bars.len(),
            required,
        });
    }

    snapshot_at(bars, &series, index)
}

/// Build the snapshot at `index`, rejecting any undefined or non-finite field.
pub fn snapshot_at(
    bars: &[Bar],
    series: &IndicatorSeries,
    index: usize,
) -> Result<Snapshot, EvaluationError> {
    let bar = bars.get(index).ok_or(EvaluationError::InsufficientData {
        bars: bars.len(),
        required: index + 1,
    })?;

    let field = |name: &'static str, values: &[Option<f64>]| {
        values
            .get(index)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
            .ok_or(EvaluationError::IndeterminateIndicator { field: name })
    };
    let finite = |name: &'static str, value: f64| {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::IndeterminateIndicator { field: name })
        }
    };

    Ok(Snapshot {
        timestamp: bar.timestamp,
        price: finite("price", bar.close)?,
        sma: field("sma", &series.sma)?,
        rsi: field("rsi", &series.rsi)?,
        macd: field("macd", &series.macd_line)?,
        macd_signal: field("macd_signal", &series.macd_signal)?,
        volume: finite("volume", bar.volume)?,
        volume_avg: field("volume_avg", &series.volume_avg)?,
    })
}
