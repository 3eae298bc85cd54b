//! Bar fixtures shared by the test crates.
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use sentinel::config::{ScanConfig, SignalThresholds};
use sentinel::models::bar::Bar;

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 45, 0).unwrap()
}

/// Bars 30 minutes apart from `start_time()`.
pub fn bars_from(closes: &[f64], volumes: &[f64]) -> Vec<Bar> {
    assert_eq!(closes.len(), volumes.len());
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&close, &volume))| {
            Bar::new(start_time() + Duration::minutes(30 * i as i64), close, volume)
        })
        .collect()
}

pub fn constant_bars(count: usize, price: f64, volume: f64) -> Vec<Bar> {
    bars_from(&vec![price; count], &vec![volume; count])
}

pub fn linear_closes(count: usize, start: f64, step: f64) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

/// Alternating moves: odd indices add `first`, even indices add `second`.
/// With an even `count` the last move is `first`.
pub fn zigzag_closes(count: usize, start: f64, first: f64, second: f64) -> Vec<f64> {
    let mut closes = Vec::with_capacity(count);
    let mut price = start;
    for i in 0..count {
        if i > 0 {
            price += if i % 2 == 1 { first } else { second };
        }
        closes.push(price);
    }
    closes
}

/// Flat volume with the final bar replaced by `last`.
pub fn volumes_with_last(count: usize, base: f64, last: f64) -> Vec<f64> {
    let mut volumes = vec![base; count];
    if let Some(v) = volumes.last_mut() {
        *v = last;
    }
    volumes
}

/// Rising zigzag (+2/-1) ending on an up move. With default windows the last
/// bar has price above SMA, MACD above signal and Wilder RSI near 68.3.
pub fn rising_zigzag_bars(count: usize, last_volume: f64) -> Vec<Bar> {
    bars_from(
        &zigzag_closes(count, 100.0, 2.0, -1.0),
        &volumes_with_last(count, 1000.0, last_volume),
    )
}

/// Mirror of `rising_zigzag_bars`: RSI near 31.7, price below SMA, MACD below signal.
pub fn falling_zigzag_bars(count: usize, last_volume: f64) -> Vec<Bar> {
    bars_from(
        &zigzag_closes(count, 200.0, -2.0, 1.0),
        &volumes_with_last(count, 1000.0, last_volume),
    )
}

/// Steady decline (-2 per bar) followed by a ten-bar recovery (+1 per bar).
/// With default windows the last bar sits just above its SMA with MACD above
/// signal and Wilder RSI near 35.4.
pub fn recovery_bars(last_volume: f64) -> Vec<Bar> {
    let mut closes = linear_closes(70, 300.0, -2.0);
    let bottom = closes[69];
    closes.extend((1..=10).map(|i| bottom + i as f64));
    bars_from(&closes, &volumes_with_last(80, 1000.0, last_volume))
}

/// Mirror of `recovery_bars`: RSI near 64.6, just below SMA, MACD below signal.
pub fn rollover_bars(last_volume: f64) -> Vec<Bar> {
    let mut closes = linear_closes(70, 100.0, 2.0);
    let top = closes[69];
    closes.extend((1..=10).map(|i| top - i as f64));
    bars_from(&closes, &volumes_with_last(80, 1000.0, last_volume))
}

/// Cutoffs loose enough that the rising zigzag's RSI (~68) counts as low.
pub fn bullish_test_config() -> ScanConfig {
    ScanConfig {
        thresholds: SignalThresholds {
            rsi_high: 75.0,
            rsi_mild_high: 80.0,
            rsi_mild_low: 85.0,
            rsi_low: 90.0,
            volume_multiplier: 1.5,
        },
        ..ScanConfig::default()
    }
}

/// Cutoffs loose enough that the falling zigzag's RSI (~32) counts as high.
pub fn bearish_test_config() -> ScanConfig {
    ScanConfig {
        thresholds: SignalThresholds {
            rsi_high: 10.0,
            rsi_mild_high: 15.0,
            rsi_mild_low: 20.0,
            rsi_low: 25.0,
            volume_multiplier: 1.5,
        },
        ..ScanConfig::default()
    }
}
