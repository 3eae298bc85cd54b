//! Unit tests for the bar preprocessor

use sentinel::config::{IndicatorWindows, ScanConfig};
use sentinel::models::bar::Bar;
use sentinel::signals::error::EvaluationError;
use sentinel::signals::preprocess::{compute_indicators, latest_snapshot, required_bars, snapshot_at};

use crate::common_bars::{bars_from, constant_bars, linear_closes, rising_zigzag_bars};

#[test]
fn default_warmup_and_required_bars() {
    let config = ScanConfig::default();
    assert_eq!(config.windows.warmup_index(), 34);
    assert_eq!(required_bars(&config), 50);
}

#[test]
fn long_windows_raise_required_bars_above_floor() {
    let config = ScanConfig {
        windows: IndicatorWindows {
            sma: 60,
            ..IndicatorWindows::default()
        },
        ..ScanConfig::default()
    };
    assert_eq!(config.windows.warmup_index(), 59);
    assert_eq!(required_bars(&config), 61);
}

#[test]
fn unvalidated_huge_window_is_insufficient_not_a_panic() {
    let config = ScanConfig {
        windows: IndicatorWindows {
            macd_slow: usize::MAX,
            ..IndicatorWindows::default()
        },
        ..ScanConfig::default()
    };
    assert_eq!(required_bars(&config), usize::MAX);
    assert!(matches!(
        latest_snapshot(&rising_zigzag_bars(60, 1000.0), &config),
        Err(EvaluationError::InsufficientData { bars: 60, .. })
    ));
}

#[test]
fn series_are_aligned_with_bars() {
    let bars = rising_zigzag_bars(60, 1000.0);
    let series = compute_indicators(&bars, &IndicatorWindows::default());

    assert_eq!(series.len(), bars.len());
    assert_eq!(series.rsi.len(), bars.len());
    assert_eq!(series.macd_histogram.len(), bars.len());
    assert_eq!(series.volume_avg.len(), bars.len());
    assert!(series.sma[18].is_none());
    assert!(series.sma[19].is_some());
    assert!(series.volume_avg[19].is_some());
}

#[test]
fn preprocessing_leaves_bars_untouched() {
    let bars = rising_zigzag_bars(60, 3000.0);
    let before = bars.clone();
    let _ = latest_snapshot(&bars, &ScanConfig::default());
    assert_eq!(bars, before);
}

#[test]
fn fewer_bars_than_floor_is_insufficient() {
    let bars = rising_zigzag_bars(48, 1000.0);
    let result = latest_snapshot(&bars, &ScanConfig::default());

    match result {
        Err(EvaluationError::InsufficientData { bars, required }) => {
            assert_eq!(bars, 48);
            assert_eq!(required, 50);
        }
        other => panic!("expected InsufficientData, got {:?}", other),
    }
}

#[test]
fn empty_input_is_insufficient() {
    let result = latest_snapshot(&[], &ScanConfig::default());
    assert!(matches!(
        result,
        Err(EvaluationError::InsufficientData { bars: 0, .. })
    ));
}

#[test]
fn lowered_floor_still_honours_warmup() {
    let config = ScanConfig {
        min_bars: 10,
        ..ScanConfig::default()
    };
    let result = latest_snapshot(&rising_zigzag_bars(35, 1000.0), &config);
    assert!(matches!(
        result,
        Err(EvaluationError::InsufficientData {
            bars: 35,
            required: 36
        })
    ));
    assert!(latest_snapshot(&rising_zigzag_bars(36, 1000.0), &config).is_ok());
}

#[test]
fn snapshot_reads_the_latest_bar() {
    let closes = linear_closes(60, 100.0, 1.0);
    let bars = bars_from(&closes, &vec![500.0; 60]);
    let snapshot = latest_snapshot(&bars, &ScanConfig::default()).unwrap();

    assert_eq!(snapshot.timestamp, bars[59].timestamp);
    assert_eq!(snapshot.price, 159.0);
    assert_eq!(snapshot.sma, 149.5);
    assert_eq!(snapshot.rsi, 100.0);
    assert!(snapshot.macd > snapshot.macd_signal);
    assert_eq!(snapshot.volume, 500.0);
    assert_eq!(snapshot.volume_avg, 500.0);
    assert!(snapshot.is_finite());
}

#[test]
fn flat_series_reports_rsi_as_indeterminate() {
    let result = latest_snapshot(&constant_bars(60, 100.0, 1000.0), &ScanConfig::default());
    assert!(matches!(
        result,
        Err(EvaluationError::IndeterminateIndicator { field: "rsi" })
    ));
}

#[test]
fn non_finite_close_reports_price() {
    let mut bars = rising_zigzag_bars(60, 1000.0);
    bars[59].close = f64::NAN;
    let result = latest_snapshot(&bars, &ScanConfig::default());
    assert!(matches!(
        result,
        Err(EvaluationError::IndeterminateIndicator { field: "price" })
    ));
}

#[test]
fn non_finite_volume_history_reports_volume_average() {
    let mut bars = rising_zigzag_bars(60, 1000.0);
    bars[10].volume = f64::INFINITY;
    let result = latest_snapshot(&bars, &ScanConfig::default());
    assert!(matches!(
        result,
        Err(EvaluationError::IndeterminateIndicator {
            field: "volume_avg"
        })
    ));
}

#[test]
fn snapshot_at_out_of_range_index_is_insufficient() {
    let bars: Vec<Bar> = rising_zigzag_bars(5, 1000.0);
    let series = compute_indicators(&bars, &IndicatorWindows::default());
    assert!(matches!(
        snapshot_at(&bars, &series, 7),
        Err(EvaluationError::InsufficientData { .. })
    ));
}

#[test]
fn error_kinds_are_stable_labels() {
    let insufficient = EvaluationError::InsufficientData {
        bars: 3,
        required: 50,
    };
    assert_eq!(insufficient.kind(), "insufficient_data");
    assert_eq!(
        insufficient.to_string(),
        "insufficient data: 3 bars, need at least 50"
    );
    assert_eq!(
        EvaluationError::IndeterminateIndicator { field: "sma" }.kind(),
        "indeterminate_indicator"
    );
}
