//! Unit tests for the signal classifier

use sentinel::config::SignalThresholds;
use sentinel::models::indicators::Snapshot;
use sentinel::models::signal::SignalTier;
use sentinel::signals::classifier::SignalClassifier;

use crate::common_bars::start_time;

fn snapshot(price: f64, sma: f64, rsi: f64, macd: f64, signal: f64, volume: f64, avg: f64) -> Snapshot {
    Snapshot {
        timestamp: start_time(),
        price,
        sma,
        rsi,
        macd,
        macd_signal: signal,
        volume,
        volume_avg: avg,
    }
}

#[test]
fn oversold_uptrend_with_volume_spike_is_high_bullish() {
    let s = snapshot(105.0, 100.0, 25.0, 0.5, 0.3, 2000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::HighBullish);
}

#[test]
fn overbought_downtrend_with_volume_spike_is_high_bearish() {
    let s = snapshot(95.0, 100.0, 75.0, -0.5, -0.3, 2000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::HighBearish);
}

#[test]
fn uptrend_without_spike_is_mild_bullish() {
    let s = snapshot(105.0, 100.0, 35.0, 0.5, 0.3, 1000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::MildBullish);
}

#[test]
fn downtrend_without_spike_is_mild_bearish() {
    let s = snapshot(95.0, 100.0, 65.0, -0.5, -0.3, 1000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::MildBearish);
}

#[test]
fn neutral_rsi_near_average_is_none() {
    let s = snapshot(100.005, 100.0, 50.0, 0.5, 0.3, 2000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::None);
}

#[test]
fn high_tier_outranks_matching_mild_tier() {
    let classifier = SignalClassifier::default();
    let s = snapshot(105.0, 100.0, 25.0, 0.5, 0.3, 2000.0, 1000.0);
    assert!(classifier.matches(SignalTier::MildBullish, &s));
    assert_eq!(classifier.classify(&s), SignalTier::HighBullish);
}

#[test]
fn spike_without_extreme_rsi_falls_back_to_mild() {
    let s = snapshot(105.0, 100.0, 35.0, 0.5, 0.3, 5000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::MildBullish);
}

#[test]
fn comparisons_are_strict() {
    let classifier = SignalClassifier::default();
    // RSI exactly at the high cutoff is not below it.
    let at_cutoff = snapshot(105.0, 100.0, 30.0, 0.5, 0.3, 2000.0, 1000.0);
    assert_eq!(classifier.classify(&at_cutoff), SignalTier::MildBullish);

    // Volume exactly at multiplier x average is not a spike.
    let at_spike = snapshot(105.0, 100.0, 25.0, 0.5, 0.3, 1500.0, 1000.0);
    assert_eq!(classifier.classify(&at_spike), SignalTier::MildBullish);

    let on_average = snapshot(100.0, 100.0, 25.0, 0.5, 0.3, 2000.0, 1000.0);
    assert_eq!(classifier.classify(&on_average), SignalTier::None);

    let macd_equal = snapshot(105.0, 100.0, 25.0, 0.3, 0.3, 2000.0, 1000.0);
    assert_eq!(classifier.classify(&macd_equal), SignalTier::None);
}

#[test]
fn non_positive_volume_average_never_confirms_spike() {
    let classifier = SignalClassifier::default();
    for avg in [0.0, -10.0] {
        let s = snapshot(105.0, 100.0, 25.0, 0.5, 0.3, 2000.0, avg);
        assert!(!classifier.volume_spike(&s));
        assert_eq!(classifier.classify(&s), SignalTier::MildBullish);
    }
}

#[test]
fn price_and_macd_must_agree() {
    // Price above average but MACD below signal.
    let s = snapshot(105.0, 100.0, 25.0, 0.1, 0.3, 2000.0, 1000.0);
    assert_eq!(SignalClassifier::default().classify(&s), SignalTier::None);
}

#[test]
fn custom_thresholds_are_used() {
    let classifier = SignalClassifier::new(SignalThresholds {
        rsi_high: 20.0,
        rsi_low: 80.0,
        rsi_mild_high: 30.0,
        rsi_mild_low: 70.0,
        volume_multiplier: 3.0,
    });
    assert_eq!(classifier.thresholds().volume_multiplier, 3.0);

    let s = snapshot(105.0, 100.0, 25.0, 0.5, 0.3, 2000.0, 1000.0);
    assert_eq!(classifier.classify(&s), SignalTier::MildBullish);

    let s = snapshot(105.0, 100.0, 15.0, 0.5, 0.3, 3500.0, 1000.0);
    assert_eq!(classifier.classify(&s), SignalTier::HighBullish);
}

#[test]
fn tier_helpers() {
    assert!(SignalTier::HighBearish.is_high());
    assert!(!SignalTier::MildBullish.is_high());
    assert!(SignalTier::MildBullish.is_bullish());
    assert!(!SignalTier::None.is_bullish());
    assert_eq!(SignalTier::HighBullish.to_string(), "high_bullish");
    assert_eq!(
        serde_json::to_string(&SignalTier::MildBearish).unwrap(),
        "\"MILD_BEARISH\""
    );
}
