//! Unit tests for RSI

use sentinel::indicators::momentum::rsi::{calculate_rsi, calculate_rsi_default, RsiSmoothing};

use crate::common_bars::{linear_closes, zigzag_closes};

#[test]
fn first_defined_value_sits_at_window_index() {
    let closes = zigzag_closes(40, 100.0, 2.0, -1.0);
    let rsi = calculate_rsi(&closes, 14, RsiSmoothing::Wilder);

    assert_eq!(rsi.len(), closes.len());
    assert!(rsi[..14].iter().all(Option::is_none));
    assert!(rsi[14..].iter().all(Option::is_some));
}

#[test]
fn wilder_recursion_matches_hand_computation() {
    // deltas: +1, -1, +2, -1 with window 2 and alpha 0.5
    let closes = [10.0, 11.0, 10.0, 12.0, 11.0];
    let rsi = calculate_rsi(&closes, 2, RsiSmoothing::Wilder);

    assert_eq!(rsi[0], None);
    assert_eq!(rsi[1], None);
    assert_eq!(rsi[2], Some(50.0));
    let third = rsi[3].unwrap();
    assert!((third - (100.0 - 100.0 / 6.0)).abs() < 1e-9, "got {}", third);
    assert_eq!(rsi[4], Some(50.0));
}

#[test]
fn span_smoothing_uses_a_different_alpha() {
    assert_eq!(RsiSmoothing::Wilder.alpha(14), 1.0 / 14.0);
    assert_eq!(RsiSmoothing::Span.alpha(14), 2.0 / 15.0);

    let closes = zigzag_closes(120, 100.0, 2.0, -1.0);
    let wilder = calculate_rsi(&closes, 14, RsiSmoothing::Wilder);
    let span = calculate_rsi(&closes, 14, RsiSmoothing::Span);
    // The seed is shared, so the first defined value agrees.
    assert_eq!(wilder[14], span[14]);
    assert_ne!(wilder[119], span[119]);
}

#[test]
fn only_gains_is_one_hundred() {
    let rsi = calculate_rsi_default(&linear_closes(30, 100.0, 1.0));
    assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
}

#[test]
fn only_losses_is_zero() {
    let rsi = calculate_rsi_default(&linear_closes(30, 100.0, -1.0));
    assert!(rsi[14..].iter().all(|v| *v == Some(0.0)));
}

#[test]
fn flat_series_is_undefined() {
    let rsi = calculate_rsi_default(&[250.0; 40]);
    assert!(rsi.iter().all(Option::is_none));
}

#[test]
fn values_stay_within_bounds() {
    let closes = zigzag_closes(200, 100.0, 3.0, -2.5);
    for value in calculate_rsi_default(&closes).into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value));
    }
}

#[test]
fn degenerate_input_is_all_undefined() {
    // window + 1 closes are needed for window deltas
    assert!(calculate_rsi_default(&[1.0; 14]).iter().all(Option::is_none));
    assert!(calculate_rsi(&[1.0, 2.0, 3.0], 0, RsiSmoothing::Wilder)
        .iter()
        .all(Option::is_none));

    assert!(calculate_rsi(&[1.0, 2.0, 3.0], usize::MAX, RsiSmoothing::Wilder)
        .iter()
        .all(Option::is_none));

    let mut closes = linear_closes(30, 100.0, 1.0);
    closes[20] = f64::NAN;
    assert!(calculate_rsi_default(&closes).iter().all(Option::is_none));
}

#[test]
fn smoothing_parses_from_config_strings() {
    assert_eq!("wilder".parse::<RsiSmoothing>(), Ok(RsiSmoothing::Wilder));
    assert_eq!(" Span ".parse::<RsiSmoothing>(), Ok(RsiSmoothing::Span));
    assert_eq!("ema".parse::<RsiSmoothing>(), Ok(RsiSmoothing::Span));
    assert!("sma".parse::<RsiSmoothing>().is_err());
    assert_eq!(RsiSmoothing::default(), RsiSmoothing::Wilder);
    assert_eq!(RsiSmoothing::Span.to_string(), "span");
}
