//! Series primitives shared by the indicators.
//!
//! Every public indicator returns `Vec<Option<f64>>` aligned with its input.
//! `None` means "undefined" and is propagated rather than raised.

/// An all-undefined series of the given length.
pub fn undefined(len: usize) -> Vec<Option<f64>> {
    vec![None; len]
}

/// Input is usable when the window is non-zero, the series is at least
/// `window` long, and every value is finite.
pub fn is_well_formed(series: &[f64], window: usize) -> bool {
    window > 0 && series.len() >= window && series.iter().all(|v| v.is_finite())
}

/// Trailing arithmetic mean, undefined for indices `< window - 1`.
pub fn rolling_mean(series: &[f64], window: usize) -> Vec<Option<f64>> {
    if !is_well_formed(series, window) {
        return undefined(series.len());
    }

    let mut out = undefined(window - 1);
    out.extend(
        series
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    out
}

/// Smoothing factor for a span-based EMA.
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Recursive smoothing `acc += alpha * (x - acc)` over `values`, starting from `seed`.
///
/// The seed is not emitted; output has one entry per input value.
pub fn smooth_from(values: &[f64], alpha: f64, seed: f64) -> Vec<f64> {
    values
        .iter()
        .scan(seed, |acc, &x| {
            *acc += alpha * (x - *acc);
            Some(*acc)
        })
        .collect()
}

/// EMA seeded at the first value (no simple-average warm-up).
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    match values.split_first() {
        Some((&first, rest)) => {
            let mut out = Vec::with_capacity(values.len());
            out.push(first);
            out.extend(smooth_from(rest, span_alpha(span), first));
            out
        }
        None => Vec::new(),
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
