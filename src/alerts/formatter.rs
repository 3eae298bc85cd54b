//! Markdown alert templates, one per tier.

use crate::models::indicators::Snapshot;
use crate::models::signal::SignalTier;

/// Render the alert text for `tier`, or `None` when there is nothing to send.
///
/// `SignalTier::None` never produces a message, and neither does a snapshot
/// with a non-finite field.
pub fn format_alert(tier: SignalTier, snapshot: &Snapshot, instrument: &str) -> Option<String> {
    if !snapshot.is_finite() {
        return None;
    }

    let (icon, title) = match tier {
        SignalTier::None => return None,
        SignalTier::HighBullish => ("🚀", "High-Confidence Bullish"),
        SignalTier::HighBearish => ("🔻", "High-Confidence Bearish"),
        SignalTier::MildBullish => ("📈", "Mild Bullish"),
        SignalTier::MildBearish => ("📉", "Mild Bearish"),
    };
    let relation = if tier.is_bullish() { ">" } else { "<" };

    let mut message = format!(
        "{icon} *{title}*: {instrument}\nPrice: {price:.2}\nRSI: {rsi:.1}\nMACD: {macd:.3} {relation} Signal: {signal:.3}",
        instrument = escape_markdown(instrument),
        price = snapshot.price,
        rsi = snapshot.rsi,
        macd = snapshot.macd,
        signal = snapshot.macd_signal,
    );
    if tier.is_high() {
        message.push_str(&format!(
            "\nVolume: {:.0} vs avg {:.0} ✅ spike confirmed",
            snapshot.volume, snapshot.volume_avg
        ));
    }
    Some(message)
}

/// Escape characters that legacy Telegram Markdown treats as markup.
fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
