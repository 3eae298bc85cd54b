//! Threshold rules that map a snapshot onto exactly one alert tier.

use crate::config::SignalThresholds;
use crate::models::indicators::Snapshot;
use crate::models::signal::SignalTier;

/// Ordered rule set over a complete snapshot.
///
/// HIGH tiers are checked before MILD tiers: a snapshot meeting a HIGH rule
/// also meets the matching MILD rule, and the earlier tier wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalClassifier {
    thresholds: SignalThresholds,
}

impl SignalClassifier {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// First matching tier in priority order, or `SignalTier::None`.
    pub fn classify(&self, snapshot: &Snapshot) -> SignalTier {
        SignalTier::PRIORITY
            .into_iter()
            .find(|&tier| self.matches(tier, snapshot))
            .unwrap_or(SignalTier::None)
    }

    /// Whether the rule for `tier` holds, ignoring priority.
    pub fn matches(&self, tier: SignalTier, snapshot: &Snapshot) -> bool {
        let t = &self.thresholds;
        match tier {
            SignalTier::HighBullish => {
                bullish_trend(snapshot) && snapshot.rsi < t.rsi_high && self.volume_spike(snapshot)
            }
            SignalTier::HighBearish => {
                bearish_trend(snapshot) && snapshot.rsi > t.rsi_low && self.volume_spike(snapshot)
            }
            SignalTier::MildBullish => bullish_trend(snapshot) && snapshot.rsi < t.rsi_mild_high,
            SignalTier::MildBearish => bearish_trend(snapshot) && snapshot.rsi > t.rsi_mild_low,
            SignalTier::None => true,
        }
    }

    /// Volume above `volume_multiplier` times its average. A non-positive
    /// average never confirms a spike.
    pub fn volume_spike(&self, snapshot: &Snapshot) -> bool {
        snapshot.volume_avg > 0.0
            && snapshot.volume > self.thresholds.volume_multiplier * snapshot.volume_avg
    }
}

/// Price above its average with MACD above its signal line.
fn bullish_trend(s: &Snapshot) -> bool {
    s.price > s.sma && s.macd > s.macd_signal
}

/// Price below its average with MACD below its signal line.
fn bearish_trend(s: &Snapshot) -> bool {
    s.price < s.sma && s.macd < s.macd_signal
}
