use serde::{Deserialize, Serialize};
use std::fmt;

/// Alert tier chosen for one instrument in one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalTier {
    None,
    HighBullish,
    HighBearish,
    MildBullish,
    MildBearish,
}

impl SignalTier {
    /// Tiers in evaluation order. The first matching tier wins.
    pub const PRIORITY: [SignalTier; 4] = [
        SignalTier::HighBullish,
        SignalTier::HighBearish,
        SignalTier::MildBullish,
        SignalTier::MildBearish,
    ];

    pub fn is_high(self) -> bool {
        matches!(self, SignalTier::HighBullish | SignalTier::HighBearish)
    }

    pub fn is_bullish(self) -> bool {
        matches!(self, SignalTier::HighBullish | SignalTier::MildBullish)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignalTier::None => "none",
            SignalTier::HighBullish => "high_bullish",
            SignalTier::HighBearish => "high_bearish",
            SignalTier::MildBullish => "mild_bullish",
            SignalTier::MildBearish => "mild_bearish",
        }
    }
}

impl fmt::Display for SignalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
