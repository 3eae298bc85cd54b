//! Read-only scan results for observability surfaces.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::indicators::Snapshot;
use super::signal::SignalTier;

/// How one instrument's pipeline ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstrumentOutcome {
    /// A tier matched and an alert was handed to the delivery channel.
    Alert {
        tier: SignalTier,
        delivered: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        delivery_error: Option<String>,
    },
    /// Evaluation completed and no tier matched.
    NoSignal,
    /// Evaluation could not complete.
    NoResult {
        reason: &'static str,
        detail: String,
    },
}

impl InstrumentOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            InstrumentOutcome::Alert { .. } => "alert",
            InstrumentOutcome::NoSignal => "no_signal",
            InstrumentOutcome::NoResult { reason, .. } => reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentReport {
    pub instrument: String,
    #[serde(flatten)]
    pub snapshot: Option<Snapshot>,
    pub outcome: InstrumentOutcome,
}

impl InstrumentReport {
    pub fn tier(&self) -> Option<SignalTier> {
        match self.outcome {
            InstrumentOutcome::Alert { tier, .. } => Some(tier),
            InstrumentOutcome::NoSignal => Some(SignalTier::None),
            InstrumentOutcome::NoResult { .. } => None,
        }
    }
}

/// Result of one pass over every configured instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub instruments: Vec<InstrumentReport>,
}

impl ScanReport {
    pub fn alert_count(&self) -> usize {
        self.instruments
            .iter()
            .filter(|r| matches!(r.outcome, InstrumentOutcome::Alert { .. }))
            .count()
    }

    pub fn no_result_count(&self) -> usize {
        self.instruments
            .iter()
            .filter(|r| matches!(r.outcome, InstrumentOutcome::NoResult { .. }))
            .count()
    }

    pub fn report_for(&self, instrument: &str) -> Option<&InstrumentReport> {
        self.instruments.iter().find(|r| r.instrument == instrument)
    }
}
