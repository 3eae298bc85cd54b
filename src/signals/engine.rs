//! Signal evaluation engine: bars in, snapshot and tier out.

use serde::Serialize;

use crate::config::ScanConfig;
use crate::models::bar::Bar;
use crate::models::indicators::Snapshot;
use crate::models::signal::SignalTier;
use crate::signals::classifier::SignalClassifier;
use crate::signals::error::EvaluationError;
use crate::signals::preprocess;

pub const MIN_BARS: usize = crate::config::DEFAULT_MIN_BARS;

/// Successful evaluation. `tier` may still be `SignalTier::None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub snapshot: Snapshot,
    pub tier: SignalTier,
}

/// Pure, reentrant evaluator; safe to share across tasks.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: ScanConfig,
    classifier: SignalClassifier,
}

impl SignalEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            classifier: SignalClassifier::new(config.thresholds),
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Evaluate the latest bar of `bars`.
    pub fn evaluate(&self, bars: &[Bar]) -> Result<Evaluation, EvaluationError> {
        let snapshot = preprocess::latest_snapshot(bars, &self.config)?;
        let tier = self.classifier.classify(&snapshot);
        Ok(Evaluation { snapshot, tier })
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
