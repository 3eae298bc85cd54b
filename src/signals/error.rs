use thiserror::Error;

use crate::services::market_data::ProviderError;

/// Why an instrument produced no result in a scan. All variants are
/// recoverable: the instrument is skipped until the next scan.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("insufficient data: {bars} bars, need at least {required}")]
    InsufficientData { bars: usize, required: usize },
    #[error("indicator '{field}' is undefined at the latest bar")]
    IndeterminateIndicator { field: &'static str },
    #[error("bar retrieval failed: {0}")]
    Retrieval(#[from] ProviderError),
}

impl EvaluationError {
    /// Stable label for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            EvaluationError::InsufficientData { .. } => "insufficient_data",
            EvaluationError::IndeterminateIndicator { .. } => "indeterminate_indicator",
            EvaluationError::Retrieval(_) => "retrieval_failure",
        }
    }
}
