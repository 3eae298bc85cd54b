//! Alert delivery interface.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("delivery rejected with status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Outbound channel for rendered alerts. Callers log failures and move on;
/// implementations must not retry.
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError>;
}

/// Writes alerts to the log only. Used when no chat credentials are configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl AlertSink for LogSink {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        info!(alert = %text, "LogSink: alert (no delivery channel configured)");
        Ok(())
    }
}
