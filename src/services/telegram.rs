//! Telegram Bot API delivery.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::TelegramSettings;
use crate::services::delivery::{AlertSink, DeliveryError};

/// Posts alerts to one chat through `sendMessage` with Markdown parsing.
#[derive(Clone)]
pub struct TelegramNotifier {
    endpoint: String,
    chat_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'static str,
}

impl TelegramNotifier {
    pub fn new(settings: &TelegramSettings) -> Result<Self, DeliveryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self::with_client(settings, client))
    }

    pub fn with_client(settings: &TelegramSettings, client: reqwest::Client) -> Self {
        Self {
            endpoint: format!(
                "{}/bot{}/sendMessage",
                settings.base_url.trim_end_matches('/'),
                settings.bot_token
            ),
            chat_id: settings.chat_id.clone(),
            client,
        }
    }
}

#[async_trait]
impl AlertSink for TelegramNotifier {
    async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };

        // The endpoint embeds the bot token; keep it out of error messages.
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Http(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "TelegramNotifier: alert delivered");
        Ok(())
    }
}
