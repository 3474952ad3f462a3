use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::core::config::Settings;

#[derive(Debug, Error)]
pub(crate) enum DeliveryError {
    #[error("failed to send Telegram message: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Telegram sendMessage responded with status {status}: {description}")]
    Status { status: StatusCode, description: String },
    #[error("Telegram sendMessage returned ok=false: {0}")]
    Rejected(String),
    #[error("Telegram sendMessage returned an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Destination for status and failure messages.
#[async_trait]
pub(crate) trait Notifier: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Deserialize)]
struct TgOkResponse {
    ok: bool,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct TelegramNotifier {
    client: Client,
    api_base: String,
    token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub(crate) fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(settings.http().timeout())
            .build()
            .context("Failed to build Telegram HTTP client")?;

        let telegram = settings.telegram();
        Ok(Self::new(
            client,
            telegram.api_base.clone(),
            telegram.token.clone(),
            telegram.chat_id.clone(),
        ))
    }

    pub(crate) fn new(client: Client, api_base: String, token: String, chat_id: String) -> Self {
        Self { client, api_base, token, chat_id }
    }

    async fn post_message(&self, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(format!("{}/bot{}/sendMessage", self.api_base, self.token))
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(DeliveryError::Request)?;

        let status = response.status();
        let payload = response.json::<TgOkResponse>().await;

        if !status.is_success() {
            let description = payload
                .ok()
                .and_then(|payload| payload.description)
                .unwrap_or_else(|| "unknown Telegram API error".to_string());
            return Err(DeliveryError::Status { status, description });
        }

        let payload = payload.map_err(DeliveryError::Decode)?;
        if payload.ok {
            return Ok(());
        }

        let description =
            payload.description.unwrap_or_else(|| "unknown Telegram API error".to_string());
        Err(DeliveryError::Rejected(description))
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, text: &str) -> Result<(), DeliveryError> {
        match self.post_message(text).await {
            Ok(()) => {
                tracing::debug!(message = text, "Telegram message sent");
                Ok(())
            }
            Err(error) => {
                tracing::error!(error = %error, message = text, "Telegram message was not delivered");
                Err(error)
            }
        }
    }
}
