use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::core::config::Settings;

#[derive(Debug, Error)]
pub(crate) enum PracticumError {
    #[error("request to Practicum API failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Practicum API responded with status {status}")]
    Response { status: StatusCode },
    #[error("Practicum API returned a non-JSON body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Source of homework status answers.
#[async_trait]
pub(crate) trait HomeworkApi: Send + Sync {
    /// Fetches homework statuses changed since `timestamp` (unix seconds).
    async fn get_api_answer(&self, timestamp: i64) -> Result<Value, PracticumError>;
}

/// Client for the homework statuses endpoint.
#[derive(Debug, Clone)]
pub(crate) struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub(crate) fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(settings.http().timeout())
            .build()
            .context("Failed to build Practicum HTTP client")?;

        Ok(Self::new(
            client,
            settings.practicum().endpoint.clone(),
            settings.practicum().token.clone(),
        ))
    }

    pub(crate) fn new(client: Client, endpoint: String, token: String) -> Self {
        Self { client, endpoint, token }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, timestamp: i64) -> Result<Value, PracticumError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", timestamp.to_string())])
            .send()
            .await
            .map_err(PracticumError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(
                status = %status,
                endpoint = %self.endpoint,
                "Practicum API returned unexpected status"
            );
            return Err(PracticumError::Response { status });
        }

        let raw_body = response.text().await.map_err(PracticumError::Request)?;
        serde_json::from_str(&raw_body).map_err(PracticumError::Decode)
    }
}
