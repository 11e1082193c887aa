//! Client for the external summarization service.
//!
//! The service exposes `POST /api/summary` taking `{"text": ...}` and
//! answering `{"summary": ...}`, or `{"error": ...}` with a non-2xx status.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::config::SummaryConfig;
use crate::error::{AppError, Result};

#[derive(Debug, Serialize)]
struct SummaryRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: String,
}

/// HTTP client for the summarization service.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl SummaryClient {
    /// Build a client for the service configured in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] if the base URL is invalid, or
    /// [`AppError::Summary`] if the HTTP client cannot be built.
    pub fn new(config: &SummaryConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("invalid summary base_url: {e}")))?;
        let endpoint = base
            .join("/api/summary")
            .map_err(|e| AppError::Config(format!("invalid summary endpoint: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Summary(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    /// Summarize `text`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Summary`] on transport failure, a non-2xx status
    /// (carrying the service's `error` message when it sent one) or an
    /// unexpected response body.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        tracing::trace!(bytes = text.len(), "requesting summary");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&SummaryRequest { text })
            .send()
            .await
            .map_err(|e| AppError::Summary(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<UpstreamError>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "no error detail".to_owned());
            return Err(AppError::Summary(format!("service returned {status}: {detail}")));
        }

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|e| AppError::Summary(format!("invalid response body: {e}")))?;
        Ok(body.summary)
    }
}
