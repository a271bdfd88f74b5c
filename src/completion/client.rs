//! HTTP client for the text-completion endpoint
//!
//! Sends `{ "text_input": ... }` and expects `{ "autocompleted_text": ... }`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::ServiceError;
use crate::config::CompletionConfig;

/// Default completion endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/documents/autocomplete";

#[derive(Debug, Serialize)]
struct AutocompleteRequest<'a> {
    text_input: &'a str,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    autocompleted_text: String,
}

/// Async client for the completion service
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_url: String,
}

impl CompletionClient {
    pub fn new(api_url: String, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        Ok(Self { http, api_url })
    }

    /// Create a client from configuration
    ///
    /// Returns an error if remote completion is disabled or the endpoint is
    /// empty.
    pub fn from_config(config: &CompletionConfig) -> Result<Self, ServiceError> {
        if !config.enabled {
            return Err(ServiceError::NotConfigured(
                "remote completion is disabled in config".to_string(),
            ));
        }

        let api_url = config.api_url.trim();
        if api_url.is_empty() {
            return Err(ServiceError::NotConfigured(
                "missing api_url in [completion] config".to_string(),
            ));
        }

        Self::new(
            api_url.to_string(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Request a completion for the given paragraph text
    pub async fn fetch(&self, prompt: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .post(&self.api_url)
            .json(&AutocompleteRequest { text_input: prompt })
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body: AutocompleteResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        Ok(body.autocompleted_text)
    }

    /// Like [`fetch`](Self::fetch), but aborts as soon as `cancel` fires
    pub async fn fetch_with_cancel(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ServiceError> {
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ServiceError::Cancelled),
            result = self.fetch(prompt) => result,
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;
