//! Review-service API client implementation.

use anyhow::Result;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ReviewConfig;
use crate::git::FileDiff;
use crate::laas::error::LaasError;

/// Default preset endpoint of the review service.
const DEFAULT_BASE_URL: &str = "https://api-laas.wanted.co.kr/api/preset";

/// Review request body.
#[derive(Serialize)]
struct ReviewRequest<'a> {
    hash: &'a str,
    params: ReviewParams<'a>,
}

/// Preset parameters: the two views of the file under review.
#[derive(Serialize)]
struct ReviewParams<'a> {
    full_content: &'a str,
    changed_content: &'a str,
}

/// Review response body.
///
/// A 2xx response may still carry an application-level error payload
/// (`error`/`message`) instead of choices.
#[derive(Deserialize)]
struct ReviewResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<serde_json::Value>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the remote chat-completions review endpoint.
pub struct LaasClient {
    client: Client,
    base_url: String,
    api_key: String,
    project_id: &'static str,
    preset_hash: &'static str,
}

impl LaasClient {
    /// Creates a client from a validated configuration.
    pub fn new(config: &ReviewConfig) -> Self {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client pointed at a specific base URL. Used by tests
    /// to direct requests at a local mock server.
    pub fn with_base_url(config: &ReviewConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: config.api_key.clone(),
            project_id: config.project_id,
            preset_hash: config.preset_hash,
        }
    }

    /// Requests a review for one file's diff and returns the review
    /// text.
    pub async fn review(&self, diff: &FileDiff) -> Result<String> {
        let request = ReviewRequest {
            hash: self.preset_hash,
            params: ReviewParams {
                full_content: &diff.full_content,
                changed_content: &diff.changed_content,
            },
        };

        debug!(base_url = %self.base_url, "sending review request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Content-Type", "application/json")
            .header("project", self.project_id)
            .header("apiKey", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LaasError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LaasError::RequestFailed(format!("HTTP {status}: {error_text}")).into());
        }

        let review_response: ReviewResponse = response
            .json()
            .await
            .map_err(|e| LaasError::InvalidResponseFormat(e.to_string()))?;

        // A 2xx body carrying an error payload is still a failure.
        if let Some(error) = review_response.error {
            return Err(LaasError::ServiceError(error.to_string()).into());
        }

        review_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                let detail = review_response
                    .message
                    .unwrap_or_else(|| "No choices in response".to_string());
                LaasError::ServiceError(detail).into()
            })
    }
}
