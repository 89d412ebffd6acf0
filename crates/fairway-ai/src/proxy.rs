//! HTTP client for the AI service proxy

use async_trait::async_trait;
use fairway_api::{AiErrorBody, AiRequest};
use fairway_config::AiSettings;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::{AiError, AiResult, AiService};

/// Posts requests as JSON to the proxy endpoint
pub struct ProxyClient {
    http_client: reqwest::Client,
    url: String,
}

impl ProxyClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> AiResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;

        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn from_settings(settings: &AiSettings) -> AiResult<Self> {
        Self::new(settings.proxy_url.clone(), settings.timeout)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AiService for ProxyClient {
    async fn submit(&self, request: AiRequest) -> AiResult<Value> {
        let action = request.action();
        debug!(action, url = %self.url, "Calling AI service");

        let response = self
            .http_client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            error!(action, status = status.as_u16(), error = %message, "AI service error");
            return Err(AiError::Service(message));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AiError::InvalidResponse {
                action,
                message: e.to_string(),
            })
    }
}

/// The service's `{"error"}` message, or a generic one naming the status
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<AiErrorBody>(body) {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => format!("HTTP error! Status: {}", status),
    }
}
