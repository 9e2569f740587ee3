//! Anthropic Messages API client.

use super::{CompletionRequest, ContentBlock, ModelClient, ModelReply, StopReason};
use crate::config::ModelSettings;
use crate::error::{LaereError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// API version header required by the Messages endpoint.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Sampling temperature. Answers should be deterministic and fact-based.
const TEMPERATURE: f32 = 0.0;

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
    max_tokens: u32,
    http: reqwest::Client,
}

impl AnthropicClient {
    /// Create a client from model settings.
    ///
    /// The API key comes from the settings or the `ANTHROPIC_API_KEY`
    /// environment variable. The request timeout applies to every call.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                LaereError::Config(
                    "No API key configured. Set ANTHROPIC_API_KEY or [model].api_key".to_string(),
                )
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            model: settings.model.clone(),
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            max_tokens: settings.max_tokens,
            http,
        })
    }

    /// Build the request body for one call.
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "temperature": TEMPERATURE,
            "system": request.system,
            "messages": request.messages,
        });

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(request.tools);
            body["tool_choice"] = serde_json::json!({"type": "auto"});
        }

        body
    }

    /// Convert a wire response into a [`ModelReply`].
    ///
    /// Unknown content-block types are skipped rather than failing the
    /// whole reply.
    fn parse_reply(response: WireResponse) -> ModelReply {
        let content = response
            .content
            .into_iter()
            .filter_map(|block| match serde_json::from_value::<ContentBlock>(block) {
                Ok(b) => Some(b),
                Err(e) => {
                    warn!("Skipping unrecognized content block: {}", e);
                    None
                }
            })
            .collect();

        let stop_reason = response
            .stop_reason
            .as_deref()
            .map(StopReason::parse)
            .unwrap_or(StopReason::EndTurn);

        ModelReply {
            content,
            stop_reason,
        }
    }
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelReply> {
        let body = self.build_request_body(&request);
        debug!(
            model = %self.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LaereError::Model(format!(
                "API request failed with status {}: {}",
                status, detail
            )));
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LaereError::Model(format!("Malformed API response: {}", e)))?;

        Ok(Self::parse_reply(wire))
    }
}

/// The subset of the Messages API response the client consumes.
#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<serde_json::Value>,
    stop_reason: Option<String>,
}
