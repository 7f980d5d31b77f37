//! Chat Completions Provider
//!
//! Client for OpenAI-compatible Chat Completions endpoints (Groq, OpenAI).

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{CompletionRequest, LlmProvider, LlmResponse, ProviderKind, TokenUsage};
use crate::config::LlmConfig;
use crate::types::{ChurnError, ErrorCategory, ErrorClassifier, LlmError, Result};

/// Chat Completions provider with secure API key handling
pub struct ChatCompletionsProvider {
    kind: ProviderKind,
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for ChatCompletionsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsProvider")
            .field("provider", &self.kind.name())
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl ChatCompletionsProvider {
    pub fn new(kind: ProviderKind, api_key: SecretString, config: &LlmConfig) -> Result<Self> {
        let api_base = Self::validate_endpoint(
            config
                .api_base
                .as_deref()
                .unwrap_or(kind.default_api_base()),
        )?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChurnError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            kind,
            api_key,
            api_base,
            model: config.model.clone(),
            client,
        })
    }

    /// Only http/https endpoints are accepted; trailing slash is dropped.
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            ChurnError::Config(format!("Invalid API base URL '{}': {}", endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ChurnError::Config(format!(
                "API base must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if url.scheme() == "http"
            && let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "::1")
        {
            warn!("API base {} is not using TLS", host);
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt.clone(),
                },
            ],
            temperature: request.temperature,
            max_tokens: Some(request.max_tokens),
        }
    }

    fn error(&self, category: ErrorCategory, message: impl Into<String>) -> ChurnError {
        LlmError::with_provider(category, message, self.kind.name()).into()
    }
}

/// Pull the first choice's text out of a completion body; blank is an error.
fn extract_content(body: &ChatCompletionResponse) -> Option<String> {
    body.choices
        .first()
        .and_then(|c| c.message.content.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl LlmProvider for ChatCompletionsProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse> {
        info!(
            "Generating with {} (model: {}, temperature: {})",
            self.kind.name(),
            self.model,
            request.temperature
        );

        let start_time = Instant::now();
        let body = self.build_request(request);
        let url = format!("{}/chat/completions", self.api_base);

        debug!("Sending request to {}", url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let message = format!("Request failed: {}", e);
                if e.is_timeout() || e.is_connect() {
                    self.error(ErrorCategory::Network, message)
                } else {
                    ErrorClassifier::classify(&message, self.kind.name()).into()
                }
            })?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(
                status.as_u16(),
                &format!("API error ({}): {}", status, text),
                self.kind.name(),
            )
            .into());
        }

        let response_body: ChatCompletionResponse = response.json().await.map_err(|e| {
            self.error(
                ErrorCategory::ParseError,
                format!("Failed to parse response: {}", e),
            )
        })?;

        let usage = response_body
            .usage
            .as_ref()
            .map(|u| TokenUsage::from_openai(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let content = extract_content(&response_body)
            .ok_or_else(|| self.error(ErrorCategory::ParseError, "Empty completion returned"))?;

        debug!(
            tokens = usage.total(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Completion received"
        );

        Ok(LlmResponse { content, usage })
    }

    fn name(&self) -> &str {
        self.kind.name()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}
