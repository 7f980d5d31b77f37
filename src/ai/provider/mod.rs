//! Completion Provider Abstraction
//!
//! Defines the `LlmProvider` trait for free-text analyst answers.
//! All providers return `LlmResponse` with token usage.
//!
//! ## Modules
//!
//! - `openai`: OpenAI-compatible Chat Completions client (Groq, OpenAI)

mod openai;

pub use openai::ChatCompletionsProvider;

// Re-export error types from centralized location
pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::config::LlmConfig;
use crate::types::{ChurnError, Result};

// =============================================================================
// Request / Response
// =============================================================================

/// One completion round-trip: system persona plus user prompt
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

/// Completion text with usage
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated answer, trimmed and non-empty
    pub content: String,
    /// Token usage metrics
    pub usage: TokenUsage,
}

impl LlmResponse {
    /// Create response with content only (usage unknown)
    pub fn content_only(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }
}

/// Shared provider handle.
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Completion service used by the delegating answer path
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one chat completion.
    ///
    /// Implementations return an error for an empty completion, so an `Ok`
    /// response always carries usable text.
    async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

// =============================================================================
// Provider Selection
// =============================================================================

/// Supported OpenAI-compatible backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Groq,
    OpenAi,
}

impl ProviderKind {
    pub fn parse(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "groq" => Ok(Self::Groq),
            "openai" => Ok(Self::OpenAi),
            other => Err(ChurnError::Config(format!(
                "Unknown provider: {}. Supported: groq, openai",
                other
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAi => "openai",
        }
    }

    pub fn default_api_base(self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variable consulted when the config carries no key
    pub fn api_key_env(self) -> &'static str {
        match self {
            Self::Groq => "GROQ_API_KEY",
            Self::OpenAi => "OPENAI_API_KEY",
        }
    }
}

/// Resolve the API key from config, then the provider's environment variable.
///
/// Blank values count as absent.
pub fn resolve_api_key(config: &LlmConfig, kind: ProviderKind) -> Option<SecretString> {
    config
        .api_key
        .clone()
        .or_else(|| std::env::var(kind.api_key_env()).ok())
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
}

/// Create the delegate provider, or `None` when no API key is available.
///
/// Configuration errors (unknown provider, malformed endpoint) are returned
/// so they surface once at construction rather than on every question.
pub fn create_provider(config: &LlmConfig) -> Result<Option<SharedProvider>> {
    let kind = ProviderKind::parse(&config.provider)?;

    let Some(api_key) = resolve_api_key(config, kind) else {
        info!(
            "No API key for {} (set {}); answers will use the local analyst",
            kind.name(),
            kind.api_key_env()
        );
        return Ok(None);
    };

    let provider = ChatCompletionsProvider::new(kind, api_key, config)?;
    Ok(Some(Arc::new(provider)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!(ProviderKind::parse("groq").unwrap(), ProviderKind::Groq);
        assert_eq!(ProviderKind::parse("OpenAI").unwrap(), ProviderKind::OpenAi);
        assert!(matches!(
            ProviderKind::parse("claude"),
            Err(ChurnError::Config(_))
        ));
    }

    #[test]
    fn test_create_provider_with_configured_key() {
        let config = LlmConfig {
            api_key: Some("gsk_test".to_string()),
            ..Default::default()
        };
        let provider = create_provider(&config).unwrap().unwrap();
        assert_eq!(provider.name(), "groq");
        assert_eq!(provider.model(), "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_blank_key_counts_as_absent() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        // Only meaningful when the env var is unset in the test environment.
        if std::env::var("OPENAI_API_KEY").is_err() {
            assert!(create_provider(&config).unwrap().is_none());
        }
    }

    #[test]
    fn test_create_provider_rejects_unknown() {
        let config = LlmConfig {
            provider: "mystery".to_string(),
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(create_provider(&config).is_err());
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage::from_openai(100, 50);
        assert_eq!(usage.total(), 150);
    }
}
