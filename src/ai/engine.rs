//! Response Engine
//!
//! Produces an answer for every question. When a completion provider is
//! configured the prompt is delegated to it; any failure there (transport,
//! HTTP status, timeout, empty text) is classified, logged and replaced by
//! the local analyst's answer. There is no retry.

use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::fallback::{self, Topic};
use super::provider::{CompletionRequest, SharedProvider, create_provider};
use super::timeout::with_timeout;
use crate::config::LlmConfig;
use crate::constants::llm::SYSTEM_PERSONA;
use crate::types::{ChurnError, ErrorCategory, ErrorClassifier, Result};

/// Which path produced an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerSource {
    Delegated { provider: String, model: String },
    Local { topic: Topic },
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Delegated { provider, model } => write!(f, "{} ({})", provider, model),
            Self::Local { topic } => write!(f, "local analyst: {}", topic),
        }
    }
}

/// Answer text with provenance
#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Per-request completion parameters
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub system: String,
    pub temperature: f32,
    pub max_tokens: usize,
    pub timeout: Duration,
}

impl From<&LlmConfig> for EngineSettings {
    fn from(config: &LlmConfig) -> Self {
        Self {
            system: SYSTEM_PERSONA.to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&LlmConfig::default())
    }
}

/// Delegating or local answer generation
pub struct ResponseEngine {
    delegate: Option<SharedProvider>,
    settings: EngineSettings,
}

impl ResponseEngine {
    pub fn new(delegate: Option<SharedProvider>, settings: EngineSettings) -> Self {
        Self { delegate, settings }
    }

    /// Engine that always answers locally
    pub fn local_only() -> Self {
        Self::new(None, EngineSettings::default())
    }

    /// Build from config; delegating only when an API key is available
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let delegate = create_provider(config)?;
        Ok(Self::new(delegate, EngineSettings::from(config)))
    }

    pub fn is_delegating(&self) -> bool {
        self.delegate.is_some()
    }

    /// Answer `question`, delegating `prompt` when possible.
    ///
    /// Local routing always looks at the raw question, never the prompt.
    pub async fn answer(&self, question: &str, prompt: &str) -> Answer {
        let Some(provider) = &self.delegate else {
            debug!("No completion provider configured, answering locally");
            return Self::answer_locally(question);
        };

        let request = CompletionRequest {
            system: self.settings.system.clone(),
            prompt: prompt.to_string(),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let outcome = with_timeout(
            self.settings.timeout,
            provider.complete(&request),
            "completion",
        )
        .await
        .and_then(|response| {
            let text = response.content.trim();
            if text.is_empty() {
                Err(ChurnError::llm_with_category(
                    ErrorCategory::ParseError,
                    "Empty completion returned",
                ))
            } else {
                Ok((text.to_string(), response.usage.total()))
            }
        });

        match outcome {
            Ok((text, tokens)) => {
                info!(provider = provider.name(), tokens, "Answer delegated");
                Answer {
                    text,
                    source: AnswerSource::Delegated {
                        provider: provider.name().to_string(),
                        model: provider.model().to_string(),
                    },
                }
            }
            Err(e) => {
                let classified = ErrorClassifier::classify_error(&e, provider.name());
                warn!(
                    category = %classified.category,
                    "Completion unavailable, using local analyst: {}",
                    classified
                );
                Self::answer_locally(question)
            }
        }
    }

    /// Keyword-routed canned answer
    pub fn answer_locally(question: &str) -> Answer {
        let (topic, text) = fallback::respond(question);
        Answer {
            text: text.to_string(),
            source: AnswerSource::Local { topic },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::{LlmProvider, LlmResponse, SharedProvider};
    use crate::types::LlmError;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    enum Behavior {
        Reply(&'static str),
        Fail(ErrorCategory),
        Hang,
    }

    struct MockProvider {
        behavior: Behavior,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        fn shared(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for MockProvider {
        async fn complete(&self, request: &CompletionRequest) -> Result<LlmResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match self.behavior {
                Behavior::Reply(text) => Ok(LlmResponse::content_only(text)),
                Behavior::Fail(category) => {
                    Err(LlmError::with_provider(category, "mock failure", "mock").into())
                }
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Err(LlmError::new(ErrorCategory::Unknown, "unreachable").into())
                }
            }
        }

        fn name(&self) -> &str {
            "mock"
        }

        fn model(&self) -> &str {
            "mock-model"
        }
    }

    fn engine_with(mock: Arc<MockProvider>, timeout: Duration) -> ResponseEngine {
        let settings = EngineSettings {
            timeout,
            ..Default::default()
        };
        ResponseEngine::new(Some(mock as SharedProvider), settings)
    }

    #[tokio::test]
    async fn test_delegated_answer_is_trimmed() {
        let mock = MockProvider::shared(Behavior::Reply("  Focus on service quality.  "));
        let engine = engine_with(mock.clone(), Duration::from_secs(5));

        let answer = engine.answer("Why is churn happening?", "PROMPT").await;
        assert_eq!(answer.text, "Focus on service quality.");
        assert_eq!(
            answer.source,
            AnswerSource::Delegated {
                provider: "mock".to_string(),
                model: "mock-model".to_string()
            }
        );

        let seen = mock.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].prompt, "PROMPT");
        assert_eq!(seen[0].system, SYSTEM_PERSONA);
        assert_eq!(seen[0].temperature, 0.7);
        assert_eq!(seen[0].max_tokens, 500);
    }

    #[tokio::test]
    async fn test_provider_error_falls_back_without_retry() {
        let mock = MockProvider::shared(Behavior::Fail(ErrorCategory::RateLimit));
        let engine = engine_with(mock.clone(), Duration::from_secs(5));

        let answer = engine.answer("How is revenue generated?", "PROMPT").await;
        assert_eq!(
            answer.source,
            AnswerSource::Local {
                topic: Topic::RevenueBreakdown
            }
        );
        assert!(answer.text.contains("$4.23B"));
        assert_eq!(mock.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let mock = MockProvider::shared(Behavior::Hang);
        let engine = engine_with(mock, Duration::from_millis(20));

        let answer = engine.answer("Best retention strategies?", "PROMPT").await;
        assert!(!answer.text.is_empty());
        assert_eq!(
            answer.source,
            AnswerSource::Local {
                topic: Topic::RetentionStrategy
            }
        );
    }

    #[tokio::test]
    async fn test_empty_completion_falls_back() {
        let mock = MockProvider::shared(Behavior::Reply("   \n"));
        let engine = engine_with(mock, Duration::from_secs(5));

        let answer = engine.answer("Which segments are at risk?", "PROMPT").await;
        assert_eq!(
            answer.source,
            AnswerSource::Local {
                topic: Topic::SegmentRisk
            }
        );
    }

    #[tokio::test]
    async fn test_local_routing_ignores_prompt() {
        let engine = ResponseEngine::local_only();
        assert!(!engine.is_delegating());

        // The prompt mentions revenue and churn; the question does not.
        let answer = engine
            .answer("hello", "Why churn? Revenue at risk for every customer segment")
            .await;
        assert_eq!(
            answer.source,
            AnswerSource::Local {
                topic: Topic::Overview
            }
        );
    }

    #[test]
    fn test_answer_source_display() {
        let local = AnswerSource::Local {
            topic: Topic::Regional,
        };
        assert_eq!(local.to_string(), "local analyst: regional");
    }
}
