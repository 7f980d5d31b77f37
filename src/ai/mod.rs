//! AI Integration Layer
//!
//! Prompt construction, completion providers and the answer engine with its
//! local fallback analyst.

pub mod engine;
pub mod fallback;
pub mod prompt;
pub mod provider;
pub mod timeout;

pub use engine::{Answer, AnswerSource, EngineSettings, ResponseEngine};
pub use fallback::Topic;
pub use prompt::{PromptBuilder, PromptSection, build_prompt, suggested_questions};
pub use provider::{
    ChatCompletionsProvider, CompletionRequest, LlmProvider, LlmResponse, ProviderKind,
    SharedProvider, create_provider,
};
pub use timeout::with_timeout;
