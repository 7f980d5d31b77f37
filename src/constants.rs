//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Metrics cache constants
pub mod cache {
    /// Default time-to-live for cached query results (seconds)
    pub const DEFAULT_TTL_SECS: u64 = 300;
}

/// Database constants
pub mod database {
    /// Default SQLite file, relative to the project directory
    pub const DEFAULT_PATH: &str = ".churnguard/churn_analytics.db";

    /// Default connection pool size
    pub const DEFAULT_POOL_SIZE: u32 = 4;

    /// Timeout for acquiring a pooled connection (seconds)
    pub const CONNECTION_TIMEOUT_SECS: u64 = 5;

    /// Maximum number of churn reasons returned
    pub const TOP_CHURN_REASONS: usize = 10;
}

/// Completion service constants
pub mod llm {
    /// Default provider name
    pub const DEFAULT_PROVIDER: &str = "groq";

    /// Default model served by the default provider
    pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

    /// Sampling temperature for analyst answers
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;

    /// Output token cap per answer
    pub const DEFAULT_MAX_TOKENS: usize = 500;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Persona sent as the system message on every completion
    pub const SYSTEM_PERSONA: &str = "You are an expert customer retention analyst specializing in telecom churn analysis. Provide concise, data-driven insights.";
}
