//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{cache, database, llm};
use crate::types::{ChurnError, Result};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Data source settings
    pub database: DatabaseConfig,

    /// Metrics cache settings
    pub cache: CacheConfig,

    /// Completion service settings
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ChurnError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ChurnError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(ChurnError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size == 0 {
            return Err(ChurnError::Config(
                "Database pool_size must be greater than 0".to_string(),
            ));
        }

        if self.database.connection_timeout_secs == 0 {
            return Err(ChurnError::Config(
                "Database connection_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// Database Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file
    pub path: PathBuf,

    /// Maximum pooled connections
    pub pool_size: u32,

    /// Seconds to wait for a free connection before giving up
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(database::DEFAULT_PATH),
            pool_size: database::DEFAULT_POOL_SIZE,
            connection_timeout_secs: database::CONNECTION_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Cache Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Time-to-live for cached query results, in seconds. 0 disables caching.
    pub ttl_secs: u64,
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: cache::DEFAULT_TTL_SECS,
        }
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

/// Completion service settings.
///
/// The API key is never serialized and is redacted in debug output.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: "groq" or "openai"
    pub provider: String,

    /// Model name
    pub model: String,

    /// API base URL override
    pub api_base: Option<String>,

    /// API key; falls back to the provider's environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token cap
    pub max_tokens: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: None,
            api_key: None,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.llm.provider, "groq");
        assert_eq!(config.llm.max_tokens, 500);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_temperature() {
        let mut config = Config::default();
        config.llm.temperature = 3.5;
        assert!(matches!(config.validate(), Err(ChurnError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.pool_size = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.connection_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ChurnError::Config(_))));
    }

    #[test]
    fn test_api_key_redacted() {
        let config = LlmConfig {
            api_key: Some("gsk_secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("[REDACTED]"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("gsk_secret"));
    }
}
