//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/churnguard/config.toml)
//! 3. Project config (.churnguard/config.toml)
//! 4. Environment variables (CHURNGUARD_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::types::{ChurnError, Result};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = Self::project_config_path();
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // CHURNGUARD_LLM__MAX_TOKENS -> llm.max_tokens
        figment = figment.merge(Env::prefixed("CHURNGUARD_").split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ChurnError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ChurnError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Global config directory (~/.config/churnguard/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("churnguard"))
    }

    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn project_dir() -> PathBuf {
        PathBuf::from(".churnguard")
    }

    pub fn project_config_path() -> PathBuf {
        Self::project_dir().join("config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Print config file locations and whether they exist
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| ChurnError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a default project config under `base`, returning its path
    pub fn init_project_in(base: &Path, force: bool) -> Result<PathBuf> {
        let project_dir = base.join(Self::project_dir());
        fs::create_dir_all(&project_dir)?;

        let config_path = project_dir.join("config.toml");
        if !config_path.exists() || force {
            fs::write(&config_path, Self::default_project_config())?;
            info!("Created project config: {}", config_path.display());
        } else {
            info!("Project config exists: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Write a default project config in the current directory
    pub fn init_project(force: bool) -> Result<PathBuf> {
        Self::init_project_in(Path::new("."), force)
    }

    fn default_project_config() -> String {
        r#"# ChurnGuard Project Configuration
# Environment variables override these values, e.g. CHURNGUARD_LLM__MODEL.

version = "1.0"

[database]
path = ".churnguard/churn_analytics.db"
pool_size = 4

[cache]
ttl_secs = 300

# Completion service. The API key is read from GROQ_API_KEY / OPENAI_API_KEY
# when not set here. Without a key, answers come from the local analyst.
[llm]
provider = "groq"
model = "llama-3.3-70b-versatile"
temperature = 0.7
max_tokens = 500
timeout_secs = 30
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_project_writes_loadable_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = ConfigLoader::init_project_in(temp_dir.path(), false).unwrap();
        assert!(path.exists());

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[cache]\nttl_secs = 60\n\n[llm]\nmax_tokens = 256\n").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.llm.max_tokens, 256);
        assert_eq!(config.llm.provider, "groq");
    }

    #[test]
    fn test_load_from_file_validates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[llm]\ntemperature = 9.0\n").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }

    #[test]
    fn test_render_omits_api_key() {
        let mut config = Config::default();
        config.llm.api_key = Some("gsk_hidden".to_string());

        let toml_out = ConfigLoader::render(&config, false).unwrap();
        assert!(toml_out.contains("[llm]"));
        assert!(!toml_out.contains("gsk_hidden"));

        let json_out = ConfigLoader::render(&config, true).unwrap();
        assert!(!json_out.contains("gsk_hidden"));
    }
}
