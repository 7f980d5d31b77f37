//! CLI Common Utilities
//!
//! Shared initialization and context management for CLI commands.

use serde::Serialize;
use std::str::FromStr;

use crate::config::{Config, ConfigLoader};
use crate::service::RetentionAssistant;
use crate::types::{ChurnError, Result};

/// Output format for data commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format '{}'. Valid values: text, json", s)),
        }
    }
}

/// Command execution context
///
/// Loads configuration once and builds the assistant from it.
pub struct CommandContext {
    pub config: Config,
    pub assistant: RetentionAssistant,
}

impl CommandContext {
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::load()?;
        let assistant = RetentionAssistant::from_config(&config)?;
        Ok(Self { config, assistant })
    }
}

/// Pretty-print any serializable value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(ChurnError::Json)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
