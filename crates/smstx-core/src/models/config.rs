//! Configuration structures for the parser and its front ends.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SmstxError};

/// Main configuration for smstx.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmstxConfig {
    /// Parser configuration.
    pub parser: ParserConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Merchant shaping rules applied by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum merchant length in characters before truncation.
    pub merchant_max_chars: usize,

    /// Suffix appended when a rule-matched merchant is truncated.
    pub ellipsis: String,

    /// Number of surviving tokens the fallback joins.
    pub fallback_token_limit: usize,

    /// Tokens shorter than this are dropped by the fallback.
    pub fallback_min_token_chars: usize,

    /// Merchant used when nothing usable remains.
    pub placeholder_merchant: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            merchant_max_chars: 40,
            ellipsis: "...".to_string(),
            fallback_token_limit: 3,
            fallback_min_token_chars: 3,
            placeholder_merchant: "Transaction from SMS".to_string(),
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Format used when none is given on the command line.
    pub default_format: OutputFormat,

    /// Pretty-print JSON output.
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Json,
            pretty_json: true,
        }
    }
}

/// Rendering format for parsed transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Text,
}

impl SmstxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject settings the parser cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.parser.merchant_max_chars == 0 {
            return Err(SmstxError::Config(
                "parser.merchant_max_chars must be greater than zero".to_string(),
            ));
        }
        if self.parser.fallback_token_limit == 0 {
            return Err(SmstxError::Config(
                "parser.fallback_token_limit must be greater than zero".to_string(),
            ));
        }
        if self.parser.placeholder_merchant.trim().is_empty() {
            return Err(SmstxError::Config(
                "parser.placeholder_merchant must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_parser_rules() {
        let config = SmstxConfig::default();
        assert_eq!(config.parser.merchant_max_chars, 40);
        assert_eq!(config.parser.ellipsis, "...");
        assert_eq!(config.parser.fallback_token_limit, 3);
        assert_eq!(config.parser.placeholder_merchant, "Transaction from SMS");
        assert_eq!(config.output.default_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"output": {"default_format": "csv"}}"#).unwrap();

        let config = SmstxConfig::from_file(&path).unwrap();
        assert_eq!(config.output.default_format, OutputFormat::Csv);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = SmstxConfig::default();
        config.parser.placeholder_merchant = "Unknown".to_string();
        config.save(&path).unwrap();

        assert_eq!(SmstxConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_width_merchant() {
        let mut config = SmstxConfig::default();
        config.parser.merchant_max_chars = 0;
        assert!(matches!(config.validate(), Err(SmstxError::Config(_))));
    }
}
