//! Guard configuration.
//!
//! Layered: built-in defaults, then an optional TOML file named by
//! `PHI_GUARD_CONFIG`, then individual environment overrides. Any invalid
//! value is a hard error at load time.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::security::ValidationMode;

pub const CONFIG_PATH_ENV: &str = "PHI_GUARD_CONFIG";
pub const MODE_ENV: &str = "PHI_GUARD_MODE";
pub const MEDICAL_ENV: &str = "PHI_GUARD_MEDICAL";
pub const PUBMED_URL_ENV: &str = "PHI_GUARD_PUBMED_URL";
pub const LOG_FORMAT_ENV: &str = "PHI_GUARD_LOG_FORMAT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid validation mode '{0}' (expected 'strict' or 'permissive')")]
    InvalidMode(String),
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: LOG_FORMAT_ENV.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Medical-query routing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalConfig {
    pub enabled: bool,
    /// Insert the language-matched system prompt when none is present.
    pub inject_system_prompt: bool,
    /// Add the literature tool to `tool_ids` on medical queries.
    pub auto_enable_tools: bool,
    pub literature_tool_id: String,
}

impl Default for MedicalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            inject_system_prompt: true,
            auto_enable_tools: true,
            literature_tool_id: "pubmed-mcp".to_string(),
        }
    }
}

/// Literature-search tool server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PubMedConfig {
    pub url: String,
    pub path: String,
    pub server_id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub max_results: u32,
    pub years_back: u32,
    pub quality_threshold: f32,
    pub preferred_types: Vec<String>,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            url: "http://pubmed-mcp:8000/sse".to_string(),
            path: "/sse".to_string(),
            server_id: "pubmed-mcp".to_string(),
            name: "PubMed MCP Server".to_string(),
            description: "Medical literature search and comprehensive analysis using PubMed"
                .to_string(),
            version: "1.0.0".to_string(),
            max_results: 10,
            years_back: 5,
            quality_threshold: 0.7,
            preferred_types: vec![
                "Systematic Review".to_string(),
                "Meta-Analysis".to_string(),
                "Randomized Controlled Trial".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    pub mode: ValidationMode,
    pub log_format: LogFormat,
    pub medical: MedicalConfig,
    pub pubmed: PubMedConfig,
}

impl GuardConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GuardConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(MODE_ENV) {
            self.mode = mode.parse()?;
        }
        if let Some(medical) = lookup(MEDICAL_ENV) {
            self.medical.enabled = parse_bool(MEDICAL_ENV, &medical)?;
        }
        if let Some(url) = lookup(PUBMED_URL_ENV) {
            self.pubmed.url = url;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.log_format = format.parse()?;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.pubmed.quality_threshold) {
            return Err(ConfigError::InvalidValue {
                key: "pubmed.quality_threshold".to_string(),
                value: self.pubmed.quality_threshold.to_string(),
            });
        }
        if self.pubmed.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "pubmed.url".to_string(),
                value: self.pubmed.url.clone(),
            });
        }
        if self.medical.auto_enable_tools && self.medical.literature_tool_id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "medical.literature_tool_id".to_string(),
                value: self.medical.literature_tool_id.clone(),
            });
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Load configuration with an arbitrary variable lookup.
pub fn load_with<F>(lookup: F) -> Result<GuardConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup(CONFIG_PATH_ENV) {
        Some(path) if !path.trim().is_empty() => GuardConfig::from_file(Path::new(&path))?,
        _ => GuardConfig::default(),
    };
    config.apply_env(lookup)?;
    Ok(config)
}

/// Load configuration from the process environment.
pub fn load() -> Result<GuardConfig, ConfigError> {
    load_with(|key| std::env::var(key).ok())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
