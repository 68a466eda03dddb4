//! Configuration loading, validation, and management for LoanDesk.
//!
//! Loads configuration from `~/.loandesk/config.toml` (or an explicit path)
//! with environment variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Placeholder key shipped in sample `.env` files; treated as "no key".
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// The root configuration structure.
///
/// Maps directly to `~/.loandesk/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the text-generation backend (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Text-generation provider name (openai, ollama, vllm, ...)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model requested from the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output budget for general answers
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Output budget for prepayment explanations
    #[serde(default = "default_calculation_max_tokens")]
    pub calculation_max_tokens: u32,

    /// HTTP timeout for provider calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Provider-specific overrides
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Document store configuration
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Customer data configuration
    #[serde(default)]
    pub bank: BankConfig,
}

fn default_provider() -> String {
    "openai".into()
}
fn default_model() -> String {
    "gpt-3.5-turbo".into()
}
fn default_temperature() -> f32 {
    0.1
}
fn default_max_tokens() -> u32 {
    500
}
fn default_calculation_max_tokens() -> u32 {
    600
}
fn default_request_timeout_secs() -> u64 {
    60
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("calculation_max_tokens", &self.calculation_max_tokens)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("providers", &self.providers)
            .field("gateway", &self.gateway)
            .field("knowledge", &self.knowledge)
            .field("bank", &self.bank)
            .finish()
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    5000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// JSON corpus replacing the built-in FAQs and policies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_path: Option<PathBuf>,

    /// Total results requested when gathering context for a chat query
    #[serde(default = "default_context_results")]
    pub context_results: usize,

    /// Results returned by the search endpoints when none are requested
    #[serde(default = "default_results")]
    pub default_results: usize,
}

fn default_context_results() -> usize {
    6
}
fn default_results() -> usize {
    3
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            corpus_path: None,
            context_results: default_context_results(),
            default_results: default_results(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankConfig {
    /// JSON array of customer records replacing the demo customers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.loandesk/config.toml).
    ///
    /// Environment overrides, applied after the file:
    /// - `LOANDESK_API_KEY`, then `OPENAI_API_KEY` (only when the file has no key)
    /// - `LOANDESK_PROVIDER`, `LLM_MODEL`, `LLM_TEMPERATURE`
    /// - `LOANDESK_HOST`, `LOANDESK_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(None)
    }

    /// Load from an explicit path, or the default one when `None`.
    pub fn load_with(path: Option<&Path>) -> Result<Self, ConfigError> {
        let default_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(path.unwrap_or(&default_path))?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.api_key = usable_key(config.api_key);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = usable_key(lookup("LOANDESK_API_KEY"))
                .or_else(|| usable_key(lookup("OPENAI_API_KEY")));
        }

        if let Some(provider) = lookup("LOANDESK_PROVIDER") {
            self.provider = provider;
        }

        if let Some(model) = lookup("LLM_MODEL") {
            self.model = model;
        }

        if let Some(raw) = lookup("LLM_TEMPERATURE") {
            self.temperature = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!("LLM_TEMPERATURE is not a number: {raw}"))
            })?;
        }

        if let Some(host) = lookup("LOANDESK_HOST") {
            self.gateway.host = host;
        }

        if let Some(raw) = lookup("LOANDESK_PORT") {
            self.gateway.port = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!("LOANDESK_PORT is not a port: {raw}"))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".loandesk")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tokens == 0 || self.calculation_max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens and calculation_max_tokens must be > 0".into(),
            ));
        }

        if self.knowledge.default_results == 0 {
            return Err(ConfigError::ValidationError(
                "knowledge.default_results must be > 0".into(),
            ));
        }

        Ok(())
    }

    /// API key for the configured provider: per-provider key first, then the
    /// global one.
    pub fn provider_api_key(&self) -> Option<String> {
        self.providers
            .get(&self.provider)
            .and_then(|p| usable_key(p.api_key.clone()))
            .or_else(|| self.api_key.clone())
    }

    /// Base URL override for the configured provider.
    pub fn provider_api_url(&self) -> Option<String> {
        self.providers
            .get(&self.provider)
            .and_then(|p| p.api_url.clone())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.provider_api_key().is_some()
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            calculation_max_tokens: default_calculation_max_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            providers: HashMap::new(),
            gateway: GatewayConfig::default(),
            knowledge: KnowledgeConfig::default(),
            bank: BankConfig::default(),
        }
    }
}

/// Drop blank and placeholder keys.
fn usable_key(key: Option<String>) -> Option<String> {
    key.filter(|k| !k.trim().is_empty() && k != PLACEHOLDER_API_KEY)
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
