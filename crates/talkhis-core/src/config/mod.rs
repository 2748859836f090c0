//! Configuration system for talkhis.
//!
//! Configuration is assembled once at startup (file, then environment) and
//! validated with [`SummarizerConfig::credential`]. Components receive the
//! resolved values by reference; nothing reads the environment afterwards.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{TalkhisError, TalkhisResult};
use crate::traits::LlmConfig;

/// Primary environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Fallback environment variable holding the API credential.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Main summarizer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// LLM configuration.
    pub llm: LlmConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// API key (if not using environment variable). Never written back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl SummarizerConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<Path>) -> TalkhisResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| TalkhisError::Configuration(e.to_string()))
            }
            Some("json") => serde_json::from_str(&content)
                .map_err(|e| TalkhisError::Configuration(e.to_string())),
            Some("yaml" | "yml") => serde_yaml::from_str(&content)
                .map_err(|e| TalkhisError::Configuration(e.to_string())),
            _ => Err(TalkhisError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables over the defaults.
    pub fn from_env() -> TalkhisResult<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load from an optional file, then overlay the environment.
    pub fn load(path: Option<&Path>) -> TalkhisResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay environment variables onto this configuration.
    pub fn apply_env(&mut self) -> TalkhisResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Overlay values from an arbitrary variable source.
    pub fn apply_vars<F>(&mut self, var: F) -> TalkhisResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = var("TALKHIS_MODEL") {
            self.llm.model = model;
        }
        if let Some(base_url) = var("TALKHIS_BASE_URL") {
            self.llm.base_url = Some(base_url);
        }
        if let Some(host) = var("TALKHIS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("TALKHIS_PORT") {
            self.server.port = port.parse().map_err(|_| {
                TalkhisError::Configuration(format!("TALKHIS_PORT must be a valid port number, got '{}'", port))
            })?;
        }
        if let Some(key) = var(API_KEY_ENV).or_else(|| var(API_KEY_FALLBACK_ENV)) {
            self.api_key = Some(key);
        }
        Ok(())
    }

    /// Validate and return the API credential.
    ///
    /// Called once during startup; a missing or blank key is fatal.
    pub fn credential(&self) -> TalkhisResult<SecretString> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(SecretString::new(key.to_string())),
            _ => Err(TalkhisError::missing_credential(API_KEY_ENV)),
        }
    }

    /// Build configuration using builder pattern.
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::default()
    }
}

/// Builder for SummarizerConfig.
#[derive(Default)]
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    /// Set LLM configuration.
    pub fn llm(mut self, config: LlmConfig) -> Self {
        self.config.llm = config;
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.llm.model = model.into();
        self
    }

    /// Set the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.llm.base_url = Some(base_url.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set server configuration.
    pub fn server(mut self, config: ServerConfig) -> Self {
        self.config.server = config;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SummarizerConfig {
        self.config
    }
}
