//! Factory for creating LLM providers.

use std::sync::Arc;

use secrecy::SecretString;
use talkhis_core::config::SummarizerConfig;
use talkhis_core::error::TalkhisResult;
use talkhis_core::traits::{Llm, LlmConfig};

use crate::gemini::GeminiLlm;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create a Gemini provider from the given configuration and key.
    pub fn gemini(config: LlmConfig, api_key: SecretString) -> TalkhisResult<Arc<dyn Llm>> {
        let llm = GeminiLlm::new(config, api_key)?;
        Ok(Arc::new(llm))
    }

    /// Create a Gemini provider with a specific model and default sampling.
    pub fn gemini_with_model(
        model: impl Into<String>,
        api_key: SecretString,
    ) -> TalkhisResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::gemini(config, api_key)
    }

    /// Create the provider described by a loaded configuration.
    ///
    /// Fails with a missing-credential error when no API key is configured.
    pub fn from_config(config: &SummarizerConfig) -> TalkhisResult<Arc<dyn Llm>> {
        Self::gemini(config.llm.clone(), config.credential()?)
    }
}
