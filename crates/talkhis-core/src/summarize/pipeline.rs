//! The summarization request pipeline.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{ProviderFailure, TalkhisError, TalkhisResult};
use crate::summarize::prompts::{build_summary_prompt, SYSTEM_INSTRUCTION};
use crate::traits::{GenerationOptions, Llm, LlmConfig};
use crate::types::{LengthSelector, Message};

/// Everything sent to the model for one summary. Built fresh per call.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    /// Selected verbosity.
    pub length: LengthSelector,
    /// Fixed system instruction.
    pub system_instruction: String,
    /// Length instruction + policy + delimiter + input text.
    pub prompt: String,
    /// Fixed sampling parameters.
    pub options: GenerationOptions,
}

impl SummaryRequest {
    /// Compose a request for `text` at `length`.
    ///
    /// Fails with [`TalkhisError::EmptyInput`] when `text` is empty or
    /// whitespace-only.
    pub fn new(
        text: &str,
        length: LengthSelector,
        options: GenerationOptions,
    ) -> TalkhisResult<Self> {
        if text.trim().is_empty() {
            return Err(TalkhisError::EmptyInput);
        }

        Ok(Self {
            length,
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            prompt: build_summary_prompt(text, length),
            options,
        })
    }

    /// Conversation handed to the provider.
    pub fn to_messages(&self) -> Vec<Message> {
        vec![
            Message::system(self.system_instruction.clone()),
            Message::user(self.prompt.clone()),
        ]
    }
}

/// Turns raw text into an Arabic academic summary via an [`Llm`].
///
/// Each call makes exactly one remote request: no retries, no caching.
#[derive(Clone)]
pub struct Summarizer {
    llm: Arc<dyn Llm>,
    options: GenerationOptions,
}

impl Summarizer {
    /// Create a summarizer using the sampling parameters of `config`.
    pub fn new(llm: Arc<dyn Llm>, config: &LlmConfig) -> Self {
        Self {
            llm,
            options: config.generation_options(),
        }
    }

    /// Create a summarizer with explicit sampling parameters.
    pub fn with_options(llm: Arc<dyn Llm>, options: GenerationOptions) -> Self {
        Self { llm, options }
    }

    /// Model identifier of the underlying provider.
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Build the request that [`Summarizer::summarize`] would send.
    pub fn request(&self, text: &str, length: LengthSelector) -> TalkhisResult<SummaryRequest> {
        SummaryRequest::new(text, length, self.options.clone())
    }

    /// Summarize `text` at the requested length.
    ///
    /// Returns the generated text verbatim. Empty input fails with
    /// [`TalkhisError::EmptyInput`] before any remote call; every remote
    /// failure comes back as [`TalkhisError::RemoteService`].
    pub async fn summarize(&self, text: &str, length: LengthSelector) -> TalkhisResult<String> {
        let request = self.request(text, length)?;

        debug!(
            model = %self.llm.model_name(),
            length = %length,
            input_chars = text.chars().count(),
            prompt_chars = request.prompt.chars().count(),
            "Sending summary request"
        );

        let response = self
            .llm
            .generate(&request.to_messages(), Some(request.options.clone()))
            .await
            .map_err(|e| {
                let err = e.into_remote();
                warn!(code = %err.code(), error = %err, "Summary request failed");
                err
            })?;

        let summary = response.content.ok_or_else(|| {
            warn!("Provider returned no text");
            TalkhisError::Provider(ProviderFailure::Opaque).into_remote()
        })?;

        if let Some(usage) = &response.usage {
            info!(
                length = %length,
                summary_chars = summary.chars().count(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Summary generated"
            );
        } else {
            info!(
                length = %length,
                summary_chars = summary.chars().count(),
                "Summary generated"
            );
        }

        Ok(summary)
    }
}
