//! Google Gemini LLM provider implementation.
//!
//! Talks to the `generateContent` REST endpoint directly.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use talkhis_core::error::{ProviderFailure, TalkhisError, TalkhisResult};
use talkhis_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
use talkhis_core::types::{system_instruction, Message, MessageRole};

/// Public Gemini API endpoint.
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini LLM provider.
pub struct GeminiLlm {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
}

impl Content {
    fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

impl GeminiLlm {
    /// Create a new Gemini LLM provider.
    pub fn new(config: LlmConfig, api_key: SecretString) -> TalkhisResult<Self> {
        let mut key = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| TalkhisError::Configuration("Invalid API key format".to_string()))?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| {
                TalkhisError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| GEMINI_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Url::parse(&base_url).map_err(|e| {
            TalkhisError::Configuration(format!("Invalid base URL '{}': {}", base_url, e))
        })?;

        let mut config = config;
        if config.model.trim().is_empty() {
            config.model = LlmConfig::default().model;
        }

        Ok(Self {
            client,
            config,
            base_url,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.config.model)
    }

    fn build_request(
        &self,
        messages: &[Message],
        options: GenerationOptions,
    ) -> GenerateContentRequest {
        let contents = messages
            .iter()
            .filter(|m| !m.is_system())
            .map(|m| {
                let role = match m.role {
                    MessageRole::Assistant => "model",
                    _ => "user",
                };
                Content::text(Some(role), m.content.clone())
            })
            .collect();

        GenerateContentRequest {
            contents,
            system_instruction: system_instruction(messages).map(|s| Content::text(None, s)),
            generation_config: GenerationConfig {
                temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
                top_p: Some(options.top_p.unwrap_or(self.config.top_p)),
                top_k: Some(options.top_k.unwrap_or(self.config.top_k)),
                max_output_tokens: options.max_tokens.or(self.config.max_tokens),
            },
        }
    }
}

/// Turn a non-success response into a provider failure.
fn failure_from_body(status: u16, body: &str) -> ProviderFailure {
    match serde_json::from_str::<GeminiError>(body) {
        Ok(e) => ProviderFailure::structured(Some(status), e.error.message),
        Err(_) => ProviderFailure::structured(Some(status), body.trim()),
    }
}

#[async_trait]
impl Llm for GeminiLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> TalkhisResult<LlmResponse> {
        let request = self.build_request(messages, options.unwrap_or_default());

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| TalkhisError::provider(ProviderFailure::unstructured(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TalkhisError::provider(ProviderFailure::unstructured(e)))?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "Gemini API returned an error");
            return Err(TalkhisError::provider(failure_from_body(
                status.as_u16(),
                &body,
            )));
        }

        let response: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            TalkhisError::provider(ProviderFailure::unstructured(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        let usage = response.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse {
            content: response.text(),
            usage,
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
