//! talkhis-llm - LLM provider implementations for talkhis.
//!
//! # Supported Providers
//!
//! - **Gemini** - `generateContent` over REST (gemini-2.5-pro by default)
//!
//! # Example
//!
//! ```ignore
//! use talkhis_llm::LlmFactory;
//!
//! let llm = LlmFactory::gemini(config.llm.clone(), config.credential()?)?;
//!
//! // Or with a specific model
//! let llm = LlmFactory::gemini_with_model("gemini-2.5-flash", api_key)?;
//! ```

mod factory;
mod gemini;

pub use factory::LlmFactory;
pub use gemini::{GeminiLlm, GEMINI_API_URL};

// Re-export core types for convenience
pub use talkhis_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse};
