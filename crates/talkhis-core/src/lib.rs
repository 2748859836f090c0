//! talkhis-core - Core library for talkhis.
//!
//! This crate provides the error hierarchy, configuration, LLM trait and the
//! summarization pipeline that turns a document's text into an Arabic
//! academic summary.
//!
//! # Example
//!
//! ```ignore
//! use talkhis_core::{LengthSelector, Summarizer, SummarizerConfig};
//!
//! let config = SummarizerConfig::from_env()?;
//! let api_key = config.credential()?;
//! let llm = talkhis_llm::LlmFactory::gemini(config.llm.clone(), api_key)?;
//!
//! let summarizer = Summarizer::new(llm, &config.llm);
//! let summary = summarizer.summarize(&text, LengthSelector::Short).await?;
//! ```

pub mod config;
pub mod error;
pub mod summarize;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use config::{ServerConfig, SummarizerConfig};
pub use error::{ErrorCode, ProviderFailure, TalkhisError, TalkhisResult};
pub use summarize::{SummaryRequest, Summarizer};
pub use traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
pub use types::{length_instruction, LengthSelector, Message, MessageRole};
