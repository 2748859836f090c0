//! talkhis-extractors - Content extraction for uploaded documents.
//!
//! Turns an uploaded file (plain text or a `.docx` word-processing document)
//! into a plain Unicode string behind a unified trait-based interface.
//!
//! # Features
//!
//! - `docx` (default) - DOCX text extraction via docx-rs
//!
//! # Example
//!
//! ```ignore
//! use talkhis_extractors::{ExtractionPipeline, MediaType, SourceDocument};
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//!
//! // Route an upload by its declared type
//! let doc = SourceDocument::new(MediaType::from_mime(mime), bytes).with_name("paper.docx");
//! let content = pipeline.extract(&doc).await?;
//!
//! // Or read a file from disk
//! let content = pipeline.extract_file("paper.txt").await?;
//! ```

mod error;
mod factory;
mod pipeline;
mod text;
mod types;

#[cfg(feature = "docx")]
mod docx;

pub use error::{
    ExtractError, ExtractResult, DECODE_FAILED_MESSAGE, READ_FAILED_MESSAGE,
    UNSUPPORTED_FORMAT_MESSAGE,
};
pub use factory::ExtractorFactory;
pub use pipeline::ExtractionPipeline;
pub use text::PlainTextExtractor;
pub use types::{
    ContentSource, DocumentStructure, ExtractedContent, MediaType, Modality, SourceDocument,
    DOCX_MIME, PLAIN_TEXT_MIME,
};

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

use async_trait::async_trait;

/// Core Extractor trait - all content extractors implement this.
///
/// Same shape as the `Llm` trait in talkhis-core: async, object-safe,
/// shared behind `Arc<dyn Extractor>`.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// Check if this extractor handles the given media type.
    fn supports(&self, media_type: &MediaType) -> bool;

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
