//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::types::MediaType;
use crate::{Extractor, PlainTextExtractor};

#[cfg(feature = "docx")]
use crate::DocxExtractor;

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a plain-text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(PlainTextExtractor::new())
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create extractor for a given media type.
    pub fn for_media_type(media_type: &MediaType) -> ExtractResult<Arc<dyn Extractor>> {
        match media_type {
            MediaType::PlainText => Ok(Self::text()),

            #[cfg(feature = "docx")]
            MediaType::WordProcessingDocument => Ok(Self::docx()),

            other => Err(ExtractError::UnsupportedFormat(describe(other))),
        }
    }

    /// Get all available extractors.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        extractors.push(Self::text());

        #[cfg(feature = "docx")]
        extractors.push(Self::docx());

        extractors
    }
}

/// Name a media type for error messages.
pub(crate) fn describe(media_type: &MediaType) -> String {
    match media_type {
        MediaType::Unsupported(declared) if !declared.is_empty() => declared.clone(),
        MediaType::Unsupported(_) => "unknown".to_string(),
        supported => supported.mime().unwrap_or("unknown").to_string(),
    }
}
