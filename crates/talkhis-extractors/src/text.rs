//! Plain-text content extraction.

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ContentSource, ExtractedContent, MediaType, Modality};
use crate::Extractor;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes UTF-8 text files.
///
/// A leading byte-order mark is dropped. Invalid UTF-8 is a decode error
/// rather than being replaced.
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn decode(content: &[u8]) -> ExtractResult<String> {
        let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        std::str::from_utf8(content)
            .map(str::to_owned)
            .map_err(|e| ExtractError::Decode(format!("Invalid UTF-8: {}", e)))
    }
}

#[async_trait]
impl Extractor for PlainTextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = Self::decode(content)?;
        Ok(ExtractedContent::new(text, Modality::Text, ContentSource::Bytes)
            .with_metadata("original_size", content.len()))
    }

    fn supports(&self, media_type: &MediaType) -> bool {
        *media_type == MediaType::PlainText
    }

    fn name(&self) -> &str {
        "utf-8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_content_round_trips_exactly() {
        let text = "المقدمة\nهذا بحث تجريبي.\n\nThe end.";
        let extracted = PlainTextExtractor::new()
            .extract(text.as_bytes())
            .await
            .unwrap();
        assert_eq!(extracted.text, text);
        assert_eq!(extracted.modality, Modality::Text);
    }

    #[tokio::test]
    async fn test_bom_is_dropped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("نص".as_bytes());
        let extracted = PlainTextExtractor::new().extract(&bytes).await.unwrap();
        assert_eq!(extracted.text, "نص");
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_decode_error() {
        let result = PlainTextExtractor::new().extract(&[0xff, 0xfe, 0x00]).await;
        assert!(matches!(result, Err(ExtractError::Decode(_))));
    }

    #[tokio::test]
    async fn test_empty_file_yields_empty_text() {
        let extracted = PlainTextExtractor::new().extract(&[]).await.unwrap();
        assert!(extracted.is_empty());
    }

    #[test]
    fn test_supports_only_plain_text() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.supports(&MediaType::PlainText));
        assert!(!extractor.supports(&MediaType::WordProcessingDocument));
        assert_eq!(extractor.name(), "utf-8");
    }
}
