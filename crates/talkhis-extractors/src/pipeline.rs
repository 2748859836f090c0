//! Extraction pipeline for routing documents to the appropriate extractor.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::factory::describe;
use crate::types::{ContentSource, ExtractedContent, MediaType, SourceDocument};
use crate::Extractor;

/// Pipeline for extracting content using registered extractors.
///
/// Routes each document by its declared media type. Unsupported types are
/// rejected before any extractor sees the bytes.
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        Self {
            extractors: crate::ExtractorFactory::all(),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    fn route(&self, media_type: &MediaType) -> ExtractResult<&Arc<dyn Extractor>> {
        if !media_type.is_supported() {
            return Err(ExtractError::UnsupportedFormat(describe(media_type)));
        }

        self.extractors
            .iter()
            .find(|e| e.supports(media_type))
            .ok_or_else(|| ExtractError::UnsupportedFormat(describe(media_type)))
    }

    /// Extract a document using the extractor for its media type.
    pub async fn extract(&self, document: &SourceDocument) -> ExtractResult<ExtractedContent> {
        let extractor = self.route(&document.media_type).map_err(|e| {
            warn!(file = ?document.name, media_type = ?document.media_type, "Rejected upload");
            e
        })?;

        debug!(
            file = ?document.name,
            extractor = extractor.name(),
            bytes = document.bytes.len(),
            "Extracting document"
        );

        let content = extractor.extract(&document.bytes).await?;
        Ok(match &document.name {
            Some(name) => content.with_source(ContentSource::Upload(name.clone())),
            None => content,
        })
    }

    /// Read a file from disk and extract it.
    ///
    /// The media type comes from the file extension; unsupported files are
    /// rejected without being opened.
    pub async fn extract_file(&self, path: impl AsRef<Path>) -> ExtractResult<ExtractedContent> {
        let path = path.as_ref();
        let media_type = MediaType::from_path(path);
        let extractor = self.route(&media_type)?;

        let bytes = tokio::fs::read(path).await?;
        debug!(
            path = %path.display(),
            extractor = extractor.name(),
            bytes = bytes.len(),
            "Extracting file"
        );

        let content = extractor.extract(&bytes).await?;
        Ok(content.with_source(ContentSource::Path(path.display().to_string())))
    }

    /// Fail with [`ExtractError::UnsupportedFormat`] unless some extractor
    /// handles `media_type`. Lets callers reject uploads before reading them.
    pub fn ensure_supported(&self, media_type: &MediaType) -> ExtractResult<()> {
        self.route(media_type).map(|_| ())
    }

    /// Check if pipeline can handle a given media type.
    pub fn supports(&self, media_type: &MediaType) -> bool {
        media_type.is_supported() && self.extractors.iter().any(|e| e.supports(media_type))
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modality;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Claims every media type and counts how often it is asked to decode.
    #[derive(Default)]
    struct CountingExtractor {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Extractor for CountingExtractor {
        async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExtractedContent::new(
                String::from_utf8_lossy(content).into_owned(),
                Modality::Text,
                ContentSource::Bytes,
            ))
        }

        fn supports(&self, _media_type: &MediaType) -> bool {
            true
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_pipeline_with_defaults() {
        let pipeline = ExtractionPipeline::with_defaults();
        assert!(pipeline.supports(&MediaType::PlainText));

        #[cfg(feature = "docx")]
        assert!(pipeline.supports(&MediaType::WordProcessingDocument));

        assert!(!pipeline.supports(&MediaType::Unsupported("video/mp4".into())));
    }

    #[test]
    fn test_pipeline_empty() {
        let pipeline = ExtractionPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
        assert!(!pipeline.supports(&MediaType::PlainText));
        assert!(matches!(
            pipeline.ensure_supported(&MediaType::PlainText),
            Err(ExtractError::UnsupportedFormat(ref t)) if t == "text/plain"
        ));
    }

    #[tokio::test]
    async fn test_unsupported_type_never_reaches_an_extractor() {
        let counting = Arc::new(CountingExtractor::default());
        let pipeline = ExtractionPipeline::new().add_extractor(counting.clone());

        let doc = SourceDocument::new(MediaType::from_mime("application/pdf"), b"%PDF-1.7".to_vec());
        let result = pipeline.extract(&doc).await;

        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(_))));
        assert_eq!(counting.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_upload_source_carries_file_name() {
        let pipeline = ExtractionPipeline::with_defaults();
        let doc = SourceDocument::new(MediaType::PlainText, "نص".as_bytes()).with_name("a.txt");

        let content = pipeline.extract(&doc).await.unwrap();
        assert_eq!(content.text, "نص");
        assert_eq!(content.source, ContentSource::Upload("a.txt".to_string()));
    }

    #[tokio::test]
    async fn test_extract_file_reads_text() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(file, "المقدمة\nهذا بحث تجريبي.").unwrap();

        let content = ExtractionPipeline::with_defaults()
            .extract_file(file.path())
            .await
            .unwrap();
        assert_eq!(content.text, "المقدمة\nهذا بحث تجريبي.");
    }

    #[tokio::test]
    async fn test_extract_file_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ExtractionPipeline::with_defaults()
            .extract_file(dir.path().join("missing.txt"))
            .await;
        assert!(matches!(result, Err(ExtractError::Read(_))));
    }

    #[tokio::test]
    async fn test_extract_file_unsupported_is_not_opened() {
        // The file does not exist: an unsupported extension must fail before any read.
        let result = ExtractionPipeline::with_defaults()
            .extract_file("/nonexistent/paper.pdf")
            .await;
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(ref t)) if t == ".pdf"));
    }
}
