//! Core types for content extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// MIME type of plain-text files.
pub const PLAIN_TEXT_MIME: &str = "text/plain";

/// MIME type of OOXML word-processing documents (`.docx`).
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Declared media type of an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "declared")]
pub enum MediaType {
    /// UTF-8 plain text.
    PlainText,
    /// OOXML word-processing document.
    WordProcessingDocument,
    /// Anything else; carries what was declared.
    Unsupported(String),
}

impl MediaType {
    /// Classify a declared MIME type. Parameters such as `charset` are ignored.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            PLAIN_TEXT_MIME => Self::PlainText,
            DOCX_MIME => Self::WordProcessingDocument,
            _ => Self::Unsupported(mime.trim().to_string()),
        }
    }

    /// Classify by file extension (`.txt`, `.docx`), case-insensitively.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("txt") => Self::PlainText,
            Some("docx") => Self::WordProcessingDocument,
            Some(other) => Self::Unsupported(format!(".{}", other)),
            None => Self::Unsupported(path.display().to_string()),
        }
    }

    /// Classify an upload: the declared MIME type wins unless it is missing
    /// or generic, in which case the file name decides.
    pub fn detect(declared: Option<&str>, file_name: Option<&str>) -> Self {
        match declared.map(str::trim) {
            Some(mime) if !mime.is_empty() && !is_generic_mime(mime) => Self::from_mime(mime),
            _ => match file_name {
                Some(name) => Self::from_path(name),
                None => Self::Unsupported(declared.unwrap_or_default().to_string()),
            },
        }
    }

    /// Canonical MIME type, if supported.
    pub fn mime(&self) -> Option<&'static str> {
        match self {
            Self::PlainText => Some(PLAIN_TEXT_MIME),
            Self::WordProcessingDocument => Some(DOCX_MIME),
            Self::Unsupported(_) => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

fn is_generic_mime(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/octet-stream")
}

/// An uploaded or opened file awaiting extraction. Discarded afterwards.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// Original file name, if known.
    pub name: Option<String>,
    /// Declared media type.
    pub media_type: MediaType,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    /// Create a document from bytes and a declared media type.
    pub fn new(media_type: MediaType, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: None,
            media_type,
            bytes: bytes.into(),
        }
    }

    /// Attach the original file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Modality of original content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Plain text content.
    #[default]
    Text,
    /// Microsoft Word document.
    Docx,
}

/// Source reference for original content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSource {
    /// Content provided as bytes (no file reference).
    Bytes,
    /// Content from file path.
    Path(String),
    /// Content uploaded under a file name.
    Upload(String),
}

/// Document structure metadata (optional, for structured documents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Extracted headings/sections.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sections: Vec<String>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted plain text.
    pub text: String,

    /// Original content modality.
    pub modality: Modality,

    /// Document structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Reference to original content.
    pub source: ContentSource,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, modality: Modality, source: ContentSource) -> Self {
        Self {
            text,
            modality,
            structure: None,
            source,
            metadata: HashMap::new(),
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Replace the source reference.
    pub fn with_source(mut self, source: ContentSource) -> Self {
        self.source = source;
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Section headings, if any were found.
    pub fn sections(&self) -> &[String] {
        self.structure
            .as_ref()
            .map(|s| s.sections.as_slice())
            .unwrap_or(&[])
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters (not bytes) extracted.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Consume and return the bare text.
    pub fn into_text(self) -> String {
        self.text
    }
}
