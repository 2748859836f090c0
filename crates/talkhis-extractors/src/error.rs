//! Extraction error types.

use thiserror::Error;

/// Shown when the uploaded file is neither `.txt` nor `.docx`.
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "نوع الملف غير مدعوم. الرجاء رفع ملف .txt أو .docx";

/// Shown when the file could not be read.
pub const READ_FAILED_MESSAGE: &str = "فشل في قراءة الملف.";

/// Shown when the file was read but could not be decoded.
pub const DECODE_FAILED_MESSAGE: &str = "فشل في معالجة الملف.";

/// Errors that can occur during content extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Declared media type is neither plain text nor a word-processing document.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error reading the file.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// The bytes could not be decoded into text.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ExtractError {
    /// Stable code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => "EXT_001",
            Self::Read(_) => "EXT_002",
            Self::Decode(_) => "EXT_003",
        }
    }

    /// Human-readable Arabic message for the end user.
    pub fn localized_message(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat(_) => UNSUPPORTED_FORMAT_MESSAGE,
            Self::Read(_) => READ_FAILED_MESSAGE,
            Self::Decode(_) => DECODE_FAILED_MESSAGE,
        }
    }
}

impl From<tokio::task::JoinError> for ExtractError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Decode(format!("Extraction task failed: {}", err))
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
