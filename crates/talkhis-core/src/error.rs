//! Error types for talkhis operations.
//!
//! Every error carries a stable [`ErrorCode`] and a localized (Arabic)
//! message suitable for showing to the end user. Provider failures are
//! normalized into [`ProviderFailure`] before they reach the pipeline.

use std::fmt;
use thiserror::Error;

/// Result type alias for talkhis operations.
pub type TalkhisResult<T> = Result<T, TalkhisError>;

/// Shown when the remote service fails without any usable message.
pub const DEFAULT_REMOTE_FAILURE_MESSAGE: &str = "فشلت خدمة التلخيص. يرجى المحاولة مرة أخرى.";

/// Shown when the caller submits empty or whitespace-only text.
pub const EMPTY_INPUT_MESSAGE: &str = "الرجاء إدخال نص أو رفع ملف لتلخيصه.";

/// Shown for failures that have no dedicated message.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "حدث خطأ غير متوقع.";

/// Main error type for all talkhis operations.
#[derive(Error, Debug)]
pub enum TalkhisError {
    /// Text submitted for summarization was empty or whitespace-only.
    #[error("Input text is empty")]
    EmptyInput,

    /// The remote generative-text call failed.
    #[error("Remote service error: {message}")]
    RemoteService { message: String, code: ErrorCode },

    /// A provider reported a failure (before normalization by the pipeline).
    #[error("Provider error: {0}")]
    Provider(ProviderFailure),

    /// No API credential was configured at startup.
    #[error("Missing credential: set {variable} or provide a top-level api_key in the config file")]
    MissingCredential { variable: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Authentication (AUTH_xxx)
    AuthInvalidKey,
    AuthMissingCredentials,

    // Validation (VAL_xxx)
    ValEmptyInput,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Quota (QTA_xxx)
    QtaExceeded,

    // Configuration (CFG_xxx)
    CfgInvalid,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::AuthInvalidKey => "AUTH_001",
            ErrorCode::AuthMissingCredentials => "AUTH_003",
            ErrorCode::ValEmptyInput => "VAL_001",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::QtaExceeded => "QTA_001",
            ErrorCode::CfgInvalid => "CFG_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider failure normalized into the shapes the pipeline understands.
///
/// Providers translate whatever their transport hands them into one of these
/// variants. [`ProviderFailure::best_message`] then picks the most specific
/// message available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The service answered with an error payload carrying a message field.
    Structured {
        status: Option<u16>,
        message: String,
    },
    /// Only a textual rendering of the failure is available.
    Unstructured(String),
    /// Nothing usable was reported.
    Opaque,
}

impl ProviderFailure {
    /// Build a structured failure from an HTTP status and payload message.
    pub fn structured(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Structured {
            status,
            message: message.into(),
        }
    }

    /// Build an unstructured failure from any displayable error.
    pub fn unstructured(err: impl fmt::Display) -> Self {
        Self::Unstructured(err.to_string())
    }

    /// HTTP status attached to the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Structured { status, .. } => *status,
            _ => None,
        }
    }

    /// The most specific message available.
    ///
    /// Order: the structured message field, then the generic string
    /// conversion, then [`DEFAULT_REMOTE_FAILURE_MESSAGE`].
    pub fn best_message(&self) -> String {
        match self {
            Self::Structured { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Structured {
                status: Some(status),
                ..
            } => format!("HTTP {}", status),
            Self::Unstructured(text) if !text.trim().is_empty() => text.clone(),
            _ => DEFAULT_REMOTE_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Map the failure onto an error code.
    pub fn code(&self) -> ErrorCode {
        match self.status() {
            Some(401) | Some(403) => ErrorCode::AuthInvalidKey,
            Some(429) => ErrorCode::QtaExceeded,
            Some(_) => ErrorCode::LlmGenerationFailed,
            None => match self {
                Self::Unstructured(_) => ErrorCode::LlmConnectionFailed,
                _ => ErrorCode::LlmInvalidResponse,
            },
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured {
                status: Some(status),
                message,
            } => write!(f, "HTTP {}: {}", status, message),
            Self::Structured { message, .. } => f.write_str(message),
            Self::Unstructured(text) => f.write_str(text),
            Self::Opaque => f.write_str("no error details"),
        }
    }
}

impl TalkhisError {
    /// Create a remote service error with the given message.
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteService {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
        }
    }

    /// Create a provider error from a normalized failure.
    pub fn provider(failure: ProviderFailure) -> Self {
        Self::Provider(failure)
    }

    /// Create a missing credential error naming the expected variable.
    pub fn missing_credential(variable: impl Into<String>) -> Self {
        Self::MissingCredential {
            variable: variable.into(),
        }
    }

    /// Normalize any error raised during a remote call into a
    /// [`TalkhisError::RemoteService`].
    pub fn into_remote(self) -> Self {
        match self {
            Self::RemoteService { .. } => self,
            Self::Provider(failure) => Self::RemoteService {
                message: failure.best_message(),
                code: failure.code(),
            },
            other => {
                let failure = ProviderFailure::unstructured(&other);
                Self::RemoteService {
                    message: failure.best_message(),
                    code: ErrorCode::LlmConnectionFailed,
                }
            }
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyInput => ErrorCode::ValEmptyInput,
            Self::RemoteService { code, .. } => *code,
            Self::Provider(failure) => failure.code(),
            Self::MissingCredential { .. } => ErrorCode::AuthMissingCredentials,
            Self::Configuration(_) => ErrorCode::CfgInvalid,
            _ => ErrorCode::Internal,
        }
    }

    /// Human-readable Arabic message for the end user.
    pub fn localized_message(&self) -> String {
        match self {
            Self::EmptyInput => EMPTY_INPUT_MESSAGE.to_string(),
            Self::RemoteService { message, .. } => format!("فشل في إنشاء الملخص: {}", message),
            Self::Provider(failure) => format!("فشل في إنشاء الملخص: {}", failure.best_message()),
            Self::MissingCredential { variable } => {
                format!("مفتاح الواجهة البرمجية غير مهيأ ({}).", variable)
            }
            Self::Configuration(msg) => format!("خطأ في الإعدادات: {}", msg),
            _ => UNEXPECTED_ERROR_MESSAGE.to_string(),
        }
    }

    /// Get a suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::EmptyInput => Some("Paste text or upload a .txt/.docx file first"),
            Self::MissingCredential { .. } => Some("Set GEMINI_API_KEY (or API_KEY) before starting"),
            Self::RemoteService { code, .. } if *code == ErrorCode::QtaExceeded => {
                Some("Please wait before making more requests")
            }
            Self::RemoteService { .. } | Self::Provider(_) => {
                Some("Please check your LLM provider configuration")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_message_prefers_structured_field() {
        let failure = ProviderFailure::structured(Some(429), "quota exceeded");
        assert_eq!(failure.best_message(), "quota exceeded");
        assert_eq!(failure.code(), ErrorCode::QtaExceeded);
    }

    #[test]
    fn test_best_message_falls_back_to_string_conversion() {
        let failure = ProviderFailure::unstructured("connection refused");
        assert_eq!(failure.best_message(), "connection refused");

        let blank = ProviderFailure::structured(Some(500), "  ");
        assert_eq!(blank.best_message(), "HTTP 500");
    }

    #[test]
    fn test_best_message_falls_back_to_default() {
        assert_eq!(
            ProviderFailure::Opaque.best_message(),
            DEFAULT_REMOTE_FAILURE_MESSAGE
        );
        assert_eq!(
            ProviderFailure::Unstructured(String::new()).best_message(),
            DEFAULT_REMOTE_FAILURE_MESSAGE
        );
        assert_eq!(
            ProviderFailure::structured(None, "").best_message(),
            DEFAULT_REMOTE_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_into_remote_keeps_provider_message() {
        let err = TalkhisError::provider(ProviderFailure::structured(Some(403), "API key invalid"))
            .into_remote();
        match err {
            TalkhisError::RemoteService { message, code } => {
                assert_eq!(message, "API key invalid");
                assert_eq!(code, ErrorCode::AuthInvalidKey);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_remote_converts_other_errors() {
        let err = TalkhisError::Internal("boom".to_string()).into_remote();
        assert!(matches!(
            err,
            TalkhisError::RemoteService { ref message, .. } if message == "Internal error: boom"
        ));
    }

    #[test]
    fn test_localized_messages() {
        assert_eq!(
            TalkhisError::EmptyInput.localized_message(),
            EMPTY_INPUT_MESSAGE
        );
        assert_eq!(
            TalkhisError::remote("quota exceeded").localized_message(),
            "فشل في إنشاء الملخص: quota exceeded"
        );
    }

    #[test]
    fn test_missing_credential_names_config_key() {
        let err = TalkhisError::missing_credential("GEMINI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing credential: set GEMINI_API_KEY or provide a top-level api_key in the config file"
        );
    }

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::AuthMissingCredentials.as_str(), "AUTH_003");
        assert_eq!(ErrorCode::ValEmptyInput.as_str(), "VAL_001");
        assert_eq!(TalkhisError::EmptyInput.code(), ErrorCode::ValEmptyInput);
    }
}
