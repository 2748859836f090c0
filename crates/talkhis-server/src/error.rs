//! Error handling for the REST API server.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

use talkhis_core::error::TalkhisError;
use talkhis_extractors::ExtractError;

/// Shown when a submission arrives while another one is still running.
pub const BUSY_MESSAGE: &str = "جاري معالجة طلب آخر. يرجى الانتظار حتى يكتمل.";

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    // Common error constructors
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn busy() -> Self {
        Self::new(StatusCode::CONFLICT, "BUSY", BUSY_MESSAGE)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.status, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code,
                message: self.message,
                details: self.details,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

// Convert from talkhis-core errors
impl From<TalkhisError> for ApiError {
    fn from(err: TalkhisError) -> Self {
        let status = match &err {
            TalkhisError::EmptyInput => StatusCode::UNPROCESSABLE_ENTITY,
            TalkhisError::RemoteService { .. } | TalkhisError::Provider(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let api = ApiError::new(status, err.code().as_str(), err.localized_message());
        match err.suggestion() {
            Some(suggestion) => api.with_details(serde_json::json!({ "suggestion": suggestion })),
            None => api,
        }
    }
}

// Convert from talkhis-extractors errors
impl From<ExtractError> for ApiError {
    fn from(err: ExtractError) -> Self {
        let status = match &err {
            ExtractError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ExtractError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ExtractError::Read(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let api = ApiError::new(status, err.code(), err.localized_message());
        match err {
            ExtractError::UnsupportedFormat(declared) => {
                api.with_details(serde_json::json!({ "declared": declared }))
            }
            _ => api,
        }
    }
}

// A broken or oversized upload body is a read failure; the status stays 400/413.
impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let read = ExtractError::Read(std::io::Error::other(err.body_text()));
        ApiError {
            status,
            ..ApiError::from(read)
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
