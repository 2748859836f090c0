//! Document upload and extraction endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::{debug, info};

use talkhis_extractors::{MediaType, SourceDocument};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Response for an extracted upload.
#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub file_name: Option<String>,
    pub text: String,
    pub sections: Vec<String>,
    pub characters: usize,
}

/// Extract the text of an uploaded `.txt` or `.docx` file.
/// POST /extract
pub async fn extract_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<ExtractResponse>> {
    let _guard = state.begin()?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let media_type = MediaType::detect(field.content_type(), file_name.as_deref());

        // Reject before pulling the body.
        state.pipeline().ensure_supported(&media_type)?;

        let bytes = field.bytes().await?;
        let mut document = SourceDocument::new(media_type, bytes.to_vec());
        if let Some(name) = &file_name {
            document = document.with_name(name.clone());
        }

        let content = state.pipeline().extract(&document).await?;
        info!(
            file = ?file_name,
            chars = content.char_count(),
            sections = content.sections().len(),
            "Extracted upload"
        );

        return Ok(Json(ExtractResponse {
            file_name,
            characters: content.char_count(),
            sections: content.sections().to_vec(),
            text: content.into_text(),
        }));
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}
