//! Summarization endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use talkhis_core::types::LengthSelector;

use crate::error::ApiResult;
use crate::state::AppState;

/// Request body for summarizing text.
#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    /// Text to summarize.
    #[serde(default)]
    pub text: String,
    /// Arabic label or key; unrecognized or missing means medium.
    #[serde(default)]
    pub length: Option<String>,
}

/// Response for a generated summary.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub length: LengthSelector,
    pub label: String,
    pub model: String,
}

/// Summarize text.
/// POST /summarize
pub async fn summarize(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> ApiResult<Json<SummarizeResponse>> {
    let length = request
        .length
        .as_deref()
        .map(LengthSelector::from_label)
        .unwrap_or_default();

    // Empty input is rejected even while another submission is running.
    let summarizer = state.summarizer();
    summarizer.request(&request.text, length)?;

    let _guard = state.begin()?;

    let summary = summarizer.summarize(&request.text, length).await?;

    Ok(Json(SummarizeResponse {
        summary,
        length,
        label: length.label().to_string(),
        model: summarizer.model_name().to_string(),
    }))
}
