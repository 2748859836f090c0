//! Length selector listing.

use axum::Json;
use serde::Serialize;

use talkhis_core::types::LengthSelector;

#[derive(Debug, Serialize)]
pub struct LengthInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub instruction: &'static str,
    pub default: bool,
}

impl From<LengthSelector> for LengthInfo {
    fn from(length: LengthSelector) -> Self {
        Self {
            key: length.key(),
            label: length.label(),
            instruction: length.instruction(),
            default: length == LengthSelector::default(),
        }
    }
}

/// List the length selectors, shortest first.
/// GET /lengths
pub async fn list_lengths() -> Json<Vec<LengthInfo>> {
    Json(LengthSelector::all().into_iter().map(LengthInfo::from).collect())
}
