//! Route definitions for the REST API.

mod extract;
mod health;
mod lengths;
mod summarize;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Largest accepted upload. Research papers with embedded figures can be
/// well past axum's 2 MB default.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Length selectors
        .route("/lengths", get(lengths::list_lengths))
        // Document extraction
        .route(
            "/extract",
            post(extract::extract_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Summarization
        .route("/summarize", post(summarize::summarize))
        // Attach state
        .with_state(state)
}

pub use extract::*;
pub use health::*;
pub use lengths::*;
pub use summarize::*;
