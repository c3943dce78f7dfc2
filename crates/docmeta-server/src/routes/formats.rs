//! Supported formats and limits.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FormatsResponse {
    pub extensions: Vec<&'static str>,
    pub max_file_size_mb: u64,
    pub reading_speed_wpm: u32,
}

/// Formats the running build can extract, so images only appear with OCR.
/// GET /formats
pub async fn supported_formats(State(state): State<AppState>) -> Json<FormatsResponse> {
    let config = state.config();
    Json(FormatsResponse {
        extensions: state.processor().supported_extensions().to_vec(),
        max_file_size_mb: config.upload.max_file_size_mb,
        reading_speed_wpm: config.analysis.reading_speed_wpm,
    })
}
