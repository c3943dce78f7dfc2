//! Document upload, retrieval, export and clearing.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use docmeta_core::error::DocMetaError;
use docmeta_core::export::{export_file_name, export_json};
use docmeta_core::types::MetadataRecord;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Response for a processed upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub metadata: MetadataRecord,
}

/// Process an uploaded document.
/// POST /documents
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<UploadResponse>> {
    let limit_mb = state.config().upload.max_file_size_mb;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_multipart(e, limit_mb))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::from_multipart(e, limit_mb))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(ApiError::missing_file)?;
    info!(file_name = %file_name, bytes = bytes.len(), "Received upload");

    let record = state.processor().process(&file_name, bytes.to_vec()).await?;
    let id = state.store(record.clone()).await;

    Ok(Json(UploadResponse {
        id,
        metadata: record,
    }))
}

/// GET /documents/:id
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MetadataRecord>> {
    state
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| DocMetaError::not_found(id.to_string()).into())
}

/// Download the record as a JSON attachment.
/// GET /documents/:id/export
pub async fn export_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let record = state
        .get(&id)
        .await
        .ok_or_else(|| ApiError::from(DocMetaError::not_found(id.to_string())))?;

    let body = export_json(&record)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&record.file_name).replace('"', "")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

/// Clear a stored result.
/// DELETE /documents/:id
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    if state.remove(&id).await {
        info!(id = %id, "Cleared result");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(DocMetaError::not_found(id.to_string()).into())
    }
}
