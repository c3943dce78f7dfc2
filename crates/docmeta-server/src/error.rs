//! Error handling for the web interface.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

use docmeta_core::error::{DocMetaError, ErrorCode};

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

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorCode::ResNotFound.as_str(), message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal.as_str(), message)
    }

    pub fn missing_file() -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ValMissingField.as_str(),
            "No file uploaded. Send the document in a multipart field named 'file'.",
        )
    }

    /// The request body went past the size limit while streaming.
    pub fn payload_too_large(limit_mb: u64) -> Self {
        Self::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::FileTooLarge.as_str(),
            format!("File too large: the limit is {} MB", limit_mb),
        )
    }

    /// Map a multipart read failure, recognising an exceeded body limit.
    pub fn from_multipart(err: MultipartError, limit_mb: u64) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::payload_too_large(limit_mb)
        } else {
            Self::bad_request(format!("Invalid multipart upload: {}", err.body_text()))
        }
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

impl From<DocMetaError> for ApiError {
    fn from(err: DocMetaError) -> Self {
        let status = match &err {
            DocMetaError::UnsupportedFileType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            DocMetaError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            DocMetaError::Validation { .. }
            | DocMetaError::Extraction { .. }
            | DocMetaError::NoMeaningfulText { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            DocMetaError::Llm { .. } | DocMetaError::Authentication { .. } => {
                StatusCode::BAD_GATEWAY
            }
            DocMetaError::NotFound { .. } => StatusCode::NOT_FOUND,
            DocMetaError::Configuration(_)
            | DocMetaError::Io(_)
            | DocMetaError::Serialization(_)
            | DocMetaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let details = match &err {
            DocMetaError::UnsupportedFileType {
                extension: Some(ext),
                ..
            } => Some(json!({ "extension": ext })),
            DocMetaError::FileTooLarge { size, limit, .. } => {
                Some(json!({ "size_bytes": size, "limit_bytes": limit }))
            }
            DocMetaError::Validation { details, .. } if !details.is_empty() => {
                Some(json!(details))
            }
            _ => None,
        };
        let details = match (details, err.suggestion()) {
            (Some(mut d), Some(s)) => {
                d["suggestion"] = json!(s);
                Some(d)
            }
            (None, Some(s)) => Some(json!({ "suggestion": s })),
            (d, None) => d,
        };

        let api_error = ApiError::new(status, err.code().as_str(), err.to_string());
        match details {
            Some(details) => api_error.with_details(details),
            None => api_error,
        }
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
