//! Error types for docmeta operations.
//!
//! This module provides the error hierarchy shared by every docmeta crate,
//! with structured error codes and suggestions for resolution.

use std::collections::HashMap;
use thiserror::Error;

use docmeta_extractors::ExtractError;

/// Result type alias for docmeta operations.
pub type DocMetaResult<T> = Result<T, DocMetaError>;

/// Main error type for all docmeta operations.
#[derive(Error, Debug)]
pub enum DocMetaError {
    /// The uploaded file has an extension or content we cannot handle.
    #[error("Unsupported file type: {message}")]
    UnsupportedFileType {
        message: String,
        code: ErrorCode,
        extension: Option<String>,
    },

    /// The uploaded file exceeds the configured size limit.
    #[error("File too large: {message}")]
    FileTooLarge {
        message: String,
        code: ErrorCode,
        size: u64,
        limit: u64,
    },

    /// Input validation failed.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        code: ErrorCode,
        details: HashMap<String, String>,
        suggestion: Option<String>,
    },

    /// Text extraction failed.
    #[error("Extraction error: {message}")]
    Extraction {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Extraction succeeded but produced nothing worth analysing.
    #[error("No meaningful text: {message}")]
    NoMeaningfulText { message: String, code: ErrorCode },

    /// Summarization provider failed.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Summarization provider rejected our credentials.
    #[error("Authentication error: {message}")]
    Authentication {
        message: String,
        code: ErrorCode,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Stored result not found.
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        code: ErrorCode,
        resource_id: Option<String>,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // File (FILE_xxx)
    FileUnsupportedType,
    FileTooLarge,
    FileEmpty,

    // Validation (VAL_xxx)
    ValInvalidInput,
    ValMissingField,

    // Extraction (EXT_xxx)
    ExtFailed,
    ExtNoMeaningfulText,

    // LLM (LLM_xxx)
    LlmConnectionFailed,
    LlmGenerationFailed,
    LlmInvalidResponse,

    // Authentication (AUTH_xxx)
    AuthInvalidKey,

    // Results (RES_xxx)
    ResNotFound,

    // Parse (PARSE_xxx)
    ParseInvalidJson,

    // Internal
    Internal,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::FileUnsupportedType => "FILE_001",
            ErrorCode::FileTooLarge => "FILE_002",
            ErrorCode::FileEmpty => "FILE_003",
            ErrorCode::ValInvalidInput => "VAL_001",
            ErrorCode::ValMissingField => "VAL_002",
            ErrorCode::ExtFailed => "EXT_001",
            ErrorCode::ExtNoMeaningfulText => "EXT_002",
            ErrorCode::LlmConnectionFailed => "LLM_001",
            ErrorCode::LlmGenerationFailed => "LLM_002",
            ErrorCode::LlmInvalidResponse => "LLM_003",
            ErrorCode::AuthInvalidKey => "AUTH_001",
            ErrorCode::ResNotFound => "RES_001",
            ErrorCode::ParseInvalidJson => "PARSE_001",
            ErrorCode::Internal => "INT_001",
        }
    }
}

impl DocMetaError {
    /// Create an unsupported file type error.
    pub fn unsupported_file_type(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let message = if extension.is_empty() {
            "file has no extension".to_string()
        } else {
            format!("'.{}' files are not supported", extension)
        };
        Self::UnsupportedFileType {
            message,
            code: ErrorCode::FileUnsupportedType,
            extension: Some(extension),
        }
    }

    /// Create a file too large error.
    pub fn file_too_large(size: u64, limit: u64) -> Self {
        Self::FileTooLarge {
            message: format!(
                "file is {} but the limit is {}",
                crate::upload::format_file_size(size),
                crate::upload::format_file_size(limit)
            ),
            code: ErrorCode::FileTooLarge,
            size,
            limit,
        }
    }

    /// Create an empty file error.
    pub fn empty_file(file_name: impl Into<String>) -> Self {
        Self::Validation {
            message: format!("'{}' is empty", file_name.into()),
            code: ErrorCode::FileEmpty,
            details: HashMap::new(),
            suggestion: Some("Please upload a file with content".to_string()),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: None,
        }
    }

    /// Create a validation error with suggestion.
    pub fn validation_with_suggestion(
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Validation {
            message: message.into(),
            code: ErrorCode::ValInvalidInput,
            details: HashMap::new(),
            suggestion: Some(suggestion.into()),
        }
    }

    /// Create an extraction error.
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
            code: ErrorCode::ExtFailed,
            source: None,
        }
    }

    /// Create a no meaningful text error.
    pub fn no_meaningful_text(file_name: impl Into<String>) -> Self {
        Self::NoMeaningfulText {
            message: format!(
                "could not extract meaningful text from '{}'",
                file_name.into()
            ),
            code: ErrorCode::ExtNoMeaningfulText,
        }
    }

    /// Create an LLM error.
    pub fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmGenerationFailed,
            source: None,
        }
    }

    /// Create an LLM connection error.
    pub fn llm_connection(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            code: ErrorCode::LlmConnectionFailed,
            source: None,
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
            code: ErrorCode::AuthInvalidKey,
            source: None,
        }
    }

    /// Create a not found error.
    pub fn not_found(resource_id: impl Into<String>) -> Self {
        let id = resource_id.into();
        Self::NotFound {
            message: format!("Result with id '{}' not found", id),
            code: ErrorCode::ResNotFound,
            resource_id: Some(id),
        }
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedFileType { code, .. } => *code,
            Self::FileTooLarge { code, .. } => *code,
            Self::Validation { code, .. } => *code,
            Self::Extraction { code, .. } => *code,
            Self::NoMeaningfulText { code, .. } => *code,
            Self::Llm { code, .. } => *code,
            Self::Authentication { code, .. } => *code,
            Self::NotFound { code, .. } => *code,
            Self::Serialization(_) => ErrorCode::ParseInvalidJson,
            _ => ErrorCode::Internal,
        }
    }

    /// Get a user-friendly suggestion for resolving this error.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFileType { .. } => {
                Some("Check the supported formats list and upload one of those")
            }
            Self::FileTooLarge { .. } => Some("Please upload a smaller file"),
            Self::Validation { suggestion, .. } => suggestion.as_deref(),
            Self::Extraction { .. } => Some("The file may be corrupt or password protected"),
            Self::NoMeaningfulText { .. } => {
                Some("Scanned documents need OCR; try uploading the page as an image")
            }
            Self::Llm { .. } => Some("Please check your summarization provider configuration"),
            Self::Authentication { .. } => Some("Please check your API key"),
            Self::NotFound { .. } => Some("The result may have been cleared; upload the file again"),
            Self::Configuration(_) => Some("Please check your environment and config file"),
            _ => None,
        }
    }

    /// Convert from an HTTP status code returned by a provider.
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::authentication(body),
            400 | 422 => Self::Llm {
                message: body.to_string(),
                code: ErrorCode::LlmInvalidResponse,
                source: None,
            },
            _ => Self::llm(format!("HTTP {}: {}", status, body)),
        }
    }
}

impl From<ExtractError> for DocMetaError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedType(mime) => Self::UnsupportedFileType {
                message: format!("detected content type {} is not supported", mime),
                code: ErrorCode::FileUnsupportedType,
                extension: None,
            },
            ExtractError::EmptyContent => Self::NoMeaningfulText {
                message: "no text could be extracted".to_string(),
                code: ErrorCode::ExtNoMeaningfulText,
            },
            ExtractError::Io(e) => Self::Io(e),
            other => Self::Extraction {
                message: other.to_string(),
                code: ErrorCode::ExtFailed,
                source: Some(Box::new(other)),
            },
        }
    }
}
