//! Extraction error types.

use thiserror::Error;

/// Errors that can occur while detecting or extracting a document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Content type is not supported by any extractor.
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    /// Extraction process failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// Extracted content is empty.
    #[error("Empty content extracted")]
    EmptyContent,

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF-specific extraction error.
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// DOCX-specific extraction error.
    #[error("DOCX extraction error: {0}")]
    Docx(String),

    /// Legacy Word (.doc) extraction error.
    #[error("DOC extraction error: {0}")]
    Doc(String),

    /// XLSX / XLS extraction error.
    #[error("Spreadsheet extraction error: {0}")]
    Spreadsheet(String),

    /// Image decoding or OCR error.
    #[error("Image extraction error: {0}")]
    Image(String),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl ExtractError {
    /// Whether the error means the input itself could not be understood,
    /// as opposed to an environment problem (IO, runtime).
    pub fn is_content_error(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::TaskJoin(_))
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
