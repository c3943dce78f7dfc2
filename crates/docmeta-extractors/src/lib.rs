//! docmeta-extractors - File type detection and text extraction.
//!
//! Provides the document loader (magic-byte detection) and one extractor per
//! supported format behind a unified trait-based interface.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `docx` (default) - DOCX text extraction via docx-rs
//! - `spreadsheet` (default) - XLSX/XLS extraction via calamine
//! - `image` (default) - Image decoding and validation
//! - `ocr` - Image OCR via tesseract (requires tesseract installed)
//! - `full` - All extraction features
//!
//! Plain text, Markdown and legacy `.doc` extraction are always available.
//!
//! # Example
//!
//! ```ignore
//! use docmeta_extractors::ExtractionPipeline;
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//! let (kind, content) = pipeline.load(&bytes, Some("pdf")).await?;
//! println!("{} chars of {}", content.text.len(), kind);
//! ```

mod detect;
mod doc;
mod error;
mod factory;
mod pipeline;
mod text;
mod types;

#[cfg(test)]
mod test_support;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "docx")]
mod docx;

#[cfg(feature = "spreadsheet")]
mod spreadsheet;

#[cfg(feature = "image")]
mod ocr;

pub use detect::detect_file_type;
pub use doc::DocExtractor;
pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pipeline::ExtractionPipeline;
pub use text::TextExtractor;
pub use types::{
    DocumentStructure, ExtractedContent, FileKind, ImageFormat, SUPPORTED_EXTENSIONS,
};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "docx")]
pub use docx::DocxExtractor;

#[cfg(feature = "spreadsheet")]
pub use spreadsheet::SpreadsheetExtractor;

#[cfg(feature = "image")]
pub use ocr::{ImageExtractionConfig, ImageExtractor};

use async_trait::async_trait;

/// Core Extractor trait - all content extractors implement this.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract text content from bytes.
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent>;

    /// File kinds this extractor handles.
    fn supported_kinds(&self) -> &[FileKind];

    /// Check if this extractor handles the given file kind.
    fn supports(&self, kind: FileKind) -> bool {
        self.supported_kinds().contains(&kind)
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
