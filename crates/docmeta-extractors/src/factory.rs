//! Factory for creating extractors.

use std::sync::Arc;

use crate::error::{ExtractError, ExtractResult};
use crate::types::FileKind;
use crate::{DocExtractor, Extractor, TextExtractor};

#[cfg(feature = "pdf")]
use crate::PdfExtractor;

#[cfg(feature = "docx")]
use crate::DocxExtractor;

#[cfg(feature = "spreadsheet")]
use crate::SpreadsheetExtractor;

#[cfg(feature = "image")]
use crate::ocr::{ImageExtractionConfig, ImageExtractor};

/// Factory for creating content extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a PDF extractor.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a PDF extractor with custom minimum text threshold.
    #[cfg(feature = "pdf")]
    pub fn pdf_with_threshold(min_text_length: usize) -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::with_min_text_length(min_text_length))
    }

    /// Create a DOCX extractor.
    #[cfg(feature = "docx")]
    pub fn docx() -> Arc<dyn Extractor> {
        Arc::new(DocxExtractor::new())
    }

    /// Create a DOCX extractor with custom configuration.
    #[cfg(feature = "docx")]
    pub fn docx_configured(preserve_tables: bool, extract_headings: bool) -> Arc<dyn Extractor> {
        Arc::new(
            DocxExtractor::new()
                .with_tables(preserve_tables)
                .with_headings(extract_headings),
        )
    }

    /// Create a legacy Word extractor.
    pub fn doc() -> Arc<dyn Extractor> {
        Arc::new(DocExtractor::new())
    }

    /// Create an XLSX / XLS extractor.
    #[cfg(feature = "spreadsheet")]
    pub fn spreadsheet() -> Arc<dyn Extractor> {
        Arc::new(SpreadsheetExtractor::new())
    }

    /// Create a plain text extractor.
    pub fn text() -> Arc<dyn Extractor> {
        Arc::new(TextExtractor::new())
    }

    /// Create a Markdown extractor.
    pub fn markdown() -> Arc<dyn Extractor> {
        Arc::new(TextExtractor::markdown())
    }

    /// Create an OCR image extractor.
    #[cfg(feature = "image")]
    pub fn image() -> Arc<dyn Extractor> {
        Arc::new(ImageExtractor::new())
    }

    /// Create an OCR image extractor with custom configuration.
    #[cfg(feature = "image")]
    pub fn image_with_config(config: ImageExtractionConfig) -> Arc<dyn Extractor> {
        Arc::new(ImageExtractor::with_config(config))
    }

    /// Create extractor for a given file kind.
    pub fn for_kind(kind: FileKind) -> ExtractResult<Arc<dyn Extractor>> {
        match kind {
            #[cfg(feature = "pdf")]
            FileKind::Pdf => Ok(Self::pdf()),

            #[cfg(feature = "docx")]
            FileKind::Docx => Ok(Self::docx()),

            FileKind::Doc => Ok(Self::doc()),

            #[cfg(feature = "spreadsheet")]
            FileKind::Xlsx | FileKind::Xls => Ok(Self::spreadsheet()),

            FileKind::Text => Ok(Self::text()),
            FileKind::Markdown => Ok(Self::markdown()),

            #[cfg(feature = "image")]
            FileKind::Image(_) => Ok(Self::image()),

            #[allow(unreachable_patterns)]
            other => Err(ExtractError::UnsupportedType(other.mime_type().to_string())),
        }
    }

    /// Get all available extractors.
    ///
    /// The OCR extractor is only included when the `ocr` feature is on.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        #[cfg(feature = "pdf")]
        extractors.push(Self::pdf());

        #[cfg(feature = "docx")]
        extractors.push(Self::docx());

        extractors.push(Self::doc());

        #[cfg(feature = "spreadsheet")]
        extractors.push(Self::spreadsheet());

        extractors.push(Self::text());
        extractors.push(Self::markdown());

        // Without Tesseract every image upload would fail after staging.
        #[cfg(feature = "ocr")]
        extractors.push(Self::image());

        extractors
    }
}
