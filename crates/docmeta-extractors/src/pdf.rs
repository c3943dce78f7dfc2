//! PDF content extraction using pdf-extract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, FileKind};
use crate::Extractor;
use async_trait::async_trait;
use tracing::warn;

/// PDF content extractor using pdf-extract library.
///
/// Extracts text from PDF files, wrapping synchronous pdf-extract
/// calls in spawn_blocking to avoid blocking the async runtime.
#[derive(Debug, Clone)]
pub struct PdfExtractor {
    /// Below this many characters the PDF is probably scanned images.
    min_text_length: usize,
}

impl PdfExtractor {
    /// Create new PDF extractor with default settings.
    pub fn new() -> Self {
        Self {
            min_text_length: 10,
        }
    }

    /// Create PDF extractor with custom minimum text threshold.
    pub fn with_min_text_length(min_text_length: usize) -> Self {
        Self { min_text_length }
    }

    fn extract_sync(content: Vec<u8>) -> ExtractResult<String> {
        pdf_extract::extract_text_from_mem(&content)
            .map_err(|e| ExtractError::Pdf(format!("Failed to parse PDF: {}", e)))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        // pdf-extract panics on some malformed inputs; a panicked task is a corrupt file.
        let raw = tokio::task::spawn_blocking(move || Self::extract_sync(content))
            .await
            .map_err(|e| ExtractError::Pdf(format!("Corrupt or unreadable PDF: {}", e)))??;

        let page_breaks = raw.matches('\u{c}').count();
        let text = raw.replace('\u{c}', "\n\n");

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        if text.trim().len() < self.min_text_length {
            warn!(
                chars = text.trim().len(),
                "PDF yielded very little text, it may be image-based"
            );
        }

        let structure = DocumentStructure {
            page_count: (page_breaks > 0).then_some(page_breaks),
            sections: Vec::new(),
        };

        Ok(ExtractedContent::new(text, FileKind::Pdf, self.name())
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_kinds(&self) -> &[FileKind] {
        &[FileKind::Pdf]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
