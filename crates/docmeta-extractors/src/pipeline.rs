//! Document loader: detect the true file type, then route to an extractor.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::detect::detect_file_type;
use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FileKind, SUPPORTED_EXTENSIONS};
use crate::Extractor;

/// Pipeline for extracting content using registered extractors.
///
/// Routes content to the first extractor that supports its file kind.
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        Self {
            extractors: crate::ExtractorFactory::all(),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Replace the extractor registered for `kind`, keeping the others.
    pub fn replace_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.retain(|existing| {
            !extractor
                .supported_kinds()
                .iter()
                .any(|kind| existing.supports(*kind))
        });
        self.extractors.push(extractor);
        self
    }

    /// Detect the file kind and extract its text in one step.
    pub async fn load(
        &self,
        content: &[u8],
        extension: Option<&str>,
    ) -> ExtractResult<(FileKind, ExtractedContent)> {
        let kind = detect_file_type(content, extension)?;
        let content = self.extract(content, kind).await?;
        Ok((kind, content))
    }

    /// Extract content using the appropriate extractor for the file kind.
    pub async fn extract(&self, content: &[u8], kind: FileKind) -> ExtractResult<ExtractedContent> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(kind))
            .ok_or_else(|| ExtractError::UnsupportedType(kind.mime_type().to_string()))?;

        debug!(extractor = extractor.name(), kind = %kind, "Dispatching extraction");
        let start = Instant::now();
        let extracted = extractor.extract(content).await?;

        info!(
            extractor = extractor.name(),
            kind = %kind,
            chars = extracted.text.chars().count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Extraction completed"
        );

        Ok(extracted)
    }

    /// Check if pipeline can handle a given file kind.
    pub fn supports(&self, kind: FileKind) -> bool {
        self.extractors.iter().any(|e| e.supports(kind))
    }

    /// List all supported file kinds.
    pub fn supported_kinds(&self) -> Vec<FileKind> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_kinds().iter().copied())
            .collect()
    }

    /// Upload extensions whose kind has a registered extractor.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        SUPPORTED_EXTENSIONS
            .iter()
            .copied()
            .filter(|ext| FileKind::from_extension(ext).is_some_and(|kind| self.supports(kind)))
            .collect()
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
