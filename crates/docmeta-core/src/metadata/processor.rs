use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use docmeta_extractors::ExtractionPipeline;

use crate::analysis::{analyze_text, clean_text, is_text_meaningful};
use crate::config::DocMetaConfig;
use crate::error::{DocMetaError, DocMetaResult};
use crate::insights::SummaryGenerator;
use crate::language::detect_language;
use crate::traits::Llm;
use crate::types::MetadataRecord;
use crate::upload::{FileValidator, StagedUpload};

use super::MetadataBuilder;

/// Runs one upload through every stage and returns its record.
pub struct DocumentProcessor {
    config: DocMetaConfig,
    pipeline: ExtractionPipeline,
    validator: FileValidator,
    summarizer: Option<SummaryGenerator>,
}

impl DocumentProcessor {
    /// `llm` may be `None`, or insights may be disabled in config;
    /// either way the insight fields are left empty.
    pub fn new(
        config: DocMetaConfig,
        pipeline: ExtractionPipeline,
        llm: Option<Arc<dyn Llm>>,
    ) -> Self {
        let summarizer = llm
            .filter(|_| config.insights.enabled)
            .map(|llm| SummaryGenerator::new(llm, config.insights.clone()));
        let validator =
            FileValidator::new(&config.upload).with_extensions(pipeline.supported_extensions());
        Self {
            config,
            pipeline,
            validator,
            summarizer,
        }
    }

    /// Processor with every built-in extractor.
    pub fn with_defaults(config: DocMetaConfig, llm: Option<Arc<dyn Llm>>) -> Self {
        Self::new(config, ExtractionPipeline::with_defaults(), llm)
    }

    pub fn config(&self) -> &DocMetaConfig {
        &self.config
    }

    pub fn has_summarizer(&self) -> bool {
        self.summarizer.is_some()
    }

    /// Extensions this processor's pipeline can extract.
    pub fn supported_extensions(&self) -> &[&'static str] {
        self.validator.extensions()
    }

    /// Validate, stage and process raw upload bytes.
    ///
    /// The bytes are dropped once staged; extraction reads the temp file.
    pub async fn process(&self, file_name: &str, bytes: Vec<u8>) -> DocMetaResult<MetadataRecord> {
        self.validator.validate(file_name, bytes.len() as u64)?;

        let start = Instant::now();
        let upload_config = self.config.upload.clone();
        let name = file_name.to_string();
        let staged = tokio::task::spawn_blocking(move || {
            StagedUpload::stage(&name, &bytes, &upload_config)
        })
        .await
        .map_err(|e| DocMetaError::Internal(format!("staging task failed: {}", e)))??;
        debug!(
            file_name = %staged.file_name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Stage: upload staged"
        );

        self.process_staged(&staged).await
    }

    /// Process an upload that is already staged on disk.
    pub async fn process_staged(&self, staged: &StagedUpload) -> DocMetaResult<MetadataRecord> {
        self.validator.validate(staged.file_name(), staged.size())?;
        let bytes = staged.read_bytes().await?;

        let total = Instant::now();
        let file_name = staged.file_name();
        info!(file_name = %file_name, bytes = staged.size(), "Processing document");

        let start = Instant::now();
        let (kind, extracted) = self.pipeline.load(&bytes, Some(staged.extension())).await?;
        debug!(
            file_name = %file_name,
            kind = %kind,
            method = %extracted.method,
            chars = extracted.text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Stage: text extracted"
        );

        if !is_text_meaningful(&extracted.text) {
            return Err(DocMetaError::no_meaningful_text(file_name));
        }

        let start = Instant::now();
        let cleaned = clean_text(&extracted.text);
        let analysis = analyze_text(&cleaned, &self.config.analysis);
        let language = detect_language(&cleaned);
        debug!(
            file_name = %file_name,
            words = analysis.word_count,
            language = language.as_ref().map(|l| l.code.as_str()).unwrap_or("unknown"),
            duration_ms = start.elapsed().as_millis() as u64,
            "Stage: text analyzed"
        );

        let insights = match &self.summarizer {
            Some(summarizer) => match summarizer.generate(&cleaned).await {
                Ok(insights) => Some(insights),
                Err(e) => {
                    warn!(
                        file_name = %file_name,
                        error = %e,
                        "Summary generation failed, insight fields left empty"
                    );
                    None
                }
            },
            None => None,
        };

        let record = MetadataBuilder::for_upload(staged)
            .file_kind(kind)
            .extraction_method(extracted.method)
            .analysis(analysis)
            .language(language)
            .insights(insights)
            .build();

        info!(
            file_name = %file_name,
            file_type = %record.file_type,
            words = record.word_count,
            summarized = record.has_insights(),
            duration_ms = total.elapsed().as_millis() as u64,
            "Document processed"
        );
        Ok(record)
    }
}
