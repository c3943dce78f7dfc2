use chrono::{DateTime, Utc};

use docmeta_extractors::FileKind;

use crate::analysis::TextAnalysis;
use crate::insights::DocumentInsights;
use crate::language::LanguageAnalysis;
use crate::types::MetadataRecord;
use crate::upload::{format_file_size, StagedUpload};

/// Assembles a [`MetadataRecord`] from the outputs of each stage.
///
/// Parts that were never supplied come out as `null` in the record.
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    file_name: String,
    file_size_bytes: u64,
    file_type: String,
    mime_type: String,
    extraction_method: Option<String>,
    extracted_at: Option<DateTime<Utc>>,
    analysis: Option<TextAnalysis>,
    language: Option<LanguageAnalysis>,
    insights: Option<DocumentInsights>,
}

impl MetadataBuilder {
    pub fn new(file_name: impl Into<String>, file_size_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            file_size_bytes,
            file_type: String::new(),
            mime_type: "application/octet-stream".to_string(),
            extraction_method: None,
            extracted_at: None,
            analysis: None,
            language: None,
            insights: None,
        }
    }

    /// Start from a staged upload, taking its name and size.
    pub fn for_upload(upload: &StagedUpload) -> Self {
        let mut builder = Self::new(upload.file_name(), upload.size());
        builder.file_type = upload.extension().to_string();
        builder
    }

    /// Record the detected type.
    pub fn file_kind(mut self, kind: FileKind) -> Self {
        self.file_type = kind.extension().to_string();
        self.mime_type = kind.mime_type().to_string();
        self
    }

    pub fn extraction_method(mut self, method: impl Into<String>) -> Self {
        self.extraction_method = Some(method.into());
        self
    }

    /// Override the timestamp. Defaults to the time of `build()`.
    pub fn extracted_at(mut self, at: DateTime<Utc>) -> Self {
        self.extracted_at = Some(at);
        self
    }

    pub fn analysis(mut self, analysis: TextAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn language(mut self, language: Option<LanguageAnalysis>) -> Self {
        self.language = language;
        self
    }

    pub fn insights(mut self, insights: Option<DocumentInsights>) -> Self {
        self.insights = insights;
        self
    }

    pub fn build(self) -> MetadataRecord {
        let analysis = self.analysis;
        let count = |f: fn(&TextAnalysis) -> usize| analysis.as_ref().map(f).unwrap_or(0) as u64;

        MetadataRecord {
            file_size: format_file_size(self.file_size_bytes),
            file_name: self.file_name,
            file_type: self.file_type,
            mime_type: self.mime_type,
            file_size_bytes: self.file_size_bytes,
            extraction_date: self.extracted_at.unwrap_or_else(Utc::now),
            extraction_method: self.extraction_method,

            character_count: count(|a| a.character_count),
            character_count_no_spaces: count(|a| a.character_count_no_spaces),
            word_count: count(|a| a.word_count),
            sentence_count: count(|a| a.sentence_count),
            paragraph_count: count(|a| a.paragraph_count),
            line_count: count(|a| a.line_count),
            estimated_reading_time: analysis
                .as_ref()
                .map(|a| a.reading_time_minutes)
                .unwrap_or(0),

            detected_language: self.language.as_ref().map(|l| l.language.clone()),
            language_code: self.language.as_ref().map(|l| l.code.clone()),
            language_confidence: self.language.as_ref().map(|l| l.confidence),
            language_reliable: self.language.as_ref().map(|l| l.is_reliable),

            document_type: self.insights.as_ref().map(|i| i.document_type.to_string()),
            summary: self.insights.as_ref().map(|i| i.summary.clone()),
            key_points: self.insights.map(|i| i.key_points),

            common_words: analysis
                .as_ref()
                .map(|a| a.top_words.clone())
                .unwrap_or_default(),
            readability_score: analysis
                .as_ref()
                .and_then(|a| a.readability)
                .map(|r| r.score),
            readability_level: analysis
                .as_ref()
                .and_then(|a| a.readability)
                .map(|r| r.level.to_string()),
            avg_word_length: analysis.as_ref().map(|a| a.avg_word_length).unwrap_or(0.0),
            avg_sentence_length: analysis
                .as_ref()
                .map(|a| a.avg_sentence_length)
                .unwrap_or(0.0),
        }
    }
}
