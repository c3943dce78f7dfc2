//! The metadata record produced for every uploaded document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A word and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Everything docmeta knows about one uploaded document.
///
/// Every field is always serialized. Values that could not be computed
/// (no language detected, summary unavailable) are written as `null`.
/// Build one with [`MetadataBuilder`](crate::metadata::MetadataBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataRecord {
    // File
    pub file_name: String,
    /// Canonical extension of the detected type, e.g. `pdf`.
    pub file_type: String,
    pub mime_type: String,
    /// Human readable size, e.g. `1.5 MB`.
    pub file_size: String,
    pub file_size_bytes: u64,
    pub extraction_date: DateTime<Utc>,
    pub extraction_method: Option<String>,

    // Counts
    pub character_count: u64,
    pub character_count_no_spaces: u64,
    pub word_count: u64,
    pub sentence_count: u64,
    pub paragraph_count: u64,
    pub line_count: u64,
    /// Minutes.
    pub estimated_reading_time: u32,

    // Language
    pub detected_language: Option<String>,
    /// ISO 639-3.
    pub language_code: Option<String>,
    pub language_confidence: Option<f64>,
    pub language_reliable: Option<bool>,

    // Insights
    pub document_type: Option<String>,
    pub summary: Option<String>,
    pub key_points: Option<Vec<String>>,

    // Text statistics
    pub common_words: Vec<WordCount>,
    /// Flesch Reading Ease.
    pub readability_score: Option<f64>,
    pub readability_level: Option<String>,
    pub avg_word_length: f64,
    pub avg_sentence_length: f64,
}

impl MetadataRecord {
    /// Whether AI insights were produced for this document.
    pub fn has_insights(&self) -> bool {
        self.summary.is_some()
    }

    /// Whether a language was detected.
    pub fn has_language(&self) -> bool {
        self.language_code.is_some()
    }
}
