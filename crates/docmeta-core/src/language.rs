//! Language detection.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Minimum alphabetic characters before detection is attempted.
const MIN_ALPHABETIC_CHARS: usize = 20;

/// Only this many leading characters are inspected.
const MAX_SAMPLE_CHARS: usize = 10_000;

/// Detected language of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageAnalysis {
    /// English name, e.g. `English`.
    pub language: String,
    /// ISO 639-3 code, e.g. `eng`.
    pub code: String,
    /// Writing system, e.g. `Latin`.
    pub script: String,
    /// 0.0 to 1.0, two decimals.
    pub confidence: f64,
    pub is_reliable: bool,
}

/// Detect the dominant language of `text`.
///
/// Returns `None` when there is too little text or whatlang cannot decide.
pub fn detect_language(text: &str) -> Option<LanguageAnalysis> {
    let sample = match text.char_indices().nth(MAX_SAMPLE_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    };

    let alphabetic = sample.chars().filter(|c| c.is_alphabetic()).count();
    if alphabetic < MIN_ALPHABETIC_CHARS {
        debug!(alphabetic, "Too little text for language detection");
        return None;
    }

    let info = whatlang::detect(sample)?;
    let analysis = LanguageAnalysis {
        language: info.lang().eng_name().to_string(),
        code: info.lang().code().to_string(),
        script: info.script().name().to_string(),
        confidence: (info.confidence() * 100.0).round() / 100.0,
        is_reliable: info.is_reliable(),
    };

    debug!(
        language = %analysis.language,
        confidence = analysis.confidence,
        reliable = analysis.is_reliable,
        "Detected language"
    );
    Some(analysis)
}
