use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Kind of document, as classified by the summarization provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum DocumentType {
    Report,
    #[strum(serialize = "Research Paper")]
    #[serde(rename = "Research Paper")]
    ResearchPaper,
    Article,
    Letter,
    Email,
    Invoice,
    Contract,
    Resume,
    Manual,
    Presentation,
    Spreadsheet,
    Form,
    Notes,
    #[strum(serialize = "Legal Document")]
    #[serde(rename = "Legal Document")]
    LegalDocument,
    #[strum(serialize = "Financial Statement")]
    #[serde(rename = "Financial Statement")]
    FinancialStatement,
    #[default]
    Other,
}

impl DocumentType {
    /// Parse whatever the provider returned. Unknown labels become `Other`.
    pub fn parse_lenient(label: &str) -> Self {
        let cleaned = label
            .trim()
            .trim_matches(|c: char| c == '"' || c == '.' || c == '\'')
            .replace(['_', '-'], " ");
        let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
        cleaned.parse().unwrap_or(Self::Other)
    }

    /// Every label, for prompting.
    pub fn labels() -> Vec<String> {
        Self::iter().map(|t| t.to_string()).collect()
    }
}
