//! Tolerant parsing of summarization replies.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::{DocumentInsights, DocumentType};

static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[a-zA-Z0-9]*\s*([\s\S]*?)\s*```").expect("valid regex"));
static THINK_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<think>.*?</think>").expect("valid regex"));
static LIST_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+(.+?)\s*$").expect("valid regex"));

#[derive(Debug, Deserialize)]
struct RawInsights {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    key_points: Vec<String>,
    #[serde(default)]
    document_type: Option<String>,
}

/// Remove reasoning tags and unwrap a fenced block if present.
pub fn strip_wrappers(reply: &str) -> String {
    let without_think = THINK_TAGS.replace_all(reply, "");
    let trimmed = without_think.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => trimmed.to_string(),
    }
}

/// The outermost `{...}` span, if any.
pub fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a reply into insights, falling back to plain text when it is not JSON.
pub fn parse_insights(reply: &str, max_key_points: usize) -> DocumentInsights {
    let cleaned = strip_wrappers(reply);

    let parsed = outermost_object(&cleaned)
        .and_then(|json| serde_json::from_str::<RawInsights>(json).ok())
        .filter(|raw| !raw.summary.trim().is_empty() || !raw.key_points.is_empty());

    let mut insights = match parsed {
        Some(raw) => DocumentInsights {
            summary: raw.summary.trim().to_string(),
            key_points: raw.key_points,
            document_type: raw
                .document_type
                .as_deref()
                .map(DocumentType::parse_lenient)
                .unwrap_or_default(),
        },
        None => {
            debug!("Summary reply is not JSON, using it as plain text");
            fallback(&cleaned)
        }
    };

    insights.key_points = insights
        .key_points
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .take(max_key_points)
        .collect();
    insights
}

fn fallback(text: &str) -> DocumentInsights {
    let key_points = text
        .lines()
        .filter_map(|line| LIST_ITEM.captures(line))
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect();

    DocumentInsights {
        summary: text.trim().to_string(),
        key_points,
        document_type: DocumentType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let reply = r#"{"summary": "An invoice for consulting.", "key_points": ["Total 1200 EUR", "Due in 30 days"], "document_type": "invoice"}"#;
        let insights = parse_insights(reply, 5);
        assert_eq!(insights.summary, "An invoice for consulting.");
        assert_eq!(insights.key_points.len(), 2);
        assert_eq!(insights.document_type, DocumentType::Invoice);
    }

    #[test]
    fn test_fenced_json_with_preamble() {
        let reply = "Here is the analysis:\n```json\n{\"summary\": \"A lab report.\", \"key_points\": [], \"document_type\": \"Report\"}\n```";
        let insights = parse_insights(reply, 5);
        assert_eq!(insights.summary, "A lab report.");
        assert_eq!(insights.document_type, DocumentType::Report);
    }

    #[test]
    fn test_json_surrounded_by_prose() {
        let reply = "Sure! {\"summary\": \"Meeting notes.\", \"document_type\": \"Notes\"} Hope it helps.";
        let insights = parse_insights(reply, 5);
        assert_eq!(insights.summary, "Meeting notes.");
        assert!(insights.key_points.is_empty());
        assert_eq!(insights.document_type, DocumentType::Notes);
    }

    #[test]
    fn test_think_tags_removed() {
        let reply = "<think>\nLet me look {at} this.\n</think>\n{\"summary\": \"A letter.\", \"document_type\": \"Letter\"}";
        let insights = parse_insights(reply, 5);
        assert_eq!(insights.summary, "A letter.");
        assert_eq!(insights.document_type, DocumentType::Letter);
    }

    #[test]
    fn test_key_points_trimmed_and_capped() {
        let reply = r#"{"summary": "s", "key_points": [" a ", "", "b", "c", "d"], "document_type": "Unknown"}"#;
        let insights = parse_insights(reply, 2);
        assert_eq!(insights.key_points, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(insights.document_type, DocumentType::Other);
    }

    #[test]
    fn test_plain_text_fallback() {
        let reply = "This document describes the onboarding process.\n\n- Accounts are created on day one\n2. Training follows in week two\n* Equipment is shipped in advance";
        let insights = parse_insights(reply, 5);
        assert!(insights.summary.starts_with("This document describes"));
        assert_eq!(
            insights.key_points,
            vec![
                "Accounts are created on day one".to_string(),
                "Training follows in week two".to_string(),
                "Equipment is shipped in advance".to_string(),
            ]
        );
        assert_eq!(insights.document_type, DocumentType::Other);
    }

    #[test]
    fn test_outermost_object() {
        assert_eq!(outermost_object("x {\"a\": {\"b\": 1}} y"), Some("{\"a\": {\"b\": 1}}"));
        assert_eq!(outermost_object("no json"), None);
        assert_eq!(outermost_object("} {"), None);
    }
}
