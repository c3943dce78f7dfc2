//! Prompt templates for summary generation.

use super::DocumentType;

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are a document analyst. You read a document \
and describe it for a metadata catalogue. You always answer with a single JSON object and \
nothing else.";

/// Build the user prompt for one document.
pub fn summary_user_prompt(text: &str, max_key_points: usize) -> String {
    let types = DocumentType::labels().join(", ");
    format!(
        r#"Analyze the document below and respond with JSON in exactly this shape:

{{
  "summary": "two to four sentences describing what the document is about",
  "key_points": ["up to {max_key_points} short key points"],
  "document_type": "one of: {types}"
}}

Rules:
- Write the summary and key points in the same language as the document.
- Use "Other" when no document type fits.
- Do not invent facts that are not in the document.

Document:
"""
{text}
""""#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_contents() {
        let prompt = summary_user_prompt("Invoice #42 for consulting.", 3);
        assert!(prompt.contains("Invoice #42 for consulting."));
        assert!(prompt.contains("up to 3 short key points"));
        assert!(prompt.contains("Research Paper"));
        assert!(prompt.contains("\"document_type\""));
    }
}
