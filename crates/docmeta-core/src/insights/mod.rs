//! AI-generated summary, key points and document type.

mod document_type;
mod parser;
mod prompts;

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use document_type::DocumentType;
pub use parser::parse_insights;
pub use prompts::{summary_user_prompt, SUMMARY_SYSTEM_PROMPT};

use crate::config::InsightsConfig;
use crate::error::{DocMetaError, DocMetaResult, ErrorCode};
use crate::traits::{GenerationOptions, Llm, ResponseFormat};
use crate::types::Message;

/// What the summarization provider said about a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentInsights {
    pub summary: String,
    pub key_points: Vec<String>,
    pub document_type: DocumentType,
}

/// Produces [`DocumentInsights`] through an [`Llm`].
pub struct SummaryGenerator {
    llm: Arc<dyn Llm>,
    config: InsightsConfig,
}

impl SummaryGenerator {
    pub fn new(llm: Arc<dyn Llm>, config: InsightsConfig) -> Self {
        Self { llm, config }
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Summarize `text`. Provider failures are returned, never retried.
    pub async fn generate(&self, text: &str) -> DocMetaResult<DocumentInsights> {
        if text.trim().is_empty() {
            return Err(DocMetaError::validation("cannot summarize empty text"));
        }

        let input = truncate_chars(text, self.config.max_input_chars);
        if input.len() < text.len() {
            debug!(
                original_chars = text.chars().count(),
                sent_chars = self.config.max_input_chars,
                "Truncated document text for summarization"
            );
        }

        let messages = vec![
            Message::system(SUMMARY_SYSTEM_PROMPT),
            Message::user(summary_user_prompt(input, self.config.max_key_points)),
        ];
        let options = GenerationOptions {
            temperature: Some(0.2),
            response_format: self
                .llm
                .supports_json_mode()
                .then_some(ResponseFormat::Json),
            ..Default::default()
        };

        let start = Instant::now();
        let response = self.llm.generate(&messages, Some(options)).await?;
        let reply = response.content_or_empty();
        if reply.trim().is_empty() {
            return Err(DocMetaError::Llm {
                message: "provider returned an empty reply".to_string(),
                code: ErrorCode::LlmInvalidResponse,
                source: None,
            });
        }

        let insights = parse_insights(reply, self.config.max_key_points);
        info!(
            model = self.llm.model_name(),
            document_type = %insights.document_type,
            key_points = insights.key_points.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generated document insights"
        );
        Ok(insights)
    }
}

/// At most `max_chars` characters, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{LlmResponse, MockLlm};
    use crate::types::MessageRole;

    fn config() -> InsightsConfig {
        InsightsConfig {
            enabled: true,
            max_input_chars: 40,
            max_key_points: 2,
        }
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[tokio::test]
    async fn test_generate_parses_reply() {
        let mut llm = MockLlm::new();
        llm.expect_supports_json_mode().return_const(true);
        llm.expect_model_name().return_const("mock-model".to_string());
        llm.expect_generate()
            .withf(|messages, options| {
                messages.len() == 2
                    && messages[0].role == MessageRole::System
                    && messages[1].content.contains("Contract between")
                    && options
                        .as_ref()
                        .and_then(|o| o.response_format.clone())
                        == Some(ResponseFormat::Json)
            })
            .times(1)
            .returning(|_, _| {
                Ok(LlmResponse::text(
                    r#"{"summary": "A services contract.", "key_points": ["One", "Two", "Three"], "document_type": "Contract"}"#,
                ))
            });

        let generator = SummaryGenerator::new(Arc::new(llm), config());
        let insights = generator
            .generate("Contract between Acme and Initech.")
            .await
            .unwrap();

        assert_eq!(insights.summary, "A services contract.");
        assert_eq!(insights.key_points, vec!["One".to_string(), "Two".to_string()]);
        assert_eq!(insights.document_type, DocumentType::Contract);
    }

    #[tokio::test]
    async fn test_generate_truncates_input() {
        let mut llm = MockLlm::new();
        llm.expect_supports_json_mode().return_const(false);
        llm.expect_model_name().return_const("mock-model".to_string());
        llm.expect_generate()
            .withf(|messages, options| {
                let prompt = &messages[1].content;
                prompt.contains(&"a".repeat(40))
                    && !prompt.contains(&"a".repeat(41))
                    && options.as_ref().map(|o| o.response_format.is_none()) == Some(true)
            })
            .returning(|_, _| Ok(LlmResponse::text("Just prose.")));

        let generator = SummaryGenerator::new(Arc::new(llm), config());
        let insights = generator.generate(&"a".repeat(100)).await.unwrap();
        assert_eq!(insights.summary, "Just prose.");
        assert_eq!(insights.document_type, DocumentType::Other);
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut llm = MockLlm::new();
        llm.expect_supports_json_mode().return_const(true);
        llm.expect_generate()
            .times(1)
            .returning(|_, _| Err(DocMetaError::llm_connection("connection refused")));

        let generator = SummaryGenerator::new(Arc::new(llm), config());
        let err = generator.generate("Some document text here.").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::LlmConnectionFailed);
    }

    #[tokio::test]
    async fn test_empty_reply_is_error() {
        let mut llm = MockLlm::new();
        llm.expect_supports_json_mode().return_const(true);
        llm.expect_generate()
            .returning(|_, _| Ok(LlmResponse::default()));

        let generator = SummaryGenerator::new(Arc::new(llm), config());
        let err = generator.generate("Some document text here.").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::LlmInvalidResponse);
    }

    #[tokio::test]
    async fn test_blank_text_rejected_without_calling_provider() {
        let llm = MockLlm::new();
        let generator = SummaryGenerator::new(Arc::new(llm), config());
        assert!(generator.generate("   ").await.is_err());
    }
}
