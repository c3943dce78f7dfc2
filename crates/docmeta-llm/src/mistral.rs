//! Mistral AI chat completions provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use docmeta_core::error::{DocMetaError, DocMetaResult};
use docmeta_core::traits::{
    GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat, TokenUsage,
};
use docmeta_core::types::Message;

const MISTRAL_API_URL: &str = "https://api.mistral.ai/v1";
const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Mistral LLM provider.
pub struct MistralLlm {
    client: Client,
    config: LlmConfig,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormatBody {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct MistralError {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl MistralError {
    fn into_message(self) -> Option<String> {
        self.message.or(self.detail).map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

impl MistralLlm {
    /// Create a new Mistral LLM provider.
    pub fn new(config: LlmConfig) -> DocMetaResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("MISTRAL_API_KEY").ok().map(SecretString::new))
            .ok_or_else(|| {
                DocMetaError::Configuration("Mistral API key not found. Set MISTRAL_API_KEY environment variable or provide api_key in config.".to_string())
            })?;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::AUTHORIZATION,
            format!("Bearer {}", api_key.expose_secret())
                .parse()
                .map_err(|_| DocMetaError::Configuration("Invalid API key format".to_string()))?,
        );
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            "application/json"
                .parse()
                .map_err(|_| DocMetaError::Configuration("Invalid content type".to_string()))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DocMetaError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        let base_url = config.base_url.as_deref().unwrap_or(MISTRAL_API_URL);
        Url::parse(base_url).map_err(|e| {
            DocMetaError::Configuration(format!("Invalid Mistral base URL '{}': {}", base_url, e))
        })?;
        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));

        let mut config = config;
        if config.model.is_empty() {
            config.model = DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }
}

#[async_trait]
impl Llm for MistralLlm {
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> DocMetaResult<LlmResponse> {
        let options = options.unwrap_or_default();

        let request = ChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| ChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: options.temperature.unwrap_or(self.config.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            top_p: options.top_p.unwrap_or(self.config.top_p),
            response_format: match options.response_format {
                Some(ResponseFormat::Json) => Some(ResponseFormatBody {
                    format_type: "json_object",
                }),
                _ => None,
            },
        };

        debug!(model = %self.config.model, messages = messages.len(), "Sending Mistral request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                DocMetaError::llm_connection(format!("Mistral API request failed: {}", e))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DocMetaError::llm(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<MistralError>(&body)
                .ok()
                .and_then(MistralError::into_message)
                .unwrap_or_else(|| body.clone());
            return Err(DocMetaError::from_http_status(
                status.as_u16(),
                &format!("Mistral API error ({}): {}", status, message),
            ));
        }

        let response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| DocMetaError::llm(format!("Failed to parse response: {}", e)))?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DocMetaError::llm("No response choices returned"))?
            .message
            .content;

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    fn supports_json_mode(&self) -> bool {
        true
    }
}
