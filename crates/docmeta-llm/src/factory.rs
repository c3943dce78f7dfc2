//! Factory for creating LLM providers.

use std::sync::Arc;

use docmeta_core::config::{LlmProvider, LlmProviderConfig};
use docmeta_core::error::DocMetaResult;
use docmeta_core::traits::{Llm, LlmConfig};

use crate::mistral::MistralLlm;
use crate::openai::OpenAIProvider;

/// Factory for creating LLM providers.
pub struct LlmFactory;

impl LlmFactory {
    /// Create an LLM provider from the given configuration.
    pub fn create(provider: LlmProvider, config: LlmConfig) -> DocMetaResult<Arc<dyn Llm>> {
        match provider {
            LlmProvider::Mistral => Ok(Arc::new(MistralLlm::new(config)?)),
            LlmProvider::OpenAI => Ok(Arc::new(OpenAIProvider::new(config)?)),
        }
    }

    /// Create the provider named in the application config.
    pub fn from_config(config: &LlmProviderConfig) -> DocMetaResult<Arc<dyn Llm>> {
        Self::create(config.provider, config.config.clone())
    }

    /// Create a Mistral provider with default configuration.
    pub fn mistral() -> DocMetaResult<Arc<dyn Llm>> {
        Self::mistral_with_model(LlmProvider::Mistral.default_model())
    }

    /// Create a Mistral provider with a specific model.
    pub fn mistral_with_model(model: impl Into<String>) -> DocMetaResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::Mistral, config)
    }

    /// Create an OpenAI provider with default configuration.
    pub fn openai() -> DocMetaResult<Arc<dyn Llm>> {
        Self::openai_with_model(LlmProvider::OpenAI.default_model())
    }

    /// Create an OpenAI provider with a specific model.
    pub fn openai_with_model(model: impl Into<String>) -> DocMetaResult<Arc<dyn Llm>> {
        let config = LlmConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(LlmProvider::OpenAI, config)
    }
}
