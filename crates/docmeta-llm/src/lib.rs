//! docmeta-llm - summarization providers for docmeta.
//!
//! # Supported Providers
//!
//! - **Mistral** - `mistral-small-latest` by default, called over plain HTTP
//! - **OpenAI** (feature: `openai`) - GPT-4o and friends via `async-openai`
//!
//! # Example
//!
//! ```ignore
//! use docmeta_llm::LlmFactory;
//!
//! // Reads MISTRAL_API_KEY from the environment
//! let llm = LlmFactory::mistral()?;
//!
//! // Or whatever the loaded config names
//! let llm = LlmFactory::from_config(&config.llm)?;
//! ```

mod factory;
mod mistral;
mod openai;

pub use factory::LlmFactory;
pub use mistral::MistralLlm;
pub use openai::OpenAIProvider;

// Re-export core types for convenience
pub use docmeta_core::config::LlmProvider;
pub use docmeta_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
