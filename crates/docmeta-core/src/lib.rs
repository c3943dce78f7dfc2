//! docmeta-core - Core library for docmeta.
//!
//! This crate provides configuration, the error hierarchy, the metadata
//! record and every analysis stage that turns an uploaded document into
//! a [`MetadataRecord`].
//!
//! # Example
//!
//! ```ignore
//! use docmeta_core::{DocMetaConfig, DocumentProcessor};
//!
//! let config = DocMetaConfig::load()?;
//! let processor = DocumentProcessor::with_defaults(config, Some(llm));
//!
//! let record = processor.process("report.pdf", bytes).await?;
//! println!("{}", docmeta_core::export::export_json(&record)?);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod insights;
pub mod language;
pub mod metadata;
pub mod traits;
pub mod types;
pub mod upload;

// Re-export commonly used types
pub use analysis::{analyze_text, clean_text, is_text_meaningful, TextAnalysis};
pub use config::{
    AnalysisConfig, DocMetaConfig, InsightsConfig, LlmProvider, LlmProviderConfig, ServerConfig,
    UploadConfig,
};
pub use error::{DocMetaError, DocMetaResult, ErrorCode};
pub use insights::{DocumentInsights, DocumentType, SummaryGenerator};
pub use language::{detect_language, LanguageAnalysis};
pub use metadata::{DocumentProcessor, MetadataBuilder};
pub use traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, ResponseFormat};
pub use types::{Message, MessageRole, MetadataRecord, WordCount};
pub use upload::{format_file_size, FileValidator, StagedUpload};
