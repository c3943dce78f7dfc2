//! Core traits for docmeta providers.

mod llm;

pub use llm::*;
