//! Metadata record assembly and the end-to-end document pipeline.

mod builder;
mod processor;

pub use builder::MetadataBuilder;
pub use processor::DocumentProcessor;
