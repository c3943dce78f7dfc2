//! JSON export of metadata records.
//!
//! # Example
//!
//! ```ignore
//! use docmeta_core::export::{export_file_name, write_json};
//! use tokio::fs::File;
//!
//! let file = File::create(export_file_name(&record.file_name)).await?;
//! write_json(&record, file).await?;
//! ```

mod json;

pub use json::{export_file_name, export_json, parse_json, write_json, write_json_file};
