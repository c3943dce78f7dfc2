//! Core types for docmeta.

mod message;
mod record;

pub use message::*;
pub use record::*;
