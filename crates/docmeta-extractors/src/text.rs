//! Plain text and Markdown extraction.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, FileKind};
use crate::Extractor;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Extractor for `.txt` and `.md` files.
#[derive(Debug, Clone, Default)]
pub struct TextExtractor {
    /// Treat the input as Markdown and collect `#` headings.
    markdown: bool,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self { markdown: false }
    }

    pub fn markdown() -> Self {
        Self { markdown: true }
    }

    /// Decode UTF-8 (BOM stripped) or BOM-marked UTF-16.
    pub fn decode(content: &[u8]) -> String {
        if let Some(rest) = content.strip_prefix(&UTF8_BOM) {
            return Self::decode_utf8(rest);
        }
        if let Some(rest) = content.strip_prefix(&[0xFF, 0xFE]) {
            return Self::decode_utf16(rest, u16::from_le_bytes);
        }
        if let Some(rest) = content.strip_prefix(&[0xFE, 0xFF]) {
            return Self::decode_utf16(rest, u16::from_be_bytes);
        }
        Self::decode_utf8(content)
    }

    fn decode_utf8(content: &[u8]) -> String {
        match std::str::from_utf8(content) {
            Ok(text) => text.to_string(),
            Err(e) => {
                warn!(
                    valid_up_to = e.valid_up_to(),
                    "Text is not valid UTF-8, replacing invalid sequences"
                );
                String::from_utf8_lossy(content).into_owned()
            }
        }
    }

    fn decode_utf16(content: &[u8], to_unit: fn([u8; 2]) -> u16) -> String {
        let units = content
            .chunks_exact(2)
            .map(|pair| to_unit([pair[0], pair[1]]));
        char::decode_utf16(units)
            .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect()
    }

    fn headings(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim_start)
            .filter(|line| line.starts_with('#'))
            .map(|line| line.trim_start_matches('#').trim().to_string())
            .filter(|heading| !heading.is_empty())
            .collect()
    }
}

#[async_trait]
impl Extractor for TextExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let text = Self::decode(content);

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        let kind = if self.markdown {
            FileKind::Markdown
        } else {
            FileKind::Text
        };

        let mut result = ExtractedContent::new(text, kind, self.name())
            .with_metadata("original_size", content.len());

        if self.markdown {
            let structure = DocumentStructure {
                page_count: None,
                sections: Self::headings(&result.text),
            };
            result = result.with_structure(structure);
        }

        Ok(result)
    }

    fn supported_kinds(&self) -> &[FileKind] {
        if self.markdown {
            &[FileKind::Markdown]
        } else {
            &[FileKind::Text]
        }
    }

    fn name(&self) -> &str {
        if self.markdown {
            "markdown"
        } else {
            "plain-text"
        }
    }
}
