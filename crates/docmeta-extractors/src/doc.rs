//! Best-effort text recovery for legacy Word (.doc) files.
//!
//! There is no maintained pure-Rust parser for the Word 97-2003 binary
//! format, so this recovers printable runs from the compound file instead.
//! Word stores body text either as UTF-16LE or as 8-bit code page text;
//! both encodings are scanned and short runs (stream names, formatting
//! residue) are dropped.

use std::collections::HashSet;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FileKind};
use crate::Extractor;
use async_trait::async_trait;

const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Compound-file plumbing that shows up as printable text in every file.
const CONTAINER_NOISE: &[&str] = &[
    "Root Entry",
    "WordDocument",
    "SummaryInformation",
    "DocumentSummaryInformation",
    "CompObj",
    "1Table",
    "0Table",
    "Microsoft Word",
    "MSWordDoc",
    "Word.Document.8",
];

/// Legacy Word extractor.
#[derive(Debug, Clone)]
pub struct DocExtractor {
    /// Shortest run of printable characters kept as text.
    min_run_length: usize,
}

impl DocExtractor {
    pub fn new() -> Self {
        Self { min_run_length: 4 }
    }

    pub fn with_min_run_length(min_run_length: usize) -> Self {
        Self {
            min_run_length: min_run_length.max(1),
        }
    }

    fn recover_text(content: &[u8], min_run: usize) -> ExtractResult<String> {
        if !content.starts_with(&OLE_SIGNATURE) {
            return Err(ExtractError::Doc(
                "Not a Word 97-2003 compound document".to_string(),
            ));
        }

        let body = &content[OLE_SIGNATURE.len()..];
        let mut runs = utf16_runs(body, min_run);
        runs.extend(ansi_runs(body, min_run));

        let mut seen = HashSet::new();
        let lines: Vec<String> = runs
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| r.chars().count() >= min_run)
            .filter(|r| is_prose(r))
            .filter(|r| !CONTAINER_NOISE.iter().any(|n| r.contains(n)))
            .filter(|r| seen.insert(r.clone()))
            .collect();

        Ok(lines.join("\n"))
    }
}

impl Default for DocExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~') || c == '\t' || (c as u32 >= 0xA0 && !c.is_control())
}

/// Mostly letters and spaces: filters binary tables that happen to decode.
fn is_prose(run: &str) -> bool {
    let total = run.chars().count();
    let wordish = run
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .count();
    run.chars().any(char::is_alphabetic) && wordish * 10 >= total * 7
}

fn utf16_runs(bytes: &[u8], min_run: usize) -> Vec<String> {
    let mut runs = Vec::new();

    // Text may start on either byte parity.
    for start in 0..2 {
        let mut current = String::new();
        for pair in bytes[start..].chunks_exact(2) {
            let unit = u16::from_le_bytes([pair[0], pair[1]]);
            // ASCII read at the wrong parity lands in the high byte.
            let misaligned = unit & 0x00FF == 0 && unit >> 8 >= 0x20;
            match char::from_u32(unit as u32).filter(|_| !misaligned) {
                Some(c) if unit >= 0x20 && is_printable(c) => current.push(c),
                Some('\r') | Some('\n') if !current.is_empty() => {
                    runs.push(std::mem::take(&mut current));
                }
                _ => {
                    if current.chars().count() >= min_run {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
        }
        if current.chars().count() >= min_run {
            runs.push(current);
        }
    }

    runs
}

fn ansi_runs(bytes: &[u8], min_run: usize) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current = String::new();

    for &b in bytes {
        let c = b as char;
        if (0x20..0x7F).contains(&b) || b == b'\t' {
            current.push(c);
        } else if current.chars().count() >= min_run {
            runs.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
    }
    if current.chars().count() >= min_run {
        runs.push(current);
    }

    runs
}

#[async_trait]
impl Extractor for DocExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let min_run = self.min_run_length;

        let text =
            tokio::task::spawn_blocking(move || Self::recover_text(&content, min_run)).await??;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        Ok(ExtractedContent::new(text, FileKind::Doc, self.name())
            .with_metadata("original_size", content_len)
            .with_metadata("best_effort", true))
    }

    fn supported_kinds(&self) -> &[FileKind] {
        &[FileKind::Doc]
    }

    fn name(&self) -> &str {
        "doc-text-runs"
    }
}
