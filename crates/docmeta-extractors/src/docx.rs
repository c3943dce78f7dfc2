//! DOCX content extraction using docx-rs.
//!
//! Extracts text from DOCX files including paragraphs, tables, and
//! headings.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, FileKind};
use crate::Extractor;
use async_trait::async_trait;
use docx_rs::{DocumentChild, ParagraphChild, RunChild, TableChild, TableRowChild};

/// DOCX content extractor using docx-rs library.
///
/// Wraps synchronous docx-rs calls in spawn_blocking to avoid blocking
/// the async runtime.
#[derive(Debug, Clone)]
pub struct DocxExtractor {
    /// Whether to render tables as `cell | cell` rows.
    preserve_tables: bool,
    /// Whether to record headings as sections.
    extract_headings: bool,
}

impl DocxExtractor {
    /// Create new DOCX extractor with default settings.
    pub fn new() -> Self {
        Self {
            preserve_tables: true,
            extract_headings: true,
        }
    }

    /// Configure whether to preserve table structure.
    pub fn with_tables(mut self, preserve: bool) -> Self {
        self.preserve_tables = preserve;
        self
    }

    /// Configure whether to extract headings as sections.
    pub fn with_headings(mut self, extract: bool) -> Self {
        self.extract_headings = extract;
        self
    }

    /// Extract text synchronously (called within spawn_blocking).
    fn extract_sync(
        content: Vec<u8>,
        preserve_tables: bool,
        extract_headings: bool,
    ) -> ExtractResult<(String, Vec<String>)> {
        let docx = docx_rs::read_docx(&content)
            .map_err(|e| ExtractError::Docx(format!("Failed to parse DOCX: {}", e)))?;

        let mut paragraphs: Vec<String> = Vec::new();
        let mut headings: Vec<String> = Vec::new();

        for child in docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => {
                    let para_text = Self::paragraph_text(&p);
                    let trimmed = para_text.trim();

                    if extract_headings && !trimmed.is_empty() {
                        if let Some(style) = &p.property.style {
                            let style_id = style.val.to_lowercase();
                            if style_id.starts_with("heading") || style_id.contains("title") {
                                headings.push(trimmed.to_string());
                            }
                        }
                    }

                    if !trimmed.is_empty() {
                        paragraphs.push(para_text);
                    }
                }
                DocumentChild::Table(t) => {
                    if preserve_tables {
                        let table_text = Self::table_text(&t);
                        if !table_text.trim().is_empty() {
                            paragraphs.push(table_text);
                        }
                    } else {
                        for row in &t.rows {
                            let TableChild::TableRow(r) = row;
                            for cell in &r.cells {
                                let TableRowChild::TableCell(c) = cell;
                                for child in &c.children {
                                    if let docx_rs::TableCellContent::Paragraph(p) = child {
                                        let cell_text = Self::paragraph_text(p);
                                        if !cell_text.trim().is_empty() {
                                            paragraphs.push(cell_text);
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // Blank line between paragraphs keeps paragraph counts meaningful downstream.
        Ok((paragraphs.join("\n\n"), headings))
    }

    fn paragraph_text(p: &docx_rs::Paragraph) -> String {
        let mut text = String::new();

        for child in &p.children {
            match child {
                ParagraphChild::Run(r) => {
                    for run_child in &r.children {
                        match run_child {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push('\t'),
                            RunChild::Break(_) => text.push('\n'),
                            _ => {}
                        }
                    }
                }
                ParagraphChild::Hyperlink(h) => {
                    for child in &h.children {
                        if let ParagraphChild::Run(r) = child {
                            for run_child in &r.children {
                                if let RunChild::Text(t) = run_child {
                                    text.push_str(&t.text);
                                }
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        text
    }

    fn table_text(t: &docx_rs::Table) -> String {
        let mut rows: Vec<String> = Vec::new();

        for row in &t.rows {
            let TableChild::TableRow(r) = row;
            let mut cells: Vec<String> = Vec::new();
            for cell in &r.cells {
                let TableRowChild::TableCell(c) = cell;
                let mut cell_text = String::new();
                for child in &c.children {
                    if let docx_rs::TableCellContent::Paragraph(p) = child {
                        let para = Self::paragraph_text(p);
                        if !cell_text.is_empty() && !para.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&para);
                    }
                }
                cells.push(cell_text.trim().to_string());
            }
            rows.push(cells.join(" | "));
        }

        rows.join("\n")
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for DocxExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let preserve_tables = self.preserve_tables;
        let extract_headings = self.extract_headings;

        let (text, headings) = tokio::task::spawn_blocking(move || {
            Self::extract_sync(content, preserve_tables, extract_headings)
        })
        .await??;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        let structure = DocumentStructure {
            page_count: None,
            sections: headings,
        };

        Ok(ExtractedContent::new(text, FileKind::Docx, self.name())
            .with_structure(structure)
            .with_metadata("original_size", content_len))
    }

    fn supported_kinds(&self) -> &[FileKind] {
        &[FileKind::Docx]
    }

    fn name(&self) -> &str {
        "docx-rs"
    }
}
