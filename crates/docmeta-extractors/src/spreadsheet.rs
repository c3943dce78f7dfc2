//! XLSX / XLS extraction using calamine.
//!
//! Every sheet is rendered as a `=== Sheet: name ===` header followed by its
//! non-empty rows, cells joined with ` | `.

use std::io::{Cursor, Read, Seek};

use async_trait::async_trait;
use calamine::{Reader, Xls, Xlsx};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{DocumentStructure, ExtractedContent, FileKind};
use crate::Extractor;

const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Spreadsheet extractor for both OOXML and legacy workbooks.
#[derive(Debug, Clone, Default)]
pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_sync(content: Vec<u8>) -> ExtractResult<(String, Vec<String>, FileKind)> {
        if content.starts_with(&ZIP_SIGNATURE) {
            let mut workbook = Xlsx::new(Cursor::new(content))
                .map_err(|e| ExtractError::Spreadsheet(format!("Failed to open XLSX: {}", e)))?;
            let (text, sheets) = render_workbook(&mut workbook);
            Ok((text, sheets, FileKind::Xlsx))
        } else {
            let mut workbook = Xls::new(Cursor::new(content))
                .map_err(|e| ExtractError::Spreadsheet(format!("Failed to open XLS: {}", e)))?;
            let (text, sheets) = render_workbook(&mut workbook);
            Ok((text, sheets, FileKind::Xls))
        }
    }
}

fn render_workbook<RS, R>(workbook: &mut R) -> (String, Vec<String>)
where
    RS: Read + Seek,
    R: Reader<RS>,
{
    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut blocks: Vec<String> = Vec::new();

    for sheet_name in &sheet_names {
        let range = match workbook.worksheet_range(sheet_name) {
            Ok(range) => range,
            Err(e) => {
                debug!(sheet = %sheet_name, error = ?e, "Skipping unreadable sheet");
                continue;
            }
        };

        let rows: Vec<String> = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string())
                    .filter(|s| !s.trim().is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .map(|cells| cells.join(" | "))
            .collect();

        if !rows.is_empty() {
            blocks.push(format!("=== Sheet: {} ===\n{}", sheet_name, rows.join("\n")));
        }
    }

    (blocks.join("\n\n"), sheet_names)
}

#[async_trait]
impl Extractor for SpreadsheetExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();

        let (text, sheets, kind) =
            tokio::task::spawn_blocking(move || Self::extract_sync(content)).await??;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        let sheet_count = sheets.len();
        let structure = DocumentStructure {
            page_count: None,
            sections: sheets,
        };

        Ok(ExtractedContent::new(text, kind, self.name())
            .with_structure(structure)
            .with_metadata("original_size", content_len)
            .with_metadata("sheet_count", sheet_count))
    }

    fn supported_kinds(&self) -> &[FileKind] {
        &[FileKind::Xlsx, FileKind::Xls]
    }

    fn name(&self) -> &str {
        "calamine"
    }
}
