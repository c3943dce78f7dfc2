//! True file type detection from magic bytes.
//!
//! The declared extension is only a hint: signatures found in the content
//! win, and a mismatch is logged. Two containers need the hint or a peek
//! inside to be told apart:
//!
//! - OLE compound files hold both `.doc` and `.xls`;
//! - ZIP archives hold both `.docx` and `.xlsx`.

use tracing::{debug, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::types::{FileKind, ImageFormat};

/// OLE2 compound file signature.
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// ZIP local file header signature.
const ZIP_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Signatures trusted over a text extension when the content decodes as text.
const STRONG_SIGNATURES: &[&str] = &["application/pdf", "image/png", "image/jpeg"];

/// How many leading bytes are inspected when deciding whether content is text.
const TEXT_SNIFF_LEN: usize = 8192;

/// Detect the true type of `content`, using `extension` as a tie-breaker.
pub fn detect_file_type(content: &[u8], extension: Option<&str>) -> ExtractResult<FileKind> {
    if content.is_empty() {
        return Err(ExtractError::EmptyContent);
    }

    let hint = extension.and_then(FileKind::from_extension);
    let detected = sniff(content, hint)?;

    if let Some(ext) = extension {
        if !detected.matches_extension(ext) {
            warn!(
                extension = ext,
                detected = %detected,
                "Declared extension does not match file content, using detected type"
            );
        }
    }

    debug!(kind = %detected, bytes = content.len(), "Detected file type");
    Ok(detected)
}

fn sniff(content: &[u8], hint: Option<FileKind>) -> ExtractResult<FileKind> {
    if content.starts_with(&OLE_SIGNATURE) {
        return Ok(match hint {
            Some(FileKind::Xls) => FileKind::Xls,
            Some(FileKind::Doc) => FileKind::Doc,
            _ => match infer::get(content).map(|t| t.mime_type()) {
                Some("application/vnd.ms-excel") => FileKind::Xls,
                _ => FileKind::Doc,
            },
        });
    }

    if content.starts_with(&ZIP_SIGNATURE) {
        return sniff_ooxml(content, hint);
    }

    let text_hinted =
        matches!(hint, Some(FileKind::Text | FileKind::Markdown)) && looks_like_text(content);

    if let Some(kind) = infer::get(content) {
        let mime = kind.mime_type();
        // Short signatures such as "BM", "MZ" or "ID3" also start ordinary prose.
        if text_hinted && !STRONG_SIGNATURES.contains(&mime) {
            return Ok(text_kind(hint));
        }
        let detected = match mime {
            "application/pdf" => FileKind::Pdf,
            "image/jpeg" => FileKind::Image(ImageFormat::Jpeg),
            "image/png" => FileKind::Image(ImageFormat::Png),
            "image/tiff" => FileKind::Image(ImageFormat::Tiff),
            "image/bmp" => FileKind::Image(ImageFormat::Bmp),
            m if m.starts_with("text/") => text_kind(hint),
            other => return Err(ExtractError::UnsupportedType(other.to_string())),
        };
        return Ok(detected);
    }

    if looks_like_text(content) {
        return Ok(text_kind(hint));
    }

    Err(ExtractError::UnsupportedType(
        "unrecognised binary content".to_string(),
    ))
}

/// Tell DOCX from XLSX by the part names stored in the ZIP local headers.
fn sniff_ooxml(content: &[u8], hint: Option<FileKind>) -> ExtractResult<FileKind> {
    match infer::get(content).map(|t| t.mime_type()) {
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
            return Ok(FileKind::Docx)
        }
        Some("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet") => {
            return Ok(FileKind::Xlsx)
        }
        _ => {}
    }

    if contains(content, b"word/") {
        return Ok(FileKind::Docx);
    }
    if contains(content, b"xl/") {
        return Ok(FileKind::Xlsx);
    }

    match hint {
        Some(kind @ (FileKind::Docx | FileKind::Xlsx)) => Ok(kind),
        _ => Err(ExtractError::UnsupportedType("application/zip".to_string())),
    }
}

fn text_kind(hint: Option<FileKind>) -> FileKind {
    match hint {
        Some(FileKind::Markdown) => FileKind::Markdown,
        _ => FileKind::Text,
    }
}

/// UTF-8 (or UTF-16 with BOM) content without NUL bytes is treated as text.
fn looks_like_text(content: &[u8]) -> bool {
    if content.starts_with(&[0xFF, 0xFE]) || content.starts_with(&[0xFE, 0xFF]) {
        return true;
    }

    let head = &content[..content.len().min(TEXT_SNIFF_LEN)];
    if head.contains(&0) {
        return false;
    }

    match std::str::from_utf8(head) {
        Ok(_) => true,
        // A multi-byte sequence cut at the sniff boundary is still text.
        Err(e) => e.error_len().is_none() && e.valid_up_to() + 4 > head.len(),
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
