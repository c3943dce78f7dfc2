//! Core types for detection and extraction.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raster formats accepted for OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Tiff,
    Bmp,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Tiff => "image/tiff",
            Self::Bmp => "image/bmp",
        }
    }
}

/// True type of an uploaded file, as decided by the document loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// PDF document.
    Pdf,
    /// Office Open XML word document.
    Docx,
    /// Legacy Word 97-2003 binary document.
    Doc,
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy Excel 97-2003 workbook.
    Xls,
    /// Plain text.
    Text,
    /// Markdown text.
    Markdown,
    /// Raster image, extracted through OCR.
    Image(ImageFormat),
}

/// Every file extension accepted at upload time (lowercase, without dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "docx", "doc", "txt", "md", "xlsx", "xls", "jpg", "jpeg", "png", "tiff", "tif", "bmp",
];

impl FileKind {
    /// Map a file extension (case-insensitive, with or without leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        let kind = match ext.as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "doc" => Self::Doc,
            "xlsx" => Self::Xlsx,
            "xls" => Self::Xls,
            "txt" => Self::Text,
            "md" => Self::Markdown,
            "jpg" | "jpeg" => Self::Image(ImageFormat::Jpeg),
            "png" => Self::Image(ImageFormat::Png),
            "tif" | "tiff" => Self::Image(ImageFormat::Tiff),
            "bmp" => Self::Image(ImageFormat::Bmp),
            _ => return None,
        };
        Some(kind)
    }

    /// Canonical extension reported in metadata.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Text => "txt",
            Self::Markdown => "md",
            Self::Image(format) => format.extension(),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Doc => "application/msword",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Xls => "application/vnd.ms-excel",
            Self::Text => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Image(format) => format.mime_type(),
        }
    }

    /// Whether the extension hint names the same family of file.
    ///
    /// `jpeg` and `jpg` (or `tif` and `tiff`) are the same kind, so this only
    /// compares the resolved kinds.
    pub fn matches_extension(&self, ext: &str) -> bool {
        Self::from_extension(ext).map(|k| k == *self).unwrap_or(false)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Document structure metadata (optional, for structured documents).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStructure {
    /// Total page count (for PDFs).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<usize>,

    /// Extracted headings, sheet names or sections.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub sections: Vec<String>,
}

/// Extracted content with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Extracted plain text.
    pub text: String,

    /// Kind of the source file.
    pub kind: FileKind,

    /// Name of the extractor that produced the text.
    pub method: String,

    /// Document structure (if preserved).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<DocumentStructure>,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedContent {
    /// Create new extracted content.
    pub fn new(text: String, kind: FileKind, method: impl Into<String>) -> Self {
        Self {
            text,
            kind,
            method: method.into(),
            structure: None,
            metadata: HashMap::new(),
        }
    }

    /// Add structure information.
    pub fn with_structure(mut self, structure: DocumentStructure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Add metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}
