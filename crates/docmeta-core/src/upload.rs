//! Upload validation and staging.
//!
//! An upload is checked against the supported extension list and the size
//! limit before a single byte is written. Accepted uploads are staged in a
//! named temp file that is removed when the [`StagedUpload`] is dropped.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use docmeta_extractors::SUPPORTED_EXTENSIONS;

use crate::config::UploadConfig;
use crate::error::{DocMetaError, DocMetaResult};

/// Checks uploads before they are accepted.
#[derive(Debug, Clone)]
pub struct FileValidator {
    max_file_size_bytes: u64,
    extensions: Vec<&'static str>,
}

impl FileValidator {
    /// Validator accepting every extension docmeta knows about.
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_file_size_bytes: config.max_file_size_bytes(),
            extensions: SUPPORTED_EXTENSIONS.to_vec(),
        }
    }

    /// Narrow the accepted extensions, e.g. to what a pipeline can extract.
    pub fn with_extensions(mut self, extensions: Vec<&'static str>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn extensions(&self) -> &[&'static str] {
        &self.extensions
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Validate name and size, returning the lowercase extension.
    pub fn validate(&self, file_name: &str, size: u64) -> DocMetaResult<String> {
        let name = base_name(file_name);
        if name.is_empty() {
            return Err(DocMetaError::validation_with_suggestion(
                "file name is empty",
                "Please upload a named file",
            ));
        }

        let extension = extension_of(name).ok_or_else(|| DocMetaError::unsupported_file_type(""))?;
        if !self.extensions.contains(&extension.as_str()) {
            return Err(DocMetaError::unsupported_file_type(extension));
        }

        if size == 0 {
            return Err(DocMetaError::empty_file(name));
        }
        if size > self.max_file_size_bytes {
            return Err(DocMetaError::file_too_large(size, self.max_file_size_bytes));
        }

        Ok(extension)
    }
}

/// An accepted upload written to a temp file.
#[derive(Debug)]
pub struct StagedUpload {
    file_name: String,
    extension: String,
    size: u64,
    file: NamedTempFile,
}

impl StagedUpload {
    /// Validate the upload and write it to a temp file.
    pub fn stage(file_name: &str, bytes: &[u8], config: &UploadConfig) -> DocMetaResult<Self> {
        let size = bytes.len() as u64;
        let extension = FileValidator::new(config).validate(file_name, size)?;

        let suffix = format!(".{}", extension);
        let mut builder = tempfile::Builder::new();
        builder.prefix("docmeta-").suffix(&suffix);
        let mut file = match &config.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(bytes)?;
        file.flush()?;

        debug!(
            file_name = %file_name,
            path = %file.path().display(),
            bytes = size,
            "Staged upload"
        );

        Ok(Self {
            file_name: base_name(file_name).to_string(),
            extension,
            size,
            file,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Lowercase extension without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// File name without its extension.
    pub fn stem(&self) -> &str {
        Path::new(&self.file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(self.file_name.as_str())
    }

    /// Read the staged bytes back.
    pub async fn read_bytes(&self) -> DocMetaResult<Vec<u8>> {
        Ok(tokio::fs::read(self.file.path()).await?)
    }
}

/// Strip any directory components a client may have sent.
fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim()
}

fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_ascii_lowercase())
}

/// Human readable size with one decimal, e.g. `1.5 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}
