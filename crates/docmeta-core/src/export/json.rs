use std::path::Path;

use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::error::DocMetaResult;
use crate::types::MetadataRecord;

/// Pretty-printed JSON for a record.
pub fn export_json(record: &MetadataRecord) -> DocMetaResult<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse a previously exported record.
pub fn parse_json(json: &str) -> DocMetaResult<MetadataRecord> {
    Ok(serde_json::from_str(json)?)
}

/// Download name for a record: `<stem>_metadata.json`.
pub fn export_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("document");
    format!("{}_metadata.json", stem)
}

/// Write a record as pretty JSON to any async writer.
pub async fn write_json<W>(record: &MetadataRecord, writer: W) -> DocMetaResult<()>
where
    W: AsyncWrite + Unpin,
{
    let json = export_json(record)?;
    let mut writer = BufWriter::new(writer);
    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Write a record to `path`, replacing any existing file.
pub async fn write_json_file(record: &MetadataRecord, path: impl AsRef<Path>) -> DocMetaResult<()> {
    let file = tokio::fs::File::create(path.as_ref()).await?;
    write_json(record, file).await?;
    debug!(path = %path.as_ref().display(), "Wrote metadata export");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetadataBuilder;
    use docmeta_extractors::FileKind;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("report.pdf"), "report_metadata.json");
        assert_eq!(export_file_name("my.notes.md"), "my.notes_metadata.json");
        assert_eq!(export_file_name("README"), "README_metadata.json");
        assert_eq!(export_file_name(""), "document_metadata.json");
    }

    #[tokio::test]
    async fn test_write_json_to_buffer() {
        let record = MetadataBuilder::new("a.txt", 5)
            .file_kind(FileKind::Text)
            .build();

        let mut output = Vec::new();
        write_json(&record, &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.ends_with("}\n"));
        assert_eq!(parse_json(&text).unwrap(), record);
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(parse_json("{\"file_name\": 3}").is_err());
        assert!(parse_json("not json").is_err());
    }
}
