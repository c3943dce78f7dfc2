//! End-to-end tests for the document pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use docmeta_core::export::{export_json, parse_json, write_json_file};
use docmeta_extractors::{ExtractionPipeline, ExtractorFactory};
use docmeta_core::{
    DocMetaConfig, DocMetaError, DocMetaResult, DocumentProcessor, ErrorCode, GenerationOptions,
    Llm, LlmResponse, Message, StagedUpload, UploadConfig,
};

const REPORT: &str = "Quarterly Operations Report\n\n\
The operations team completed the warehouse migration in March. \
Inventory accuracy improved to ninety eight percent after the new scanners were installed. \
Shipping delays fell sharply compared with the previous quarter.\n\n\
Next quarter the team will focus on supplier onboarding and staff training. \
The budget for training was approved by the board last week.";

/// Returns a canned reply and counts calls.
struct StubLlm {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubLlm {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Llm for StubLlm {
    async fn generate(
        &self,
        messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> DocMetaResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(messages.iter().any(|m| m.content.contains("warehouse migration")));
        match &self.reply {
            Some(reply) => Ok(LlmResponse::text(reply.clone())),
            None => Err(DocMetaError::llm_connection("service unavailable")),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn config() -> DocMetaConfig {
    DocMetaConfig::builder()
        .upload(UploadConfig {
            max_file_size_mb: 1,
            temp_dir: None,
        })
        .build()
}

#[tokio::test]
async fn test_text_document_end_to_end() {
    let llm = StubLlm::replying(
        r#"{"summary": "An operations report covering a warehouse migration.", "key_points": ["Migration done", "Training next"], "document_type": "Report"}"#,
    );
    let processor = DocumentProcessor::with_defaults(config(), Some(llm.clone()));

    let record = processor
        .process("q1-report.txt", REPORT.as_bytes().to_vec())
        .await
        .unwrap();

    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    assert_eq!(record.file_name, "q1-report.txt");
    assert_eq!(record.file_type, "txt");
    assert_eq!(record.mime_type, "text/plain");
    assert_eq!(record.file_size_bytes, REPORT.len() as u64);
    assert_eq!(record.extraction_method.as_deref(), Some("plain-text"));
    assert_eq!(record.paragraph_count, 3);
    assert_eq!(record.sentence_count, 5);
    assert_eq!(record.estimated_reading_time, 1);
    assert_eq!(record.language_code.as_deref(), Some("eng"));
    assert_eq!(record.detected_language.as_deref(), Some("English"));
    assert_eq!(record.document_type.as_deref(), Some("Report"));
    assert_eq!(record.key_points.as_ref().map(Vec::len), Some(2));
    assert!(record.readability_score.is_some());
    assert!(record
        .common_words
        .iter()
        .any(|w| w.word == "training" && w.count == 2));
}

#[tokio::test]
async fn test_counts_are_deterministic_across_runs() {
    let processor = DocumentProcessor::with_defaults(config(), None);
    let first = processor
        .process("a.txt", REPORT.as_bytes().to_vec())
        .await
        .unwrap();
    let second = processor
        .process("a.txt", REPORT.as_bytes().to_vec())
        .await
        .unwrap();

    assert_eq!(first.word_count, second.word_count);
    assert_eq!(first.character_count, second.character_count);
    assert_eq!(first.paragraph_count, second.paragraph_count);
    assert_eq!(first.common_words, second.common_words);
}

#[tokio::test]
async fn test_llm_failure_leaves_insights_null() {
    let llm = StubLlm::failing();
    let processor = DocumentProcessor::with_defaults(config(), Some(llm.clone()));

    let record = processor
        .process("report.md", REPORT.as_bytes().to_vec())
        .await
        .unwrap();

    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    assert_eq!(record.file_type, "md");
    assert!(record.summary.is_none());
    assert!(record.key_points.is_none());
    assert!(record.document_type.is_none());
    assert!(record.word_count > 0);
}

#[tokio::test]
async fn test_insights_disabled_skips_provider() {
    let llm = StubLlm::replying("{}");
    let mut config = config();
    config.insights.enabled = false;
    let processor = DocumentProcessor::with_defaults(config, Some(llm.clone()));

    assert!(!processor.has_summarizer());
    let record = processor
        .process("report.txt", REPORT.as_bytes().to_vec())
        .await
        .unwrap();
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    assert!(record.summary.is_none());
}

#[tokio::test]
async fn test_rejections_happen_before_extraction() {
    let processor = DocumentProcessor::with_defaults(config(), None);

    let err = processor
        .process("big.txt", vec![b'a'; 1024 * 1024 + 1])
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileTooLarge);

    let err = processor
        .process("script.exe", b"MZ binary".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileUnsupportedType);

    let err = processor.process("empty.txt", Vec::new()).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::FileEmpty);
}

#[tokio::test]
async fn test_no_meaningful_text() {
    let processor = DocumentProcessor::with_defaults(config(), None);
    let err = processor
        .process("numbers.txt", b"1 2 3 4 5 6 7 8 9 10 11 12".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, DocMetaError::NoMeaningfulText { .. }));
}

#[tokio::test]
async fn test_corrupt_pdf_is_extraction_error() {
    let processor = DocumentProcessor::with_defaults(config(), None);
    let err = processor
        .process("broken.pdf", b"%PDF-1.4\nthis is not really a pdf".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ExtFailed);
}

#[tokio::test]
async fn test_process_staged_upload() {
    let processor = DocumentProcessor::with_defaults(config(), None);
    let staged = StagedUpload::stage("notes.txt", REPORT.as_bytes(), &UploadConfig::default()).unwrap();

    let record = processor.process_staged(&staged).await.unwrap();
    assert_eq!(record.file_name, "notes.txt");
    assert!(record.summary.is_none());
}

#[tokio::test]
async fn test_extraction_reads_the_staged_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload = UploadConfig {
        max_file_size_mb: 1,
        temp_dir: Some(dir.path().to_path_buf()),
    };
    let staged = StagedUpload::stage("notes.txt", b"placeholder", &upload).unwrap();
    std::fs::write(staged.path(), REPORT).unwrap();

    let processor = DocumentProcessor::with_defaults(config(), None);
    let record = processor.process_staged(&staged).await.unwrap();
    assert_eq!(record.paragraph_count, 3);
    assert!(record.common_words.iter().any(|w| w.word == "training"));
}

#[tokio::test]
async fn test_pipeline_without_extractor_refuses_upfront() {
    let pipeline = ExtractionPipeline::new().add_extractor(ExtractorFactory::text());
    let processor = DocumentProcessor::new(config(), pipeline, None);
    assert_eq!(processor.supported_extensions(), ["txt"]);

    for name in ["scan.png", "notes.md"] {
        let err = processor.process(name, REPORT.as_bytes().to_vec()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::FileUnsupportedType, "{name}");
    }
    assert!(processor
        .process("notes.txt", REPORT.as_bytes().to_vec())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_export_round_trip() {
    let llm = StubLlm::replying(
        "Plain prose reply.\n- first point\n- second point",
    );
    let processor = DocumentProcessor::with_defaults(config(), Some(llm));
    let record = processor
        .process("q1.txt", REPORT.as_bytes().to_vec())
        .await
        .unwrap();

    let json = export_json(&record).unwrap();
    assert_eq!(parse_json(&json).unwrap(), record);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("q1_metadata.json");
    write_json_file(&record, &path).await.unwrap();
    let written = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(parse_json(&written).unwrap(), record);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    for field in [
        "file_name",
        "file_type",
        "file_size",
        "extraction_date",
        "word_count",
        "estimated_reading_time",
        "detected_language",
        "summary",
        "key_points",
        "document_type",
        "common_words",
        "readability_score",
    ] {
        assert!(value.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn test_config_defaults_match_limits() {
    let config = DocMetaConfig::default();
    assert_eq!(config.upload.max_file_size_bytes(), 300 * 1024 * 1024);
    tokio_test::block_on(async {
        let processor = DocumentProcessor::with_defaults(config, None);
        assert!(!processor.has_summarizer());
    });
}
