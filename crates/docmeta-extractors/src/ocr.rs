//! Image content extraction through OCR.
//!
//! Images are decoded first (a corrupt file fails here whether or not OCR is
//! compiled in), converted to grayscale, and handed to Tesseract.

use crate::error::{ExtractError, ExtractResult};
use crate::types::{ExtractedContent, FileKind, ImageFormat};
use crate::Extractor;
use async_trait::async_trait;
use tracing::debug;

/// Configuration for OCR.
#[derive(Debug, Clone)]
pub struct ImageExtractionConfig {
    /// Tesseract language pack(s), e.g. `eng` or `eng+deu`.
    pub language: String,
    /// Resolution hint passed to Tesseract.
    pub dpi: Option<i32>,
    /// Below this many characters the OCR result is logged as weak.
    pub min_ocr_text_length: usize,
}

impl Default for ImageExtractionConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            dpi: Some(300),
            min_ocr_text_length: 10,
        }
    }
}

/// OCR-backed image extractor.
pub struct ImageExtractor {
    config: ImageExtractionConfig,
}

impl ImageExtractor {
    /// Create image extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ImageExtractionConfig::default(),
        }
    }

    /// Create image extractor with custom configuration.
    pub fn with_config(config: ImageExtractionConfig) -> Self {
        Self { config }
    }

    fn decode(content: &[u8]) -> ExtractResult<(image::GrayImage, ImageFormat)> {
        let format = match image::guess_format(content) {
            Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
            Ok(image::ImageFormat::Png) => ImageFormat::Png,
            Ok(image::ImageFormat::Tiff) => ImageFormat::Tiff,
            Ok(image::ImageFormat::Bmp) => ImageFormat::Bmp,
            Ok(other) => {
                return Err(ExtractError::UnsupportedType(format!("image/{:?}", other)))
            }
            Err(e) => return Err(ExtractError::Image(format!("Unknown image format: {}", e))),
        };

        let img = image::load_from_memory(content)
            .map_err(|e| ExtractError::Image(format!("Failed to decode image: {}", e)))?;
        Ok((img.to_luma8(), format))
    }

    #[cfg(feature = "ocr")]
    fn ocr_sync(gray: image::GrayImage, config: &ImageExtractionConfig) -> ExtractResult<String> {
        use rusty_tesseract::{Args, Image};

        // Hand Tesseract a PNG on disk so its bundled image version never has to match ours.
        let staged = tempfile::Builder::new()
            .prefix("docmeta-ocr-")
            .suffix(".png")
            .tempfile()?;
        gray.save_with_format(staged.path(), image::ImageFormat::Png)
            .map_err(|e| ExtractError::Image(format!("Failed to stage image for OCR: {}", e)))?;

        let input = Image::from_path(staged.path())
            .map_err(|e| ExtractError::Image(format!("Tesseract rejected image: {}", e)))?;
        let args = Args {
            lang: config.language.clone(),
            dpi: config.dpi,
            ..Args::default()
        };

        rusty_tesseract::image_to_string(&input, &args)
            .map_err(|e| ExtractError::Image(format!("OCR failed: {}", e)))
    }

    #[cfg(not(feature = "ocr"))]
    fn ocr_sync(_gray: image::GrayImage, _config: &ImageExtractionConfig) -> ExtractResult<String> {
        Err(ExtractError::ExtractionFailed(
            "OCR support not enabled. Rebuild with the `ocr` feature and install tesseract."
                .to_string(),
        ))
    }
}

impl Default for ImageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Extractor for ImageExtractor {
    async fn extract(&self, content: &[u8]) -> ExtractResult<ExtractedContent> {
        let content = content.to_vec();
        let content_len = content.len();
        let config = self.config.clone();

        let (text, format, dimensions) = tokio::task::spawn_blocking(move || {
            let (gray, format) = Self::decode(&content)?;
            let dimensions = gray.dimensions();
            let text = Self::ocr_sync(gray, &config)?;
            Ok::<_, ExtractError>((text, format, dimensions))
        })
        .await??;

        if text.trim().is_empty() {
            return Err(ExtractError::EmptyContent);
        }

        if text.trim().len() < self.config.min_ocr_text_length {
            debug!(chars = text.trim().len(), "OCR produced very little text");
        }

        Ok(ExtractedContent::new(text, FileKind::Image(format), self.name())
            .with_metadata("original_size", content_len)
            .with_metadata("width", dimensions.0)
            .with_metadata("height", dimensions.1)
            .with_metadata("ocr_language", self.config.language.clone()))
    }

    fn supported_kinds(&self) -> &[FileKind] {
        &[
            FileKind::Image(ImageFormat::Jpeg),
            FileKind::Image(ImageFormat::Png),
            FileKind::Image(ImageFormat::Tiff),
            FileKind::Image(ImageFormat::Bmp),
        ]
    }

    fn name(&self) -> &str {
        "tesseract-ocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_png() -> Vec<u8> {
        let img = image::GrayImage::from_pixel(4, 4, image::Luma([255u8]));
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_config_default() {
        let config = ImageExtractionConfig::default();
        assert_eq!(config.language, "eng");
        assert_eq!(config.dpi, Some(300));
    }

    #[test]
    fn test_decode_png() {
        let (gray, format) = ImageExtractor::decode(&tiny_png()).unwrap();
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(gray.dimensions(), (4, 4));
    }

    #[tokio::test]
    async fn test_corrupt_png_fails_before_ocr() {
        let mut bytes = tiny_png();
        bytes.truncate(20);
        let result = ImageExtractor::new().extract(&bytes).await;
        assert!(matches!(result, Err(ExtractError::Image(_))));
    }

    #[tokio::test]
    async fn test_unknown_bytes() {
        let result = ImageExtractor::new().extract(&[0x00, 0x01, 0x02, 0x03]).await;
        assert!(matches!(result, Err(ExtractError::Image(_))));
    }

    #[cfg(not(feature = "ocr"))]
    #[tokio::test]
    async fn test_ocr_disabled_reports_clear_error() {
        let result = ImageExtractor::new().extract(&tiny_png()).await;
        match result {
            Err(ExtractError::ExtractionFailed(msg)) => assert!(msg.contains("OCR")),
            other => panic!("unexpected result: {:?}", other.map(|c| c.text)),
        }
    }

    #[test]
    fn test_extractor_supports() {
        let extractor = ImageExtractor::new();
        assert!(extractor.supports(FileKind::Image(ImageFormat::Png)));
        assert!(extractor.supports(FileKind::Image(ImageFormat::Tiff)));
        assert!(!extractor.supports(FileKind::Pdf));
        assert_eq!(extractor.name(), "tesseract-ocr");
    }
}
