//! OCR service
//!
//! Drives per-page OCR of a scanned document: rasterize one page,
//! recognize it, release the image, move on. Pages never render ahead
//! of recognition, which keeps peak memory at a single page image.

use std::path::Path;
use std::sync::Arc;

use crate::pdf::types::PageText;
use crate::pdf::raster;

use super::provider::{OcrProviderTrait, TesseractProvider};
use super::types::OcrError;

/// OCR pipeline over a single provider.
pub struct OcrService {
    provider: Arc<dyn OcrProviderTrait>,
    language: String,
    dpi: f32,
}

impl OcrService {
    /// Create a service backed by the Tesseract subprocess provider.
    pub fn new(language: &str, dpi: f32) -> Self {
        Self {
            provider: Arc::new(TesseractProvider::new()),
            language: language.to_string(),
            dpi,
        }
    }

    #[cfg(test)]
    fn with_provider(provider: Arc<dyn OcrProviderTrait>, language: &str, dpi: f32) -> Self {
        Self {
            provider,
            language: language.to_string(),
            dpi,
        }
    }

    /// Run OCR over every page of a scanned PDF, sequentially.
    ///
    /// Returns one text blob per page (1-based numbering); pages whose
    /// recognition comes back empty are skipped.
    pub async fn extract_document(&self, path: &Path) -> Result<Vec<PageText>, OcrError> {
        if !self.provider.is_available().await {
            return Err(OcrError::EngineNotAvailable(format!(
                "{:?} engine is not available",
                self.provider.engine()
            )));
        }

        let page_count = {
            let path = path.to_path_buf();
            tokio::task::spawn_blocking(move || raster::page_count(&path)).await??
        };

        let mut pages = Vec::new();
        for index in 0..page_count {
            let png = {
                let path = path.to_path_buf();
                let dpi = self.dpi;
                tokio::task::spawn_blocking(move || raster::render_page_png(&path, index, dpi))
                    .await??
            };

            let result = self.provider.recognize(&png, &self.language).await?;
            drop(png);

            tracing::debug!(
                "OCR page {}/{}: {} chars",
                index + 1,
                page_count,
                result.text.len()
            );

            if !result.text.is_empty() {
                pages.push(PageText {
                    page: index as u32 + 1,
                    text: result.text,
                });
            }
        }

        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::provider::MockProvider;
    use std::sync::Mutex;

    fn mock_service(pages: Vec<&str>, available: bool) -> OcrService {
        let provider = MockProvider {
            pages: Mutex::new(pages.into_iter().map(String::from).collect()),
            available,
        };
        OcrService::with_provider(Arc::new(provider), "eng", 150.0)
    }

    #[tokio::test]
    async fn unavailable_engine_is_reported_before_parsing() {
        let service = mock_service(vec![], false);
        let err = service
            .extract_document(Path::new("/nonexistent.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::EngineNotAvailable(_)));
    }

    #[tokio::test]
    async fn unreadable_document_surfaces_raster_error() {
        let service = mock_service(vec!["some text"], true);
        let err = service
            .extract_document(Path::new("/nonexistent.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::Raster(_)));
    }
}
