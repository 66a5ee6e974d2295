//! OCR providers
//!
//! Defines the provider trait and the Tesseract subprocess backend.

use async_trait::async_trait;

use super::types::{OcrEngine, OcrError, OcrResult};

/// OCR provider trait
#[async_trait]
pub trait OcrProviderTrait: Send + Sync {
    /// Get the engine type
    fn engine(&self) -> OcrEngine;

    /// Check if the provider is available
    async fn is_available(&self) -> bool;

    /// Perform OCR on an encoded page image
    async fn recognize(&self, image_data: &[u8], language: &str) -> Result<OcrResult, OcrError>;
}

/// Tesseract OCR via the `tesseract` binary.
pub struct TesseractProvider;

impl TesseractProvider {
    pub fn new() -> Self {
        Self
    }

    fn run_tesseract(image_data: &[u8], language: &str) -> Result<OcrResult, OcrError> {
        use std::process::Command;

        let temp_dir = std::env::temp_dir();
        let input_path = temp_dir.join(format!("ocr_input_{}.png", uuid::Uuid::new_v4()));
        let output_base = temp_dir.join(format!("ocr_output_{}", uuid::Uuid::new_v4()));

        std::fs::write(&input_path, image_data)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new("tesseract")
            .arg(&input_path)
            .arg(&output_base)
            .arg("-l")
            .arg(language)
            .arg("--oem")
            .arg("3")
            .arg("--psm")
            .arg("3")
            .output();

        let _ = std::fs::remove_file(&input_path);

        let output =
            output.map_err(|e| OcrError::ProcessingError(format!("Failed to run tesseract: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr
            )));
        }

        let output_file = format!("{}.txt", output_base.display());
        let text = std::fs::read_to_string(&output_file)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to read output: {}", e)));
        let _ = std::fs::remove_file(&output_file);

        Ok(OcrResult {
            text: text?.trim().to_string(),
        })
    }
}

impl Default for TesseractProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OcrProviderTrait for TesseractProvider {
    fn engine(&self) -> OcrEngine {
        OcrEngine::Tesseract
    }

    async fn is_available(&self) -> bool {
        std::process::Command::new("tesseract")
            .arg("--version")
            .output()
            .is_ok()
    }

    async fn recognize(&self, image_data: &[u8], language: &str) -> Result<OcrResult, OcrError> {
        let data = image_data.to_vec();
        let lang = language.to_string();
        tokio::task::spawn_blocking(move || Self::run_tesseract(&data, &lang)).await?
    }
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    pub pages: std::sync::Mutex<Vec<String>>,
    pub available: bool,
}

#[cfg(test)]
#[async_trait]
impl OcrProviderTrait for MockProvider {
    fn engine(&self) -> OcrEngine {
        OcrEngine::Mock
    }

    async fn is_available(&self) -> bool {
        self.available
    }

    async fn recognize(&self, _image_data: &[u8], _language: &str) -> Result<OcrResult, OcrError> {
        let mut pages = self.pages.lock().unwrap();
        if pages.is_empty() {
            return Err(OcrError::ProcessingError("no scripted pages left".into()));
        }
        Ok(OcrResult {
            text: pages.remove(0),
        })
    }
}
