//! OCR types

use crate::pdf::PdfError;

/// OCR engine identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OcrEngine {
    /// Tesseract invoked as a subprocess
    Tesseract,
    /// Test double
    #[cfg(test)]
    Mock,
}

/// Text recognized from one page image.
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub text: String,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineNotAvailable(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),

    #[error("Page rasterization failed: {0}")]
    Raster(#[from] PdfError),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
