//! OCR module
//!
//! Per-page OCR for scanned PDFs. The provider trait mirrors the
//! service's one hard dependency: a locally installed Tesseract binary.

mod provider;
mod service;
mod types;

pub use provider::{OcrProviderTrait, TesseractProvider};
pub use service::OcrService;
pub use types::{OcrEngine, OcrError, OcrResult};
