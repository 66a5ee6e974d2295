//! PDF parsing module
//!
//! Classification, word-level text extraction, and page rasterization
//! using the MuPDF library.

pub mod classifier;
pub mod lines;
pub mod raster;
pub mod types;
pub mod words;

pub use classifier::is_searchable;
pub use lines::group_words_into_lines;
pub use types::{CharBox, ExtractedWord, PageText};
pub use words::{extract_words, WordOptions};

use thiserror::Error;

/// PDF processing errors
#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Failed to render page: {0}")]
    RenderError(String),
    #[error("Image encoding error: {0}")]
    ImageError(String),
    #[error("MuPDF error: {0}")]
    MuPdfError(String),
}

impl From<mupdf::Error> for PdfError {
    fn from(e: mupdf::Error) -> Self {
        PdfError::MuPdfError(e.to_string())
    }
}
