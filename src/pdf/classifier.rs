//! Searchability classification
//!
//! Decides whether a PDF carries an embedded text layer or needs OCR.

use std::path::Path;

use mupdf::Document;

use super::PdfError;

/// Check whether any page of the document yields extractable text.
///
/// A document that cannot be opened or parsed is reported as not
/// searchable, routing it to the OCR path instead of failing the
/// request.
pub fn is_searchable(path: &Path) -> bool {
    match probe_text_layer(path) {
        Ok(found) => found,
        Err(e) => {
            tracing::debug!("Classifying unparseable PDF as scanned: {}", e);
            false
        }
    }
}

fn probe_text_layer(path: &Path) -> Result<bool, PdfError> {
    let path_str = path.to_string_lossy();
    let doc = Document::open(&*path_str)?;
    let page_count = doc.page_count()?;

    for i in 0..page_count {
        let page = doc.load_page(i)?;
        if let Ok(text) = page.to_text() {
            if !text.trim().is_empty() {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_not_searchable() {
        assert!(!is_searchable(Path::new("/nonexistent/doc.pdf")));
    }

    #[test]
    fn garbage_file_is_not_searchable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"this is not a pdf").unwrap();
        assert!(!is_searchable(file.path()));
    }
}
