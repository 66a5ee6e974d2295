//! Page rasterization for the OCR path

use std::io::Cursor;
use std::path::Path;

use mupdf::{Colorspace, Document, Matrix};

use super::PdfError;

/// PDF user space resolution, points per inch.
const PDF_DPI: f32 = 72.0;

/// Number of pages in the document.
pub fn page_count(path: &Path) -> Result<i32, PdfError> {
    let path_str = path.to_string_lossy();
    let doc = Document::open(&*path_str).map_err(|e| PdfError::LoadError(e.to_string()))?;
    doc.page_count().map_err(Into::into)
}

/// Render one page (0-based index) to PNG bytes at the given resolution.
///
/// Opens a fresh document per call; MuPDF contexts are not shareable
/// across threads, so each blocking task works from the file on disk.
pub fn render_page_png(path: &Path, index: i32, dpi: f32) -> Result<Vec<u8>, PdfError> {
    let path_str = path.to_string_lossy();
    let doc = Document::open(&*path_str).map_err(|e| PdfError::LoadError(e.to_string()))?;
    let page = doc.load_page(index)?;

    let scale = dpi / PDF_DPI;
    let matrix = Matrix::new_scale(scale, scale);
    let colorspace = Colorspace::device_rgb();
    let pixmap = page
        .to_pixmap(&matrix, &colorspace, false, false)
        .map_err(|e| PdfError::RenderError(e.to_string()))?;

    encode_pixmap_png(&pixmap)
}

/// Encode pixmap samples as PNG.
fn encode_pixmap_png(pixmap: &mupdf::Pixmap) -> Result<Vec<u8>, PdfError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize; // components per pixel

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(0);
            let g = samples.get(offset + 1).copied().unwrap_or(0);
            let b = samples.get(offset + 2).copied().unwrap_or(0);
            rgb_buffer.extend_from_slice(&[r, g, b]);
        }
    }

    let img = image::RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| PdfError::ImageError("Failed to create image buffer".to_string()))?;

    let mut output = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
        .map_err(|e| PdfError::ImageError(e.to_string()))?;

    Ok(output)
}
