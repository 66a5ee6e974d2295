//! Word-level text extraction
//!
//! Walks MuPDF's structured text pages and groups character boxes into
//! words. Characters are kept in the order the library reports them;
//! a word ends at a whitespace character, at a horizontal gap wider
//! than `x_tolerance`, or at a vertical offset beyond `y_tolerance`.

use std::path::Path;

use mupdf::{Document, TextPageOptions};

use super::types::{CharBox, ExtractedWord};
use super::PdfError;

/// Options controlling word-splitting sensitivity.
#[derive(Debug, Clone)]
pub struct WordOptions {
    /// Maximum horizontal gap between adjacent characters of one word.
    pub x_tolerance: f64,
    /// Maximum vertical offset between adjacent characters of one word.
    pub y_tolerance: f64,
}

impl Default for WordOptions {
    fn default() -> Self {
        Self {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
        }
    }
}

/// Extract word records from a searchable PDF, in page order and the
/// library's intra-page character order.
pub fn extract_words(path: &Path, options: &WordOptions) -> Result<Vec<ExtractedWord>, PdfError> {
    let path_str = path.to_string_lossy();
    let doc = Document::open(&*path_str).map_err(|e| PdfError::LoadError(e.to_string()))?;
    let page_count = doc.page_count()?;

    let mut extracted = Vec::new();

    for index in 0..page_count {
        let page_number = index as u32 + 1;
        let chars = page_char_boxes(&doc, index)?;
        for word in group_chars_into_words(&chars, options) {
            extracted.push(ExtractedWord {
                text: word.text,
                bbox: word.bbox,
                page: page_number,
            });
        }
    }

    Ok(extracted)
}

/// Collect character boxes for one page via the stext API.
///
/// MuPDF quads are in page device space, top-left origin; the box is
/// the axis-aligned hull of the four quad corners.
fn page_char_boxes(doc: &Document, index: i32) -> Result<Vec<CharBox>, PdfError> {
    let page = doc.load_page(index)?;
    let text_page = page.to_text_page(TextPageOptions::PRESERVE_WHITESPACE)?;

    let mut chars = Vec::new();
    for block in text_page.blocks() {
        for line in block.lines() {
            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    let quad = ch.quad();
                    let x0 = quad.ul.x.min(quad.ll.x) as f64;
                    let top = quad.ul.y.min(quad.ur.y) as f64;
                    let x1 = quad.ur.x.max(quad.lr.x) as f64;
                    let bottom = quad.ll.y.max(quad.lr.y) as f64;
                    chars.push(CharBox::new(c, x0, top, x1, bottom));
                }
            }
        }
    }

    Ok(chars)
}

/// A grouped word before page attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct WordBox {
    pub text: String,
    pub bbox: [f64; 4],
}

/// Group a character stream into words.
pub fn group_chars_into_words(chars: &[CharBox], options: &WordOptions) -> Vec<WordBox> {
    let mut words = Vec::new();
    let mut current: Vec<&CharBox> = Vec::new();

    for ch in chars {
        if ch.is_blank() {
            if !current.is_empty() {
                words.push(make_word(&current));
                current.clear();
            }
            continue;
        }

        if let Some(last) = current.last() {
            if should_split(last, ch, options) {
                words.push(make_word(&current));
                current.clear();
            }
        }

        current.push(ch);
    }

    if !current.is_empty() {
        words.push(make_word(&current));
    }

    words
}

/// Gap between the x-intervals of two characters; zero when they
/// overlap or touch, so doubled chars from bold-overlay rendering
/// stay in one word.
fn should_split(last: &CharBox, current: &CharBox, options: &WordOptions) -> bool {
    let x_gap = (last.x0.max(current.x0) - last.x1.min(current.x1)).max(0.0);
    let y_diff = (current.top - last.top).abs();
    x_gap > options.x_tolerance || y_diff > options.y_tolerance
}

fn make_word(chars: &[&CharBox]) -> WordBox {
    let text: String = chars.iter().map(|c| c.ch).collect();
    let x0 = chars.iter().map(|c| c.x0).fold(f64::INFINITY, f64::min);
    let top = chars.iter().map(|c| c.top).fold(f64::INFINITY, f64::min);
    let x1 = chars.iter().map(|c| c.x1).fold(f64::NEG_INFINITY, f64::max);
    let bottom = chars
        .iter()
        .map(|c| c.bottom)
        .fold(f64::NEG_INFINITY, f64::max);

    WordBox {
        text,
        bbox: [x0, top, x1, bottom],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: char, x0: f64, top: f64, x1: f64, bottom: f64) -> CharBox {
        CharBox::new(c, x0, top, x1, bottom)
    }

    #[test]
    fn empty_input_yields_no_words() {
        let words = group_chars_into_words(&[], &WordOptions::default());
        assert!(words.is_empty());
    }

    #[test]
    fn touching_chars_form_one_word() {
        let chars = vec![
            ch('H', 10.0, 100.0, 20.0, 112.0),
            ch('i', 20.0, 100.0, 26.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "Hi");
        assert_eq!(words[0].bbox, [10.0, 100.0, 26.0, 112.0]);
    }

    #[test]
    fn whitespace_splits_words() {
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch(' ', 20.0, 100.0, 25.0, 112.0),
            ch('B', 25.0, 100.0, 35.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "A");
        assert_eq!(words[1].text, "B");
    }

    #[test]
    fn gap_beyond_tolerance_splits() {
        // gap = 50 - 30 = 20 > 3
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch('B', 20.0, 100.0, 30.0, 112.0),
            ch('C', 50.0, 100.0, 60.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "AB");
        assert_eq!(words[1].text, "C");
    }

    #[test]
    fn gap_within_tolerance_groups() {
        // gap = 22 - 20 = 2 <= 3
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch('B', 22.0, 100.0, 32.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "AB");
    }

    #[test]
    fn tighter_tolerance_splits_smaller_gaps() {
        // gap = 2, splits under x_tolerance = 1
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch('B', 22.0, 100.0, 32.0, 112.0),
        ];
        let opts = WordOptions {
            x_tolerance: 1.0,
            ..WordOptions::default()
        };
        let words = group_chars_into_words(&chars, &opts);
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn vertical_offset_beyond_tolerance_splits() {
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch('B', 20.0, 105.0, 30.0, 117.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn overlapping_chars_group() {
        // negative gap from overlay-bold rendering
        let chars = vec![
            ch('f', 10.0, 100.0, 20.0, 112.0),
            ch('i', 18.0, 100.0, 25.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "fi");
    }

    #[test]
    fn word_bbox_is_union_of_char_boxes() {
        let chars = vec![
            ch('A', 10.0, 97.0, 20.0, 112.0),
            ch('b', 20.0, 98.0, 28.0, 110.0),
            ch('C', 28.0, 99.0, 38.0, 113.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].bbox, [10.0, 97.0, 38.0, 113.0]);
    }

    #[test]
    fn multiple_spaces_between_words() {
        let chars = vec![
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch(' ', 20.0, 100.0, 25.0, 112.0),
            ch(' ', 25.0, 100.0, 30.0, 112.0),
            ch('B', 30.0, 100.0, 40.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "A");
        assert_eq!(words[1].text, "B");
    }

    #[test]
    fn leading_and_trailing_spaces_ignored() {
        let chars = vec![
            ch(' ', 5.0, 100.0, 10.0, 112.0),
            ch('A', 10.0, 100.0, 20.0, 112.0),
            ch(' ', 20.0, 100.0, 25.0, 112.0),
        ];
        let words = group_chars_into_words(&chars, &WordOptions::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "A");
    }

    #[test]
    fn three_words_on_one_line() {
        let mut chars = Vec::new();
        let mut x = 10.0;
        for word in ["The", "quick", "fox"] {
            for c in word.chars() {
                chars.push(ch(c, x, 100.0, x + 8.0, 112.0));
                x += 8.0;
            }
            chars.push(ch(' ', x, 100.0, x + 4.0, 112.0));
            x += 4.0;
        }
        let words = group_chars_into_words(&chars, &WordOptions::default());
        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["The", "quick", "fox"]);
    }
}
