//! Line reconstruction from word bounding boxes
//!
//! Groups a word sequence into output lines by vertical proximity: a
//! word whose top offset stays within [`LINE_Y_THRESHOLD`] of the
//! previous word's joins the current line, otherwise it starts a new
//! one.

use super::types::ExtractedWord;

/// Vertical offset at which a word starts a new line.
pub const LINE_Y_THRESHOLD: f64 = 5.0;

/// Join words into newline-separated lines of space-separated text.
pub fn group_words_into_lines(words: &[ExtractedWord]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_y: Option<f64> = None;

    for word in words {
        // normalize to one decimal, as the y reference
        let y = (word.bbox[1] * 10.0).round() / 10.0;

        match current_y {
            Some(prev) if (y - prev).abs() >= LINE_Y_THRESHOLD => {
                lines.push(current.join(" "));
                current = vec![word.text.as_str()];
            }
            _ => current.push(word.text.as_str()),
        }

        current_y = Some(y);
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, top: f64) -> ExtractedWord {
        ExtractedWord {
            text: text.to_string(),
            bbox: [10.0, top, 20.0, top + 12.0],
            page: 1,
        }
    }

    #[test]
    fn empty_input_yields_empty_text() {
        assert_eq!(group_words_into_lines(&[]), "");
    }

    #[test]
    fn words_within_threshold_share_a_line() {
        let words = vec![word("uno", 100.0), word("dos", 100.3), word("tres", 103.0)];
        assert_eq!(group_words_into_lines(&words), "uno dos tres");
    }

    #[test]
    fn offset_at_threshold_starts_new_line() {
        // 100.0 and 100.3 join; 108.0 is 7.7 beyond the reference
        let words = vec![word("uno", 100.0), word("dos", 100.3), word("tres", 108.0)];
        assert_eq!(group_words_into_lines(&words), "uno dos\ntres");
    }

    #[test]
    fn reference_tracks_the_previous_word() {
        // each step is under the threshold even though the total drift
        // exceeds it
        let words = vec![
            word("a", 100.0),
            word("b", 104.0),
            word("c", 108.0),
            word("d", 112.0),
        ];
        assert_eq!(group_words_into_lines(&words), "a b c d");
    }

    #[test]
    fn multiple_line_breaks() {
        let words = vec![
            word("first", 50.0),
            word("second", 70.0),
            word("third", 90.0),
        ];
        assert_eq!(group_words_into_lines(&words), "first\nsecond\nthird");
    }
}
