//! Character ranges that formatting commands act on.
//!
//! All indices are character (not byte) offsets, matching egui's `CCursor`.

use std::ops::Range;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// The word touching `char_idx`, or an empty range at `char_idx` when the
/// cursor sits between two non-word characters.
pub fn word_range(text: &str, char_idx: usize) -> Range<usize> {
    let chars: Vec<char> = text.chars().collect();
    let pos = char_idx.min(chars.len());

    let mut start = pos;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    start..end
}

/// Sorted range between two cursor indices.
pub fn ordered(a: usize, b: usize) -> Range<usize> {
    a.min(b)..a.max(b)
}

/// The range a format change applies to: the selection if it is not
/// empty, otherwise the word under the cursor.
pub fn format_target(text: &str, selection: Range<usize>) -> Range<usize> {
    if selection.is_empty() {
        word_range(text, selection.start)
    } else {
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_inside_and_at_edges() {
        let text = "hello big world";
        assert_eq!(word_range(text, 2), 0..5);
        assert_eq!(word_range(text, 0), 0..5);
        assert_eq!(word_range(text, 5), 0..5);
        assert_eq!(word_range(text, 7), 6..9);
        assert_eq!(word_range(text, 15), 10..15);
    }

    #[test]
    fn between_separators_is_empty() {
        assert_eq!(word_range("a  b", 2), 2..2);
        assert_eq!(word_range("", 0), 0..0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "café ünïcode";
        assert_eq!(word_range(text, 1), 0..4);
        assert_eq!(word_range(text, 6), 5..12);
        assert_eq!(word_range(text, 99), 5..12);
    }

    #[test]
    fn target_prefers_selection() {
        assert_eq!(format_target("one two", ordered(6, 1)), 1..6);
        assert_eq!(format_target("one two", 5..5), 4..7);
    }
}
