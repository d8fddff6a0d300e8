//! Word matching rules
//!
//! All comparisons go through a comparison key (Unicode lowercase). Matches
//! inside page text are reported as byte ranges of the ORIGINAL text, so the
//! wrapped text keeps its casing and never cuts a character in half.

use std::ops::Range;

/// Case-insensitive comparison key of a word
pub fn comparison_key(word: &str) -> String {
    word.to_lowercase()
}

/// Returns true if two words share a comparison key
pub fn same_word(a: &str, b: &str) -> bool {
    a == b || comparison_key(a) == comparison_key(b)
}

/// Case-insensitive membership test
pub fn is_word_in_list<S: AsRef<str>>(word: &str, list: &[S]) -> bool {
    let key = comparison_key(word);
    list.iter().any(|item| comparison_key(item.as_ref()) == key)
}

/// Find the first case-insensitive occurrence of `needle` in `haystack`.
///
/// Each haystack char is expanded to its lowercase form and compared against
/// the lowercased needle. A match has to consume whole haystack chars, so a
/// needle that only covers part of a char's lowercase expansion (e.g. "i"
/// against "İ") is rejected. Empty needles never match.
pub fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    let target: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if target.is_empty() {
        return None;
    }

    for (start, _) in haystack.char_indices() {
        if let Some(end) = match_at(haystack, start, &target) {
            return Some(start..end);
        }
    }
    None
}

fn match_at(haystack: &str, start: usize, target: &[char]) -> Option<usize> {
    let mut matched = 0;
    for (offset, ch) in haystack[start..].char_indices() {
        for lower in ch.to_lowercase() {
            if matched == target.len() || target[matched] != lower {
                return None;
            }
            matched += 1;
        }
        if matched == target.len() {
            return Some(start + offset + ch.len_utf8());
        }
    }
    None
}

/// Normalize raw selected text into a candidate word
pub fn normalize_selection(selection: &str) -> Option<&str> {
    let trimmed = selection.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
