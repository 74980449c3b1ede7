//! Word counting for chapter content.

/// Count the non-whitespace characters of a text.
///
/// CJK prose has no word separators, so character count is the standard
/// "word count" for chapter content; whitespace and newlines are ignored.
pub fn word_count(content: &str) -> i64 {
    content.chars().filter(|c| !c.is_whitespace()).count() as i64
}
