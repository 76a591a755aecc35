//! Text normalization and tokenization for profanity detection.
//!
//! Normalization only ever feeds detection. Censored output is always rebuilt
//! from the caller's original string (see [`crate::domain::censor`]).

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Separator runs used to split text into alternating word/separator tokens.
static TOKEN_DELIMITER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s.,!?-]+").unwrap());

/// Normalizes text for profanity matching.
///
/// # Normalization Rules
///
/// 1. **Case**: Converted to lowercase
/// 2. **Repetition**: Runs of two or more identical characters collapse to one
///    (`"annjjinnng"` becomes `"anjing"`)
/// 3. **Line breaks**: Never collapsed, so `"\n\n"` is kept as-is
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_text("FUUUCK"), "fuck");
/// assert_eq!(normalize_text("annjjinnng"), "anjing");
/// ```
pub fn normalize_text(input: &str) -> String {
    collapse_repeats(&input.to_lowercase())
}

/// Collapses runs of identical consecutive characters into one occurrence.
pub fn collapse_repeats(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last: Option<char> = None;

    for ch in input.chars() {
        if ch == '\n' || last != Some(ch) {
            out.push(ch);
        }
        last = Some(ch);
    }

    out
}

/// Splits text into alternating word and separator tokens.
///
/// Separators are runs of whitespace or `.,!?-`. The result always starts and
/// ends with a word token, which may be empty when the text starts or ends
/// with a separator. Concatenating the tokens yields the input unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(split_tokens("Hi, you!"), vec!["Hi", ", ", "you", "!", ""]);
/// ```
pub fn split_tokens(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut last = 0;

    for m in TOKEN_DELIMITER_REGEX.find_iter(input) {
        parts.push(&input[last..m.start()]);
        parts.push(m.as_str());
        last = m.end();
    }
    parts.push(&input[last..]);

    parts
}

/// Returns the byte ranges of every word in `input`.
///
/// A word is a maximal run of alphanumeric characters or underscores.
pub fn word_spans(input: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = None;

    for (idx, ch) in input.char_indices() {
        if is_word_char(ch) {
            start.get_or_insert(idx);
        } else if let Some(begin) = start.take() {
            spans.push(begin..idx);
        }
    }

    if let Some(begin) = start {
        spans.push(begin..input.len());
    }

    spans
}

/// Returns `true` for characters that can be part of a word.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_text("Hello World"), "helo world");
    }

    #[test]
    fn test_normalize_collapses_repeated_letters() {
        assert_eq!(normalize_text("annjjinnng"), "anjing");
    }

    #[test]
    fn test_normalize_collapses_mixed_case_repeats() {
        assert_eq!(normalize_text("FuUuCK"), "fuck");
    }

    #[test]
    fn test_normalize_collapses_separator_runs() {
        assert_eq!(normalize_text("wow!!!   ok"), "wow! ok");
    }

    #[test]
    fn test_normalize_keeps_line_breaks() {
        assert_eq!(normalize_text("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_collapse_repeats_unicode() {
        assert_eq!(collapse_repeats("ééé ñññ"), "é ñ");
    }

    #[test]
    fn test_split_tokens_alternates_words_and_separators() {
        assert_eq!(
            split_tokens("Hello, World! FOO bar."),
            vec!["Hello", ", ", "World", "! ", "FOO", " ", "bar", ".", ""]
        );
    }

    #[test]
    fn test_split_tokens_leading_separator() {
        assert_eq!(split_tokens("  hi"), vec!["", "  ", "hi"]);
    }

    #[test]
    fn test_split_tokens_without_separators() {
        assert_eq!(split_tokens("word"), vec!["word"]);
    }

    #[test]
    fn test_split_tokens_rejoins_to_input() {
        let text = "Pantai -- indah?! Ya.\tSangat";
        assert_eq!(split_tokens(text).concat(), text);
    }

    #[test]
    fn test_split_tokens_keeps_apostrophes_inside_words() {
        assert_eq!(split_tokens("it's fine"), vec!["it's", " ", "fine"]);
    }

    #[test]
    fn test_word_spans() {
        let text = "foo, bar_baz!  qux";
        let words: Vec<&str> = word_spans(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(words, vec!["foo", "bar_baz", "qux"]);
    }

    #[test]
    fn test_word_spans_multibyte() {
        let text = "kopi ☕ énak";
        let words: Vec<&str> = word_spans(text).into_iter().map(|r| &text[r]).collect();
        assert_eq!(words, vec!["kopi", "énak"]);
    }

    #[test]
    fn test_word_spans_empty() {
        assert!(word_spans("  ...  ").is_empty());
    }
}
