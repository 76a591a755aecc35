//! Format-preserving profanity censoring.
//!
//! Detection runs on a normalized copy of the text (lowercased, repeated
//! characters collapsed) so `"FUUUCK"` and `"annjjinnng"` are caught. The
//! censored result is then re-projected onto the original string token by
//! token, so clean words keep their casing and punctuation.
//!
//! # Algorithm
//!
//! 1. Normalize the input and look for banned words or phrases
//! 2. Replace every match in the normalized text with [`MASK`]
//! 3. Split the original and the censored normalized text on `[\s.,!?-]+`
//! 4. Emit the censored token where it contains the mask, the original
//!    token everywhere else
//!
//! If step 3 yields different token counts (lowercasing changed the shape of
//! the text), the censored normalized text is returned as-is.

use crate::domain::banned_words::BannedWordSet;
use crate::utils::text_normalizer::{normalize_text, split_tokens, word_spans};
use std::borrow::Cow;
use std::ops::Range;

/// Fixed-width placeholder substituted for every banned term.
pub const MASK: &str = "****";

/// Profanity detector and censor over an immutable [`BannedWordSet`].
///
/// Stateless apart from the word set, so a single instance is shared across
/// all requests behind an `Arc`.
#[derive(Debug, Clone)]
pub struct CensorEngine {
    words: BannedWordSet,
}

impl CensorEngine {
    pub fn new(words: BannedWordSet) -> Self {
        Self { words }
    }

    pub fn banned_words(&self) -> &BannedWordSet {
        &self.words
    }

    /// Returns `true` if the text contains a banned word after normalization.
    pub fn contains_match(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        let lowered = text.to_lowercase();
        let normalized = normalize_text(text);
        !self.find_matches(&lowered, &normalized).is_empty()
    }

    /// Censors banned words while preserving the original formatting.
    ///
    /// Returns the input borrowed and byte-identical when it is blank or
    /// contains nothing banned.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let engine = CensorEngine::new(BannedWordSet::from_words(["foo"]));
    /// assert_eq!(engine.censor("Hello, World! FOO bar."), "Hello, World! **** bar.");
    /// ```
    pub fn censor<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if text.trim().is_empty() {
            return Cow::Borrowed(text);
        }

        let lowered = text.to_lowercase();
        let normalized = normalize_text(text);

        let matches = self.find_matches(&lowered, &normalized);
        if matches.is_empty() {
            return Cow::Borrowed(text);
        }

        let censored_normalized = mask_spans(&normalized, &matches);
        tracing::debug!(masked = matches.len(), "Censored banned terms");

        Cow::Owned(reproject(text, &censored_normalized).unwrap_or(censored_normalized))
    }

    /// Finds byte ranges of banned terms inside `normalized`.
    fn find_matches(&self, lowered: &str, normalized: &str) -> Vec<Range<usize>> {
        let spans = word_spans(normalized);
        let normalized_words: Vec<&str> = spans.iter().map(|r| &normalized[r.clone()]).collect();

        // Collapsing never merges or removes words, so both sequences line up.
        // If lowercasing produced a different shape, match on normalized words only.
        let lowered_spans = word_spans(lowered);
        let lowered_words: Vec<&str> = if lowered_spans.len() == spans.len() {
            lowered_spans.iter().map(|r| &lowered[r.clone()]).collect()
        } else {
            normalized_words.clone()
        };

        let mut matches = Vec::new();
        let mut idx = 0;
        while idx < normalized_words.len() {
            match self.words.match_len(&lowered_words[idx..]) {
                Some(len) => {
                    matches.push(spans[idx].start..spans[idx + len - 1].end);
                    idx += len;
                }
                None => idx += 1,
            }
        }

        matches
    }
}

/// Replaces each (sorted, non-overlapping) span with [`MASK`].
fn mask_spans(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for span in spans {
        out.push_str(&text[last..span.start]);
        out.push_str(MASK);
        last = span.end;
    }
    out.push_str(&text[last..]);

    out
}

/// Projects censored tokens back onto the original text.
///
/// Returns `None` when the two texts do not split into the same number of
/// tokens.
fn reproject(original: &str, censored_normalized: &str) -> Option<String> {
    let original_parts = split_tokens(original);
    let censored_parts = split_tokens(censored_normalized);

    if original_parts.len() != censored_parts.len() {
        tracing::debug!(
            original_tokens = original_parts.len(),
            censored_tokens = censored_parts.len(),
            "Token alignment lost, returning normalized censored text"
        );
        return None;
    }

    let projected = original_parts
        .iter()
        .zip(&censored_parts)
        .map(|(original, censored)| {
            if censored.contains(MASK) {
                *censored
            } else {
                *original
            }
        })
        .collect();

    Some(projected)
}
