//! Banned-word dictionary used by the censor engine.
//!
//! A [`BannedWordSet`] is assembled once at startup from [`DEFAULT_BANNED_WORDS`]
//! plus operator-supplied extras (`BAD_WORDS_ID`) and is immutable afterwards,
//! so it can be shared between request handlers without locking.

use crate::utils::text_normalizer::{collapse_repeats, is_word_char};
use std::collections::{HashMap, HashSet};

/// Baseline English dictionary loaded into every [`BannedWordSet::new`].
pub const DEFAULT_BANNED_WORDS: &[&str] = &[
    "arse",
    "arsehole",
    "ass",
    "asshole",
    "assholes",
    "bastard",
    "bastards",
    "bitch",
    "bitches",
    "bitching",
    "blowjob",
    "bollocks",
    "bullshit",
    "camel jockey",
    "chink",
    "cock",
    "cocksucker",
    "cunt",
    "cunts",
    "dick",
    "dickhead",
    "dildo",
    "dyke",
    "fag",
    "faggot",
    "fuck",
    "fucked",
    "fucker",
    "fucking",
    "fucks",
    "goddamn",
    "handjob",
    "horseshit",
    "jackass",
    "jizz",
    "kike",
    "motherfucker",
    "motherfucking",
    "nigga",
    "nigger",
    "piss",
    "pissed",
    "porn",
    "prick",
    "pussy",
    "retard",
    "retarded",
    "shit",
    "shithead",
    "shitty",
    "slut",
    "sluts",
    "son of a bitch",
    "spic",
    "twat",
    "wank",
    "wanker",
    "whore",
    "whores",
];

/// Immutable set of banned words and phrases.
///
/// Terms are stored lowercased and trimmed. Multi-word terms (`"camel jockey"`)
/// match consecutive words regardless of the separators between them.
///
/// A term may only contain word characters (alphanumerics and `_`) and
/// whitespace. Text is matched word by word, so a term such as `"a$$"` could
/// never match as written; such terms are skipped with a warning.
#[derive(Debug, Clone, Default)]
pub struct BannedWordSet {
    terms: HashSet<String>,
    /// Single-word terms keyed by their collapsed form.
    words: HashMap<String, Vec<BannedWord>>,
    /// Multi-word terms split into words, longest first.
    phrases: Vec<Vec<BannedWord>>,
}

/// One banned word as runs of identical characters (`"ass"` is `a×1 s×2`).
#[derive(Debug, Clone, PartialEq, Eq)]
struct BannedWord {
    runs: Vec<(char, usize)>,
}

impl BannedWord {
    fn new(word: &str) -> Self {
        Self {
            runs: char_runs(word),
        }
    }

    /// Returns `true` if `word` spells this term with some letters repeated
    /// more often: same characters in the same order, every run at least as
    /// long as in the term.
    ///
    /// `"fuuuck"` matches `fuck` and `"asss"` matches `ass`, but `"as"` and
    /// `"aas"` do not match `ass`.
    fn matches(&self, word: &str) -> bool {
        let runs = char_runs(word);
        runs.len() == self.runs.len()
            && runs
                .iter()
                .zip(&self.runs)
                .all(|((ch, count), (term_ch, term_count))| ch == term_ch && count >= term_count)
    }
}

fn char_runs(word: &str) -> Vec<(char, usize)> {
    let mut runs: Vec<(char, usize)> = Vec::new();
    for ch in word.chars() {
        match runs.last_mut() {
            Some((last, count)) if *last == ch => *count += 1,
            _ => runs.push((ch, 1)),
        }
    }
    runs
}

impl BannedWordSet {
    /// Builds the set from the default dictionary plus `extra_words`.
    ///
    /// Extra entries are lowercased and trimmed; empty entries are discarded,
    /// entries with characters other than letters, digits, `_` and
    /// whitespace are skipped with a warning.
    pub fn new<I, S>(extra_words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::from_words(DEFAULT_BANNED_WORDS);
        for word in extra_words {
            set.insert(word.as_ref());
        }
        set.sort_phrases();

        tracing::debug!(terms = set.terms.len(), "Banned word set initialized");
        set
    }

    /// Builds a set containing only `words`, without the default dictionary.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for word in words {
            set.insert(word.as_ref());
        }
        set.sort_phrases();
        set
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if `term` (case-insensitive, trimmed) is banned.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(&term.trim().to_lowercase())
    }

    /// Returns how many of the leading `words` (lowercased) form a banned term.
    ///
    /// See [`BannedWord::matches`] for how a single word is compared. Phrases
    /// are tried before single words so the longest term wins.
    pub(crate) fn match_len(&self, words: &[&str]) -> Option<usize> {
        let first = *words.first()?;

        for phrase in &self.phrases {
            if phrase.len() <= words.len()
                && phrase
                    .iter()
                    .zip(words)
                    .all(|(term, word)| term.matches(word))
            {
                return Some(phrase.len());
            }
        }

        let matched = self
            .words
            .get(&collapse_repeats(first))
            .is_some_and(|candidates| candidates.iter().any(|term| term.matches(first)));
        matched.then_some(1)
    }

    fn insert(&mut self, raw: &str) {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            return;
        }

        if !term.chars().all(|ch| ch.is_whitespace() || is_word_char(ch)) {
            tracing::warn!(
                term = %term,
                "Skipping banned term with characters other than letters, digits and spaces"
            );
            return;
        }

        let parts: Vec<&str> = term.split_whitespace().collect();
        if let [word] = parts.as_slice() {
            let entry = self.words.entry(collapse_repeats(word)).or_default();
            let banned = BannedWord::new(word);
            if !entry.contains(&banned) {
                entry.push(banned);
            }
        } else {
            let phrase: Vec<BannedWord> = parts.iter().map(|w| BannedWord::new(w)).collect();
            if !self.phrases.contains(&phrase) {
                self.phrases.push(phrase);
            }
        }

        self.terms.insert(parts.join(" "));
    }

    fn sort_phrases(&mut self) {
        self.phrases.sort_by(|a, b| b.len().cmp(&a.len()));
    }
}
