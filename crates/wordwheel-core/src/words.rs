//! Committed words and the submitted word list.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text shown for an empty word list.
pub const EMPTY_LIST_PLACEHOLDER: &str = "(No words yet)";

/// A committed word. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    /// Build a word from letters in selection order.
    ///
    /// Returns `None` for an empty selection.
    pub fn from_letters(letters: &[char]) -> Option<Self> {
        if letters.is_empty() {
            return None;
        }
        Some(Self(letters.iter().collect()))
    }

    /// Build a word from text. Returns `None` for an empty string.
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        (!text.is_empty()).then_some(Self(text))
    }

    /// The word as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of letters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::new(value).ok_or("word must not be empty")
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// Ordered list of committed words.
///
/// Append-only apart from an explicit [`WordList::clear`]. Submitting hands
/// out the full list and leaves it in place, so a growing list can be
/// submitted repeatedly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Create an empty word list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word. Returns false (and does nothing) for an empty word.
    pub fn commit(&mut self, word: Word) -> bool {
        if word.is_empty() {
            return false;
        }
        log::debug!("Committed word {}", word);
        self.words.push(word);
        true
    }

    /// Remove every word.
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// The full current list, for the submit collaborator.
    pub fn submit(&self) -> Vec<Word> {
        log::info!("Submitting {} word(s)", self.words.len());
        self.words.clone()
    }

    /// Words in commit order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Comma-separated list for display.
    pub fn display(&self) -> String {
        if self.words.is_empty() {
            return EMPTY_LIST_PLACEHOLDER.to_string();
        }
        self.words
            .iter()
            .map(Word::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
