//! Word lookup.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// What a dictionary knows about a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Normalized (lower-case, trimmed) word.
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            definition: None,
        }
    }
}

/// Source of word entries.
pub trait Dictionary {
    /// Look a word up. Unknown words are `None`.
    fn lookup(&self, word: &str) -> Option<WordEntry>;

    /// Whether the word is known.
    fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }
}

/// Lookup key for a word.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Dictionary built from a plain word list.
#[derive(Debug, Clone, Default)]
pub struct WordListDictionary {
    words: HashSet<String>,
}

impl WordListDictionary {
    /// Parse newline-separated text. Blank lines are skipped.
    pub fn from_text(text: &str) -> Self {
        let words: HashSet<String> = text
            .lines()
            .map(normalize)
            .filter(|word| !word.is_empty())
            .collect();
        log::info!("Loaded {} dictionary words", words.len());
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn lookup(&self, word: &str) -> Option<WordEntry> {
        let key = normalize(word);
        self.words.contains(&key).then(|| WordEntry::new(key))
    }
}

/// Memoizes lookups against a slower inner dictionary.
///
/// Misses are cached too, so each word hits the inner source once.
pub struct CachedDictionary<D> {
    inner: D,
    cache: RwLock<HashMap<String, Option<WordEntry>>>,
}

impl<D: Dictionary> CachedDictionary<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached words, hits and misses alike.
    pub fn cached_len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Dictionary> Dictionary for CachedDictionary<D> {
    fn lookup(&self, word: &str) -> Option<WordEntry> {
        let key = normalize(word);
        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(&key) {
                return entry.clone();
            }
        }

        let entry = self.inner.lookup(&key);
        match self.cache.write() {
            Ok(mut cache) => {
                cache.insert(key, entry.clone());
            }
            Err(e) => log::warn!("Dictionary cache unavailable: {}", e),
        }
        entry
    }
}
