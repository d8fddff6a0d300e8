//! Tracked-word list and known-word dictionary

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::annotate::matching::comparison_key;

// =============================================================================
// TrackedWords
// =============================================================================

/// Ordered list of tracked words, unique by comparison key.
///
/// Words keep the casing they were added with. Insertion order is kept;
/// display order is most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct TrackedWords {
    words: Vec<String>,
}

impl From<Vec<String>> for TrackedWords {
    fn from(words: Vec<String>) -> Self {
        let mut tracked = Self::default();
        for word in words {
            tracked.push(word);
        }
        tracked
    }
}

impl From<TrackedWords> for Vec<String> {
    fn from(tracked: TrackedWords) -> Self {
        tracked.words
    }
}

impl TrackedWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.words.iter()
    }

    /// Most recently added first
    pub fn display_order(&self) -> impl Iterator<Item = &String> {
        self.words.iter().rev()
    }

    pub fn position(&self, word: &str) -> Option<usize> {
        let key = comparison_key(word);
        self.words.iter().position(|w| comparison_key(w) == key)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.position(word).is_some()
    }

    /// The stored spelling of a tracked word
    pub fn get(&self, word: &str) -> Option<&str> {
        self.position(word).map(|i| self.words[i].as_str())
    }

    /// Append a word. Returns false if its key is already tracked.
    pub fn push(&mut self, word: impl Into<String>) -> bool {
        let word = word.into();
        if self.contains(&word) {
            return false;
        }
        self.words.push(word);
        true
    }

    /// Remove a word by key, returning the stored spelling
    pub fn remove(&mut self, word: &str) -> Option<String> {
        self.position(word).map(|i| self.words.remove(i))
    }

    /// Empty the list, returning what was tracked
    pub fn clear(&mut self) -> Vec<String> {
        std::mem::take(&mut self.words)
    }
}

// =============================================================================
// Dictionary
// =============================================================================

/// Words the user already knows. Read-only for the page session.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: Vec<String>,
    keys: HashSet<String>,
}

impl Dictionary {
    pub fn new(words: Vec<String>) -> Self {
        let keys = words.iter().map(|w| comparison_key(w)).collect();
        Self { words, keys }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.keys.contains(&comparison_key(word))
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
