//! Page-session context
//!
//! Built once per page load from the `GET_DATA` answer and owned by the
//! interaction controller. Dropped with the page.

use super::settings::Settings;
use super::words::{Dictionary, TrackedWords};
use crate::messaging::WordData;

#[derive(Debug, Clone)]
pub struct SessionState {
    pub settings: Settings,
    pub words: TrackedWords,
    pub dictionary: Dictionary,
}

impl Default for SessionState {
    /// State before the store has answered: highlighting off, nothing tracked
    fn default() -> Self {
        Self {
            settings: Settings::disabled(),
            words: TrackedWords::new(),
            dictionary: Dictionary::default(),
        }
    }
}

impl From<WordData> for SessionState {
    fn from(data: WordData) -> Self {
        Self {
            settings: data.settings,
            words: TrackedWords::from(data.words),
            dictionary: Dictionary::new(data.dictionary),
        }
    }
}

impl SessionState {
    pub fn is_known(&self, word: &str) -> bool {
        self.dictionary.contains(word)
    }

    pub fn is_tracked(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inert() {
        let state = SessionState::default();
        assert!(!state.settings.highlight_enabled);
        assert!(state.words.is_empty());
        assert!(state.dictionary.is_empty());
    }

    #[test]
    fn test_from_word_data() {
        let state = SessionState::from(WordData {
            settings: Settings::default(),
            words: vec!["cat".to_string(), "Cat".to_string()],
            dictionary: vec!["is".to_string()],
        });
        assert_eq!(state.words.len(), 1);
        assert!(state.is_tracked("CAT"));
        assert!(state.is_known("IS"));
    }
}
