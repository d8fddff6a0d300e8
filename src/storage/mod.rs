//! Persistent key-value storage
//!
//! Three independently keyed records: `settings`, `words` and `dictionary`.
//! Plain reads that fail fall back to the record's default. Updates read
//! strictly, so a failed or malformed read aborts them before anything is
//! written. Failed writes are reported to the caller.

pub mod memory;

pub use memory::*;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::annotate::matching::comparison_key;
use crate::error::{EasyWordError, Result};
use crate::messaging::WordData;
use crate::session::Settings;

pub const SETTINGS_KEY: &str = "settings";
pub const WORDS_KEY: &str = "words";
pub const DICTIONARY_KEY: &str = "dictionary";

/// Words every new install already knows
pub const DEFAULT_DICTIONARY: [&str; 3] = ["and", "is", "online"];

/// Async get/set store. `get` returns `None` for an absent key.
#[async_trait(?Send)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

// =============================================================================
// WordRepository
// =============================================================================

/// Typed access to the extension's records with their defaults
pub struct WordRepository<S> {
    store: S,
}

impl<S: KeyValueStore> WordRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read a record, using `default` when it is absent, malformed or the
    /// store cannot be reached
    pub async fn get_or_default<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.get(key).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(key, error = %e, "malformed record, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using default");
                default
            }
        }
    }

    /// Read a record for an update: absent gives `default`, an unreachable
    /// store or a malformed record is an error
    pub async fn get_strict<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.store.get(key).await? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                EasyWordError::StorageAccess(format!("malformed {} record: {}", key, e))
            }),
            None => Ok(default),
        }
    }

    pub async fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| EasyWordError::StorageAccess(format!("cannot encode {}: {}", key, e)))?;
        self.store.set(key, value).await
    }

    pub async fn settings(&self) -> Settings {
        self.get_or_default(SETTINGS_KEY, Settings::default()).await
    }

    pub async fn words(&self) -> Vec<String> {
        self.get_or_default(WORDS_KEY, Vec::new()).await
    }

    pub async fn dictionary(&self) -> Vec<String> {
        let default = DEFAULT_DICTIONARY.iter().map(|w| w.to_string()).collect();
        self.get_or_default(DICTIONARY_KEY, default).await
    }

    pub async fn word_data(&self) -> WordData {
        WordData {
            settings: self.settings().await,
            words: self.words().await,
            dictionary: self.dictionary().await,
        }
    }

    pub async fn set_words(&self, words: &[String]) -> Result<()> {
        self.put(WORDS_KEY, &words).await
    }

    /// Append a word unless its comparison key is already stored.
    /// Returns whether the list changed.
    pub async fn add_word(&self, word: &str) -> Result<bool> {
        let mut words: Vec<String> = self.get_strict(WORDS_KEY, Vec::new()).await?;
        let key = comparison_key(word);
        if words.iter().any(|w| comparison_key(w) == key) {
            return Ok(false);
        }
        words.push(word.to_string());
        self.set_words(&words).await?;
        Ok(true)
    }

    /// Remove every stored spelling of a word. Returns whether the list changed.
    pub async fn delete_word(&self, word: &str) -> Result<bool> {
        let words: Vec<String> = self.get_strict(WORDS_KEY, Vec::new()).await?;
        let key = comparison_key(word);
        let kept: Vec<String> = words
            .iter()
            .filter(|w| comparison_key(w) != key)
            .cloned()
            .collect();
        if kept.len() == words.len() {
            return Ok(false);
        }
        self.set_words(&kept).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    fn repo() -> WordRepository<MemoryStore> {
        WordRepository::new(MemoryStore::new())
    }

    #[test]
    fn test_defaults_when_empty() {
        let data = block_on(repo().word_data());
        assert_eq!(data.settings, Settings::default());
        assert!(data.words.is_empty());
        assert_eq!(data.dictionary, vec!["and", "is", "online"]);
    }

    #[test]
    fn test_defaults_when_store_unreachable() {
        let repo = WordRepository::new(MemoryStore::failing());
        let data = block_on(repo.word_data());
        assert_eq!(data.dictionary.len(), 3);
        assert!(data.settings.highlight_enabled);
    }

    #[test]
    fn test_malformed_record_uses_default() {
        let store = MemoryStore::new();
        block_on(store.set(WORDS_KEY, json!("not a list"))).unwrap();
        let repo = WordRepository::new(store);
        assert!(block_on(repo.words()).is_empty());
    }

    #[test]
    fn test_add_word_appends_and_dedups() {
        let repo = repo();
        assert!(block_on(repo.add_word("cat")).unwrap());
        assert!(block_on(repo.add_word("dog")).unwrap());
        assert!(!block_on(repo.add_word("CAT")).unwrap());
        assert_eq!(block_on(repo.words()), vec!["cat", "dog"]);
    }

    #[test]
    fn test_delete_word_by_key() {
        let repo = repo();
        block_on(repo.set_words(&["Cat".to_string(), "dog".to_string()])).unwrap();
        assert!(block_on(repo.delete_word("cat")).unwrap());
        assert!(!block_on(repo.delete_word("cat")).unwrap());
        assert_eq!(block_on(repo.words()), vec!["dog"]);
    }

    #[test]
    fn test_write_failure_propagates() {
        let repo = WordRepository::new(MemoryStore::failing());
        let err = block_on(repo.add_word("cat")).unwrap_err();
        assert!(matches!(err, EasyWordError::StorageAccess(_)));
    }

    /// Reads fail while writes go through
    struct UnreadableStore(MemoryStore);

    #[async_trait(?Send)]
    impl KeyValueStore for UnreadableStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>> {
            Err(EasyWordError::StorageAccess("read failed".to_string()))
        }

        async fn set(&self, key: &str, value: Value) -> Result<()> {
            self.0.set(key, value).await
        }
    }

    fn stored(repo: &WordRepository<UnreadableStore>) -> Option<Value> {
        repo.store().0.snapshot().get(WORDS_KEY).cloned()
    }

    #[test]
    fn test_failed_read_aborts_add_without_writing() {
        let store = MemoryStore::new();
        block_on(store.set(WORDS_KEY, json!(["cat", "dog", "owl"]))).unwrap();
        let repo = WordRepository::new(UnreadableStore(store));

        let err = block_on(repo.add_word("fox")).unwrap_err();

        assert!(matches!(err, EasyWordError::StorageAccess(_)));
        assert_eq!(stored(&repo), Some(json!(["cat", "dog", "owl"])));
    }

    #[test]
    fn test_failed_read_aborts_delete_without_writing() {
        let store = MemoryStore::new();
        block_on(store.set(WORDS_KEY, json!(["cat", "dog"]))).unwrap();
        let repo = WordRepository::new(UnreadableStore(store));

        assert!(block_on(repo.delete_word("cat")).is_err());
        assert_eq!(stored(&repo), Some(json!(["cat", "dog"])));
    }

    #[test]
    fn test_malformed_record_aborts_add() {
        let store = MemoryStore::new();
        block_on(store.set(WORDS_KEY, json!({ "cat": true }))).unwrap();
        let repo = WordRepository::new(store);

        let err = block_on(repo.add_word("fox")).unwrap_err();

        assert!(matches!(err, EasyWordError::StorageAccess(_)));
        assert_eq!(
            repo.store().snapshot().get(WORDS_KEY),
            Some(&json!({ "cat": true }))
        );
    }

    #[test]
    fn test_stored_settings_read_back() {
        let repo = repo();
        let settings = Settings {
            highlight_enabled: false,
            ..Settings::default()
        };
        block_on(repo.put(SETTINGS_KEY, &settings)).unwrap();
        assert_eq!(block_on(repo.settings()), settings);
    }
}
