//! In-memory store for native builds and tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::KeyValueStore;
use crate::error::{EasyWordError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, Value>>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails
    pub fn failing() -> Self {
        let store = Self::default();
        store.unavailable.set(true);
        store
    }

    /// Toggle simulated outages
    pub fn set_available(&self, available: bool) {
        self.unavailable.set(!available);
    }

    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.records.borrow().clone()
    }

    fn check(&self) -> Result<()> {
        if self.unavailable.get() {
            Err(EasyWordError::StorageAccess("store unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        self.check()?;
        Ok(self.records.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.check()?;
        self.records.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_get_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(block_on(store.get("missing")).unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        block_on(store.set("words", json!(["a"]))).unwrap();
        assert_eq!(block_on(store.get("words")).unwrap(), Some(json!(["a"])));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_outage_toggle() {
        let store = MemoryStore::new();
        store.set_available(false);
        assert!(block_on(store.get("x")).is_err());
        store.set_available(true);
        assert!(block_on(store.get("x")).is_ok());
    }
}
