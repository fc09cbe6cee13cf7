//! In-memory key-value store, the test double for the session gate and any
//! other application-state flags.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{KeyValueStore, StoreError};

/// Process-local key-value store. Cheap to clone; clones share the map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().expect("key-value store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("key-value store lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().expect("key-value store lock poisoned");
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("ngo_auth").unwrap(), None);

        store.set("ngo_auth", "true").unwrap();
        assert_eq!(store.get("ngo_auth").unwrap(), Some("true".to_string()));

        store.remove("ngo_auth").unwrap();
        assert_eq!(store.get("ngo_auth").unwrap(), None);
    }

    #[test]
    fn clones_share_state() {
        let store = MemoryKeyValueStore::new();
        let clone = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(clone.get("k").unwrap(), Some("v".to_string()));
    }
}
