// ── In-memory key-value backend ──

use dashmap::DashMap;

use super::KeyValueStore;
use crate::error::CoreError;

/// Process-lifetime key-value store backed by a `DashMap`.
///
/// Used for ephemeral sessions and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.get("TOKEN").unwrap().is_none());

        store.set("TOKEN", "abc").unwrap();
        assert_eq!(store.get("TOKEN").unwrap().as_deref(), Some("abc"));

        store.set("TOKEN", "def").unwrap();
        assert_eq!(store.get("TOKEN").unwrap().as_deref(), Some("def"));

        store.remove("TOKEN").unwrap();
        assert!(store.get("TOKEN").unwrap().is_none());
    }

    #[test]
    fn removing_missing_key_is_ok() {
        assert!(MemoryStore::new().remove("nope").is_ok());
    }
}
