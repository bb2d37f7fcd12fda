//! In-memory adapters.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::ports::{KeyValueStore, PortError};

const POISONED: &str = "memory store lock poisoned";

/// Key-value storage that lives only as long as the process.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with a single key.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut values) = store.values.lock() {
            values.insert(key.into(), value.into());
        }
        store
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        let values = self.values.lock().map_err(|_| POISONED)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        let mut values = self.values.lock().map_err(|_| POISONED)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_overwrites_values() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "[1]").unwrap();
        store.set("cart", "[2]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn with_value_seeds_the_store() {
        let store = MemoryKeyValueStore::with_value("cart", "[]");
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }
}
