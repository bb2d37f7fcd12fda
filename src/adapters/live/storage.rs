//! Live key-value storage backed by one file per key.

use std::path::PathBuf;

use crate::ports::{KeyValueStore, PortError};

/// Stores each key as `<root>/<key>.json` on the real filesystem.
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, PortError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(format!("Invalid storage key: {key:?}").into());
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortError> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read {}: {e}", path.display()).into()),
        }
    }

    /// Writes `<key>.json.tmp` first and renames it over `<key>.json`, so a
    /// crash mid-write leaves the previous value intact.
    fn set(&self, key: &str, value: &str) -> Result<(), PortError> {
        let path = self.key_path(key)?;
        std::fs::create_dir_all(&self.root)
            .map_err(|e| format!("Failed to create {}: {e}", self.root.display()))?;

        let tmp = path.with_extension("json.tmp");
        if let Err(e) = std::fs::write(&tmp, value) {
            let _ = std::fs::remove_file(&tmp);
            return Err(format!("Failed to write {}: {e}", tmp.display()).into());
        }
        std::fs::rename(&tmp, &path)
            .map_err(|e| format!("Failed to move {}: {e}", path.display()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = FileKeyValueStore::new(std::env::temp_dir().join("partcart_kv_missing"));
        assert_eq!(store.get("nothing-here").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = std::env::temp_dir().join("partcart_kv_round_trip");
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileKeyValueStore::new(&dir);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("cart.json").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn overwrite_replaces_value_without_leaving_temp_file() {
        let dir = std::env::temp_dir().join("partcart_kv_overwrite");
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileKeyValueStore::new(&dir);

        store.set("cart", r#"[{"id":"A","quantity":1}]"#).unwrap();
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(!dir.join("cart.json.tmp").exists());

        let names: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["cart.json"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stale_temp_file_does_not_shadow_value() {
        let dir = std::env::temp_dir().join("partcart_kv_stale_tmp");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let tmp = dir.join("cart.json.tmp");
        std::fs::write(&tmp, "{half a wri").unwrap();
        let store = FileKeyValueStore::new(&dir);

        assert_eq!(store.get("cart").unwrap(), None);
        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let store = FileKeyValueStore::new(std::env::temp_dir().join("partcart_kv_escape"));
        assert!(store.set("../cart", "[]").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.get("").is_err());
    }
}
