//! Durable key-value storage port.

use super::PortError;

/// String key-value storage that survives between sessions.
///
/// Mirrors the browser's `localStorage`: values are opaque strings under
/// flat string keys.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PortError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (quota, permissions, etc.).
    fn set(&self, key: &str, value: &str) -> Result<(), PortError>;
}
