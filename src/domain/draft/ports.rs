use super::errors::StorageError;

/// Synchronous string key-value storage in the style of a browser's
/// `localStorage`: small payloads, and writes that can fail at any time
/// (quota, privacy mode, detached storage).
pub trait KeyValueStore: Send + Sync {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
  fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
  fn remove(&self, key: &str) -> Result<(), StorageError>;
}
