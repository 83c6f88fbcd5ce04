use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::draft::errors::StorageError;
use crate::domain::draft::ports::KeyValueStore;

/// In-memory key-value store adapter
///
/// Stands in for the browser's local storage in tests and headless runs.
/// Writes can be made to fail on demand to exercise the degraded save
/// path, the way a full or locked-down real store would.
pub struct MemoryKeyValueStore {
  entries: Mutex<HashMap<String, String>>,
  fail_writes: AtomicBool,
}

impl MemoryKeyValueStore {
  pub fn new() -> Self {
    Self {
      entries: Mutex::new(HashMap::new()),
      fail_writes: AtomicBool::new(false),
    }
  }

  /// Makes every subsequent `set` fail until turned off again.
  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn len(&self) -> usize {
    self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Default for MemoryKeyValueStore {
  fn default() -> Self {
    Self::new()
  }
}

impl KeyValueStore for MemoryKeyValueStore {
  fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
    let entries = self
      .entries
      .lock()
      .map_err(|_| StorageError::ReadFailed("store lock poisoned".to_string()))?;
    Ok(entries.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(StorageError::WriteFailed("simulated quota exceeded".to_string()));
    }
    let mut entries = self
      .entries
      .lock()
      .map_err(|_| StorageError::WriteFailed("store lock poisoned".to_string()))?;
    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StorageError> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|_| StorageError::WriteFailed("store lock poisoned".to_string()))?;
    entries.remove(key);
    Ok(())
  }
}
