use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Storage read failed: {0}")]
  ReadFailed(String),

  #[error("Storage write failed: {0}")]
  WriteFailed(String),

  #[error("Draft serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),
}
