use std::sync::Arc;
use std::time::{Duration, Instant};

use super::entities::InvoiceDraft;
use super::ports::KeyValueStore;
use super::value_objects::{DraftKey, SaveState};

/// Persists the in-progress invoice draft in a key-value store.
///
/// Storage trouble never escapes as an error: a failed write parks the
/// store in `SaveFailed` so the caller can surface a warning, and a failed
/// or malformed read simply restores nothing. Editing and submission do not
/// depend on this service working.
#[derive(Clone)]
pub struct DraftStore {
  storage: Arc<dyn KeyValueStore>,
  state: SaveState,
}

impl DraftStore {
  pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
    Self {
      storage,
      state: SaveState::Idle,
    }
  }

  pub fn state(&self) -> SaveState {
    self.state
  }

  /// Serializes and stores the draft, reporting the resulting save state.
  ///
  /// Drafts without meaningful progress are skipped entirely so that a
  /// blank form never creates or overwrites an entry.
  pub fn save(&mut self, key: &DraftKey, draft: &InvoiceDraft) -> SaveState {
    if !draft.is_meaningful() {
      return self.state;
    }

    self.state = SaveState::Saving;
    self.state = match serde_json::to_string(draft) {
      Ok(json) => match self.storage.set(&key.storage_key(), &json) {
        Ok(()) => SaveState::Saved,
        Err(err) => {
          tracing::warn!("Draft save failed for {}: {}", key.storage_key(), err);
          SaveState::SaveFailed
        }
      },
      Err(err) => {
        tracing::warn!("Draft serialization failed: {}", err);
        SaveState::SaveFailed
      }
    };
    self.state
  }

  /// Restores a previously saved draft.
  ///
  /// Storage failures, payloads that no longer parse as a draft and drafts
  /// without meaningful content all restore nothing; a stale or corrupt
  /// entry must never resurrect as form state.
  pub fn restore(&self, key: &DraftKey) -> Option<InvoiceDraft> {
    let raw = match self.storage.get(&key.storage_key()) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(err) => {
        tracing::warn!("Draft restore failed for {}: {}", key.storage_key(), err);
        return None;
      }
    };

    match serde_json::from_str::<InvoiceDraft>(&raw) {
      Ok(draft) if draft.is_meaningful() => Some(draft),
      Ok(_) => {
        tracing::debug!(
          "Ignoring stored draft without meaningful content under {}",
          key.storage_key()
        );
        None
      }
      Err(err) => {
        tracing::debug!(
          "Discarding malformed draft under {}: {}",
          key.storage_key(),
          err
        );
        None
      }
    }
  }

  /// Removes the stored draft, typically after a successful submission.
  pub fn discard(&self, key: &DraftKey) {
    if let Err(err) = self.storage.remove(&key.storage_key()) {
      tracing::debug!("Draft discard failed for {}: {}", key.storage_key(), err);
    }
  }
}

/// Restartable debounce deadline for autosave.
///
/// Every edit pushes the deadline a full window into the future, so the
/// save fires only once the user has been idle for the whole window. The
/// timer owns no task or thread; whoever drives the form polls `fire` from
/// its own loop.
#[derive(Debug, Clone)]
pub struct AutosaveTimer {
  window: Duration,
  deadline: Option<Instant>,
}

impl AutosaveTimer {
  pub fn new(window: Duration) -> Self {
    Self {
      window,
      deadline: None,
    }
  }

  pub fn record_edit(&mut self, now: Instant) {
    self.deadline = Some(now + self.window);
  }

  pub fn is_armed(&self) -> bool {
    self.deadline.is_some()
  }

  /// True exactly once per elapsed window; firing disarms the timer until
  /// the next edit.
  pub fn fire(&mut self, now: Instant) -> bool {
    match self.deadline {
      Some(deadline) if now >= deadline => {
        self.deadline = None;
        true
      }
      _ => false,
    }
  }

  pub fn cancel(&mut self) {
    self.deadline = None;
  }
}
