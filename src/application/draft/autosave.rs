use std::time::{Duration, Instant};

use crate::domain::draft::{AutosaveTimer, DraftKey, DraftStore, InvoiceDraft, SaveState};

/// One editing session's autosave: restores on open, debounces saves
/// while edits come in, and leaves nothing armed on close.
///
/// The session owns no clock and spawns nothing. The shell reports edits
/// with [`record_edit`](Self::record_edit) and polls
/// [`tick`](Self::tick); both take the current instant, which keeps the
/// debounce testable without sleeping.
pub struct AutosaveSession {
  drafts: DraftStore,
  key: DraftKey,
  timer: AutosaveTimer,
}

impl AutosaveSession {
  /// Opens a session and restores whatever draft survives under the key.
  /// Restoring happens before any save can fire, so a reload right after
  /// a crash cannot lose the stored draft to an eager empty-form save.
  pub fn open(
    drafts: DraftStore,
    key: DraftKey,
    window: Duration,
  ) -> (Self, Option<InvoiceDraft>) {
    let restored = drafts.restore(&key);
    let session = Self {
      drafts,
      key,
      timer: AutosaveTimer::new(window),
    };
    (session, restored)
  }

  pub fn key(&self) -> DraftKey {
    self.key
  }

  pub fn save_state(&self) -> SaveState {
    self.drafts.state()
  }

  /// Restarts the debounce window. Call on every edit.
  pub fn record_edit(&mut self, now: Instant) {
    self.timer.record_edit(now);
  }

  /// Saves the draft once the debounce window has elapsed since the last
  /// edit. Returns the resulting save state when a save ran, `None` while
  /// the window is still open or no edit is pending.
  pub fn tick(&mut self, draft: &InvoiceDraft, now: Instant) -> Option<SaveState> {
    if self.timer.fire(now) {
      Some(self.drafts.save(&self.key, draft))
    } else {
      None
    }
  }

  /// Saves immediately and disarms the pending window. Used when the form
  /// is about to go away with edits still debouncing.
  pub fn flush(&mut self, draft: &InvoiceDraft) -> SaveState {
    self.timer.cancel();
    self.drafts.save(&self.key, draft)
  }

  /// Drops the stored draft, typically after a successful submission.
  pub fn discard(&self) {
    self.drafts.discard(&self.key);
  }

  /// Disarms the timer so nothing fires after the form is gone.
  pub fn close(&mut self) {
    self.timer.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::CustomerRef;
  use crate::domain::draft::KeyValueStore;
  use crate::infrastructure::storage::MemoryKeyValueStore;
  use std::sync::Arc;
  use uuid::Uuid;

  const WINDOW: Duration = Duration::from_secs(30);

  fn meaningful_draft() -> InvoiceDraft {
    let mut draft = InvoiceDraft::new();
    draft.customer = Some(CustomerRef {
      id: Uuid::new_v4(),
      name: "Acme SARL".to_string(),
    });
    draft
  }

  fn open_session(storage: Arc<MemoryKeyValueStore>) -> (AutosaveSession, Option<InvoiceDraft>) {
    AutosaveSession::open(DraftStore::new(storage), DraftKey::Create, WINDOW)
  }

  #[test]
  fn test_open_restores_the_stored_draft() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let draft = meaningful_draft();
    let mut drafts = DraftStore::new(storage.clone());
    drafts.save(&DraftKey::Create, &draft);

    let (_, restored) = open_session(storage);
    assert_eq!(restored, Some(draft));
  }

  #[test]
  fn test_nothing_fires_without_an_edit() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, restored) = open_session(storage.clone());
    assert_eq!(restored, None);

    let draft = meaningful_draft();
    let start = Instant::now();
    assert_eq!(session.tick(&draft, start + WINDOW * 10), None);
    assert_eq!(storage.get("invoice_draft_v1").unwrap(), None);
  }

  #[test]
  fn test_save_fires_after_a_quiet_window() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, _) = open_session(storage.clone());
    let draft = meaningful_draft();
    let start = Instant::now();

    session.record_edit(start);
    assert_eq!(session.tick(&draft, start + Duration::from_secs(29)), None);
    assert_eq!(
      session.tick(&draft, start + Duration::from_secs(30)),
      Some(SaveState::Saved)
    );
    assert!(storage.get("invoice_draft_v1").unwrap().is_some());

    // The deadline is consumed; quiet ticks after it stay silent.
    assert_eq!(session.tick(&draft, start + Duration::from_secs(31)), None);
  }

  #[test]
  fn test_each_edit_restarts_the_window() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, _) = open_session(storage);
    let draft = meaningful_draft();
    let start = Instant::now();

    session.record_edit(start);
    session.record_edit(start + Duration::from_secs(20));
    assert_eq!(session.tick(&draft, start + Duration::from_secs(35)), None);
    assert_eq!(
      session.tick(&draft, start + Duration::from_secs(50)),
      Some(SaveState::Saved)
    );
  }

  #[test]
  fn test_meaningless_draft_is_not_written() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, _) = open_session(storage.clone());
    let start = Instant::now();

    session.record_edit(start);
    let state = session.tick(&InvoiceDraft::new(), start + WINDOW);
    assert_eq!(state, Some(SaveState::Idle));
    assert_eq!(storage.get("invoice_draft_v1").unwrap(), None);
  }

  #[test]
  fn test_flush_saves_immediately_and_disarms() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, _) = open_session(storage.clone());
    let draft = meaningful_draft();
    let start = Instant::now();

    session.record_edit(start);
    assert_eq!(session.flush(&draft), SaveState::Saved);
    assert!(storage.get("invoice_draft_v1").unwrap().is_some());
    assert_eq!(session.tick(&draft, start + WINDOW * 2), None);
  }

  #[test]
  fn test_close_disarms_the_pending_save() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let (mut session, _) = open_session(storage.clone());
    let draft = meaningful_draft();
    let start = Instant::now();

    session.record_edit(start);
    session.close();
    assert_eq!(session.tick(&draft, start + WINDOW * 2), None);
    assert_eq!(storage.get("invoice_draft_v1").unwrap(), None);
  }

  #[test]
  fn test_discard_drops_the_stored_draft() {
    let storage = Arc::new(MemoryKeyValueStore::new());
    let draft = meaningful_draft();
    let mut drafts = DraftStore::new(storage.clone());
    drafts.save(&DraftKey::Create, &draft);

    let (session, restored) = open_session(storage.clone());
    assert!(restored.is_some());
    session.discard();
    assert_eq!(storage.get("invoice_draft_v1").unwrap(), None);
  }
}
