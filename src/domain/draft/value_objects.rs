use uuid::Uuid;

const DRAFT_KEY_PREFIX: &str = "invoice_draft";
// Bumped whenever the persisted draft shape changes incompatibly; entries
// written under an older version then fail the restore parse and are ignored.
const DRAFT_KEY_VERSION: &str = "v1";

/// Identifies where a draft is stored.
///
/// There is one well-known slot for the invoice being created and one slot
/// per existing invoice being edited, so parallel edits never clobber each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftKey {
  Create,
  Invoice(Uuid),
}

impl DraftKey {
  pub fn storage_key(&self) -> String {
    match self {
      DraftKey::Create => format!("{}_{}", DRAFT_KEY_PREFIX, DRAFT_KEY_VERSION),
      DraftKey::Invoice(id) => format!("{}_{}_{}", DRAFT_KEY_PREFIX, id, DRAFT_KEY_VERSION),
    }
  }
}

// Save lifecycle of the draft store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SaveState {
  #[default]
  Idle,
  Saving,
  Saved,
  SaveFailed,
}

impl SaveState {
  pub fn as_str(&self) -> &'static str {
    match self {
      SaveState::Idle => "idle",
      SaveState::Saving => "saving",
      SaveState::Saved => "saved",
      SaveState::SaveFailed => "save_failed",
    }
  }

  /// A failed save degrades the experience but never blocks editing; the
  /// caller surfaces this warning instead.
  pub fn warning_message(&self) -> Option<&'static str> {
    match self {
      SaveState::SaveFailed => Some("Your changes are no longer being backed up locally."),
      _ => None,
    }
  }
}
