use std::sync::Arc;
use uuid::Uuid;

use crate::domain::invoice::{ApiFailure, InvoiceApi};

pub const DELETED_NOTICE: &str = "Invoice deleted.";
pub const ALREADY_GONE_NOTICE: &str = "This invoice no longer exists; nothing was deleted.";
pub const BLOCKED_NOTICE: &str = "This invoice has been finalized and can no longer be deleted.";
pub const FAILED_NOTICE: &str = "The invoice could not be deleted. Please try again.";

#[derive(Debug)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: Uuid,
}

/// How a deletion request ended, from the list screen's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionOutcome {
  Succeeded,
  /// The server no longer has the invoice. Someone else deleted it first.
  AlreadyGone,
  /// The server refuses to delete this invoice.
  Blocked,
  Failed,
}

impl DeletionOutcome {
  pub fn classify(result: Result<(), ApiFailure>) -> Self {
    match result {
      Ok(()) => DeletionOutcome::Succeeded,
      Err(failure) => match failure.status_code() {
        Some(404) => DeletionOutcome::AlreadyGone,
        Some(409) => DeletionOutcome::Blocked,
        _ => DeletionOutcome::Failed,
      },
    }
  }

  pub fn notice(&self) -> Notice {
    match self {
      DeletionOutcome::Succeeded => Notice {
        severity: NoticeSeverity::Success,
        message: DELETED_NOTICE,
      },
      DeletionOutcome::AlreadyGone => Notice {
        severity: NoticeSeverity::Warning,
        message: ALREADY_GONE_NOTICE,
      },
      DeletionOutcome::Blocked => Notice {
        severity: NoticeSeverity::Error,
        message: BLOCKED_NOTICE,
      },
      DeletionOutcome::Failed => Notice {
        severity: NoticeSeverity::Error,
        message: FAILED_NOTICE,
      },
    }
  }

  /// Text for the screen-reader live region; announced even when the
  /// visible notice is dismissed early.
  pub fn announcement(&self) -> &'static str {
    self.notice().message
  }

  /// An invoice that was already gone still disappeared from the server,
  /// so the list is stale either way.
  pub fn should_refresh_list(&self) -> bool {
    matches!(self, DeletionOutcome::Succeeded | DeletionOutcome::AlreadyGone)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
  Success,
  Warning,
  Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
  pub severity: NoticeSeverity,
  pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletionState {
  Idle,
  /// The confirmation dialog is open for this invoice.
  ConfirmPending(Uuid),
  /// The delete request is in flight; the dialog stays up, inert.
  Requesting(Uuid),
}

/// Drives the confirm-then-delete dialog. One deletion at a time: a new
/// request is ignored until the current one settles, and settling always
/// closes the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletionFlow {
  state: DeletionState,
}

impl DeletionFlow {
  pub fn new() -> Self {
    Self {
      state: DeletionState::Idle,
    }
  }

  pub fn state(&self) -> DeletionState {
    self.state
  }

  pub fn is_dialog_open(&self) -> bool {
    !matches!(self.state, DeletionState::Idle)
  }

  /// Opens the confirmation dialog. Returns false when a deletion is
  /// already underway.
  pub fn request(&mut self, invoice_id: Uuid) -> bool {
    if self.state != DeletionState::Idle {
      return false;
    }
    self.state = DeletionState::ConfirmPending(invoice_id);
    true
  }

  /// Closes the dialog without deleting. Ignored once the request is in
  /// flight; an in-flight delete cannot be taken back.
  pub fn cancel(&mut self) {
    if let DeletionState::ConfirmPending(_) = self.state {
      self.state = DeletionState::Idle;
    }
  }

  /// Confirms the pending deletion and yields the invoice to delete.
  pub fn confirm(&mut self) -> Option<Uuid> {
    match self.state {
      DeletionState::ConfirmPending(invoice_id) => {
        self.state = DeletionState::Requesting(invoice_id);
        Some(invoice_id)
      }
      _ => None,
    }
  }

  /// Records the outcome of the in-flight request and closes the dialog.
  pub fn settle(&mut self, outcome: DeletionOutcome) -> Notice {
    self.state = DeletionState::Idle;
    outcome.notice()
  }
}

impl Default for DeletionFlow {
  fn default() -> Self {
    Self::new()
  }
}

pub struct DeleteInvoiceUseCase {
  api: Arc<dyn InvoiceApi>,
}

impl DeleteInvoiceUseCase {
  pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
    Self { api }
  }

  /// Never fails: every result collapses into an outcome the dialog can
  /// settle with.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> DeletionOutcome {
    let result = self.api.delete_invoice(command.invoice_id).await;
    if let Err(failure) = &result {
      tracing::warn!("Invoice {} deletion failed: {}", command.invoice_id, failure);
    }
    DeletionOutcome::classify(result)
  }
}
