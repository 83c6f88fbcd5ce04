use std::sync::Arc;
use uuid::Uuid;

use crate::domain::draft::{DraftKey, InvoiceDraft};
use crate::domain::invoice::{InvoiceApi, LoadError, ServerInvoice};

#[derive(Debug)]
pub struct LoadInvoiceCommand {
  pub invoice_id: Uuid,
}

/// Everything the edit screen needs to start: the server copy to diff
/// against on submit, the editable draft built from it, and the storage
/// key its autosaves go under.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadInvoiceResponse {
  pub original: ServerInvoice,
  pub draft: InvoiceDraft,
  pub draft_key: DraftKey,
}

pub struct LoadInvoiceUseCase {
  api: Arc<dyn InvoiceApi>,
}

impl LoadInvoiceUseCase {
  pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
    Self { api }
  }

  /// Fetches the invoice and turns it into an editable draft. Finalized
  /// invoices are immutable, so loading one for editing is refused.
  pub async fn execute(
    &self,
    command: LoadInvoiceCommand,
  ) -> Result<LoadInvoiceResponse, LoadError> {
    let original = self.api.fetch_invoice(command.invoice_id).await?;
    if original.finalized {
      tracing::info!("Invoice {} is finalized, editing refused", original.id);
      return Err(LoadError::Finalized);
    }
    Ok(LoadInvoiceResponse {
      draft: original.to_draft(),
      draft_key: DraftKey::Invoice(original.id),
      original,
    })
  }
}
