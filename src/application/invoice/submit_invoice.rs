use std::sync::Arc;
use uuid::Uuid;

use crate::domain::draft::{DraftKey, DraftStore, InvoiceDraft};
use crate::domain::invoice::{
  InvoiceApi, ServerInvoice, SubmitError, build_create_payload, build_update_payload,
};

/// A draft ready to submit, together with the server invoice it edits.
/// `original` is `None` when creating a new invoice.
#[derive(Debug)]
pub struct SubmitInvoiceCommand {
  pub draft: InvoiceDraft,
  pub original: Option<ServerInvoice>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitInvoiceResponse {
  pub invoice_id: Uuid,
  pub created: bool,
}

pub struct SubmitInvoiceUseCase {
  api: Arc<dyn InvoiceApi>,
  drafts: DraftStore,
}

impl SubmitInvoiceUseCase {
  pub fn new(api: Arc<dyn InvoiceApi>, drafts: DraftStore) -> Self {
    Self { api, drafts }
  }

  /// Validates the draft, assembles the payload and sends it. The local
  /// draft is discarded only once the server has accepted the invoice, so
  /// it survives every validation and transport failure.
  pub async fn execute(
    &self,
    command: SubmitInvoiceCommand,
  ) -> Result<SubmitInvoiceResponse, SubmitError> {
    match command.original {
      None => {
        let payload = build_create_payload(&command.draft).map_err(SubmitError::Validation)?;
        let invoice = self.api.create_invoice(&payload).await?;
        tracing::info!(
          "Invoice {} created with {} lines",
          invoice.id,
          payload.invoice_lines_attributes.len()
        );
        self.drafts.discard(&DraftKey::Create);
        Ok(SubmitInvoiceResponse {
          invoice_id: invoice.id,
          created: true,
        })
      }
      Some(original) => {
        let payload =
          build_update_payload(&command.draft, &original).map_err(SubmitError::Validation)?;
        let invoice = self.api.update_invoice(original.id, &payload).await?;
        tracing::info!(
          "Invoice {} updated with {} line instructions",
          invoice.id,
          payload.invoice_lines_attributes.len()
        );
        self.drafts.discard(&DraftKey::Invoice(original.id));
        Ok(SubmitInvoiceResponse {
          invoice_id: invoice.id,
          created: false,
        })
      }
    }
  }
}
