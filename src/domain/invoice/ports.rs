use async_trait::async_trait;
use uuid::Uuid;

use super::entities::{InvoicePage, InvoicePayload, ServerInvoice};
use super::errors::ApiFailure;
use crate::domain::listing::QueryDescriptor;

/// The server's invoice API as this crate sees it.
///
/// Implementations live in the surrounding application shell; tests use
/// recording fakes. Transport detail stays behind `ApiFailure`.
#[async_trait]
pub trait InvoiceApi: Send + Sync {
  async fn create_invoice(&self, payload: &InvoicePayload) -> Result<ServerInvoice, ApiFailure>;
  async fn update_invoice(
    &self,
    invoice_id: Uuid,
    payload: &InvoicePayload,
  ) -> Result<ServerInvoice, ApiFailure>;
  async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), ApiFailure>;
  async fn fetch_invoice(&self, invoice_id: Uuid) -> Result<ServerInvoice, ApiFailure>;
  async fn fetch_invoices(&self, query: &QueryDescriptor) -> Result<InvoicePage, ApiFailure>;
}
