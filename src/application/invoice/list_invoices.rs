use std::sync::Arc;

use crate::domain::invoice::{ApiFailure, InvoiceApi, InvoicePage};
use crate::domain::listing::{ListState, QueryDescriptor};

#[derive(Debug)]
pub struct ListInvoicesCommand {
  pub state: ListState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListInvoicesResponse {
  pub page: InvoicePage,
  /// The descriptor that produced this page. Callers key response caches
  /// on it and drop answers whose descriptor no longer matches the
  /// current state.
  pub query: QueryDescriptor,
}

pub struct ListInvoicesUseCase {
  api: Arc<dyn InvoiceApi>,
}

impl ListInvoicesUseCase {
  pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
    Self { api }
  }

  pub async fn execute(
    &self,
    command: ListInvoicesCommand,
  ) -> Result<ListInvoicesResponse, ApiFailure> {
    let query = command.state.query();
    let page = self.api.fetch_invoices(&query).await?;
    tracing::debug!(
      "Invoice page {} fetched, {} of {} invoices",
      page.page,
      page.invoices.len(),
      page.total_count
    );
    Ok(ListInvoicesResponse { page, query })
  }
}
