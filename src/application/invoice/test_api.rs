use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::domain::billing::{CustomerRef, VatRate};
use crate::domain::invoice::{
  ApiFailure, InvoiceApi, InvoicePage, InvoicePayload, ServerInvoice, ServerLineItem,
};
use crate::domain::listing::QueryDescriptor;

/// Scripted stand-in for the server API: records every call and plays back
/// one configured result.
pub struct FakeInvoiceApi {
  pub create_calls: Mutex<Vec<InvoicePayload>>,
  pub update_calls: Mutex<Vec<(Uuid, InvoicePayload)>>,
  pub delete_calls: Mutex<Vec<Uuid>>,
  pub fetch_calls: Mutex<Vec<Uuid>>,
  pub query_calls: Mutex<Vec<QueryDescriptor>>,
  invoice: Option<ServerInvoice>,
  page: Option<InvoicePage>,
  failure: Option<ApiFailure>,
}

impl FakeInvoiceApi {
  pub fn succeeding() -> Self {
    Self::empty()
  }

  pub fn returning(invoice: ServerInvoice) -> Self {
    Self {
      invoice: Some(invoice),
      ..Self::empty()
    }
  }

  pub fn with_page(page: InvoicePage) -> Self {
    Self {
      page: Some(page),
      ..Self::empty()
    }
  }

  pub fn failing(failure: ApiFailure) -> Self {
    Self {
      failure: Some(failure),
      ..Self::empty()
    }
  }

  fn empty() -> Self {
    Self {
      create_calls: Mutex::new(Vec::new()),
      update_calls: Mutex::new(Vec::new()),
      delete_calls: Mutex::new(Vec::new()),
      fetch_calls: Mutex::new(Vec::new()),
      query_calls: Mutex::new(Vec::new()),
      invoice: None,
      page: None,
      failure: None,
    }
  }

  fn invoice_result(&self) -> Result<ServerInvoice, ApiFailure> {
    if let Some(failure) = &self.failure {
      return Err(failure.clone());
    }
    Ok(
      self
        .invoice
        .clone()
        .expect("fake invoice response not configured"),
    )
  }
}

#[async_trait]
impl InvoiceApi for FakeInvoiceApi {
  async fn create_invoice(&self, payload: &InvoicePayload) -> Result<ServerInvoice, ApiFailure> {
    self.create_calls.lock().unwrap().push(payload.clone());
    self.invoice_result()
  }

  async fn update_invoice(
    &self,
    invoice_id: Uuid,
    payload: &InvoicePayload,
  ) -> Result<ServerInvoice, ApiFailure> {
    self
      .update_calls
      .lock()
      .unwrap()
      .push((invoice_id, payload.clone()));
    self.invoice_result()
  }

  async fn delete_invoice(&self, invoice_id: Uuid) -> Result<(), ApiFailure> {
    self.delete_calls.lock().unwrap().push(invoice_id);
    match &self.failure {
      Some(failure) => Err(failure.clone()),
      None => Ok(()),
    }
  }

  async fn fetch_invoice(&self, invoice_id: Uuid) -> Result<ServerInvoice, ApiFailure> {
    self.fetch_calls.lock().unwrap().push(invoice_id);
    self.invoice_result()
  }

  async fn fetch_invoices(&self, query: &QueryDescriptor) -> Result<InvoicePage, ApiFailure> {
    self.query_calls.lock().unwrap().push(query.clone());
    if let Some(failure) = &self.failure {
      return Err(failure.clone());
    }
    Ok(self.page.clone().unwrap_or(InvoicePage {
      invoices: Vec::new(),
      total_count: 0,
      page: 1,
    }))
  }
}

/// Installs the tracing subscriber routed through the test writer.
/// Only the first call per process takes effect.
pub fn init_tracing() {
  let _ = tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "facturio=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer().with_test_writer())
    .try_init();
}

pub fn sample_invoice(finalized: bool) -> ServerInvoice {
  ServerInvoice {
    id: Uuid::new_v4(),
    customer: CustomerRef {
      id: Uuid::new_v4(),
      name: "Acme SARL".to_string(),
    },
    date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
    deadline: NaiveDate::from_ymd_opt(2026, 3, 1),
    paid: false,
    finalized,
    line_items: vec![ServerLineItem {
      id: Uuid::new_v4(),
      product_ref: Some(Uuid::new_v4()),
      label: "Consulting".to_string(),
      quantity: dec!(2),
      unit: "day".to_string(),
      unit_price: dec!(600),
      vat_rate: VatRate::Standard,
    }],
  }
}
