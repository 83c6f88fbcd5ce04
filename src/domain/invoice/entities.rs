use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::billing::{CustomerRef, LineItem, VatRate};
use crate::domain::draft::InvoiceDraft;

// Line item as persisted server-side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerLineItem {
  pub id: Uuid,
  pub product_ref: Option<Uuid>,
  pub label: String,
  pub quantity: Decimal,
  pub unit: String,
  pub unit_price: Decimal,
  pub vat_rate: VatRate,
}

/// Invoice as persisted server-side: the baseline an edit is diffed against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInvoice {
  pub id: Uuid,
  pub customer: CustomerRef,
  pub date: NaiveDate,
  pub deadline: Option<NaiveDate>,
  pub paid: bool,
  pub finalized: bool,
  pub line_items: Vec<ServerLineItem>,
}

impl ServerInvoice {
  /// Builds the editable form state for this invoice. Every loaded line
  /// keeps its server id so a later submission can address it.
  pub fn to_draft(&self) -> InvoiceDraft {
    let mut line_items: Vec<LineItem> = self
      .line_items
      .iter()
      .map(|line| LineItem {
        product_ref: line.product_ref,
        label: line.label.clone(),
        quantity: line.quantity,
        unit: line.unit.clone(),
        unit_price: line.unit_price,
        vat_rate: line.vat_rate,
        origin_line_id: Some(line.id),
        marked_for_deletion: false,
      })
      .collect();

    // The editor always shows at least one line
    if line_items.is_empty() {
      line_items.push(LineItem::default());
    }

    InvoiceDraft {
      customer: Some(self.customer.clone()),
      date: Some(self.date),
      deadline: self.deadline,
      paid: self.paid,
      finalized: self.finalized,
      line_items,
    }
  }
}

// One row of the invoice list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
  pub id: Uuid,
  pub customer_name: String,
  pub date: NaiveDate,
  pub deadline: Option<NaiveDate>,
  pub paid: bool,
  pub finalized: bool,
  pub grand_total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePage {
  pub invoices: Vec<InvoiceSummary>,
  pub total_count: u32,
  pub page: u32,
}

/// One entry of `invoice_lines_attributes`, in the exact shape the server
/// consumes: new lines carry no id, surviving lines carry theirs, and
/// removed lines collapse to an id plus the `_destroy` marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LineInstruction {
  Update {
    id: Uuid,
    product_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    quantity: Decimal,
    label: String,
  },
  Create {
    product_id: Uuid,
    #[serde(with = "rust_decimal::serde::float")]
    quantity: Decimal,
  },
  Destroy {
    id: Uuid,
    #[serde(rename = "_destroy")]
    destroy: bool,
  },
}

impl LineInstruction {
  pub fn destroy(id: Uuid) -> Self {
    LineInstruction::Destroy { id, destroy: true }
  }
}

/// The submission body, field for field what the server expects.
/// Serialization is the contract here; tests pin the exact JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoicePayload {
  pub customer_id: Uuid,
  pub date: NaiveDate,
  pub deadline: Option<NaiveDate>,
  pub paid: bool,
  pub finalized: bool,
  pub invoice_lines_attributes: Vec<LineInstruction>,
}
