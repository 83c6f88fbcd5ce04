use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::value_objects::{VatRate, round_money};

// Customer reference - as picked in the invoice form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
  pub id: Uuid,
  pub name: String,
}

// Catalog product - selectable on a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogProduct {
  pub id: Uuid,
  pub label: String,
  pub unit: String,
  pub unit_price: Decimal,
  pub vat_rate: VatRate,
}

/// One editable line of an invoice form.
///
/// `origin_line_id` carries the server-side line id for lines loaded from an
/// existing invoice; lines added locally have none until the invoice is
/// submitted. `marked_for_deletion` keeps a loaded line around for display
/// while excluding it from totals, validation and the submitted payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_ref: Option<Uuid>,
  pub label: String,
  pub quantity: Decimal,
  pub unit: String,
  pub unit_price: Decimal,
  pub vat_rate: VatRate,
  pub origin_line_id: Option<Uuid>,
  pub marked_for_deletion: bool,
}

impl LineItem {
  /// Copies product data onto the line. Passing `None` clears the product
  /// and resets the dependent fields; the quantity is kept either way.
  pub fn apply_product(&mut self, product: Option<&CatalogProduct>) {
    match product {
      Some(product) => {
        self.product_ref = Some(product.id);
        self.label = product.label.clone();
        self.unit = product.unit.clone();
        self.unit_price = product.unit_price;
        self.vat_rate = product.vat_rate;
      }
      None => {
        self.product_ref = None;
        self.label = String::new();
        self.unit = String::new();
        self.unit_price = Decimal::ZERO;
        self.vat_rate = VatRate::default();
      }
    }
  }
}

impl Default for LineItem {
  fn default() -> Self {
    Self {
      product_ref: None,
      label: String::new(),
      quantity: Decimal::ONE,
      unit: String::new(),
      unit_price: Decimal::ZERO,
      vat_rate: VatRate::default(),
      origin_line_id: None,
      marked_for_deletion: false,
    }
  }
}

// Per-line totals - calculated, not persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemTotals {
  pub subtotal: Decimal,
  pub vat_amount: Decimal,
  pub total: Decimal,
}

impl LineItemTotals {
  /// Subtotal is rounded first, then VAT is taken from the rounded subtotal.
  /// Rounding in this order keeps the displayed figures additive.
  pub fn calculate(item: &LineItem) -> Self {
    let subtotal = round_money(item.quantity * item.unit_price);
    let vat_amount = round_money(subtotal * item.vat_rate.as_multiplier());
    let total = subtotal + vat_amount;

    Self {
      subtotal,
      vat_amount,
      total,
    }
  }
}

// Invoice totals - calculated, not persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
  pub subtotal: Decimal,
  pub total_vat: Decimal,
  pub grand_total: Decimal,
  pub vat_breakdown: BTreeMap<VatRate, Decimal>,
}

impl InvoiceTotals {
  /// Sums the already-rounded per-line figures. Lines marked for deletion
  /// do not contribute.
  pub fn calculate(line_items: &[LineItem]) -> Self {
    let mut totals = Self::default();

    for item in line_items.iter().filter(|item| !item.marked_for_deletion) {
      let line = LineItemTotals::calculate(item);
      totals.subtotal += line.subtotal;
      totals.total_vat += line.vat_amount;
      totals.grand_total += line.total;
      *totals.vat_breakdown.entry(item.vat_rate).or_default() += line.vat_amount;
    }

    totals
  }
}
