use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::billing::{CatalogProduct, CustomerRef, InvoiceTotals, LineItem};

/// The editable state of the invoice form.
///
/// This is also the exact shape persisted by the draft store, so changing
/// a field here changes what older stored drafts can still be restored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
  pub customer: Option<CustomerRef>,
  pub date: Option<NaiveDate>,
  pub deadline: Option<NaiveDate>,
  pub paid: bool,
  pub finalized: bool,
  pub line_items: Vec<LineItem>,
}

impl InvoiceDraft {
  pub fn new() -> Self {
    Self::default()
  }

  /// A draft with no customer or no lines carries no meaningful progress;
  /// it is neither persisted nor restored.
  pub fn is_meaningful(&self) -> bool {
    self.customer.is_some() && !self.line_items.is_empty()
  }

  pub fn live_line_count(&self) -> usize {
    self
      .line_items
      .iter()
      .filter(|item| !item.marked_for_deletion)
      .count()
  }

  pub fn totals(&self) -> InvoiceTotals {
    InvoiceTotals::calculate(&self.line_items)
  }

  pub fn select_product(&mut self, index: usize, product: Option<&CatalogProduct>) {
    if let Some(item) = self.line_items.get_mut(index) {
      item.apply_product(product);
    }
  }

  pub fn add_line(&mut self) {
    self.line_items.push(LineItem::default());
  }

  /// Removes the line at `index`. A no-op when it would leave the form
  /// without any line, or when the index is out of range.
  pub fn remove_line(&mut self, index: usize) {
    if self.line_items.len() > 1 && index < self.line_items.len() {
      self.line_items.remove(index);
    }
  }

  /// Inserts a copy of the line right after its source. The copy is a fresh
  /// local line: it never inherits the source's server-side line id.
  pub fn duplicate_line(&mut self, index: usize) {
    if let Some(source) = self.line_items.get(index) {
      let mut copy = source.clone();
      copy.origin_line_id = None;
      copy.marked_for_deletion = false;
      self.line_items.insert(index + 1, copy);
    }
  }

  /// Strikes a loaded line through instead of removing it, keeping it
  /// visible until the edit is submitted. Marking the last live line is
  /// refused, mirroring `remove_line`.
  pub fn toggle_line_deletion(&mut self, index: usize) {
    let live = self.live_line_count();
    if let Some(item) = self.line_items.get_mut(index) {
      if item.marked_for_deletion {
        item.marked_for_deletion = false;
      } else if live > 1 {
        item.marked_for_deletion = true;
      }
    }
  }
}

impl Default for InvoiceDraft {
  fn default() -> Self {
    Self {
      customer: None,
      date: None,
      deadline: None,
      paid: false,
      finalized: false,
      line_items: vec![LineItem::default()],
    }
  }
}
