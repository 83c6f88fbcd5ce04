use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

use super::entities::{InvoicePayload, LineInstruction, ServerInvoice, ServerLineItem};
use super::errors::FieldErrors;
use crate::domain::billing::LineItem;
use crate::domain::draft::InvoiceDraft;

/// Checks that a draft is complete enough to submit.
///
/// All problems are reported at once, keyed by form field, so the form can
/// annotate every offending input in a single pass. Lines marked for
/// deletion are not validated; they are leaving the invoice anyway.
pub fn validate_for_submission(draft: &InvoiceDraft) -> Result<(), FieldErrors> {
  let errors = submission_errors(draft);
  if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn submission_errors(draft: &InvoiceDraft) -> FieldErrors {
  let mut errors = FieldErrors::new();

  if draft.customer.is_none() {
    errors.insert("customer", "Select a customer");
  }
  if draft.date.is_none() {
    errors.insert("date", "Pick an invoice date");
  }
  if draft.live_line_count() == 0 {
    errors.insert("lineItems", "Add at least one line item");
  }

  for (index, line) in draft.line_items.iter().enumerate() {
    if line.marked_for_deletion {
      continue;
    }
    if line.product_ref.is_none() {
      errors.insert_line(index, "productRef", "Select a product");
    }
    if line.quantity <= Decimal::ZERO {
      errors.insert_line(index, "quantity", "Quantity must be greater than zero");
    }
  }

  errors
}

/// Diffs the edited lines against the server's lines, by line id.
///
/// Edited lines that kept their server id become updates, lines without
/// one become creates, and every server line whose id no longer appears
/// among the edited lines becomes a destroy marker. Lines marked for
/// deletion count as absent, so their server ids are destroyed too.
pub fn reconcile_line_items(
  original: &[ServerLineItem],
  edited: &[LineItem],
) -> Result<Vec<LineInstruction>, FieldErrors> {
  let mut errors = FieldErrors::new();
  let mut instructions = Vec::new();
  let mut surviving_ids: HashSet<Uuid> = HashSet::new();

  for (index, line) in edited.iter().enumerate() {
    if line.marked_for_deletion {
      continue;
    }
    let Some(product_id) = line.product_ref else {
      errors.insert_line(index, "productRef", "Select a product");
      continue;
    };
    match line.origin_line_id {
      Some(id) => {
        surviving_ids.insert(id);
        instructions.push(LineInstruction::Update {
          id,
          product_id,
          quantity: line.quantity,
          label: line.label.clone(),
        });
      }
      None => {
        instructions.push(LineInstruction::Create {
          product_id,
          quantity: line.quantity,
        });
      }
    }
  }

  // Destroy markers follow the server's line order
  for line in original {
    if !surviving_ids.contains(&line.id) {
      instructions.push(LineInstruction::destroy(line.id));
    }
  }

  if errors.is_empty() {
    Ok(instructions)
  } else {
    Err(errors)
  }
}

/// Assembles the payload for a brand-new invoice.
///
/// Every live line becomes a create instruction. Stray server line ids,
/// possible only in a tampered or mismatched draft, are ignored: there is
/// nothing on the server to address yet.
pub fn build_create_payload(draft: &InvoiceDraft) -> Result<InvoicePayload, FieldErrors> {
  validate_for_submission(draft)?;
  let (customer_id, date) = header_fields(draft)?;

  let lines = draft
    .line_items
    .iter()
    .filter(|line| !line.marked_for_deletion)
    .filter_map(|line| {
      line.product_ref.map(|product_id| LineInstruction::Create {
        product_id,
        quantity: line.quantity,
      })
    })
    .collect();

  Ok(InvoicePayload {
    customer_id,
    date,
    deadline: draft.deadline,
    paid: draft.paid,
    finalized: draft.finalized,
    invoice_lines_attributes: lines,
  })
}

/// Assembles the payload updating an existing invoice, reconciling the
/// edited lines against the server's.
pub fn build_update_payload(
  draft: &InvoiceDraft,
  original: &ServerInvoice,
) -> Result<InvoicePayload, FieldErrors> {
  validate_for_submission(draft)?;
  let (customer_id, date) = header_fields(draft)?;
  let lines = reconcile_line_items(&original.line_items, &draft.line_items)?;

  Ok(InvoicePayload {
    customer_id,
    date,
    deadline: draft.deadline,
    paid: draft.paid,
    finalized: draft.finalized,
    invoice_lines_attributes: lines,
  })
}

// Reached only after validation; the fallback keeps this total without
// panicking on an unvalidated draft.
fn header_fields(draft: &InvoiceDraft) -> Result<(Uuid, NaiveDate), FieldErrors> {
  match (&draft.customer, draft.date) {
    (Some(customer), Some(date)) => Ok((customer.id, date)),
    _ => Err(submission_errors(draft)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::billing::{CustomerRef, VatRate};
  use rust_decimal_macros::dec;
  use serde_json::json;

  fn draft_line(product_id: Uuid, quantity: Decimal, origin: Option<Uuid>) -> LineItem {
    LineItem {
      product_ref: Some(product_id),
      label: "Consulting".to_string(),
      quantity,
      origin_line_id: origin,
      ..LineItem::default()
    }
  }

  fn server_line(id: Uuid) -> ServerLineItem {
    ServerLineItem {
      id,
      product_ref: Some(Uuid::new_v4()),
      label: "Consulting".to_string(),
      quantity: dec!(1),
      unit: "day".to_string(),
      unit_price: dec!(600),
      vat_rate: VatRate::Standard,
    }
  }

  fn submittable_draft() -> InvoiceDraft {
    let mut draft = InvoiceDraft::new();
    draft.customer = Some(CustomerRef {
      id: Uuid::new_v4(),
      name: "Acme SARL".to_string(),
    });
    draft.date = NaiveDate::from_ymd_opt(2026, 1, 15);
    draft.line_items = vec![draft_line(Uuid::new_v4(), dec!(2), None)];
    draft
  }

  #[test]
  fn test_validation_passes_complete_draft() {
    assert!(validate_for_submission(&submittable_draft()).is_ok());
  }

  #[test]
  fn test_validation_reports_every_problem_at_once() {
    let mut draft = InvoiceDraft::new();
    draft.line_items[0].quantity = dec!(0);

    let errors = validate_for_submission(&draft).unwrap_err();

    assert_eq!(errors.get("customer"), Some("Select a customer"));
    assert_eq!(errors.get("date"), Some("Pick an invoice date"));
    assert_eq!(errors.get("lineItems.0.productRef"), Some("Select a product"));
    assert_eq!(
      errors.get("lineItems.0.quantity"),
      Some("Quantity must be greater than zero")
    );
    assert_eq!(errors.len(), 4);
  }

  #[test]
  fn test_validation_skips_marked_lines() {
    let mut draft = submittable_draft();
    draft.add_line(); // left incomplete
    draft.line_items[1].marked_for_deletion = true;

    assert!(validate_for_submission(&draft).is_ok());
  }

  #[test]
  fn test_validation_requires_a_live_line() {
    let mut draft = submittable_draft();
    for line in &mut draft.line_items {
      line.marked_for_deletion = true;
    }

    let errors = validate_for_submission(&draft).unwrap_err();
    assert_eq!(errors.get("lineItems"), Some("Add at least one line item"));
  }

  #[test]
  fn test_reconcile_mixed_edit() {
    let line_a = Uuid::new_v4();
    let line_b = Uuid::new_v4();
    let product_a = Uuid::new_v4();
    let product_c = Uuid::new_v4();
    let original = [server_line(line_a), server_line(line_b)];

    // A survives with a new quantity, B is gone, C is new
    let edited = [
      draft_line(product_a, dec!(5), Some(line_a)),
      draft_line(product_c, dec!(1), None),
    ];

    let instructions = reconcile_line_items(&original, &edited).unwrap();

    assert_eq!(
      instructions,
      vec![
        LineInstruction::Update {
          id: line_a,
          product_id: product_a,
          quantity: dec!(5),
          label: "Consulting".to_string(),
        },
        LineInstruction::Create {
          product_id: product_c,
          quantity: dec!(1),
        },
        LineInstruction::destroy(line_b),
      ]
    );
  }

  #[test]
  fn test_reconcile_unmodified_survivor_still_updates() {
    let line_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();
    let original = [server_line(line_id)];
    let edited = [draft_line(product_id, dec!(1), Some(line_id))];

    let instructions = reconcile_line_items(&original, &edited).unwrap();
    assert!(matches!(
      instructions.as_slice(),
      [LineInstruction::Update { id, .. }] if *id == line_id
    ));
  }

  #[test]
  fn test_reconcile_all_new_lines() {
    let edited = [
      draft_line(Uuid::new_v4(), dec!(1), None),
      draft_line(Uuid::new_v4(), dec!(2), None),
    ];

    let instructions = reconcile_line_items(&[], &edited).unwrap();
    assert_eq!(instructions.len(), 2);
    assert!(
      instructions
        .iter()
        .all(|i| matches!(i, LineInstruction::Create { .. }))
    );
  }

  #[test]
  fn test_reconcile_marked_line_is_destroyed() {
    let line_id = Uuid::new_v4();
    let keeper_id = Uuid::new_v4();
    let original = [server_line(line_id), server_line(keeper_id)];

    let mut marked = draft_line(Uuid::new_v4(), dec!(1), Some(line_id));
    marked.marked_for_deletion = true;
    let edited = [marked, draft_line(Uuid::new_v4(), dec!(1), Some(keeper_id))];

    let instructions = reconcile_line_items(&original, &edited).unwrap();

    assert_eq!(instructions.len(), 2);
    assert!(instructions.contains(&LineInstruction::destroy(line_id)));
    assert!(
      !instructions
        .iter()
        .any(|i| matches!(i, LineInstruction::Destroy { id, .. } if *id == keeper_id))
    );
  }

  #[test]
  fn test_reconcile_rejects_line_without_product() {
    let mut incomplete = draft_line(Uuid::new_v4(), dec!(1), None);
    incomplete.product_ref = None;

    let errors = reconcile_line_items(&[], &[incomplete]).unwrap_err();
    assert_eq!(errors.get("lineItems.0.productRef"), Some("Select a product"));
  }

  #[test]
  fn test_create_payload_ignores_stray_ids() {
    let mut draft = submittable_draft();
    // If a server id sneaks into a create-mode draft through a restored
    // entry, it must not leak into the payload.
    draft.line_items[0].origin_line_id = Some(Uuid::new_v4());

    let payload = build_create_payload(&draft).unwrap();
    assert!(matches!(
      payload.invoice_lines_attributes.as_slice(),
      [LineInstruction::Create { .. }]
    ));
  }

  #[test]
  fn test_create_payload_requires_valid_draft() {
    let errors = build_create_payload(&InvoiceDraft::new()).unwrap_err();
    assert!(errors.get("customer").is_some());
  }

  #[test]
  fn test_update_payload_wire_shape() {
    let line_id = Uuid::new_v4();
    let gone_id = Uuid::new_v4();
    let product_id = Uuid::new_v4();

    let mut original = ServerInvoice {
      id: Uuid::new_v4(),
      customer: CustomerRef {
        id: Uuid::new_v4(),
        name: "Acme SARL".to_string(),
      },
      date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
      deadline: None,
      paid: false,
      finalized: false,
      line_items: vec![server_line(line_id), server_line(gone_id)],
    };
    original.line_items[0].product_ref = Some(product_id);

    let mut draft = original.to_draft();
    draft.line_items.remove(1);
    draft.line_items[0].quantity = dec!(4);
    draft.paid = true;

    let payload = build_update_payload(&draft, &original).unwrap();
    let customer_id = original.customer.id;

    assert_eq!(
      serde_json::to_value(&payload).unwrap(),
      json!({
        "customer_id": customer_id,
        "date": "2026-01-01",
        "deadline": null,
        "paid": true,
        "finalized": false,
        "invoice_lines_attributes": [
          {"id": line_id, "product_id": product_id, "quantity": 4.0, "label": "Consulting"},
          {"id": gone_id, "_destroy": true}
        ]
      })
    );
  }
}
