use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Operator, PaymentFilter, Sort, SortField, StatusFilter};

pub const DEFAULT_PAGE_SIZE: u32 = 25;

// Active filter inputs of the invoice list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
  pub date_from: Option<NaiveDate>,
  pub date_to: Option<NaiveDate>,
  pub deadline_from: Option<NaiveDate>,
  pub deadline_to: Option<NaiveDate>,
  pub status: StatusFilter,
  pub payment: PaymentFilter,
  pub customer_id: Option<Uuid>,
  pub product_id: Option<Uuid>,
}

impl FilterSelection {
  pub fn has_active_filters(&self) -> bool {
    *self != Self::default()
  }
}

// One {field, operator, value} triple of the serialized filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Predicate {
  pub field: &'static str,
  pub operator: Operator,
  pub value: String,
}

impl Predicate {
  fn new(field: &'static str, operator: Operator, value: String) -> Self {
    Self {
      field,
      operator,
      value,
    }
  }
}

/// Canonical query for the invoice list.
///
/// Building one is a pure function of the inputs: the same selection, sort
/// and page always yield a byte-identical descriptor, which makes responses
/// cacheable by descriptor and lets tests assert exact request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryDescriptor {
  pub filter: String,
  pub sort: String,
  pub page: u32,
  pub page_size: u32,
}

impl QueryDescriptor {
  pub fn build(selection: &FilterSelection, sort: Sort, page: u32, page_size: u32) -> Self {
    let mut predicates = Vec::new();

    if let Some(date) = selection.date_from {
      predicates.push(Predicate::new("date", Operator::Gteq, iso_date(date)));
    }
    if let Some(date) = selection.date_to {
      predicates.push(Predicate::new("date", Operator::Lteq, iso_date(date)));
    }
    if let Some(date) = selection.deadline_from {
      predicates.push(Predicate::new("deadline", Operator::Gteq, iso_date(date)));
    }
    if let Some(date) = selection.deadline_to {
      predicates.push(Predicate::new("deadline", Operator::Lteq, iso_date(date)));
    }
    match selection.status {
      StatusFilter::All => {}
      StatusFilter::Draft => {
        predicates.push(Predicate::new("finalized", Operator::Eq, "false".to_string()));
      }
      StatusFilter::Finalized => {
        predicates.push(Predicate::new("finalized", Operator::Eq, "true".to_string()));
      }
    }
    match selection.payment {
      PaymentFilter::All => {}
      PaymentFilter::Paid => {
        predicates.push(Predicate::new("paid", Operator::Eq, "true".to_string()));
      }
      PaymentFilter::Unpaid => {
        predicates.push(Predicate::new("paid", Operator::Eq, "false".to_string()));
      }
    }
    if let Some(id) = selection.customer_id {
      predicates.push(Predicate::new("customer_id", Operator::Eq, id.to_string()));
    }
    if let Some(id) = selection.product_id {
      predicates.push(Predicate::new("product_id", Operator::Eq, id.to_string()));
    }

    Self {
      filter: serde_json::to_string(&predicates).expect("predicate list always serializes"),
      sort: sort.token(),
      page,
      page_size,
    }
  }

  /// The descriptor in query-string form, fields in declaration order.
  pub fn to_query_string(&self) -> String {
    serde_urlencoded::to_string(self).expect("flat descriptor always serializes")
  }
}

fn iso_date(date: NaiveDate) -> String {
  date.format("%Y-%m-%d").to_string()
}

/// Filter, sort and page selections of the invoice list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
  pub filters: FilterSelection,
  pub sort: Sort,
  pub page: u32,
  pub page_size: u32,
}

impl ListState {
  /// Replaces the filter selection and goes back to the first page.
  pub fn apply_filters(&mut self, filters: FilterSelection) {
    self.filters = filters;
    self.page = 1;
  }

  pub fn clear_filters(&mut self) {
    self.apply_filters(FilterSelection::default());
  }

  /// Re-sorting keeps the current page.
  pub fn toggle_sort(&mut self, field: SortField) {
    self.sort = self.sort.toggled(field);
  }

  pub fn set_page(&mut self, page: u32) {
    self.page = page.max(1);
  }

  pub fn query(&self) -> QueryDescriptor {
    QueryDescriptor::build(&self.filters, self.sort, self.page, self.page_size)
  }
}

impl Default for ListState {
  fn default() -> Self {
    Self {
      filters: FilterSelection::default(),
      sort: Sort::default(),
      page: 1,
      page_size: DEFAULT_PAGE_SIZE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  fn date(s: &str) -> NaiveDate {
    NaiveDate::from_str(s).unwrap()
  }

  #[test]
  fn test_empty_selection_builds_empty_filter() {
    let descriptor = ListState::default().query();
    assert_eq!(descriptor.filter, "[]");
    assert_eq!(descriptor.sort, "-date");
    assert_eq!(descriptor.page, 1);
    assert_eq!(descriptor.page_size, DEFAULT_PAGE_SIZE);
  }

  #[test]
  fn test_finalized_filter_exact_shape() {
    let selection = FilterSelection {
      status: StatusFilter::Finalized,
      ..FilterSelection::default()
    };
    let descriptor = QueryDescriptor::build(&selection, Sort::default(), 1, 25);
    assert_eq!(
      descriptor.filter,
      r#"[{"field":"finalized","operator":"eq","value":"true"}]"#
    );
  }

  #[test]
  fn test_predicate_order_is_fixed() {
    let selection = FilterSelection {
      date_from: Some(date("2026-01-01")),
      date_to: Some(date("2026-03-31")),
      deadline_from: Some(date("2026-02-01")),
      deadline_to: Some(date("2026-04-30")),
      status: StatusFilter::Draft,
      payment: PaymentFilter::Paid,
      customer_id: Some(Uuid::new_v4()),
      product_id: Some(Uuid::new_v4()),
    };
    let descriptor = QueryDescriptor::build(&selection, Sort::default(), 1, 25);

    let predicates: Vec<serde_json::Value> = serde_json::from_str(&descriptor.filter).unwrap();
    let fields: Vec<&str> = predicates
      .iter()
      .map(|p| p["field"].as_str().unwrap())
      .collect();
    let operators: Vec<&str> = predicates
      .iter()
      .map(|p| p["operator"].as_str().unwrap())
      .collect();

    assert_eq!(
      fields,
      [
        "date",
        "date",
        "deadline",
        "deadline",
        "finalized",
        "paid",
        "customer_id",
        "product_id"
      ]
    );
    assert_eq!(
      operators,
      ["gteq", "lteq", "gteq", "lteq", "eq", "eq", "eq", "eq"]
    );
    assert_eq!(predicates[0]["value"], "2026-01-01");
    assert_eq!(predicates[4]["value"], "false");
  }

  #[test]
  fn test_identical_inputs_build_identical_descriptors() {
    let selection = FilterSelection {
      date_from: Some(date("2026-05-01")),
      payment: PaymentFilter::Unpaid,
      ..FilterSelection::default()
    };
    let first = QueryDescriptor::build(&selection, Sort::default(), 2, 50);
    let second = QueryDescriptor::build(&selection, Sort::default(), 2, 50);
    assert_eq!(first, second);
    assert_eq!(first.to_query_string(), second.to_query_string());
  }

  #[test]
  fn test_query_string_form() {
    let descriptor = ListState::default().query();
    assert_eq!(
      descriptor.to_query_string(),
      "filter=%5B%5D&sort=-date&page=1&page_size=25"
    );
  }

  #[test]
  fn test_filter_changes_reset_page() {
    let mut state = ListState::default();
    state.set_page(4);

    state.apply_filters(FilterSelection {
      status: StatusFilter::Draft,
      ..FilterSelection::default()
    });
    assert_eq!(state.page, 1);

    state.set_page(3);
    state.clear_filters();
    assert_eq!(state.page, 1);
    assert!(!state.filters.has_active_filters());
  }

  #[test]
  fn test_sorting_keeps_page() {
    let mut state = ListState::default();
    state.set_page(2);
    state.toggle_sort(SortField::Total);
    assert_eq!(state.page, 2);
    assert_eq!(state.sort.token(), "-total");
  }

  #[test]
  fn test_set_page_clamps_to_one() {
    let mut state = ListState::default();
    state.set_page(0);
    assert_eq!(state.page, 1);
  }

  #[test]
  fn test_has_active_filters() {
    let mut selection = FilterSelection::default();
    assert!(!selection.has_active_filters());
    selection.customer_id = Some(Uuid::new_v4());
    assert!(selection.has_active_filters());
  }
}
