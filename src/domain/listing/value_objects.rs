use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingError {
  #[error("Invalid status filter: {0}")]
  InvalidStatusFilter(String),
  #[error("Invalid payment filter: {0}")]
  InvalidPaymentFilter(String),
  #[error("Invalid sort field: {0}")]
  InvalidSortField(String),
  #[error("Invalid sort token: {0}")]
  InvalidSortToken(String),
}

// Status filter - draft vs finalized, or no restriction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
  #[default]
  All,
  Draft,
  Finalized,
}

impl StatusFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      StatusFilter::All => "all",
      StatusFilter::Draft => "draft",
      StatusFilter::Finalized => "finalized",
    }
  }
}

impl FromStr for StatusFilter {
  type Err = ListingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "all" => Ok(StatusFilter::All),
      "draft" => Ok(StatusFilter::Draft),
      "finalized" => Ok(StatusFilter::Finalized),
      _ => Err(ListingError::InvalidStatusFilter(s.to_string())),
    }
  }
}

// Payment filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaymentFilter {
  #[default]
  All,
  Paid,
  Unpaid,
}

impl PaymentFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      PaymentFilter::All => "all",
      PaymentFilter::Paid => "paid",
      PaymentFilter::Unpaid => "unpaid",
    }
  }
}

impl FromStr for PaymentFilter {
  type Err = ListingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "all" => Ok(PaymentFilter::All),
      "paid" => Ok(PaymentFilter::Paid),
      "unpaid" => Ok(PaymentFilter::Unpaid),
      _ => Err(ListingError::InvalidPaymentFilter(s.to_string())),
    }
  }
}

// Sortable columns of the invoice list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
  Date,
  Deadline,
  Customer,
  Total,
}

impl SortField {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortField::Date => "date",
      SortField::Deadline => "deadline",
      SortField::Customer => "customer",
      SortField::Total => "total",
    }
  }
}

impl FromStr for SortField {
  type Err = ListingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "date" => Ok(SortField::Date),
      "deadline" => Ok(SortField::Deadline),
      "customer" => Ok(SortField::Customer),
      "total" => Ok(SortField::Total),
      _ => Err(ListingError::InvalidSortField(s.to_string())),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
  Ascending,
  Descending,
}

impl SortDirection {
  pub fn flipped(&self) -> Self {
    match self {
      SortDirection::Ascending => SortDirection::Descending,
      SortDirection::Descending => SortDirection::Ascending,
    }
  }
}

/// Sort selection as a field plus direction, serialized as a signed token
/// (`-date`, `+total`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
  pub field: SortField,
  pub direction: SortDirection,
}

impl Sort {
  pub fn descending(field: SortField) -> Self {
    Self {
      field,
      direction: SortDirection::Descending,
    }
  }

  /// Toggling the current column flips direction; a new column starts
  /// descending.
  pub fn toggled(&self, field: SortField) -> Self {
    if self.field == field {
      Self {
        field,
        direction: self.direction.flipped(),
      }
    } else {
      Self::descending(field)
    }
  }

  pub fn token(&self) -> String {
    let prefix = match self.direction {
      SortDirection::Ascending => "+",
      SortDirection::Descending => "-",
    };
    format!("{}{}", prefix, self.field.as_str())
  }
}

impl Default for Sort {
  fn default() -> Self {
    Self::descending(SortField::Date)
  }
}

impl FromStr for Sort {
  type Err = ListingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    if s.is_empty() {
      return Err(ListingError::InvalidSortToken(s.to_string()));
    }
    let (direction, field) = if let Some(rest) = s.strip_prefix('-') {
      (SortDirection::Descending, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
      (SortDirection::Ascending, rest)
    } else {
      (SortDirection::Ascending, s)
    };
    Ok(Self {
      field: SortField::from_str(field)?,
      direction,
    })
  }
}

impl fmt::Display for Sort {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.token())
  }
}

// Serialized as its wire name inside filter predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
  Gteq,
  Lteq,
  Eq,
}

impl Operator {
  pub fn as_str(&self) -> &'static str {
    match self {
      Operator::Gteq => "gteq",
      Operator::Lteq => "lteq",
      Operator::Eq => "eq",
    }
  }
}
