use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

pub const CONFLICT_MESSAGE: &str =
  "This invoice changed on the server while you were editing. Reload it and try again.";
pub const CONNECTION_MESSAGE: &str =
  "Could not reach the server. Your draft is kept locally; try again in a moment.";

// Catch-all key for server errors that name no specific field
const BASE_FIELD: &str = "base";

/// What the invoice API adapter reports back: either an HTTP status with
/// whatever body came along, or no response at all.
///
/// 401 and 403 get their own variant so the embedding shell can renew the
/// session; this layer never retries them and otherwise treats them as any
/// other failed request.
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
  #[error("Request rejected with status {status}")]
  Status { status: u16, body: Option<Value> },

  #[error("Request refused as unauthorized with status {status}")]
  Unauthorized { status: u16 },

  #[error("Network failure: {0}")]
  Network(String),
}

impl ApiFailure {
  pub fn status(status: u16) -> Self {
    match status {
      401 | 403 => ApiFailure::Unauthorized { status },
      _ => ApiFailure::Status { status, body: None },
    }
  }

  /// Auth failures carry no field data this layer uses, so their body is
  /// dropped.
  pub fn status_with_body(status: u16, body: Value) -> Self {
    match status {
      401 | 403 => ApiFailure::Unauthorized { status },
      _ => ApiFailure::Status {
        status,
        body: Some(body),
      },
    }
  }

  pub fn status_code(&self) -> Option<u16> {
    match self {
      ApiFailure::Status { status, .. } => Some(*status),
      ApiFailure::Unauthorized { status } => Some(*status),
      ApiFailure::Network(_) => None,
    }
  }
}

/// Validation problems keyed by form field.
///
/// Line-level problems use `lineItems.<index>.<field>` keys so the form can
/// annotate the exact input, with field names matching the draft shape
/// (`productRef`, `unitPrice`) regardless of how the server spells them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
  errors: BTreeMap<String, String>,
}

impl FieldErrors {
  pub fn new() -> Self {
    Self::default()
  }

  /// Normalizes a server validation body into per-field messages.
  ///
  /// Handles the `{errors: {field: ...}}` envelope as well as a bare field
  /// map, coerces message lists into one string, and maps server field
  /// spellings onto form field names. Anything unrecognizable becomes a
  /// single generic entry rather than an error.
  pub fn from_server_body(body: Option<&Value>) -> Self {
    let mut errors = Self::default();

    let Some(body) = body else {
      errors.insert(BASE_FIELD, "Validation failed");
      return errors;
    };

    if let Some(messages) = body.get("errors").and_then(Value::as_array) {
      errors.insert(BASE_FIELD, flatten_message_list(messages));
      return errors;
    }

    let map = body
      .get("errors")
      .and_then(Value::as_object)
      .or_else(|| body.as_object());

    if let Some(map) = map {
      for (key, value) in map {
        errors.insert(normalize_field(key), flatten_message(value));
      }
    }

    if errors.is_empty() {
      errors.insert(BASE_FIELD, "Validation failed");
    }
    errors
  }

  pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.errors.insert(field.into(), message.into());
  }

  pub fn insert_line(&mut self, index: usize, field: &str, message: impl Into<String>) {
    self.insert(format!("lineItems.{}.{}", index, field), message);
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  pub fn is_empty(&self) -> bool {
    self.errors.is_empty()
  }

  pub fn len(&self) -> usize {
    self.errors.len()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .errors
      .iter()
      .map(|(field, message)| (field.as_str(), message.as_str()))
  }

  pub fn into_inner(self) -> BTreeMap<String, String> {
    self.errors
  }
}

fn normalize_field(key: &str) -> String {
  let segments: Vec<&str> = key.split('.').collect();
  // Line errors arrive as "<collection>.<index>.<field>"
  if segments.len() == 3 && segments[1].chars().all(|c| c.is_ascii_digit()) {
    return format!("lineItems.{}.{}", segments[1], normalize_line_field(segments[2]));
  }
  normalize_header_field(key).to_string()
}

fn normalize_header_field(key: &str) -> &str {
  match key {
    "customer_id" | "customer" => "customer",
    other => other,
  }
}

fn normalize_line_field(key: &str) -> &str {
  match key {
    "product_id" | "product" => "productRef",
    "unit_price" => "unitPrice",
    "vat_rate" => "vatRate",
    other => other,
  }
}

fn flatten_message(value: &Value) -> String {
  match value {
    Value::String(message) => message.clone(),
    Value::Array(messages) => flatten_message_list(messages),
    other => other.to_string(),
  }
}

fn flatten_message_list(messages: &[Value]) -> String {
  let parts: Vec<String> = messages
    .iter()
    .map(|message| match message {
      Value::String(text) => text.clone(),
      other => other.to_string(),
    })
    .collect();
  parts.join(", ")
}

/// Submission outcome when the invoice could not be saved. The set is
/// closed: every server or transport failure lands in one of these three
/// buckets, each with its own recovery story.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
  #[error("Validation failed")]
  Validation(FieldErrors),

  #[error("{0}")]
  Conflict(String),

  #[error("{0}")]
  Connection(String),
}

impl From<ApiFailure> for SubmitError {
  fn from(failure: ApiFailure) -> Self {
    match failure {
      ApiFailure::Status { status: 422, body } => {
        SubmitError::Validation(FieldErrors::from_server_body(body.as_ref()))
      }
      ApiFailure::Status { status: 409, .. } => SubmitError::Conflict(CONFLICT_MESSAGE.to_string()),
      ApiFailure::Status { .. } | ApiFailure::Unauthorized { .. } | ApiFailure::Network(_) => {
        SubmitError::Connection(CONNECTION_MESSAGE.to_string())
      }
    }
  }
}

/// Failure to load an invoice for editing.
#[derive(Debug, Error)]
pub enum LoadError {
  #[error("Invoice not found")]
  NotFound,

  #[error("Finalized invoices can no longer be edited")]
  Finalized,

  #[error(transparent)]
  Api(ApiFailure),
}

impl From<ApiFailure> for LoadError {
  fn from(failure: ApiFailure) -> Self {
    match failure {
      ApiFailure::Status { status: 404, .. } => LoadError::NotFound,
      other => LoadError::Api(other),
    }
  }
}
