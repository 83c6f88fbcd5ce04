pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;

pub use entities::{
  InvoicePage, InvoicePayload, InvoiceSummary, LineInstruction, ServerInvoice, ServerLineItem,
};
pub use errors::{
  ApiFailure, CONFLICT_MESSAGE, CONNECTION_MESSAGE, FieldErrors, LoadError, SubmitError,
};
pub use ports::InvoiceApi;
pub use services::{
  build_create_payload, build_update_payload, reconcile_line_items, validate_for_submission,
};
