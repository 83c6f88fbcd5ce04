pub mod delete_invoice;
pub mod list_invoices;
pub mod load_invoice;
pub mod submit_invoice;

#[cfg(test)]
pub(crate) mod test_api;

pub use delete_invoice::{
  DeleteInvoiceCommand, DeleteInvoiceUseCase, DeletionFlow, DeletionOutcome, DeletionState, Notice,
  NoticeSeverity,
};
pub use list_invoices::{ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase};
pub use load_invoice::{LoadInvoiceCommand, LoadInvoiceResponse, LoadInvoiceUseCase};
pub use submit_invoice::{SubmitInvoiceCommand, SubmitInvoiceResponse, SubmitInvoiceUseCase};
