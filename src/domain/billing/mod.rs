pub mod entities;
pub mod value_objects;

pub use entities::{CatalogProduct, CustomerRef, InvoiceTotals, LineItem, LineItemTotals};
pub use value_objects::{Currency, ValueObjectError, VatRate, format_currency, round_money};
