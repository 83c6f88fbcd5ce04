pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::InvoiceDraft;
pub use errors::StorageError;
pub use ports::KeyValueStore;
pub use services::{AutosaveTimer, DraftStore};
pub use value_objects::{DraftKey, SaveState};
