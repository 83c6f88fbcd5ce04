pub mod billing;
pub mod draft;
pub mod invoice;
pub mod listing;
