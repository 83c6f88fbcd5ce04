//! Infrastructure layer
//!
//! Concrete adapters behind the domain's ports, plus configuration
//! loading. The real key-value store lives in the embedding shell; this
//! crate ships an in-memory one for tests and headless use.

pub mod config;
pub mod storage;

pub use config::Config;
