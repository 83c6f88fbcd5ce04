//! Business-logic core of an invoicing tool.
//!
//! The crate is organised in three layers: `domain` holds the pure
//! entities, value objects and ports, `application` holds the use cases
//! that orchestrate them, and `infrastructure` provides configuration
//! and the in-memory storage adapter.

pub mod application;
pub mod domain;
pub mod infrastructure;
