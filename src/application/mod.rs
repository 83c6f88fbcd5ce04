//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases coordinate domain services,
//! the server API port and draft storage to fulfill editor and list
//! requirements.

pub mod draft;
pub mod invoice;
