//! Outbound adapters implementing domain ports for external services.
//!
//! Adapters are thin translators between domain types and the invoicing
//! backend's HTTP contract. They contain no workflow logic.

pub mod backend_api;
