//! Invoicing backend outbound adapter.
//!
//! One reqwest client implements every backend-facing port: user
//! administration, reports and invoice documents.

mod client;
mod documents;
mod dto;
mod reports;
mod users;

pub use client::{BackendApiClient, BackendCredentials};
