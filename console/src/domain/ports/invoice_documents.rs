//! Driven port for generated invoice documents.

use async_trait::async_trait;

use super::BackendError;

/// Document bytes plus the metadata needed to stream them to a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDocument {
    /// MIME type reported by the backend.
    pub content_type: String,
    /// Last path segment, offered as the download name.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Port fetching an invoice document by its path under the invoicing root.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceDocuments: Send + Sync {
    /// Fetch the document at `path`, e.g. `invoices/download/INV-1.pdf`.
    async fn fetch_document(&self, path: &str) -> Result<InvoiceDocument, BackendError>;
}

/// Fixture store holding no documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureInvoiceDocuments;

#[async_trait]
impl InvoiceDocuments for FixtureInvoiceDocuments {
    async fn fetch_document(&self, _path: &str) -> Result<InvoiceDocument, BackendError> {
        Err(BackendError::rejected(404_u16, "document not found"))
    }
}
