//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod backend_error;
mod invoice_documents;
mod report_source;
mod user_directory;

pub use backend_error::BackendError;
#[cfg(test)]
pub use invoice_documents::MockInvoiceDocuments;
pub use invoice_documents::{FixtureInvoiceDocuments, InvoiceDocument, InvoiceDocuments};
#[cfg(test)]
pub use report_source::MockReportSource;
pub use report_source::{FixtureReportSource, ReportSource};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{FixtureUserDirectory, UserDirectory};
