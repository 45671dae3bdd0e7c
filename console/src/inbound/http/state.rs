//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on domain
//! workflows and ports, so tests can swap in doubles without any I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureInvoiceDocuments, FixtureReportSource, FixtureUserDirectory, InvoiceDocuments,
    ReportSource, UserDirectory,
};
use crate::domain::{ReportsService, UserManagementService};

/// Port implementations backing the HTTP state.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users: Arc<dyn UserDirectory>,
    pub reports: Arc<dyn ReportSource>,
    pub documents: Arc<dyn InvoiceDocuments>,
}

impl HttpStatePorts {
    /// Use one adapter for every port.
    pub fn shared<A>(adapter: Arc<A>) -> Self
    where
        A: UserDirectory + ReportSource + InvoiceDocuments + 'static,
    {
        Self {
            users: adapter.clone(),
            reports: adapter.clone(),
            documents: adapter,
        }
    }
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            users: Arc::new(FixtureUserDirectory),
            reports: Arc::new(FixtureReportSource),
            documents: Arc::new(FixtureInvoiceDocuments),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: UserManagementService,
    pub reports: ReportsService,
    pub documents: Arc<dyn InvoiceDocuments>,
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users,
            reports,
            documents,
        } = ports;
        Self {
            users: UserManagementService::new(users),
            reports: ReportsService::new(reports),
            documents,
        }
    }
}
