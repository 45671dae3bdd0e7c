//! Driven port for the backend's invoicing reports.

use async_trait::async_trait;

use super::BackendError;
use crate::domain::{ReportQuery, ReportRow};

/// Port running one validated report query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Rows matching `query`; an empty vector when the backend has no data.
    async fn fetch_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>, BackendError>;
}

/// Fixture source that never has data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureReportSource;

#[async_trait]
impl ReportSource for FixtureReportSource {
    async fn fetch_report(&self, _query: &ReportQuery) -> Result<Vec<ReportRow>, BackendError> {
        Ok(Vec::new())
    }
}
