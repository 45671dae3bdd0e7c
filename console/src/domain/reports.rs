//! Report submission workflow behind the admin reports page.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::ReportSource;
use crate::domain::{ReportForm, ReportKind, ReportRow};

/// Result section of the reports page.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportOutcome {
    /// Nothing submitted yet, or the submission failed.
    #[default]
    NotRun,
    /// The query ran; an empty vector means the backend had no data.
    Rows { kind: ReportKind, rows: Vec<ReportRow> },
}

/// Everything the reports page renders.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportsView {
    pub form: ReportForm,
    pub outcome: ReportOutcome,
    pub error: Option<String>,
}

/// Validates report forms and runs them against a [`ReportSource`].
#[derive(Clone)]
pub struct ReportsService {
    source: Arc<dyn ReportSource>,
}

impl ReportsService {
    /// Service querying the given source.
    pub fn new(source: Arc<dyn ReportSource>) -> Self {
        Self { source }
    }

    /// Blank form with no results.
    pub fn blank(&self) -> ReportsView {
        ReportsView::default()
    }

    /// Run the submitted form.
    ///
    /// Validation failures return before any backend call. The submitted
    /// values are always echoed back.
    pub async fn submit(&self, form: ReportForm) -> ReportsView {
        let query = match form.to_query() {
            Ok(query) => query,
            Err(err) => {
                return ReportsView {
                    form,
                    outcome: ReportOutcome::NotRun,
                    error: Some(err.to_string()),
                };
            }
        };

        match self.source.fetch_report(&query).await {
            Ok(rows) => {
                debug!(kind = query.kind().slug(), rows = rows.len(), "report fetched");
                ReportsView {
                    form,
                    outcome: ReportOutcome::Rows {
                        kind: query.kind(),
                        rows,
                    },
                    error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, kind = query.kind().slug(), "report fetch failed");
                ReportsView {
                    form,
                    outcome: ReportOutcome::NotRun,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
