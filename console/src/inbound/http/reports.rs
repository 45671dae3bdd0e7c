//! Reports page handlers.
//!
//! ```text
//! GET  /admin/reports   blank form
//! POST /admin/reports   kind=nit&nit=900123&startDate=2024-01-01
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{ModuleRole, ReportForm, ReportKind, ReportValidationError, ReportsView};

use super::ApiResult;
use super::state::HttpState;
use super::views::{ReportsPage, render_page};

/// Body of `POST /admin/reports`. Fields unused by the chosen kind are
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportRequest {
    pub kind: String,
    pub nit: String,
    pub module_role: String,
    pub provider_name: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
}

impl ReportRequest {
    /// Parse the select values, echoing every text field either way.
    fn into_form(self) -> (ReportForm, Result<(), ReportValidationError>) {
        let kind = self.kind.parse::<ReportKind>();
        let module_role = if self.module_role.is_empty() {
            Ok(ModuleRole::default())
        } else {
            self.module_role
                .parse::<ModuleRole>()
                .map_err(|_| ReportValidationError::UnknownModuleRole(self.module_role.clone()))
        };
        let form = ReportForm {
            kind: kind.clone().unwrap_or_default(),
            nit: self.nit,
            module_role: module_role.clone().unwrap_or_default(),
            provider_name: self.provider_name,
            category: self.category,
            start_date: self.start_date,
            end_date: self.end_date,
        };
        (form, kind.and(module_role).map(drop))
    }
}

#[get("/admin/reports")]
pub async fn reports_page(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    render_page(&ReportsPage::from(state.reports.blank()))
}

/// Validate and run the submitted report.
#[post("/admin/reports")]
pub async fn run_report(
    state: web::Data<HttpState>,
    payload: web::Form<ReportRequest>,
) -> ApiResult<HttpResponse> {
    let view = match payload.into_inner().into_form() {
        (form, Ok(())) => state.reports.submit(form).await,
        (form, Err(err)) => ReportsView {
            form,
            error: Some(err.to_string()),
            ..ReportsView::default()
        },
    };
    render_page(&ReportsPage::from(view))
}
