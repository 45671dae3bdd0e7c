//! Askama page templates and the view models that feed them.
//!
//! Values are formatted here so templates stay free of logic beyond
//! conditionals and loops.

use actix_web::HttpResponse;
use actix_web::http::header::ContentType;
use askama::Template;
use tracing::error;
use url::Url;

use crate::domain::{
    Error, ModuleCredentials, ModuleRole, Notice, ReportForm, ReportKind, ReportOutcome,
    ReportRow, ReportsView, User, UserListing, UserManagementView, UserRole,
};

use super::ApiResult;

/// Render a template into a `text/html` 200 response.
pub fn render_page<T: Template>(template: &T) -> ApiResult<HttpResponse> {
    let body = template.render().map_err(|err| {
        error!(error = %err, "template rendering failed");
        Error::internal(format!("template rendering failed: {err}"))
    })?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body))
}

/// Console-relative path built from percent-encoded segments.
fn console_path<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let Ok(mut url) = Url::parse("http://console.invalid/") else {
        return "/".to_owned();
    };
    if let Ok(mut path) = url.path_segments_mut() {
        path.clear().extend(segments);
    }
    url.path().to_owned()
}

/// One `<option>` of a `<select>`.
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub product: &'static str,
}

impl Default for HomePage {
    fn default() -> Self {
        Self {
            product: "SAT Simulation",
        }
    }
}

#[derive(Template)]
#[template(path = "module_info.html")]
pub struct ModuleInfoPage {
    pub modules: Vec<&'static str>,
}

impl Default for ModuleInfoPage {
    fn default() -> Self {
        Self {
            modules: ModuleRole::ALL.iter().map(|role| role.as_str()).collect(),
        }
    }
}

/// One row of a user table.
pub struct UserRowView {
    pub id: String,
    pub username: String,
    pub role: &'static str,
    pub admin_creator: &'static str,
    pub edit_href: String,
    pub delete_action: String,
    pub delete_prompt: String,
}

impl From<&User> for UserRowView {
    fn from(user: &User) -> Self {
        let id = user.id().to_string();
        Self {
            edit_href: console_path(["admin", "users", user.username(), "edit"]),
            delete_action: console_path(["admin", "users", id.as_str(), "delete"]),
            delete_prompt: format!(
                "Are you sure you want to delete user {} (ID: {id})?",
                user.username()
            ),
            username: user.username().to_owned(),
            role: user.role().as_str(),
            admin_creator: if user.admin_creator() { "Yes" } else { "No" },
            id,
        }
    }
}

/// Credential edit form contents.
pub struct EditFormView {
    pub username: String,
    pub action: String,
    pub credentials: ModuleCredentials,
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersPage {
    pub search_username: String,
    pub search_error: Option<String>,
    pub success: Option<String>,
    pub error: Option<String>,
    pub searched: Option<UserRowView>,
    pub users: Vec<UserRowView>,
    pub list_error: Option<String>,
    pub create_username: String,
    pub create_credentials: ModuleCredentials,
    pub role_options: Vec<SelectOption>,
    pub editing: Option<EditFormView>,
}

impl From<UserManagementView> for UsersPage {
    fn from(view: UserManagementView) -> Self {
        let (success, error) = match view.notice {
            Some(Notice::Success(message)) => (Some(message), None),
            Some(Notice::Error(message)) => (None, Some(message)),
            None => (None, None),
        };
        let (searched, users, list_error) = match view.listing {
            UserListing::Hidden => (None, Vec::new(), None),
            UserListing::All(users) => (None, users.iter().map(UserRowView::from).collect(), None),
            UserListing::Searched(user) => (Some(UserRowView::from(&user)), Vec::new(), None),
            UserListing::LoadFailed(message) => (None, Vec::new(), Some(message)),
        };
        let role_options = UserRole::ALL
            .iter()
            .map(|role| SelectOption {
                value: role.as_str(),
                label: role.as_str(),
                selected: role.as_str() == view.create_form.role,
            })
            .collect();
        let editing = view.editing.map(|form| EditFormView {
            action: console_path(["admin", "users", form.username.as_str(), "credentials"]),
            username: form.username,
            credentials: form.credentials,
        });

        Self {
            search_username: view.search_username,
            search_error: view.search_error,
            success,
            error,
            searched,
            users,
            list_error,
            create_username: view.create_form.username,
            create_credentials: view.create_form.credentials,
            role_options,
            editing,
        }
    }
}

/// One row of the report results table.
pub struct ReportRowView {
    pub order_id: String,
    pub client_name: String,
    pub client_nit: String,
    pub provider: String,
    pub order_date: String,
    pub total_taxes: String,
    pub total_amount: String,
    pub document_href: Option<String>,
}

const NOT_AVAILABLE: &str = "N/A";

/// Two decimals with ties rounded away from zero, e.g. `0.125` is `0.13`.
fn amount(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", (v * 100.0).round() / 100.0))
        .unwrap_or_default()
}

impl From<&ReportRow> for ReportRowView {
    fn from(row: &ReportRow) -> Self {
        Self {
            order_id: row.order_id.to_string(),
            client_name: row.client_name.clone(),
            client_nit: row.client_nit.clone(),
            provider: row
                .provider_name
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_owned()),
            order_date: row.order_date.map_or_else(
                || NOT_AVAILABLE.to_owned(),
                |date| date.format("%Y-%m-%d %H:%M:%S").to_string(),
            ),
            total_taxes: amount(row.total_taxes),
            total_amount: amount(row.total_amount),
            document_href: row.invoice_pdf_path.as_deref().map(|path| {
                console_path(
                    ["admin", "documents"]
                        .into_iter()
                        .chain(path.split('/').filter(|segment| !segment.is_empty())),
                )
            }),
        }
    }
}

/// Results section of the reports page.
pub struct ReportResultsView {
    pub heading: String,
    pub rows: Vec<ReportRowView>,
}

#[derive(Template)]
#[template(path = "reports.html")]
pub struct ReportsPage {
    pub kind_options: Vec<SelectOption>,
    pub module_options: Vec<SelectOption>,
    pub nit: String,
    pub provider_name: String,
    pub category: String,
    pub start_date: String,
    pub end_date: String,
    pub error: Option<String>,
    pub results: Option<ReportResultsView>,
}

impl From<ReportsView> for ReportsPage {
    fn from(view: ReportsView) -> Self {
        let ReportForm {
            kind,
            nit,
            module_role,
            provider_name,
            category,
            start_date,
            end_date,
        } = view.form;
        let results = match view.outcome {
            ReportOutcome::NotRun => None,
            ReportOutcome::Rows { kind, rows } => Some(ReportResultsView {
                heading: format!("Report Results for: {}", kind.slug().to_uppercase()),
                rows: rows.iter().map(ReportRowView::from).collect(),
            }),
        };
        Self {
            kind_options: ReportKind::ALL
                .iter()
                .map(|option| SelectOption {
                    value: option.slug(),
                    label: option.label(),
                    selected: *option == kind,
                })
                .collect(),
            module_options: ModuleRole::ALL
                .iter()
                .map(|option| SelectOption {
                    value: option.as_str(),
                    label: option.as_str(),
                    selected: *option == module_role,
                })
                .collect(),
            nit,
            provider_name,
            category,
            start_date,
            end_date,
            error: view.error,
            results,
        }
    }
}
