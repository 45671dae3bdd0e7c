//! Static pages: the landing page and module integration notes.

use actix_web::{HttpResponse, get};

use super::ApiResult;
use super::views::{HomePage, ModuleInfoPage, render_page};

/// Landing page.
#[get("/")]
pub async fn home() -> ApiResult<HttpResponse> {
    render_page(&HomePage::default())
}

/// Informational page describing how client modules integrate.
#[get("/module-info")]
pub async fn module_info() -> ApiResult<HttpResponse> {
    render_page(&ModuleInfoPage::default())
}
