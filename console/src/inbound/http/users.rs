//! User management page handlers.
//!
//! ```text
//! GET  /admin/users                       all users
//! GET  /admin/users?username=clinic       one user
//! POST /admin/users                       create
//! GET  /admin/users/{username}/edit       open the credential form
//! POST /admin/users/{username}/credentials
//! POST /admin/users/{id}/delete
//! ```
//!
//! Browsers cannot send `PUT` or `DELETE` from a plain form, so mutations
//! are `POST`s to action paths. Backend failures are rendered on the page.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{CreateUserForm, EditCredentialsForm, Error, ModuleCredentials, UserId};

use super::ApiResult;
use super::state::HttpState;
use super::views::{UsersPage, render_page};

/// Query string of `GET /admin/users`.
#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    /// Present when the search form was submitted, even if blank.
    pub username: Option<String>,
}

/// Module credential inputs shared by the create and edit forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialFields {
    pub hospital_service_credentials: String,
    pub pharmacy_service_credentials: String,
    pub insurance_service_credentials: String,
}

impl From<CredentialFields> for ModuleCredentials {
    fn from(value: CredentialFields) -> Self {
        Self {
            hospital: value.hospital_service_credentials,
            pharmacy: value.pharmacy_service_credentials,
            insurance: value.insurance_service_credentials,
        }
    }
}

/// Body of `POST /admin/users`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(flatten)]
    pub credentials: CredentialFields,
}

impl From<CreateUserRequest> for CreateUserForm {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            username: value.username,
            password: value.password,
            role: value.role,
            credentials: value.credentials.into(),
        }
    }
}

/// Body of `POST /admin/users/{username}/credentials`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCredentialsRequest {
    pub new_password: String,
    #[serde(flatten)]
    pub credentials: CredentialFields,
}

/// Body of `POST /admin/users/{id}/delete`; the name is only used in the
/// confirmation notice.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteUserRequest {
    pub username: String,
}

/// Show every user, or the search result when `username` is supplied.
#[get("/admin/users")]
pub async fn users_page(
    state: web::Data<HttpState>,
    query: web::Query<UsersQuery>,
) -> ApiResult<HttpResponse> {
    let view = match query.into_inner().username {
        Some(username) => state.users.search(&username).await,
        None => state.users.show_all().await,
    };
    render_page(&UsersPage::from(view))
}

#[post("/admin/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Form<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let view = state.users.create_user(payload.into_inner().into()).await;
    render_page(&UsersPage::from(view))
}

#[get("/admin/users/{username}/edit")]
pub async fn edit_credentials(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let view = state.users.begin_edit(&path.into_inner()).await;
    render_page(&UsersPage::from(view))
}

/// Apply the credential form. A blank `newPassword` keeps the old password.
#[post("/admin/users/{username}/credentials")]
pub async fn update_credentials(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Form<UpdateCredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let UpdateCredentialsRequest {
        new_password,
        credentials,
    } = payload.into_inner();
    let form = EditCredentialsForm {
        username: path.into_inner(),
        new_password,
        credentials: credentials.into(),
    };
    let view = state.users.update_credentials(form).await;
    render_page(&UsersPage::from(view))
}

/// Delete by id. A user the backend no longer knows is reported as deleted.
#[post("/admin/users/{id}/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Form<DeleteUserRequest>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();
    let id = raw_id.parse::<UserId>().map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "id", "code": "invalid_user_id" }))
    })?;
    let view = state.users.delete_user(id, &payload.username).await;
    render_page(&UsersPage::from(view))
}

#[cfg(test)]
mod tests;
