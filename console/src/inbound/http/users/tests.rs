//! Tests for the user management page handlers.

use super::*;
use crate::domain::ports::{BackendError, MockUserDirectory};
use crate::domain::{CredentialsUpdate, DeleteOutcome, NewUser, User, UserRole};
use crate::inbound::http::state::HttpStatePorts;
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use serde_json::Value;
use std::sync::Arc;

fn user(id: i64, username: &str) -> User {
    User::new(
        UserId::new(id),
        username,
        UserRole::ModuleHospital,
        true,
        ModuleCredentials {
            hospital: format!("{username}-h"),
            ..ModuleCredentials::default()
        },
    )
}

fn state(directory: MockUserDirectory) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(HttpStatePorts {
        users: Arc::new(directory),
        ..HttpStatePorts::default()
    }))
}

fn test_app(
    directory: MockUserDirectory,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state(directory))
        .service(users_page)
        .service(create_user)
        .service(edit_credentials)
        .service(update_credentials)
        .service(delete_user)
}

async fn html_of(directory: MockUserDirectory, request: actix_test::TestRequest) -> String {
    let app = actix_test::init_service(test_app(directory)).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = actix_test::read_body(response).await;
    String::from_utf8(body.to_vec()).expect("utf-8 page")
}

#[actix_web::test]
async fn lists_all_users_without_a_query() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(vec![user(1, "clinic"), user(2, "farmacia")]));

    let html = html_of(directory, actix_test::TestRequest::get().uri("/admin/users")).await;

    assert!(html.contains("Existing Users"));
    assert!(html.contains("clinic"));
    assert!(html.contains("farmacia"));
    assert!(html.contains("/admin/users/2/delete"));
}

#[actix_web::test]
async fn blank_search_is_rejected_locally() {
    let directory = MockUserDirectory::new();

    let html = html_of(
        directory,
        actix_test::TestRequest::get().uri("/admin/users?username=%20%20"),
    )
    .await;

    assert!(html.contains("Please enter a username to search."));
    assert!(html.contains("No users found. Use search above or create new users."));
}

#[actix_web::test]
async fn search_hit_replaces_the_full_list() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_find_user()
        .withf(|username: &str| username == "clinic")
        .times(1)
        .return_once(|_| Ok(Some(user(1, "clinic"))));

    let html = html_of(
        directory,
        actix_test::TestRequest::get().uri("/admin/users?username=clinic"),
    )
    .await;

    assert!(html.contains("Searched User Details"));
    assert!(!html.contains("Existing Users"));
}

#[actix_web::test]
async fn create_posts_form_fields_and_refreshes() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_create_user()
        .withf(|draft: &NewUser| {
            draft.username() == "clinic"
                && draft.role() == UserRole::ModulePharmacy
                && draft.credentials().pharmacy == "p-key"
        })
        .times(1)
        .return_once(|_| Ok(()));
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(vec![user(1, "clinic")]));

    let html = html_of(
        directory,
        actix_test::TestRequest::post().uri("/admin/users").set_form([
            ("username", "clinic"),
            ("password", "secret1"),
            ("role", "MODULE_PHARMACY"),
            ("hospitalServiceCredentials", ""),
            ("pharmacyServiceCredentials", "p-key"),
            ("insuranceServiceCredentials", ""),
        ]),
    )
    .await;

    assert!(html.contains("User clinic created successfully!"));
}

#[actix_web::test]
async fn create_without_password_keeps_the_form() {
    let directory = MockUserDirectory::new();

    let html = html_of(
        directory,
        actix_test::TestRequest::post()
            .uri("/admin/users")
            .set_form([("username", "clinic"), ("role", "ADMINISTRATOR")]),
    )
    .await;

    assert!(html.contains("Error: Username, password, and role are required."));
    assert!(html.contains("value=\"clinic\""));
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_find_user()
        .times(1)
        .return_once(|_| Ok(Some(user(1, "clinic"))));
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(vec![user(1, "clinic")]));

    let html = html_of(
        directory,
        actix_test::TestRequest::get().uri("/admin/users/clinic/edit"),
    )
    .await;

    assert!(html.contains("Edit Credentials for clinic"));
    assert!(html.contains("action=\"/admin/users/clinic/credentials\""));
    assert!(html.contains("value=\"clinic-h\""));
}

#[actix_web::test]
async fn blank_new_password_is_omitted() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_update_credentials()
        .withf(|update: &CredentialsUpdate| {
            update.username() == "clinic"
                && update.new_password().is_none()
                && update.credentials().insurance == "i-2"
        })
        .times(1)
        .return_once(|_| Ok(()));
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(Vec::new()));

    let html = html_of(
        directory,
        actix_test::TestRequest::post()
            .uri("/admin/users/clinic/credentials")
            .set_form([("newPassword", ""), ("insuranceServiceCredentials", "i-2")]),
    )
    .await;

    assert!(html.contains("Credentials for user clinic updated successfully!"));
}

#[actix_web::test]
async fn deleting_a_missing_user_reads_as_success() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_user()
        .withf(|id: &UserId| *id == UserId::new(7))
        .times(1)
        .return_once(|_| Ok(DeleteOutcome::NotFound));
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(Vec::new()));

    let html = html_of(
        directory,
        actix_test::TestRequest::post()
            .uri("/admin/users/7/delete")
            .set_form([("username", "ghost")]),
    )
    .await;

    assert!(html.contains("User ghost deleted successfully (or was not found)."));
}

#[actix_web::test]
async fn refused_delete_shows_backend_error() {
    let mut directory = MockUserDirectory::new();
    directory
        .expect_delete_user()
        .times(1)
        .return_once(|_| Err(BackendError::rejected(403_u16, "Forbidden")));
    directory
        .expect_list_users()
        .times(1)
        .return_once(|| Ok(Vec::new()));

    let html = html_of(
        directory,
        actix_test::TestRequest::post()
            .uri("/admin/users/7/delete")
            .set_form([("username", "clinic")]),
    )
    .await;

    assert!(html.contains("Error: HTTP error! status: 403 - Forbidden"));
}

#[actix_web::test]
async fn non_numeric_delete_id_is_a_bad_request() {
    let app = actix_test::init_service(test_app(MockUserDirectory::new())).await;
    let request = actix_test::TestRequest::post()
        .uri("/admin/users/abc/delete")
        .set_form([("username", "clinic")])
        .to_request();

    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = actix_test::read_body(response).await;
    let value: Value = serde_json::from_slice(&body).expect("error payload");
    assert_eq!(
        value.get("code").and_then(Value::as_str),
        Some("invalid_request")
    );
    assert_eq!(
        value
            .get("details")
            .and_then(|details| details.get("field"))
            .and_then(Value::as_str),
        Some("id")
    );
}
