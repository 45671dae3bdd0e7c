//! Builders for HTTP state backed by the invoicing API.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use console::inbound::http::state::{HttpState, HttpStatePorts};
use console::outbound::backend_api::BackendApiClient;

use super::ServerConfig;

/// Build the shared HTTP state, wiring every port to one backend client.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(super) fn build_http_state(config: ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let ServerConfig {
        api_base_url,
        credentials,
        request_timeout,
        ..
    } = config;
    info!(
        base_url = %api_base_url,
        username = %credentials.username,
        timeout_secs = request_timeout.map(|t| t.as_secs()),
        "connecting console to invoicing backend"
    );
    let client = BackendApiClient::new(api_base_url, credentials, request_timeout)
        .map_err(|err| std::io::Error::other(format!("backend client setup failed: {err}")))?;
    let ports = HttpStatePorts::shared(Arc::new(client));
    Ok(web::Data::new(HttpState::new(ports)))
}
