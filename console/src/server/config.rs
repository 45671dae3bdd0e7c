//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use console::outbound::backend_api::BackendCredentials;
use console::settings::ConsoleSettings;
use url::Url;

/// Resolved configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) api_base_url: Url,
    pub(crate) credentials: BackendCredentials,
    pub(crate) request_timeout: Option<Duration>,
}

impl ServerConfig {
    /// Resolve settings, failing on the first invalid value.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] naming the offending setting.
    pub fn from_settings(settings: &ConsoleSettings) -> std::io::Result<Self> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            api_base_url: settings.api_base_url()?,
            credentials: settings.credentials(),
            request_timeout: settings.request_timeout()?,
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
