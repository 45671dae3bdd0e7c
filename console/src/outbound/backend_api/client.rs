//! Reqwest-backed client for the invoicing backend.
//!
//! Every backend call goes through [`BackendApiClient::send`], which attaches
//! the Basic-Auth header, maps transport failures and logs the exchange. Port
//! implementations in the sibling modules only decide how to read statuses
//! and bodies.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::BackendError;

/// Basic-Auth identity presented on every backend request.
pub struct BackendCredentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl BackendCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl std::fmt::Debug for BackendCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client bound to one backend base URL, e.g. `http://localhost:8080/api`.
pub struct BackendApiClient {
    client: Client,
    base_url: Url,
    credentials: BackendCredentials,
}

/// Fully buffered backend response.
#[derive(Debug)]
pub(super) struct BackendResponse {
    pub(super) status: StatusCode,
    pub(super) content_type: Option<String>,
    pub(super) body: Vec<u8>,
}

impl BackendResponse {
    /// Keep 2xx responses; turn anything else into [`BackendError::Rejected`].
    pub(super) fn into_success(self) -> Result<Self, BackendError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(self.into_rejection())
        }
    }

    /// Status plus body text, verbatim.
    pub(super) fn into_rejection(self) -> BackendError {
        BackendError::rejected(
            self.status.as_u16(),
            String::from_utf8_lossy(&self.body).trim().to_owned(),
        )
    }

    pub(super) fn decode<T>(&self) -> Result<T, BackendError>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.body).map_err(|error| {
            BackendError::decode(format!(
                "invalid JSON payload ({error}): {}",
                body_preview(&self.body)
            ))
        })
    }
}

impl BackendApiClient {
    /// Build a client; `timeout` of `None` waits indefinitely.
    ///
    /// ```rust,ignore
    /// let client = BackendApiClient::new(base_url, credentials, None)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        credentials: BackendCredentials,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let builder = Client::builder();
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Ok(Self {
            client: builder.build()?,
            base_url,
            credentials,
        })
    }

    /// Append percent-encoded path segments to the base URL.
    pub(super) fn endpoint<'a, I>(&self, segments: I) -> Result<Url, BackendError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                BackendError::transport(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue one authenticated request and buffer the response.
    ///
    /// Non-success statuses are returned, not raised, so callers can decide
    /// which of them carry meaning.
    pub(super) async fn send<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<BackendResponse, BackendError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.as_str()),
            );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|error| {
            warn!(%method, path = url.path(), error = %error, "backend request failed");
            map_transport_error(error)
        })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(map_transport_error)?
            .to_vec();

        if status.is_success() {
            debug!(%method, path = url.path(), status = status.as_u16(), "backend responded");
        } else {
            warn!(
                %method,
                path = url.path(),
                status = status.as_u16(),
                body = %body_preview(&body),
                "backend returned non-success status"
            );
        }

        Ok(BackendResponse {
            status,
            content_type,
            body,
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(error.to_string())
    } else {
        BackendError::transport(error.to_string())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
        format!("{preview}...")
    } else {
        compact
    }
}
