//! Console configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SAT_CONSOLE_*` environment variables or a
//! config file. Unset values fall back to the defaults below.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::outbound::backend_api::BackendCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_API_USERNAME: &str = "admin";
const DEFAULT_API_PASSWORD: &str = "password";

/// A configured value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {message}")]
pub struct SettingsError {
    pub field: &'static str,
    pub message: String,
}

impl From<SettingsError> for std::io::Error {
    fn from(err: SettingsError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}

/// Runtime settings for the admin console.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SAT_CONSOLE")]
pub struct ConsoleSettings {
    /// Socket address the console listens on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Base URL of the invoicing backend, including the `/api` prefix.
    #[ortho_config(default = DEFAULT_API_BASE_URL.to_owned())]
    pub api_base_url: String,
    /// Basic-Auth username presented to the backend.
    #[ortho_config(default = DEFAULT_API_USERNAME.to_owned())]
    pub api_username: String,
    /// Basic-Auth password presented to the backend.
    #[ortho_config(default = DEFAULT_API_PASSWORD.to_owned())]
    pub api_password: String,
    /// Per-request timeout; unset waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl ConsoleSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_str();
        raw.parse().map_err(|err| SettingsError {
            field: "bind_addr",
            message: format!("{raw:?}: {err}"),
        })
    }

    /// Parsed backend base URL; it must be able to carry path segments.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.api_base_url.as_str();
        let url = Url::parse(raw).map_err(|err| SettingsError {
            field: "api_base_url",
            message: format!("{raw:?}: {err}"),
        })?;
        if url.cannot_be_a_base() {
            return Err(SettingsError {
                field: "api_base_url",
                message: format!("{raw:?} cannot carry a path"),
            });
        }
        Ok(url)
    }

    /// Credentials presented to the backend on every request.
    pub fn credentials(&self) -> BackendCredentials {
        BackendCredentials::new(self.api_username.as_str(), self.api_password.as_str())
    }

    /// Request timeout, rejecting zero.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        match self.request_timeout_secs {
            Some(0) => Err(SettingsError {
                field: "request_timeout_secs",
                message: "must be greater than zero".to_owned(),
            }),
            other => Ok(other.map(Duration::from_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for console configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "SAT_CONSOLE_BIND_ADDR",
        "SAT_CONSOLE_API_BASE_URL",
        "SAT_CONSOLE_API_USERNAME",
        "SAT_CONSOLE_API_PASSWORD",
        "SAT_CONSOLE_REQUEST_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> ConsoleSettings {
        ConsoleSettings::load_from_iter([OsString::from("console")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:3000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.api_base_url().expect("base url").as_str(),
            "http://localhost:8080/api"
        );
        assert_eq!(settings.credentials().username, "admin");
        assert_eq!(settings.credentials().password.as_str(), "password");
        assert_eq!(settings.request_timeout().expect("timeout"), None);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SAT_CONSOLE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "SAT_CONSOLE_API_BASE_URL",
                Some("https://invoicing.internal/api".to_owned()),
            ),
            ("SAT_CONSOLE_API_USERNAME", Some("operator".to_owned())),
            ("SAT_CONSOLE_API_PASSWORD", Some("s3cret".to_owned())),
            ("SAT_CONSOLE_REQUEST_TIMEOUT_SECS", Some("15".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.bind_addr().expect("bind addr").port(), 9000);
        assert_eq!(
            settings.api_base_url().expect("base url").host_str(),
            Some("invoicing.internal")
        );
        assert_eq!(settings.credentials().username, "operator");
        assert_eq!(
            settings.request_timeout().expect("timeout"),
            Some(Duration::from_secs(15))
        );
    }

    #[rstest]
    #[case("SAT_CONSOLE_BIND_ADDR", "not-an-address", "bind_addr")]
    #[case("SAT_CONSOLE_API_BASE_URL", "mailto:ops@example.com", "api_base_url")]
    #[case("SAT_CONSOLE_REQUEST_TIMEOUT_SECS", "0", "request_timeout_secs")]
    fn invalid_values_name_the_field(
        #[case] var: &str,
        #[case] value: &str,
        #[case] field: &str,
    ) {
        let _guard = lock_env(VARS.map(|name| {
            (name, (name == var).then(|| value.to_owned()))
        }));

        let settings = load_from_empty_args();
        let err = settings
            .bind_addr()
            .map(drop)
            .and_then(|()| settings.api_base_url().map(drop))
            .and_then(|()| settings.request_timeout().map(drop))
            .expect_err("invalid value");

        assert_eq!(err.field, field);
        assert!(std::io::Error::from(err).to_string().contains(field));
    }
}
