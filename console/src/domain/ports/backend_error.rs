//! Failure modes shared by every port backed by the invoicing API.

use super::define_port_error;
use crate::domain::Error;

define_port_error! {
    /// Errors surfaced while calling the invoicing backend.
    pub enum BackendError {
        /// The backend answered with a non-success status.
        Rejected { status: u16, body: String } =>
            "HTTP error! status: {status} - {body}",
        /// The request never produced a response.
        Transport { message: String } =>
            "backend request failed: {message}",
        /// The configured request timeout elapsed.
        Timeout { message: String } =>
            "backend request timed out: {message}",
        /// A success response body could not be decoded.
        Decode { message: String } =>
            "backend response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "backend request invalid: {message}",
    }
}

impl BackendError {
    /// Status code returned by the backend, when it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected { status: 404, .. } => Error::not_found(err.to_string()),
            BackendError::InvalidRequest { message } => Error::invalid_request(message),
            other => Error::upstream_failure(other.to_string()),
        }
    }
}
