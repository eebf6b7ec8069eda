use std::error::Error;
use std::fmt;

use warp::reject::Reject;

use crate::constants::{ERROR_CANCELLED, ERROR_NO_SUITABLE_MODEL};

/// Error type for the chat relay
#[derive(Debug, Clone)]
pub struct RelayError {
    pub message: String,
    pub status_code: u16,
    kind: RelayErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayErrorKind {
    MissingCredential,
    NoSuitableModel,
    RemoteUnavailable,
    RequestCancelled,
    BadRequest,
    InternalServerError,
}

impl RelayError {
    pub fn missing_credential(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 500,
            kind: RelayErrorKind::MissingCredential,
        }
    }

    pub fn no_suitable_model() -> Self {
        Self {
            message: ERROR_NO_SUITABLE_MODEL.to_string(),
            status_code: 503,
            kind: RelayErrorKind::NoSuitableModel,
        }
    }

    /// Remote listing or generation failed. `remote_status` is the HTTP status
    /// Gemini answered with, if it answered at all.
    pub fn remote_unavailable(message: &str, remote_status: Option<u16>) -> Self {
        Self {
            message: message.to_string(),
            status_code: remote_status.unwrap_or(500),
            kind: RelayErrorKind::RemoteUnavailable,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 400,
            kind: RelayErrorKind::BadRequest,
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 500,
            kind: RelayErrorKind::InternalServerError,
        }
    }

    pub fn request_cancelled() -> Self {
        Self {
            message: ERROR_CANCELLED.to_string(),
            status_code: 499,
            kind: RelayErrorKind::RequestCancelled,
        }
    }

    pub fn kind(&self) -> RelayErrorKind {
        self.kind
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, RelayErrorKind::RequestCancelled)
    }

    pub fn is_remote_unavailable(&self) -> bool {
        matches!(self.kind, RelayErrorKind::RemoteUnavailable)
    }

    /// True when Gemini itself reported the requested model as unknown.
    pub fn is_remote_model_missing(&self) -> bool {
        self.is_remote_unavailable() && self.status_code == 404
    }

    /// Status code presented to the browser. Remote failures are always
    /// reported as 500 regardless of what Gemini answered.
    pub fn reply_status(&self) -> u16 {
        match self.kind {
            RelayErrorKind::RemoteUnavailable | RelayErrorKind::MissingCredential => 500,
            _ => self.status_code,
        }
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelayError {}: {}", self.status_code, self.message)
    }
}

impl Error for RelayError {}

impl Reject for RelayError {}

#[macro_export]
macro_rules! check_cancelled {
    ($token:expr) => {
        if $token.is_cancelled() {
            return Err($crate::error::RelayError::request_cancelled());
        }
    };
}
